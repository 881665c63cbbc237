//! Server: reads settings from the environment, prepares the store, serves the API.

use guild_board::{
    app, apply_migrations, connect, ensure_database_exists, validate_resources, AppState, DatabaseTarget,
    MemoryStore, PgStore, ResourceStore, Settings, RESOURCES,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("guild_board=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    validate_resources(RESOURCES)?;

    let store: Arc<dyn ResourceStore> = match &settings.database {
        DatabaseTarget::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
        DatabaseTarget::Postgres(url) => {
            if settings.run_migrations {
                ensure_database_exists(url).await?;
            }
            let pool = connect(url, settings.max_connections).await?;
            if settings.run_migrations {
                apply_migrations(&pool, RESOURCES).await?;
            }
            Arc::new(PgStore::new(pool))
        }
    };

    let state = AppState::new(store, settings.mode);
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(mode = ?settings.mode, "listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
