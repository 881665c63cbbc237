//! PostgreSQL bootstrap: create the target database if needed and open the pool.

use crate::error::StoreError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Connect to the `postgres` admin database and create the one named in `database_url` if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url);
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", crate::sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Split `postgres://host/db?opts` into the admin URL (`postgres://host/postgres`) and `db`.
fn parse_db_name_from_url(url: &str) -> (String, String) {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let Some(slash) = url[scheme_end..].find('/').map(|i| i + scheme_end) else {
        return (url.to_string(), String::new());
    };
    let path_and_query = &url[slash + 1..];
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let admin_url = format!("{}/postgres", &url[..slash]);
    (admin_url, db_name.to_string())
}
