//! Guild board: REST CRUD over users, characters, notices and notice sign-ups.

pub mod boundary;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{validate_resources, DatabaseTarget, DeploymentMode, Resource, Settings, RESOURCES};
pub use error::{AppError, ConfigError, StoreError};
pub use migration::apply_migrations;
pub use routes::{app, common_routes, entity_routes};
pub use service::{MemoryStore, PgStore, ResourceStore};
pub use state::AppState;
pub use store::{connect, ensure_database_exists};
