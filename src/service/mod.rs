//! Resource stores: the generic CRUD contract and its PostgreSQL and in-memory implementations.

mod crud;
mod memory;
mod validation;

pub use crud::PgStore;
pub use memory::MemoryStore;
pub use validation::{is_truthy, RequestValidator};

use crate::config::Resource;
use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// A persisted row keyed by column name, `id` included.
pub type Row = Map<String, Value>;

/// Query interface to the relational store. No business logic: each call is one round trip.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Every row of the table.
    async fn list_all(&self, resource: &'static Resource) -> Result<Vec<Row>, StoreError>;

    /// The row with this id, or `None`.
    async fn get_by_id(&self, resource: &'static Resource, id: i64) -> Result<Option<Row>, StoreError>;

    /// Write the declared columns present in `fields`; returns the persisted row.
    async fn insert(&self, resource: &'static Resource, fields: &Row) -> Result<Row, StoreError>;

    /// Change the declared columns present in `fields`; returns rows affected.
    async fn update(&self, resource: &'static Resource, id: i64, fields: &Row) -> Result<u64, StoreError>;

    /// Returns rows removed.
    async fn delete(&self, resource: &'static Resource, id: i64) -> Result<u64, StoreError>;

    /// Connectivity probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
