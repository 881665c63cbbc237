//! Generic CRUD execution against PostgreSQL.

use crate::config::{ColumnKind, Resource, ID_COLUMN};
use crate::error::StoreError;
use crate::service::{ResourceStore, Row};
use crate::sql::{coerce_fields, delete, insert, select_all, select_by_id, update, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    async fn query_many(&self, resource: &Resource, q: &QueryBuf) -> Result<Vec<Row>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = p.bind(query);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(|r| row_to_json(resource, r)).collect()
    }

    async fn query_optional(&self, resource: &Resource, q: &QueryBuf) -> Result<Option<Row>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = p.bind(query);
        }
        let row = query.fetch_optional(&self.pool).await?;
        row.map(|r| row_to_json(resource, &r)).transpose()
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = p.bind(query);
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl ResourceStore for PgStore {
    async fn list_all(&self, resource: &'static Resource) -> Result<Vec<Row>, StoreError> {
        self.query_many(resource, &select_all(resource)).await
    }

    async fn get_by_id(&self, resource: &'static Resource, id: i64) -> Result<Option<Row>, StoreError> {
        self.query_optional(resource, &select_by_id(resource, id)).await
    }

    async fn insert(&self, resource: &'static Resource, fields: &Row) -> Result<Row, StoreError> {
        let values = coerce_fields(resource, fields)?;
        let q = insert(resource, &values);
        self.query_optional(resource, &q)
            .await?
            .ok_or(StoreError::Db(sqlx::Error::RowNotFound))
    }

    async fn update(&self, resource: &'static Resource, id: i64, fields: &Row) -> Result<u64, StoreError> {
        let values = coerce_fields(resource, fields)?;
        if values.is_empty() {
            return Ok(0);
        }
        self.execute(&update(resource, id, &values)).await
    }

    async fn delete(&self, resource: &'static Resource, id: i64) -> Result<u64, StoreError> {
        self.execute(&delete(resource, id)).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Decode `id` and the declared columns using each column's kind.
fn row_to_json(resource: &Resource, row: &PgRow) -> Result<Row, StoreError> {
    use sqlx::Row as _;
    let mut map = Row::new();
    let id: i32 = row.try_get(ID_COLUMN)?;
    map.insert(ID_COLUMN.to_string(), Value::Number(id.into()));
    for field in resource.fields {
        let value = match field.kind {
            ColumnKind::Integer => row
                .try_get::<Option<i32>, _>(field.name)?
                .map(|n| Value::Number(n.into())),
            ColumnKind::Text => row
                .try_get::<Option<String>, _>(field.name)?
                .map(Value::String),
        };
        map.insert(field.name.to_string(), value.unwrap_or(Value::Null));
    }
    Ok(map)
}
