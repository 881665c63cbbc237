//! Create the resource tables: identity primary key, NOT NULL for required columns,
//! foreign keys to parent tables. Parents are created first.

use crate::config::{validate_resources, Resource, ID_COLUMN};
use crate::error::{AppError, StoreError};
use crate::sql::quoted;
use sqlx::PgPool;

/// `CREATE TABLE IF NOT EXISTS` for one resource.
pub fn create_table_sql(resource: &Resource) -> String {
    let mut col_defs = vec![format!(
        "{} INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY",
        quoted(ID_COLUMN)
    )];
    for f in resource.fields {
        let mut def = format!("{} {}", quoted(f.name), f.kind.pg_type());
        if f.required {
            def.push_str(" NOT NULL");
        }
        if let Some(parent) = f.references {
            def.push_str(&format!(" REFERENCES {} ({})", quoted(parent), quoted(ID_COLUMN)));
        }
        col_defs.push(def);
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quoted(resource.table),
        col_defs.join(",\n  ")
    )
}

/// Validates the resource list, then creates any missing tables. Existing tables are left alone.
pub async fn apply_migrations(pool: &PgPool, resources: &[&Resource]) -> Result<(), AppError> {
    validate_resources(resources)?;
    for r in resources {
        let sql = create_table_sql(r);
        tracing::debug!(table = r.table, sql = %sql, "migrate");
        sqlx::query(&sql).execute(pool).await.map_err(StoreError::from)?;
    }
    tracing::info!(tables = resources.len(), "schema ready");
    Ok(())
}
