//! In-process store with identity columns, NOT NULL and foreign-key checks on write.
//! Used by the test suite and for running without a database.

use crate::config::{Resource, ID_COLUMN};
use crate::error::StoreError;
use crate::service::{ResourceStore, Row};
use crate::sql::{coerce_fields, FieldValue};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

#[derive(Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Row>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<&'static str, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> std::sync::MutexGuard<'_, HashMap<&'static str, Table>> {
        // A poisoned lock only means another request panicked mid-call; the map is still usable.
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn check_row(
    tables: &HashMap<&'static str, Table>,
    resource: &Resource,
    values: &[(&crate::config::Field, FieldValue)],
) -> Result<(), StoreError> {
    for (field, value) in values {
        match value {
            FieldValue::Null if field.required => {
                return Err(StoreError::NotNull {
                    table: resource.table.to_string(),
                    column: field.name.to_string(),
                });
            }
            FieldValue::Integer(id) => {
                if let Some(parent) = field.references {
                    let exists = tables.get(parent).is_some_and(|t| t.rows.contains_key(id));
                    if !exists {
                        return Err(StoreError::ForeignKey {
                            table: resource.table.to_string(),
                            column: field.name.to_string(),
                            value: id.to_string(),
                            references: parent.to_string(),
                        });
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn list_all(&self, resource: &'static Resource) -> Result<Vec<Row>, StoreError> {
        let tables = self.tables();
        Ok(tables
            .get(resource.table)
            .map(|t| t.rows.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get_by_id(&self, resource: &'static Resource, id: i64) -> Result<Option<Row>, StoreError> {
        let tables = self.tables();
        Ok(tables.get(resource.table).and_then(|t| t.rows.get(&id).cloned()))
    }

    async fn insert(&self, resource: &'static Resource, fields: &Row) -> Result<Row, StoreError> {
        let values = coerce_fields(resource, fields)?;
        let mut tables = self.tables();

        // Columns left out of the insert are NULL.
        for field in resource.fields.iter().filter(|f| f.required) {
            if !values.iter().any(|(f, _)| f.name == field.name) {
                return Err(StoreError::NotNull {
                    table: resource.table.to_string(),
                    column: field.name.to_string(),
                });
            }
        }
        check_row(&tables, resource, &values)?;

        let table = tables.entry(resource.table).or_default();
        table.last_id += 1;
        let id = table.last_id;
        let mut row = Row::new();
        row.insert(ID_COLUMN.to_string(), Value::Number(id.into()));
        for field in resource.fields {
            row.insert(field.name.to_string(), Value::Null);
        }
        for (field, value) in &values {
            row.insert(field.name.to_string(), value.to_json());
        }
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, resource: &'static Resource, id: i64, fields: &Row) -> Result<u64, StoreError> {
        let values = coerce_fields(resource, fields)?;
        if values.is_empty() {
            return Ok(0);
        }
        let mut tables = self.tables();
        let exists = tables.get(resource.table).is_some_and(|t| t.rows.contains_key(&id));
        if !exists {
            return Ok(0);
        }
        check_row(&tables, resource, &values)?;
        let Some(row) = tables.get_mut(resource.table).and_then(|t| t.rows.get_mut(&id)) else {
            return Ok(0);
        };
        for (field, value) in &values {
            row.insert(field.name.to_string(), value.to_json());
        }
        Ok(1)
    }

    async fn delete(&self, resource: &'static Resource, id: i64) -> Result<u64, StoreError> {
        let mut tables = self.tables();
        let removed = tables
            .get_mut(resource.table)
            .and_then(|t| t.rows.remove(&id))
            .is_some();
        Ok(u64::from(removed))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
