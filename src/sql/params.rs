//! Convert request JSON values into typed column values that can be bound.

use crate::config::{ColumnKind, Field, Resource};
use crate::error::StoreError;
use serde_json::{Map, Value};
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;

/// A value ready to be written to one column.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Text(String),
}

impl FieldValue {
    /// Coerce a JSON value to the column's kind the way PostgreSQL casts text input.
    pub fn coerce(field: &Field, value: &Value) -> Result<Self, StoreError> {
        let invalid = || StoreError::InvalidValue {
            column: field.name.to_string(),
        };
        Ok(match (field.kind, value) {
            (_, Value::Null) => FieldValue::Null,
            (ColumnKind::Integer, Value::Number(n)) => {
                let n = n.as_i64().ok_or_else(invalid)?;
                i32::try_from(n).map_err(|_| invalid())?;
                FieldValue::Integer(n)
            }
            (ColumnKind::Integer, Value::String(s)) => {
                let n: i32 = s.trim().parse().map_err(|_| invalid())?;
                FieldValue::Integer(n.into())
            }
            (ColumnKind::Text, Value::String(s)) => FieldValue::Text(s.clone()),
            (ColumnKind::Text, Value::Number(n)) => FieldValue::Text(n.to_string()),
            (ColumnKind::Text, Value::Bool(b)) => FieldValue::Text(b.to_string()),
            _ => return Err(invalid()),
        })
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Integer(n) => Value::Number((*n).into()),
            FieldValue::Text(s) => Value::String(s.clone()),
        }
    }

    pub fn bind<'q>(
        &'q self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        match self {
            FieldValue::Null => query.bind(None::<String>),
            FieldValue::Integer(n) => query.bind(*n),
            FieldValue::Text(s) => query.bind(s.as_str()),
        }
    }
}

/// Declared columns present in `body`, in declaration order, coerced to their kinds.
/// Keys that are not columns of `resource` are dropped.
pub fn coerce_fields(
    resource: &'static Resource,
    body: &Map<String, Value>,
) -> Result<Vec<(&'static Field, FieldValue)>, StoreError> {
    resource
        .fields
        .iter()
        .filter_map(|f| body.get(f.name).map(|v| (f, v)))
        .map(|(f, v)| FieldValue::coerce(f, v).map(|fv| (f, fv)))
        .collect()
}
