//! Row serialization: declared fields only, free text HTML-escaped.

use crate::config::{Resource, ID_COLUMN};
use crate::service::Row;
use serde_json::Value;

/// Escape `&`, `<` and `>` so stored markup is inert when a client renders it.
pub fn escape_text(s: &str) -> String {
    html_escape::encode_text(s).into_owned()
}

/// Map a persisted row to the JSON object returned to clients.
pub fn serialize_row(resource: &Resource, row: &Row) -> Value {
    let mut out = Row::new();
    out.insert(
        ID_COLUMN.to_string(),
        row.get(ID_COLUMN).cloned().unwrap_or(Value::Null),
    );
    for field in resource.fields {
        let value = match row.get(field.name) {
            Some(Value::String(s)) if field.free_text => Value::String(escape_text(s)),
            Some(v) => v.clone(),
            None => Value::Null,
        };
        out.insert(field.name.to_string(), value);
    }
    Value::Object(out)
}

pub fn serialize_rows(resource: &Resource, rows: &[Row]) -> Value {
    Value::Array(rows.iter().map(|r| serialize_row(resource, r)).collect())
}
