//! Request shape checks for create and partial update.

use crate::config::Resource;
use crate::error::AppError;
use crate::service::Row;
use serde_json::Value;

pub struct RequestValidator;

impl RequestValidator {
    /// Every required field must be present and non-null; the first missing one, in
    /// declaration order, is reported. Returns the declared fields only.
    pub fn for_create(resource: &Resource, body: &Row) -> Result<Row, AppError> {
        let mut out = Row::new();
        for field in resource.required_fields() {
            match body.get(field.name) {
                None | Some(Value::Null) => {
                    return Err(AppError::Validation(format!(
                        "Missing '{}' in request body",
                        field.name
                    )));
                }
                Some(v) => {
                    out.insert(field.name.to_string(), v.clone());
                }
            }
        }
        Ok(out)
    }

    /// At least one updatable field must hold a truthy value. Returns every updatable
    /// field present in the body, falsy ones included; unknown keys are dropped.
    pub fn for_update(resource: &Resource, body: &Row) -> Result<Row, AppError> {
        let supplied = resource
            .updatable_fields()
            .filter(|f| body.get(f.name).is_some_and(is_truthy))
            .count();
        if supplied == 0 {
            return Err(AppError::Validation(resource.missing_update_fields_message()));
        }
        Ok(resource
            .updatable_fields()
            .filter_map(|f| body.get(f.name).map(|v| (f.name.to_string(), v.clone())))
            .collect())
    }
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy; arrays and objects are truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
