//! Resource table validation: unique names and paths, foreign keys to known tables.

use crate::config::{Resource, ID_COLUMN};
use crate::error::ConfigError;
use std::collections::HashSet;

pub fn validate_resources(resources: &[&Resource]) -> Result<(), ConfigError> {
    let mut entities = HashSet::new();
    let mut paths = HashSet::new();
    let mut tables = HashSet::new();

    for r in resources {
        if !entities.insert(r.entity) {
            return Err(ConfigError::Duplicate {
                kind: "entity",
                value: r.entity.to_string(),
            });
        }
        if !paths.insert(r.path) {
            return Err(ConfigError::Duplicate {
                kind: "path",
                value: r.path.to_string(),
            });
        }

        let mut columns = HashSet::new();
        columns.insert(ID_COLUMN);
        for f in r.fields {
            if !columns.insert(f.name) {
                return Err(ConfigError::Duplicate {
                    kind: "column",
                    value: format!("{}.{}", r.table, f.name),
                });
            }
            // Parents must be declared first so tables can be created in order.
            if let Some(parent) = f.references {
                if !tables.contains(parent) {
                    return Err(ConfigError::MissingReference {
                        kind: "table",
                        id: parent.to_string(),
                    });
                }
            }
        }

        if !tables.insert(r.table) {
            return Err(ConfigError::Duplicate {
                kind: "table",
                value: r.table.to_string(),
            });
        }
    }
    Ok(())
}
