//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from a resource.

use crate::config::{Field, Resource, ID_COLUMN};
use crate::sql::FieldValue;

/// Quote identifier for PostgreSQL (safe: only from the resource table).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<FieldValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a parameter and return its placeholder, cast to the column type.
    fn push_param(&mut self, field_type: &str, v: FieldValue) -> String {
        self.params.push(v);
        format!("${}::{}", self.params.len(), field_type)
    }

    fn push_id(&mut self, id: i64) -> String {
        self.push_param("INTEGER", FieldValue::Integer(id))
    }
}

/// `id` followed by every declared column.
fn select_column_list(resource: &Resource) -> String {
    std::iter::once(ID_COLUMN)
        .chain(resource.fields.iter().map(|f| f.name))
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every row, ordered by id.
pub fn select_all(resource: &Resource) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(resource),
        quoted(resource.table),
        quoted(ID_COLUMN)
    );
    q
}

pub fn select_by_id(resource: &Resource, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_id(id);
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(resource),
        quoted(resource.table),
        quoted(ID_COLUMN),
        ph
    );
    q
}

/// INSERT the given columns; RETURNING the full row.
pub fn insert(resource: &Resource, values: &[(&Field, FieldValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = quoted(resource.table);
    let returning = select_column_list(resource);
    if values.is_empty() {
        q.sql = format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", table, returning);
        return q;
    }
    let mut cols = Vec::with_capacity(values.len());
    let mut placeholders = Vec::with_capacity(values.len());
    for (field, v) in values {
        cols.push(quoted(field.name));
        placeholders.push(q.push_param(field.kind.pg_type(), v.clone()));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        table,
        cols.join(", "),
        placeholders.join(", "),
        returning
    );
    q
}

/// UPDATE only the given columns of one row. Caller checks `values` is non-empty.
pub fn update(resource: &Resource, id: i64, values: &[(&Field, FieldValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let sets: Vec<String> = values
        .iter()
        .map(|(field, v)| {
            let ph = q.push_param(field.kind.pg_type(), v.clone());
            format!("{} = {}", quoted(field.name), ph)
        })
        .collect();
    let id_ph = q.push_id(id);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {}",
        quoted(resource.table),
        sets.join(", "),
        quoted(ID_COLUMN),
        id_ph
    );
    q
}

pub fn delete(resource: &Resource, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_id(id);
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {}",
        quoted(resource.table),
        quoted(ID_COLUMN),
        ph
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CHARACTERS, NOTICES};

    #[test]
    fn select_statements() {
        assert_eq!(
            select_all(&NOTICES).sql,
            r#"SELECT "id", "message", "status" FROM "notices" ORDER BY "id""#
        );
        let q = select_by_id(&CHARACTERS, 4);
        assert_eq!(
            q.sql,
            r#"SELECT "id", "user_id", "name" FROM "characters" WHERE "id" = $1::INTEGER"#
        );
        assert_eq!(q.params, vec![FieldValue::Integer(4)]);
    }

    #[test]
    fn insert_binds_values_in_order() {
        let user_id = CHARACTERS.field("user_id").unwrap();
        let name = CHARACTERS.field("name").unwrap();
        let q = insert(
            &CHARACTERS,
            &[(user_id, FieldValue::Integer(1)), (name, FieldValue::Text("Aria".into()))],
        );
        assert_eq!(
            q.sql,
            r#"INSERT INTO "characters" ("user_id", "name") VALUES ($1::INTEGER, $2::TEXT) RETURNING "id", "user_id", "name""#
        );
        assert_eq!(q.params.len(), 2);
    }

    #[test]
    fn update_puts_id_last() {
        let status = NOTICES.field("status").unwrap();
        let q = update(&NOTICES, 9, &[(status, FieldValue::Text("Picked Up".into()))]);
        assert_eq!(
            q.sql,
            r#"UPDATE "notices" SET "status" = $1::TEXT WHERE "id" = $2::INTEGER"#
        );
        assert_eq!(q.params[1], FieldValue::Integer(9));
    }

    #[test]
    fn quoting_escapes_double_quotes() {
        assert_eq!(quoted(r#"we"ird"#), r#""we""ird""#);
        assert_eq!(delete(&CHARACTERS, 2).sql, r#"DELETE FROM "characters" WHERE "id" = $1::INTEGER"#);
    }
}
