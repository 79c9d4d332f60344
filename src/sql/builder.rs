//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from table metadata.

use crate::entity::TableDef;
use crate::query::{FieldFilter, PageRequest};
use serde_json::{Map, Value};

/// Quote identifier for PostgreSQL (safe: only from table metadata).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a value and return its placeholder, cast to the column type.
    fn push_param(&mut self, v: Value, pg_type: &str) -> String {
        self.params.push(v);
        format!("${}::{}", self.params.len(), pg_type)
    }
}

fn select_column_list(table: &TableDef) -> String {
    table
        .columns
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT by primary key.
pub fn select_by_id(table: &TableDef, schema: &str, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(Value::from(id), "bigint");
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(table),
        qualified_table(schema, table.table_name),
        quoted(table.pk_column),
        ph
    );
    q
}

/// SELECT page with an optional exact-match filter, ORDER BY pk.
pub fn select_list(
    table: &TableDef,
    schema: &str,
    filter: Option<&FieldFilter>,
    page: PageRequest,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_clause = String::new();
    if let Some(f) = filter {
        if let Some(col) = table.column(f.column) {
            let ph = q.push_param(f.value.clone(), col.pg_type);
            where_clause = format!(" WHERE {} = {}", quoted(col.name), ph);
        }
    }
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {} LIMIT {} OFFSET {}",
        select_column_list(table),
        qualified_table(schema, table.table_name),
        where_clause,
        quoted(table.pk_column),
        page.limit,
        page.offset()
    );
    q
}

/// INSERT every writable column; values come from `body` (snake_case keys), absent ones bind NULL.
/// Primary key and server-managed columns are left to their DB defaults.
pub fn insert(table: &TableDef, schema: &str, body: &Map<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in table.writable_columns() {
        let val = body.get(c.name).cloned().unwrap_or(Value::Null);
        placeholders.push(q.push_param(val, c.pg_type));
        cols.push(quoted(c.name));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        qualified_table(schema, table.table_name),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list(table)
    );
    q
}

/// UPDATE by id: SET every writable column from `body` and refresh `updated_at` when the table has one.
pub fn update(table: &TableDef, schema: &str, id: i64, body: &Map<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in table.writable_columns() {
        let val = body.get(c.name).cloned().unwrap_or(Value::Null);
        let ph = q.push_param(val, c.pg_type);
        sets.push(format!("{} = {}", quoted(c.name), ph));
    }
    if table.column("updated_at").is_some() {
        sets.push(format!("{} = NOW()", quoted("updated_at")));
    }
    let id_ph = q.push_param(Value::from(id), "bigint");
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        qualified_table(schema, table.table_name),
        sets.join(", "),
        quoted(table.pk_column),
        id_ph,
        select_column_list(table)
    );
    q
}

/// DELETE by id, returning the pk of the removed row.
pub fn delete(table: &TableDef, schema: &str, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(Value::from(id), "bigint");
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {} RETURNING {}",
        qualified_table(schema, table.table_name),
        quoted(table.pk_column),
        ph,
        quoted(table.pk_column)
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{CollegeRecord, Record};

    const T: TableDef = CollegeRecord::TABLE;

    #[test]
    fn select_by_id_binds_the_id() {
        let q = select_by_id(&T, "public", 7);
        assert_eq!(
            q.sql,
            r#"SELECT "college_id", "college_name", "description", "created_at", "updated_at" FROM "public"."s_college" WHERE "college_id" = $1::bigint"#
        );
        assert_eq!(q.params, vec![Value::from(7)]);
    }

    #[test]
    fn select_list_filters_and_pages() {
        let filter = FieldFilter {
            column: "college_name",
            value: Value::from("Engineering"),
        };
        let page = PageRequest { page: 2, limit: 10 };
        let q = select_list(&T, "public", Some(&filter), page);
        assert!(q.sql.ends_with(
            r#"WHERE "college_name" = $1::varchar ORDER BY "college_id" LIMIT 10 OFFSET 10"#
        ));
        assert_eq!(q.params, vec![Value::from("Engineering")]);
    }

    #[test]
    fn select_list_ignores_columns_outside_the_table() {
        let filter = FieldFilter {
            column: "password",
            value: Value::from("x"),
        };
        let q = select_list(&T, "public", Some(&filter), PageRequest::default());
        assert!(!q.sql.contains("WHERE"));
        assert!(q.params.is_empty());
    }

    #[test]
    fn insert_skips_managed_columns() {
        let body = serde_json::json!({ "college_id": 99, "college_name": "Arts" });
        let q = insert(&T, "public", body.as_object().unwrap());
        assert!(q.sql.starts_with(
            r#"INSERT INTO "public"."s_college" ("college_name", "description") VALUES ($1::varchar, $2::text)"#
        ));
        assert_eq!(q.params, vec![Value::from("Arts"), Value::Null]);
    }

    #[test]
    fn update_touches_updated_at_and_binds_id_last() {
        let body = serde_json::json!({ "college_name": "Arts", "description": "d" });
        let q = update(&T, "public", 3, body.as_object().unwrap());
        assert!(q.sql.contains(r#""updated_at" = NOW()"#));
        assert!(q.sql.contains(r#"WHERE "college_id" = $3::bigint"#));
        assert_eq!(q.params.last(), Some(&Value::from(3)));
    }

    #[test]
    fn quoting_escapes_embedded_quotes() {
        assert_eq!(quoted(r#"a"b"#), r#""a""b""#);
    }
}
