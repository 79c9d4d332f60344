//! Entity records and the static table metadata each one maps to.
//!
//! `TableDef` is the column allow-list: only identifiers declared here ever
//! reach SQL text. Records serialize with camelCase keys; columns are snake_case.

mod college;
mod course;
mod user;

pub use college::CollegeRecord;
pub use course::CourseRecord;
pub use user::UserRecord;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Clone, Copy, Debug)]
pub struct ColumnInfo {
    pub name: &'static str,
    /// Base PostgreSQL type, also used for parameter casts (e.g. "varchar", "bigint").
    pub pg_type: &'static str,
    pub nullable: bool,
    /// False for the primary key and server-managed timestamps.
    pub writable: bool,
    pub max_length: Option<usize>,
    /// DDL default expression.
    pub default: Option<&'static str>,
}

impl ColumnInfo {
    pub const fn writable(name: &'static str, pg_type: &'static str, nullable: bool) -> Self {
        ColumnInfo {
            name,
            pg_type,
            nullable,
            writable: true,
            max_length: None,
            default: None,
        }
    }

    pub const fn varchar(name: &'static str, max_length: usize, nullable: bool) -> Self {
        ColumnInfo {
            name,
            pg_type: "varchar",
            nullable,
            writable: true,
            max_length: Some(max_length),
            default: None,
        }
    }

    pub const fn primary_key(name: &'static str) -> Self {
        ColumnInfo {
            name,
            pg_type: "bigint",
            nullable: false,
            writable: false,
            max_length: None,
            default: None,
        }
    }

    pub const fn timestamp(name: &'static str) -> Self {
        ColumnInfo {
            name,
            pg_type: "timestamptz",
            nullable: false,
            writable: false,
            max_length: None,
            default: Some("NOW()"),
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.pg_type, "bigint" | "integer" | "smallint")
    }

    pub fn is_timestamp(&self) -> bool {
        self.pg_type == "timestamptz"
    }

    /// Column type as written in DDL.
    pub fn ddl_type(&self) -> String {
        match self.max_length {
            Some(n) => format!("{}({})", self.pg_type.to_uppercase(), n),
            None => self.pg_type.to_uppercase(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TableDef {
    pub table_name: &'static str,
    pub pk_column: &'static str,
    pub columns: &'static [ColumnInfo],
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&'static ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn writable_columns(&self) -> impl Iterator<Item = &'static ColumnInfo> {
        self.columns.iter().filter(|c| c.writable)
    }
}

/// A row's in-memory representation, bound to one table.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const TABLE: TableDef;

    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);

    fn created_at(&self) -> Option<DateTime<Utc>>;

    fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>);

    /// Drop every value the persistence layer owns (id and timestamps).
    fn clear_managed(&mut self);
}

/// Every table the server manages, in creation order.
pub fn all_tables() -> [TableDef; 3] {
    [CollegeRecord::TABLE, CourseRecord::TABLE, UserRecord::TABLE]
}
