use super::{ColumnInfo, Record, TableDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Row of `s_college`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollegeRecord {
    pub college_id: Option<i64>,
    pub college_name: Option<String>,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

const COLUMNS: &[ColumnInfo] = &[
    ColumnInfo::primary_key("college_id"),
    ColumnInfo::varchar("college_name", 64, false),
    ColumnInfo::writable("description", "text", true),
    ColumnInfo::timestamp("created_at"),
    ColumnInfo::timestamp("updated_at"),
];

impl Record for CollegeRecord {
    const TABLE: TableDef = TableDef {
        table_name: "s_college",
        pk_column: "college_id",
        columns: COLUMNS,
    };

    fn id(&self) -> Option<i64> {
        self.college_id
    }

    fn set_id(&mut self, id: i64) {
        self.college_id = Some(id);
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
    }

    fn clear_managed(&mut self) {
        self.college_id = None;
        self.created_at = None;
        self.updated_at = None;
    }
}
