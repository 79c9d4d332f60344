use super::{ColumnInfo, Record, TableDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Row of `s_course`. `college_id` references `s_college` but is not enforced here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub course_id: Option<i64>,
    pub course_name: Option<String>,
    pub college_id: Option<i64>,
    pub credit: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

const COLUMNS: &[ColumnInfo] = &[
    ColumnInfo::primary_key("course_id"),
    ColumnInfo::varchar("course_name", 128, false),
    ColumnInfo::writable("college_id", "bigint", true),
    ColumnInfo::writable("credit", "integer", true),
    ColumnInfo::timestamp("created_at"),
    ColumnInfo::timestamp("updated_at"),
];

impl Record for CourseRecord {
    const TABLE: TableDef = TableDef {
        table_name: "s_course",
        pk_column: "course_id",
        columns: COLUMNS,
    };

    fn id(&self) -> Option<i64> {
        self.course_id
    }

    fn set_id(&mut self, id: i64) {
        self.course_id = Some(id);
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
    }

    fn clear_managed(&mut self) {
        self.course_id = None;
        self.created_at = None;
        self.updated_at = None;
    }
}
