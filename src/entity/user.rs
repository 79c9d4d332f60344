use super::{ColumnInfo, Record, TableDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub real_name: Option<String>,
    pub email: Option<String>,
    pub college_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

const COLUMNS: &[ColumnInfo] = &[
    ColumnInfo::primary_key("user_id"),
    ColumnInfo::varchar("user_name", 64, false),
    ColumnInfo::varchar("real_name", 64, true),
    ColumnInfo::varchar("email", 128, true),
    ColumnInfo::writable("college_id", "bigint", true),
    ColumnInfo::timestamp("created_at"),
    ColumnInfo::timestamp("updated_at"),
];

impl Record for UserRecord {
    const TABLE: TableDef = TableDef {
        table_name: "s_user",
        pk_column: "user_id",
        columns: COLUMNS,
    };

    fn id(&self) -> Option<i64> {
        self.user_id
    }

    fn set_id(&mut self, id: i64) {
        self.user_id = Some(id);
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
    }

    fn clear_managed(&mut self) {
        self.user_id = None;
        self.created_at = None;
        self.updated_at = None;
    }
}
