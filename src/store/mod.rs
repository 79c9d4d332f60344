//! Persistence port: per-entity CRUD and filtered page lookup, with a PostgreSQL
//! adapter and an in-memory adapter.

mod memory;
mod postgres;

pub use memory::MemoryMapper;
pub use postgres::{CollegeMapper, CourseMapper, PgMapper, UserMapper};

use crate::case::{object_keys_to_camel_case, object_keys_to_snake_case};
use crate::entity::Record;
use crate::error::AppError;
use crate::query::{FieldFilter, PageRequest};
use async_trait::async_trait;
use serde_json::{Map, Value};

#[async_trait]
pub trait Mapper<R: Record>: Send + Sync {
    /// Insert and return the stored record with its generated id.
    async fn insert(&self, record: R) -> Result<R, AppError>;

    /// Replace the row matching `record`'s id. `None` when no such row exists.
    async fn update(&self, record: R) -> Result<Option<R>, AppError>;

    /// True when a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<R>, AppError>;

    /// Rows matching `filter` (all rows when `None`), ordered by primary key.
    async fn find_by_filter(
        &self,
        filter: Option<&FieldFilter>,
        page: PageRequest,
    ) -> Result<Vec<R>, AppError>;

    /// Cheap liveness probe of the backing store.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Record -> column map keyed by snake_case column names.
pub fn to_columns<R: Record>(record: &R) -> Result<Map<String, Value>, AppError> {
    match serde_json::to_value(record)? {
        Value::Object(mut map) => {
            object_keys_to_snake_case(&mut map);
            Ok(map)
        }
        _ => Err(AppError::BadRequest("record must serialize to an object".into())),
    }
}

/// Column map (snake_case keys) -> record.
pub fn from_columns<R: Record>(mut row: Map<String, Value>) -> Result<R, AppError> {
    object_keys_to_camel_case(&mut row);
    Ok(serde_json::from_value(Value::Object(row))?)
}

fn require_id<R: Record>(record: &R) -> Result<i64, AppError> {
    record
        .id()
        .ok_or_else(|| AppError::Validation(format!("{} is required", R::TABLE.pk_column)))
}
