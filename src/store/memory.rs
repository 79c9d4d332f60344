//! In-process adapter. Backs the `memory://` storage mode and the test suites.

use super::{require_id, to_columns, Mapper};
use crate::entity::Record;
use crate::error::AppError;
use crate::query::{canonical_timestamp, FieldFilter, PageRequest};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

pub struct MemoryMapper<R> {
    rows: RwLock<BTreeMap<i64, R>>,
    next_id: AtomicI64,
}

impl<R> Default for MemoryMapper<R> {
    fn default() -> Self {
        MemoryMapper {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl<R: Record> MemoryMapper<R> {
    pub fn new() -> Self {
        Self::default()
    }
}

fn row_matches<R: Record>(record: &R, filter: &FieldFilter) -> Result<bool, AppError> {
    let cols = to_columns(record)?;
    let Some(stored) = cols.get(filter.column) else {
        return Ok(false);
    };
    let is_timestamp = R::TABLE
        .column(filter.column)
        .is_some_and(|c| c.is_timestamp());
    if is_timestamp {
        let instant = stored.as_str().and_then(canonical_timestamp);
        return Ok(instant.is_some() && instant.as_deref() == filter.value.as_str());
    }
    Ok(stored == &filter.value)
}

#[async_trait]
impl<R: Record> Mapper<R> for MemoryMapper<R> {
    async fn insert(&self, mut record: R) -> Result<R, AppError> {
        record.clear_managed();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        record.set_id(id);
        record.set_timestamps(now, now);
        self.rows.write().await.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, mut record: R) -> Result<Option<R>, AppError> {
        let id = require_id(&record)?;
        let mut rows = self.rows.write().await;
        let Some(existing) = rows.get(&id) else {
            return Ok(None);
        };
        let created_at = existing.created_at().unwrap_or_else(Utc::now);
        record.set_timestamps(created_at, Utc::now());
        rows.insert(id, record.clone());
        Ok(Some(record))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<R>, AppError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_by_filter(
        &self,
        filter: Option<&FieldFilter>,
        page: PageRequest,
    ) -> Result<Vec<R>, AppError> {
        let rows = self.rows.read().await;
        let mut matched = Vec::new();
        for record in rows.values() {
            if let Some(f) = filter {
                if !row_matches(record, f)? {
                    continue;
                }
            }
            matched.push(record);
        }
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        Ok(matched
            .into_iter()
            .skip(offset)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
