//! Per-entity operation set the route layer calls. Parses raw query parameters,
//! builds filters, and delegates to the persistence port.

use crate::case::object_keys_to_snake_case;
use crate::entity::{CollegeRecord, Record};
use crate::error::AppError;
use crate::query::{FieldFilter, PageRequest};
use crate::service::RequestValidator;
use crate::store::{from_columns, to_columns, Mapper};
use serde_json::Value;
use std::sync::Arc;

pub type CollegeService = CrudService<CollegeRecord>;

pub struct CrudService<R: Record> {
    mapper: Arc<dyn Mapper<R>>,
}

impl<R: Record> Clone for CrudService<R> {
    fn clone(&self) -> Self {
        CrudService {
            mapper: Arc::clone(&self.mapper),
        }
    }
}

impl<R: Record> CrudService<R> {
    pub fn new(mapper: Arc<dyn Mapper<R>>) -> Self {
        CrudService { mapper }
    }

    pub fn mapper(&self) -> &Arc<dyn Mapper<R>> {
        &self.mapper
    }

    /// Page of records, optionally restricted to `field_name = field_value`.
    pub async fn list_by_field(
        &self,
        field_value: Option<&str>,
        field_name: Option<&str>,
        page: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Vec<R>, AppError> {
        let page = PageRequest::parse(page, limit)?;
        let filter = FieldFilter::parse(&R::TABLE, field_name, field_value)?;
        self.mapper.find_by_filter(filter.as_ref(), page).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<R, AppError> {
        self.mapper
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {}", R::TABLE.table_name, id)))
    }

    /// First record (lowest id) with `field_name = field_value`.
    pub async fn get_by_field(
        &self,
        field_value: Option<&str>,
        field_name: Option<&str>,
    ) -> Result<R, AppError> {
        let filter = FieldFilter::parse(&R::TABLE, field_name, field_value)?
            .ok_or_else(|| AppError::Validation("fieldName and fieldValue are required".into()))?;
        self.mapper
            .find_by_filter(Some(&filter), PageRequest::first())
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("{} where {}", R::TABLE.table_name, filter.column)))
    }

    /// Store a new record. Client-supplied id and timestamps are discarded.
    pub async fn insert(&self, mut record: R) -> Result<R, AppError> {
        record.clear_managed();
        RequestValidator::validate(&R::TABLE, &to_columns(&record)?)?;
        self.mapper.insert(record).await
    }

    /// Replace the record at `id`; the path id wins over any id in the body.
    pub async fn update(&self, id: i64, mut record: R) -> Result<R, AppError> {
        record.clear_managed();
        record.set_id(id);
        RequestValidator::validate(&R::TABLE, &to_columns(&record)?)?;
        self.mapper
            .update(record)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {}", R::TABLE.table_name, id)))
    }

    /// Overlay only the fields present in `partial` onto the stored record.
    pub async fn update_fields(&self, id: i64, partial: Value) -> Result<R, AppError> {
        let Value::Object(mut changes) = partial else {
            return Err(AppError::Validation("body must be a JSON object".into()));
        };
        object_keys_to_snake_case(&mut changes);
        RequestValidator::validate_partial_keys(&R::TABLE, &changes)?;

        let current = self.get_by_id(id).await?;
        let mut cols = to_columns(&current)?;
        for (k, v) in changes {
            cols.insert(k, v);
        }
        RequestValidator::validate(&R::TABLE, &cols)?;
        let merged: R = from_columns(cols)?;
        tracing::debug!(table = R::TABLE.table_name, id, "partial update merged");
        self.mapper
            .update(merged)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {}", R::TABLE.table_name, id)))
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        self.mapper.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryMapper;
    use serde_json::json;

    fn service() -> CollegeService {
        CollegeService::new(Arc::new(MemoryMapper::<CollegeRecord>::new()))
    }

    fn college(name: &str) -> CollegeRecord {
        CollegeRecord {
            college_name: Some(name.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn insert_then_get_returns_last_written_state() {
        let svc = service();
        let created = svc.insert(college("Engineering")).await.unwrap();
        let id = created.college_id.unwrap();
        assert_eq!(svc.get_by_id(id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn insert_rejects_missing_name() {
        let err = service().insert(CollegeRecord::default()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_uses_path_id_and_is_idempotent() {
        let svc = service();
        let id = svc.insert(college("Engineering")).await.unwrap().college_id.unwrap();
        let mut body = college("Science");
        body.college_id = Some(12345);
        let first = svc.update(id, body.clone()).await.unwrap();
        let second = svc.update(id, body).await.unwrap();
        assert_eq!(first.college_id, Some(id));
        assert_eq!(first.college_name, second.college_name);
        assert_eq!(svc.get_by_id(id).await.unwrap().college_name.as_deref(), Some("Science"));
    }

    #[tokio::test]
    async fn update_missing_record_is_not_found() {
        let err = service().update(404, college("X")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn partial_update_leaves_other_fields_alone() {
        let svc = service();
        let mut seed = college("Engineering");
        seed.description = Some("old".into());
        let id = svc.insert(seed).await.unwrap().college_id.unwrap();

        let updated = svc.update_fields(id, json!({ "description": "new" })).await.unwrap();
        assert_eq!(updated.college_name.as_deref(), Some("Engineering"));
        assert_eq!(updated.description.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn partial_update_rejects_managed_and_unknown_fields() {
        let svc = service();
        let id = svc.insert(college("Engineering")).await.unwrap().college_id.unwrap();
        assert!(svc.update_fields(id, json!({ "collegeId": 9 })).await.is_err());
        assert!(svc.update_fields(id, json!({ "motto": "x" })).await.is_err());
        assert!(svc.update_fields(id, json!(["collegeName"])).await.is_err());
        assert!(svc.update_fields(id, json!({ "collegeName": null })).await.is_err());
    }

    #[tokio::test]
    async fn get_by_field_returns_lowest_id_match() {
        let svc = service();
        let first = svc.insert(college("Arts")).await.unwrap();
        svc.insert(college("Arts")).await.unwrap();
        let found = svc.get_by_field(Some("Arts"), Some("collegeName")).await.unwrap();
        assert_eq!(found.college_id, first.college_id);
        assert!(matches!(
            svc.get_by_field(Some("Law"), Some("collegeName")).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(svc.get_by_field(None, None).await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn list_filters_and_paginates() {
        let svc = service();
        for name in ["Arts", "Law", "Arts", "Arts"] {
            svc.insert(college(name)).await.unwrap();
        }
        let all = svc.list_by_field(None, None, None, None).await.unwrap();
        assert_eq!(all.len(), 4);
        let arts = svc
            .list_by_field(Some("Arts"), Some("collegeName"), Some("1"), Some("2"))
            .await
            .unwrap();
        assert_eq!(arts.len(), 2);
        assert!(svc.list_by_field(None, None, Some("0"), None).await.is_err());
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let svc = service();
        let id = svc.insert(college("Engineering")).await.unwrap().college_id.unwrap();
        assert!(svc.delete(id).await.unwrap());
        assert!(matches!(svc.get_by_id(id).await, Err(AppError::NotFound(_))));
        assert!(!svc.delete(id).await.unwrap());
    }
}
