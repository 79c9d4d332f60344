//! PostgreSQL adapter: one generic mapper bound to a record's table metadata.

use super::{from_columns, require_id, to_columns, Mapper};
use crate::entity::{CollegeRecord, CourseRecord, Record, UserRecord};
use crate::error::AppError;
use crate::query::{FieldFilter, PageRequest};
use crate::sql::{self, PgBindValue, QueryBuf};
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use std::marker::PhantomData;

pub type CollegeMapper = PgMapper<CollegeRecord>;
pub type CourseMapper = PgMapper<CourseRecord>;
pub type UserMapper = PgMapper<UserRecord>;

pub struct PgMapper<R> {
    pool: PgPool,
    schema: String,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for PgMapper<R> {
    fn clone(&self) -> Self {
        PgMapper {
            pool: self.pool.clone(),
            schema: self.schema.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> PgMapper<R> {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgMapper {
            pool,
            schema: schema.into(),
            _record: PhantomData,
        }
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<R>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        match query.fetch_optional(&self.pool).await? {
            Some(row) => Ok(Some(from_columns(row_to_map(&row))?)),
            None => Ok(None),
        }
    }

    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<R>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(|r| from_columns(row_to_map(r))).collect()
    }
}

#[async_trait]
impl<R: Record> Mapper<R> for PgMapper<R> {
    async fn insert(&self, record: R) -> Result<R, AppError> {
        let body = to_columns(&record)?;
        let q = sql::insert(&R::TABLE, &self.schema, &body);
        self.fetch_optional(&q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn update(&self, record: R) -> Result<Option<R>, AppError> {
        let id = require_id(&record)?;
        let body = to_columns(&record)?;
        let q = sql::update(&R::TABLE, &self.schema, id, &body);
        self.fetch_optional(&q).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let q = sql::delete(&R::TABLE, &self.schema, id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        Ok(query.fetch_optional(&self.pool).await?.is_some())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<R>, AppError> {
        let q = sql::select_by_id(&R::TABLE, &self.schema, id);
        self.fetch_optional(&q).await
    }

    async fn find_by_filter(
        &self,
        filter: Option<&FieldFilter>,
        page: PageRequest,
    ) -> Result<Vec<R>, AppError> {
        let q = sql::select_list(&R::TABLE, &self.schema, filter, page);
        self.fetch_all(&q).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

fn row_to_map(row: &PgRow) -> Map<String, Value> {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    map
}

fn cell_to_value(row: &PgRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i16>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<Value>, _>(name) {
        return j;
    }
    Value::Null
}
