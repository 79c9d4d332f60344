//! College resource handlers. Every handler logs its raw input, delegates to the
//! service, and collapses any failure into a fixed, operation-specific message.

use crate::auth::college::{Add, Delete, List, Update};
use crate::entity::CollegeRecord;
use crate::error::AppError;
use crate::extractors::RequirePermissions;
use crate::response::{respond, ApiResponse, Envelope};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, Query, State,
    },
    http::Uri,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

pub const SEARCH_OK: &str = "search succeeded";
pub const SEARCH_FAILED: &str = "search failed";
pub const INSERT_OK: &str = "insert succeeded";
pub const INSERT_FAILED: &str = "insert failed";
pub const UPDATE_OK: &str = "update succeeded";
pub const UPDATE_FAILED: &str = "update failed";
pub const PATCH_OK: &str = "partial update succeeded";
pub const PATCH_FAILED: &str = "partial update failed";
pub const DELETE_OK: &str = "delete succeeded";
pub const DELETE_FAILED: &str = "delete failed";

/// Query parameters of the list endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// 1-based page number (default 1).
    pub page: Option<String>,
    /// Rows per page (default 100, at most 1000).
    pub limit: Option<String>,
    /// Value the named field must equal.
    pub field_value: Option<String>,
    /// Field to match, e.g. `collegeName`.
    pub field_name: Option<String>,
}

/// Query parameters of the single-record field lookup.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FieldParams {
    pub field_value: Option<String>,
    pub field_name: Option<String>,
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", raw)))
}

/// Path and body extractors run before the handler, so their rejections are
/// folded into the operation's failure envelope instead of axum's plain-text reply.
type IdSegment = Result<Path<String>, PathRejection>;
type RawBody = Result<Bytes, BytesRejection>;

fn path_id(segment: &IdSegment) -> Result<i64, AppError> {
    match segment {
        Ok(Path(raw)) => parse_id(raw),
        Err(e) => Err(AppError::BadRequest(e.body_text())),
    }
}

fn raw_body(body: &RawBody) -> Result<&[u8], AppError> {
    body.as_ref()
        .map(|b| &b[..])
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

fn log_segment(segment: &IdSegment) -> &str {
    segment.as_ref().map(|Path(raw)| raw.as_str()).unwrap_or("<unreadable>")
}

fn log_body(body: &RawBody) -> std::borrow::Cow<'_, str> {
    match body {
        Ok(b) => String::from_utf8_lossy(b),
        Err(e) => std::borrow::Cow::Owned(format!("<rejected: {}>", e)),
    }
}

fn parse_query<T: serde::de::DeserializeOwned>(uri: &Uri) -> Result<T, AppError> {
    Query::<T>::try_from_uri(uri)
        .map(|Query(q)| q)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

#[utoipa::path(
    get,
    path = "/colleges/",
    tag = "colleges",
    summary = "List colleges matching an optional field filter",
    params(ListParams),
    responses((status = 200, description = "Envelope with a page of colleges", body = ApiResponse<Vec<CollegeRecord>>)),
    security(("BearerAuth" = ["college:list"]))
)]
pub async fn list_colleges(
    _guard: RequirePermissions<List>,
    State(state): State<AppState>,
    uri: Uri,
) -> Envelope<Vec<CollegeRecord>> {
    tracing::info!(query = uri.query().unwrap_or(""), "list colleges");
    respond(list(&state, &uri).await, SEARCH_OK, SEARCH_FAILED)
}

async fn list(state: &AppState, uri: &Uri) -> Result<Vec<CollegeRecord>, AppError> {
    let p: ListParams = parse_query(uri)?;
    state
        .colleges
        .list_by_field(
            p.field_value.as_deref(),
            p.field_name.as_deref(),
            p.page.as_deref(),
            p.limit.as_deref(),
        )
        .await
}

#[utoipa::path(
    get,
    path = "/colleges/{collegeId}",
    tag = "colleges",
    summary = "Get one college by id",
    params(("collegeId" = String, Path, description = "College id")),
    responses((status = 200, description = "Envelope with the college", body = ApiResponse<CollegeRecord>)),
    security(("BearerAuth" = ["college:list"]))
)]
pub async fn get_college(
    _guard: RequirePermissions<List>,
    State(state): State<AppState>,
    college_id: IdSegment,
) -> Envelope<CollegeRecord> {
    tracing::info!(college_id = log_segment(&college_id), "get college");
    let outcome = match path_id(&college_id) {
        Ok(id) => state.colleges.get_by_id(id).await,
        Err(e) => Err(e),
    };
    respond(outcome, SEARCH_OK, SEARCH_FAILED)
}

#[utoipa::path(
    get,
    path = "/colleges/college",
    tag = "colleges",
    summary = "Get the first college whose field equals a value",
    params(FieldParams),
    responses((status = 200, description = "Envelope with the college", body = ApiResponse<CollegeRecord>)),
    security(("BearerAuth" = ["college:list"]))
)]
pub async fn get_college_by_field(
    _guard: RequirePermissions<List>,
    State(state): State<AppState>,
    uri: Uri,
) -> Envelope<CollegeRecord> {
    tracing::info!(query = uri.query().unwrap_or(""), "get college by field");
    respond(by_field(&state, &uri).await, SEARCH_OK, SEARCH_FAILED)
}

async fn by_field(state: &AppState, uri: &Uri) -> Result<CollegeRecord, AppError> {
    let p: FieldParams = parse_query(uri)?;
    state
        .colleges
        .get_by_field(p.field_value.as_deref(), p.field_name.as_deref())
        .await
}

#[utoipa::path(
    post,
    path = "/colleges/",
    tag = "colleges",
    summary = "Insert a college",
    request_body = CollegeRecord,
    responses((status = 200, description = "Envelope with the created college", body = ApiResponse<CollegeRecord>)),
    security(("BearerAuth" = ["college:list", "college:add"]))
)]
pub async fn insert_college(
    _guard: RequirePermissions<Add>,
    State(state): State<AppState>,
    body: RawBody,
) -> Envelope<CollegeRecord> {
    tracing::info!(data = %log_body(&body), "insert college");
    respond(insert(&state, &body).await, INSERT_OK, INSERT_FAILED)
}

async fn insert(state: &AppState, body: &RawBody) -> Result<CollegeRecord, AppError> {
    let record: CollegeRecord = serde_json::from_slice(raw_body(body)?)?;
    state.colleges.insert(record).await
}

#[utoipa::path(
    put,
    path = "/colleges/{collegeId}",
    tag = "colleges",
    summary = "Replace a college",
    params(("collegeId" = String, Path, description = "College id")),
    request_body = CollegeRecord,
    responses((status = 200, description = "Envelope with the updated college", body = ApiResponse<CollegeRecord>)),
    security(("BearerAuth" = ["college:list", "college:update"]))
)]
pub async fn update_college(
    _guard: RequirePermissions<Update>,
    State(state): State<AppState>,
    college_id: IdSegment,
    body: RawBody,
) -> Envelope<CollegeRecord> {
    tracing::info!(college_id = log_segment(&college_id), data = %log_body(&body), "update college");
    respond(update(&state, &college_id, &body).await, UPDATE_OK, UPDATE_FAILED)
}

async fn update(state: &AppState, segment: &IdSegment, body: &RawBody) -> Result<CollegeRecord, AppError> {
    let id = path_id(segment)?;
    let record: CollegeRecord = serde_json::from_slice(raw_body(body)?)?;
    state.colleges.update(id, record).await
}

#[utoipa::path(
    patch,
    path = "/colleges/{collegeId}",
    tag = "colleges",
    summary = "Update only the given fields of a college",
    params(("collegeId" = String, Path, description = "College id")),
    request_body(content = Object, description = "Subset of college fields"),
    responses((status = 200, description = "Envelope with the updated college", body = ApiResponse<CollegeRecord>)),
    security(("BearerAuth" = ["college:list", "college:update"]))
)]
pub async fn patch_college(
    _guard: RequirePermissions<Update>,
    State(state): State<AppState>,
    college_id: IdSegment,
    body: RawBody,
) -> Envelope<CollegeRecord> {
    tracing::info!(college_id = log_segment(&college_id), data = %log_body(&body), "partial update college");
    respond(patch(&state, &college_id, &body).await, PATCH_OK, PATCH_FAILED)
}

async fn patch(state: &AppState, segment: &IdSegment, body: &RawBody) -> Result<CollegeRecord, AppError> {
    let id = path_id(segment)?;
    let partial: Value = serde_json::from_slice(raw_body(body)?)?;
    state.colleges.update_fields(id, partial).await
}

#[utoipa::path(
    delete,
    path = "/colleges/{collegeId}",
    tag = "colleges",
    summary = "Delete a college",
    params(("collegeId" = String, Path, description = "College id")),
    responses((status = 200, description = "Envelope with true when a row was removed", body = ApiResponse<bool>)),
    security(("BearerAuth" = ["college:list", "college:delete"]))
)]
pub async fn delete_college(
    _guard: RequirePermissions<Delete>,
    State(state): State<AppState>,
    college_id: IdSegment,
) -> Envelope<bool> {
    tracing::info!(college_id = log_segment(&college_id), "delete college");
    let outcome = match path_id(&college_id) {
        Ok(id) => state.colleges.delete(id).await,
        Err(e) => Err(e),
    };
    respond(outcome, DELETE_OK, DELETE_FAILED)
}
