//! Pagination and single-column equality filters parsed from raw query strings.

use crate::case::to_snake_case;
use crate::entity::TableDef;
use crate::error::AppError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

pub const DEFAULT_LIMIT: u32 = 100;
pub const MAX_LIMIT: u32 = 1000;

/// 1-based page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// First row only; used for single-record lookups.
    pub fn first() -> Self {
        PageRequest { page: 1, limit: 1 }
    }

    /// Missing or empty values take the defaults. Zero, negative or non-numeric
    /// values are rejected; limits above `MAX_LIMIT` are clamped.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, AppError> {
        let page = match non_empty(page) {
            Some(s) => positive(s, "page")?,
            None => 1,
        };
        let limit = match non_empty(limit) {
            Some(s) => positive(s, "limit")?.min(MAX_LIMIT),
            None => DEFAULT_LIMIT,
        };
        Ok(PageRequest { page, limit })
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

fn positive(s: &str, name: &str) -> Result<u32, AppError> {
    let n: i64 = s
        .parse()
        .map_err(|_| AppError::Validation(format!("{} must be a number", name)))?;
    if n < 1 {
        return Err(AppError::Validation(format!("{} must be at least 1", name)));
    }
    Ok(u32::try_from(n).unwrap_or(u32::MAX))
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse an RFC 3339 timestamp and re-render it in UTC, so every store compares
/// the same instant regardless of offset or fractional digits.
pub fn canonical_timestamp(raw: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// `column = value` against one allow-listed column.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldFilter {
    pub column: &'static str,
    pub value: Value,
}

impl FieldFilter {
    /// Build a filter from a `(fieldName, fieldValue)` pair. The name may be camelCase
    /// or snake_case and must name a column of `table`. Both absent yields no filter.
    pub fn parse(
        table: &TableDef,
        field_name: Option<&str>,
        field_value: Option<&str>,
    ) -> Result<Option<Self>, AppError> {
        let (name, raw) = match (non_empty(field_name), non_empty(field_value)) {
            (None, None) => return Ok(None),
            (Some(name), Some(raw)) => (name, raw),
            (Some(_), None) => return Err(AppError::Validation("fieldValue is required with fieldName".into())),
            (None, Some(_)) => return Err(AppError::Validation("fieldName is required with fieldValue".into())),
        };
        let column_name = to_snake_case(name);
        let column = table
            .column(&column_name)
            .ok_or_else(|| AppError::Validation(format!("unknown field: {}", name)))?;
        let value = if column.is_integer() {
            let n: i64 = raw
                .parse()
                .map_err(|_| AppError::Validation(format!("{} must be an integer", name)))?;
            Value::Number(n.into())
        } else if column.is_timestamp() {
            Value::String(canonical_timestamp(raw).ok_or_else(|| {
                AppError::Validation(format!("{} must be an RFC 3339 timestamp", name))
            })?)
        } else {
            Value::String(raw.to_string())
        };
        Ok(Some(FieldFilter {
            column: column.name,
            value,
        }))
    }
}
