//! Column-level checks derived from table metadata.

use crate::entity::TableDef;
use crate::error::AppError;
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a full column map: required writable columns present, strings within length.
    pub fn validate(table: &TableDef, cols: &Map<String, Value>) -> Result<(), AppError> {
        for col in table.writable_columns() {
            let val = cols.get(col.name).unwrap_or(&Value::Null);
            if !col.nullable && val.is_null() {
                return Err(AppError::Validation(format!("{} is required", col.name)));
            }
            if let (Some(max), Some(s)) = (col.max_length, val.as_str()) {
                if s.chars().count() > max {
                    return Err(AppError::Validation(format!(
                        "{} must be at most {} characters",
                        col.name, max
                    )));
                }
            }
        }
        Ok(())
    }

    /// Reject keys of a partial body that are not writable columns.
    pub fn validate_partial_keys(table: &TableDef, body: &Map<String, Value>) -> Result<(), AppError> {
        for key in body.keys() {
            match table.column(key) {
                Some(c) if c.writable => {}
                Some(_) => return Err(AppError::Validation(format!("{} cannot be changed", key))),
                None => return Err(AppError::Validation(format!("unknown field: {}", key))),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{CollegeRecord, Record};
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn requires_non_nullable_columns() {
        let t = CollegeRecord::TABLE;
        assert!(RequestValidator::validate(&t, &obj(json!({ "college_name": "Arts" }))).is_ok());
        assert!(matches!(
            RequestValidator::validate(&t, &obj(json!({ "description": "x" }))),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn enforces_max_length_in_characters() {
        let t = CollegeRecord::TABLE;
        let ok = "学".repeat(64);
        let too_long = "a".repeat(65);
        assert!(RequestValidator::validate(&t, &obj(json!({ "college_name": ok }))).is_ok());
        assert!(RequestValidator::validate(&t, &obj(json!({ "college_name": too_long }))).is_err());
    }

    #[test]
    fn partial_keys_must_be_writable_columns() {
        let t = CollegeRecord::TABLE;
        assert!(RequestValidator::validate_partial_keys(&t, &obj(json!({ "description": "x" }))).is_ok());
        assert!(RequestValidator::validate_partial_keys(&t, &obj(json!({ "college_id": 3 }))).is_err());
        assert!(RequestValidator::validate_partial_keys(&t, &obj(json!({ "motto": "x" }))).is_err());
    }
}
