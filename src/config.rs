//! Runtime configuration from environment variables (a `.env` file is honoured by the binary).

use crate::error::ConfigError;

pub const MEMORY_DATABASE_URL: &str = "memory://";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// PostgreSQL URL, or `memory://` for the in-process store.
    pub database_url: String,
    pub db_schema: String,
    pub db_max_connections: u32,
    pub bind_addr: String,
    /// Route prefix segment, e.g. `v1` -> `/v1/colleges`.
    pub api_version: String,
    pub jwt_secret: String,
    pub body_limit_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVar("JWT_SECRET"))?;
        let api_version = get("API_VERSION", "v1").trim_matches('/').to_string();
        if api_version.is_empty() || api_version.contains('/') {
            return Err(ConfigError::Load(format!(
                "API_VERSION must be a single path segment, got '{}'",
                api_version
            )));
        }
        Ok(AppConfig {
            database_url: get("DATABASE_URL", "postgres://localhost/teacher_helper"),
            db_schema: get("DB_SCHEMA", "public"),
            db_max_connections: parse_num("DB_MAX_CONNECTIONS", &get("DB_MAX_CONNECTIONS", "5"))?,
            bind_addr: get("BIND_ADDR", "0.0.0.0:3000"),
            api_version,
            jwt_secret,
            body_limit_bytes: parse_num("BODY_LIMIT_BYTES", &get("BODY_LIMIT_BYTES", "1048576"))?,
        })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with(MEMORY_DATABASE_URL)
    }

    /// Base path of the college resource, e.g. `/v1/colleges`.
    pub fn colleges_path(&self) -> String {
        format!("/{}/colleges", self.api_version)
    }
}

fn parse_num<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Load(format!("{} must be a number, got '{}'", key, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_the_secret_is_set() {
        let cfg = AppConfig::from_lookup(lookup(&[("JWT_SECRET", "s")])).unwrap();
        assert_eq!(cfg.db_schema, "public");
        assert_eq!(cfg.db_max_connections, 5);
        assert_eq!(cfg.colleges_path(), "/v1/colleges");
        assert!(!cfg.uses_memory_store());
    }

    #[test]
    fn secret_is_required() {
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[])),
            Err(ConfigError::MissingVar("JWT_SECRET"))
        ));
    }

    #[test]
    fn rejects_bad_numbers_and_nested_versions() {
        let bad_pool = lookup(&[("JWT_SECRET", "s"), ("DB_MAX_CONNECTIONS", "many")]);
        assert!(matches!(AppConfig::from_lookup(bad_pool), Err(ConfigError::Load(_))));
        let nested = lookup(&[("JWT_SECRET", "s"), ("API_VERSION", "api/v2")]);
        assert!(AppConfig::from_lookup(nested).is_err());
    }

    #[test]
    fn version_slashes_are_trimmed_and_memory_is_detected() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s"),
            ("API_VERSION", "/v2/"),
            ("DATABASE_URL", "memory://"),
        ]))
        .unwrap();
        assert_eq!(cfg.colleges_path(), "/v2/colleges");
        assert!(cfg.uses_memory_store());
    }
}
