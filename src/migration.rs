//! Schema bootstrap: database, schema and tables from entity metadata.
//! Idempotent (IF NOT EXISTS throughout).

use crate::entity::{all_tables, TableDef};
use crate::error::AppError;
use crate::sql::{qualified_table, quoted};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// CREATE TABLE IF NOT EXISTS for one table. The primary key is an identity column.
pub fn create_table_sql(table: &TableDef, schema: &str) -> String {
    let mut col_defs: Vec<String> = Vec::new();
    for c in table.columns {
        let mut def = if c.name == table.pk_column {
            format!("{} BIGINT GENERATED BY DEFAULT AS IDENTITY", quoted(c.name))
        } else {
            format!("{} {}", quoted(c.name), c.ddl_type())
        };
        if !c.nullable {
            def.push_str(" NOT NULL");
        }
        if let Some(d) = c.default {
            def.push_str(" DEFAULT ");
            def.push_str(d);
        }
        col_defs.push(def);
    }
    col_defs.push(format!("PRIMARY KEY ({})", quoted(table.pk_column)));
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        qualified_table(schema, table.table_name),
        col_defs.join(", ")
    )
}

/// Create `schema` and every entity table in it.
pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
        .execute(pool)
        .await?;
    for table in all_tables() {
        let ddl = create_table_sql(&table, schema);
        tracing::debug!(sql = %ddl, "migration");
        sqlx::query(&ddl).execute(pool).await?;
        tracing::info!(table = table.table_name, schema, "table ready");
    }
    Ok(())
}

/// Connect to the server's `postgres` database and create the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Split `postgres://host/db?opts` into (`postgres://host/postgres`, `db`).
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}
