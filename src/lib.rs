//! Teacher helper admin backend: the college REST resource and the course/user
//! persistence ports, over PostgreSQL.

pub mod auth;
pub mod case;
pub mod config;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod openapi;
pub mod query;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod telemetry;

pub use auth::{check_permissions, Claims, JwtKeys};
pub use config::AppConfig;
pub use entity::{CollegeRecord, CourseRecord, Record, UserRecord};
pub use error::{AppError, AuthError, ConfigError};
pub use migration::{apply_migrations, ensure_database_exists};
pub use response::{ApiResponse, Status};
pub use routes::{app, college_routes, common_routes};
pub use service::{CollegeService, CrudService};
pub use state::AppState;
pub use store::{CollegeMapper, CourseMapper, Mapper, MemoryMapper, PgMapper, UserMapper};
