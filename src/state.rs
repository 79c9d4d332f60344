//! Shared application state for all routes. Immutable once built; cloned per request.

use crate::auth::JwtKeys;
use crate::entity::CollegeRecord;
use crate::service::CollegeService;
use crate::store::Mapper;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub colleges: CollegeService,
    pub jwt: Arc<JwtKeys>,
}

impl AppState {
    pub fn new(colleges: Arc<dyn Mapper<CollegeRecord>>, jwt: JwtKeys) -> Self {
        AppState {
            colleges: CollegeService::new(colleges),
            jwt: Arc::new(jwt),
        }
    }
}
