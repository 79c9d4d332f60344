//! College routes under `/{version}/colleges`. Both the bare base path and its
//! trailing-slash form address the collection. `/college` is the field lookup for
//! GET; any other method there is an id operation whose id does not parse.

use crate::handlers::college::{
    delete_college, get_college, get_college_by_field, insert_college, list_colleges, patch_college,
    update_college,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn college_routes(state: AppState, base: &str) -> Router {
    let base = base.trim_end_matches('/');
    Router::new()
        .route(base, get(list_colleges).post(insert_college))
        .route(&format!("{}/", base), get(list_colleges).post(insert_college))
        .route(
            &format!("{}/college", base),
            get(get_college_by_field)
                .put(update_college)
                .patch(patch_college)
                .delete(delete_college),
        )
        .route(
            &format!("{}/:college_id", base),
            get(get_college)
                .put(update_college)
                .patch(patch_college)
                .delete(delete_college),
        )
        .with_state(state)
}
