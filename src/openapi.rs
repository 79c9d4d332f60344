//! OpenAPI document for the college resource, served as JSON.

use crate::entity::{CollegeRecord, CourseRecord, UserRecord};
use crate::handlers::college;
use crate::response::Status;
use axum::{routing::get, Json, Router};
use utoipa::{
    openapi::{
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
        server::Server,
    },
    Modify, OpenApi,
};

struct BearerSecurityAddon;

impl Modify for BearerSecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "BearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "HS256 token whose `permissions` claim lists names such as `college:list`.",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "teacher-helper", description = "College administration API"),
    paths(
        college::list_colleges,
        college::get_college,
        college::get_college_by_field,
        college::insert_college,
        college::update_college,
        college::patch_college,
        college::delete_college,
    ),
    components(schemas(Status, CollegeRecord, CourseRecord, UserRecord)),
    modifiers(&BearerSecurityAddon),
    tags((name = "colleges", description = "s_college table operations"))
)]
pub struct ApiDoc;

/// The document with its server set to the versioned base path.
pub fn api_doc(api_version: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(format!("/{}", api_version))]);
    doc
}

/// GET /{version}/api-docs/openapi.json
pub fn openapi_routes(api_version: &str) -> Router {
    let doc = api_doc(api_version);
    Router::new().route(
        &format!("/{}/api-docs/openapi.json", api_version),
        get(move || async move { Json(doc) }),
    )
}
