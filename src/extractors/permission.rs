//! Permission guard: rejects the request before the handler body runs.

use crate::auth::{check_permissions, Claims, PermissionSet};
use crate::error::AuthError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use std::marker::PhantomData;

/// Extractor that succeeds only when the bearer token grants every permission in `P`.
pub struct RequirePermissions<P: PermissionSet> {
    pub claims: Claims,
    _set: PhantomData<P>,
}

/// Token of an `Authorization: Bearer <token>` header. The scheme name is case-insensitive.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim()).filter(|t| !t.is_empty())
}

#[async_trait]
impl<P: PermissionSet> FromRequestParts<AppState> for RequirePermissions<P> {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AuthError::MissingToken)?;
        let claims = state.jwt.verify(token)?;
        check_permissions(&claims.permissions, P::REQUIRED)?;
        tracing::debug!(sub = %claims.sub, required = ?P::REQUIRED, "permissions granted");
        Ok(RequirePermissions {
            claims,
            _set: PhantomData,
        })
    }
}
