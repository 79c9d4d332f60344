//! Bearer-token permissions: JWT claims carrying permission names such as `college:add`.

use crate::error::AuthError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// HS256 signing and verification keys derived from one shared secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        JwtKeys {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn issue_token(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(|e| {
            tracing::error!(error = %e, "failed to sign token");
            AuthError::InvalidToken
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

/// Every name in `required` must appear in `granted`.
pub fn check_permissions(granted: &[String], required: &[&str]) -> Result<(), AuthError> {
    match required.iter().find(|r| !granted.iter().any(|g| g == *r)) {
        Some(missing) => Err(AuthError::Forbidden((*missing).to_string())),
        None => Ok(()),
    }
}

/// A static set of permission names a route requires.
pub trait PermissionSet: Send + Sync + 'static {
    const REQUIRED: &'static [&'static str];
}

macro_rules! permission_set {
    ($(#[$meta:meta])* $name:ident => [$($perm:expr),+ $(,)?]) => {
        $(#[$meta])*
        pub struct $name;

        impl PermissionSet for $name {
            const REQUIRED: &'static [&'static str] = &[$($perm),+];
        }
    };
}

pub mod college {
    use super::PermissionSet;

    pub const LIST: &str = "college:list";
    pub const ADD: &str = "college:add";
    pub const UPDATE: &str = "college:update";
    pub const DELETE: &str = "college:delete";

    permission_set!(
        /// Read access: list, get by id, get by field.
        List => [LIST]
    );
    permission_set!(Add => [LIST, ADD]);
    permission_set!(Update => [LIST, UPDATE]);
    permission_set!(Delete => [LIST, DELETE]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(perms: &[&str], exp: usize) -> Claims {
        Claims {
            sub: "teacher-1".into(),
            exp,
            permissions: perms.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn far_future() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn check_permissions_names_the_first_missing_one() {
        let granted = vec![college::LIST.to_string()];
        assert!(check_permissions(&granted, college::List::REQUIRED).is_ok());
        assert_eq!(
            check_permissions(&granted, college::Add::REQUIRED),
            Err(AuthError::Forbidden(college::ADD.into()))
        );
    }

    #[test]
    fn issued_tokens_verify_with_the_same_secret_only() {
        let keys = JwtKeys::from_secret(b"secret");
        let token = keys.issue_token(&claims(&[college::LIST], far_future())).unwrap();
        assert_eq!(keys.verify(&token).unwrap().permissions, vec![college::LIST]);
        let other = JwtKeys::from_secret(b"other");
        assert_eq!(other.verify(&token).unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let keys = JwtKeys::from_secret(b"secret");
        let token = keys.issue_token(&claims(&[college::LIST], 1)).unwrap();
        assert_eq!(keys.verify(&token).unwrap_err(), AuthError::InvalidToken);
    }
}
