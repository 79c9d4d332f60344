//! Request extractors.

mod permission;
pub use permission::RequirePermissions;
