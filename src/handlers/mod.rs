//! HTTP handlers for the college resource.

pub mod college;
pub use college::*;
