//! Logging setup: `tracing-subscriber` fmt output filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVE: &str = "teacher_helper=info,tower_http=info";

/// Install the global subscriber. `RUST_LOG` overrides the default directive.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
