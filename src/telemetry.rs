//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::LogLevel;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise the crate logs at `level` and
/// everything else at `warn`. Calling this twice is harmless.
pub fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn default_directives(level: LogLevel) -> String {
    format!(
        "warn,smartheat_skill={},tower_http={}",
        level.name(),
        level.name()
    )
}
