//! Logging setup.

use tracing::Level;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Targets held at `info` regardless of the configured level.
const QUIET_TARGETS: &[&str] = &["hyper", "h2", "tower"];

/// Build the level filter.
///
/// `RUST_LOG` wins when set and valid; otherwise `level` applies to every
/// target except [`QUIET_TARGETS`].
#[must_use]
pub fn env_filter(level: Level) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let mut directives = level.as_str().to_lowercase();
    for target in QUIET_TARGETS {
        directives.push_str(&format!(",{target}=info"));
    }
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Install the global subscriber: JSON or compact human-readable lines.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init(level: Level, json_logs: bool) -> Result<(), TryInitError> {
    let fmt_layer = if json_logs {
        fmt::layer().json().with_target(true).boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt_layer)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_quiets_transport_targets() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let filter = env_filter(Level::DEBUG).to_string().to_lowercase();
        assert!(filter.contains("debug"), "{filter}");
        for target in QUIET_TARGETS {
            assert!(filter.contains(&format!("{target}=info")), "{filter}");
        }
    }
}
