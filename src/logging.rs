//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::schema::LogLevel;

/// Filter directive for a configured level. Only this crate logs at the
/// configured level; dependencies stay at `warn`.
pub fn default_directive(level: LogLevel) -> String {
    format!("warn,campaign_dash={level}")
}

/// Install the global subscriber. `RUST_LOG` wins over `level`.
///
/// Logs go to stderr so `summary --format json` stays pipeable. Calling this
/// twice is harmless; the second call is ignored.
pub fn init(level: LogLevel) {
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));
    let _ = fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_scopes_level_to_this_crate() {
        assert_eq!(default_directive(LogLevel::Info), "warn,campaign_dash=info");
        assert_eq!(default_directive(LogLevel::Trace), "warn,campaign_dash=trace");
    }

    #[test]
    fn directive_parses() {
        for level in [LogLevel::Error, LogLevel::Debug] {
            assert!(EnvFilter::try_new(default_directive(level)).is_ok());
        }
    }
}
