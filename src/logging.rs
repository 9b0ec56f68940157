//! Logging setup
//!
//! Diagnostics go through `tracing` and are written to stderr so they never
//! mix with the report on stdout. `RUST_LOG`, when set, replaces the level
//! chosen from `-v` flags.

use std::io;
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Minimum level for this crate's events
    pub level: Level,

    /// Include the module target in log lines
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            include_target: false,
        }
    }
}

impl LoggingConfig {
    /// Map the `-v` count: none → warn, `-v` → info, `-vv` → debug,
    /// `-vvv` and beyond → trace (with targets shown).
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            include_target: verbose >= 3,
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("cmakegen={}", self.level)))
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(config.filter())
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(config.include_target)
                    .without_time(),
            )
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(LoggingConfig::from_verbosity(0).level, Level::WARN);
        assert_eq!(LoggingConfig::from_verbosity(1).level, Level::INFO);
        assert_eq!(LoggingConfig::from_verbosity(2).level, Level::DEBUG);
        assert_eq!(LoggingConfig::from_verbosity(3).level, Level::TRACE);
        assert_eq!(LoggingConfig::from_verbosity(9).level, Level::TRACE);
    }

    #[test]
    fn targets_only_at_highest_verbosity() {
        assert!(!LoggingConfig::from_verbosity(2).include_target);
        assert!(LoggingConfig::from_verbosity(3).include_target);
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::from_verbosity(2));
    }
}
