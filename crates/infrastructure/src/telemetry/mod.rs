//! Logging setup
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` (from `RUST_LOG`,
//! falling back to info for this workspace's crates) feeding either a
//! human-readable or a JSON formatter.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or unparseable
pub const DEFAULT_LOG_FILTER: &str = "dayboard_server=info,presentation_http=info,infrastructure=info,\
                                      application=info,integration_ical=info,tower_http=info";

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// `"json"` (any case) selects JSON, everything else text
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Overrides `RUST_LOG` when set
    pub filter: Option<String>,
}

impl LogConfig {
    fn env_filter(&self) -> EnvFilter {
        let parsed = match self.filter.as_deref() {
            Some(directives) => EnvFilter::try_new(directives).ok(),
            None => EnvFilter::try_from_default_env().ok(),
        };
        parsed.unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
    }
}

/// Install the global subscriber
///
/// Returns `false` if a subscriber was already installed (e.g. by a test
/// harness), in which case the existing one stays in effect.
pub fn init_tracing(config: &LogConfig) -> bool {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    let result = match config.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
            .try_init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };
    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_from_name() {
        assert_eq!(LogFormat::from_name("json"), LogFormat::Json);
        assert_eq!(LogFormat::from_name("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from_name("text"), LogFormat::Text);
        assert_eq!(LogFormat::from_name("pretty"), LogFormat::Text);
    }

    #[test]
    fn explicit_filter_is_used() {
        let config = LogConfig {
            filter: Some("warn".into()),
            ..Default::default()
        };
        assert_eq!(config.env_filter().to_string(), "warn");
    }

    #[test]
    fn bad_filter_falls_back_to_default() {
        let config = LogConfig {
            filter: Some("integration_ical=loud".into()),
            ..Default::default()
        };
        assert!(config.env_filter().to_string().contains("integration_ical=info"));
    }

    #[test]
    fn second_init_is_harmless() {
        let config = LogConfig::default();
        let _ = init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}
