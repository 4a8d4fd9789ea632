//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `calendar`: feed URLs and the display timezone
//! - `refresh`: background refresh cadence
//!
//! Sources are layered: built-in defaults, then an optional `config.*` file in
//! the working directory, then `DAYBOARD_*` environment variables (nested keys
//! separated by `__`), then a bare `PORT` variable.

mod calendar;
mod refresh;
mod server;

use std::{collections::HashMap, path::Path};

use domain::{DomainError, Timezone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use calendar::{CalendarConfig, DEFAULT_TIMEZONE};
pub use refresh::RefreshConfig;
pub use server::ServerConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DAYBOARD";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    /// Values were read but do not make sense together
    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Calendar feeds and timezone
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Refresh cadence
    #[serde(default)]
    pub refresh: RefreshConfig,
}

impl AppConfig {
    /// Load configuration from the process environment and an optional
    /// `config.*` file in the working directory
    pub fn load() -> Result<Self, ConfigError> {
        let file = config::File::with_name("config").required(false);
        Self::build(file, std::env::vars().collect())
    }

    /// Load configuration from an explicit file and variable set
    pub fn load_from(
        file: Option<&Path>,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, ConfigError> {
        let source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };
        Self::build(source, vars.into_iter().collect())
    }

    fn build<F>(file: F, vars: HashMap<String, String>) -> Result<Self, ConfigError>
    where
        F: config::Source + Send + Sync + 'static,
    {
        let port_override = vars.get("PORT").cloned();

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("calendar.timezone", DEFAULT_TIMEZONE)?
            .set_default("refresh.interval_secs", 96)?
            .set_default("refresh.fetch_timeout_secs", 5)?
            // Load from file if exists
            .add_source(file)
            // Override with environment variables (e.g., DAYBOARD_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("calendar.feeds")
                    .with_list_parse_key("server.allowed_origins")
                    .ignore_empty(true)
                    .try_parsing(true)
                    .source(Some(vars.into_iter().collect())),
            )
            .set_override_option("server.port", port_override)?;

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// The display timezone
    pub fn timezone(&self) -> Result<Timezone, DomainError> {
        Timezone::parse(&self.calendar.timezone)
    }

    /// Check every setting, collecting all problems rather than the first
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if let Err(e) = self.timezone() {
            problems.push(e.to_string());
        }
        if self.refresh.interval_secs == 0 {
            problems.push("refresh.interval_secs must be greater than zero".to_string());
        }
        if self.refresh.fetch_timeout_secs == 0 {
            problems.push("refresh.fetch_timeout_secs must be greater than zero".to_string());
        }
        for url in self.calendar.invalid_feeds() {
            problems.push(format!("calendar feed is not an http(s) URL: {url}"));
        }
        if !matches!(self.server.log_format.to_ascii_lowercase().as_str(), "text" | "json") {
            problems.push(format!(
                "server.log_format must be \"text\" or \"json\", got {:?}",
                self.server.log_format
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }
}
