use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, DashboardSettings, DatasetSettings, LoggingSettings};

/// Name of the optional configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "salescope";

/// Prefix of the environment variables that override file settings,
/// e.g. `SALESCOPE_DATASET__PATH` or `SALESCOPE_DASHBOARD__INSIGHTS_WINDOW`.
pub const ENV_PREFIX: &str = "SALESCOPE";

/// Loads the application configuration.
///
/// Sources are layered in order: built-in defaults, then `path` (which must exist) or an
/// optional `salescope.toml` in the working directory, then `SALESCOPE_*` environment
/// variables. The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.dashboard.insights_window == 0 {
        return Err(ConfigError::ValidationError(
            "dashboard.insights_window must be at least 1".to_string(),
        ));
    }
    if let (Some(start), Some(end)) = (config.dashboard.default_start, config.dashboard.default_end) {
        if start > end {
            return Err(ConfigError::ValidationError(format!(
                "dashboard.default_start ({start}) is after dashboard.default_end ({end})"
            )));
        }
    }
    Ok(())
}
