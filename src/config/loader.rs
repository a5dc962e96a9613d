//! Configuration loader with layered sources
//!
//! Loads configuration from two sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (`AUTH5_*`, e.g. `AUTH5_SERVER.PORT`)
//! 2. The YAML settings file (`$AUTH5_CONFIG`, or `auth5.yml`)
//!
//! There are no default values: anything the two layers leave empty fails
//! validation.

use crate::config::types::Auth5Config;
use crate::config::validation::validate_config;
use crate::error::{ConfigError, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, Source};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Environment variable naming the settings file
pub const CONFIG_PATH_ENV: &str = "AUTH5_CONFIG";

/// Settings file used when `AUTH5_CONFIG` is unset or empty
pub const DEFAULT_CONFIG_FILE: &str = "auth5.yml";

/// Prefix of overriding environment variables (`AUTH5_` + dotted key path)
pub const ENV_PREFIX: &str = "AUTH5";

/// List-valued keys an override may replace, as comma-separated items
const ENV_LIST_KEYS: &[&str] = &["cors.origins"];

/// Resolve the settings file path from `AUTH5_CONFIG`
pub fn resolve_config_path() -> PathBuf {
    config_path_from(std::env::var(CONFIG_PATH_ENV).ok())
}

fn config_path_from(value: Option<String>) -> PathBuf {
    match value.filter(|v| !v.is_empty()) {
        Some(path) => PathBuf::from(shellexpand::tilde(&path).as_ref()),
        None => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}

/// Load configuration from the resolved settings file and the environment
pub fn load_config() -> Result<Auth5Config> {
    let path = resolve_config_path();
    load_config_from_path(&path)
}

/// Load configuration from `path`, overlaid with the process environment
pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<Auth5Config> {
    load_file(path.as_ref(), env_overlay())
}

/// Load configuration from `path`, overlaid with an explicit variable set
/// instead of the process environment.
///
/// Variable names follow the same rules as real environment variables,
/// e.g. `("AUTH5_SERVER.PORT", "9090")`.
pub fn load_config_with_env<I, K, V>(path: impl AsRef<Path>, vars: I) -> Result<Auth5Config>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let vars = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    load_file(path.as_ref(), env_overlay().source(Some(vars)))
}

/// Load configuration from a YAML string, without environment overrides
pub fn load_config_from_str(yaml: &str) -> Result<Auth5Config> {
    let builder = Config::builder().add_source(File::from_str(yaml, FileFormat::Yaml));
    finish(builder, None, "<string>")
}

fn env_overlay() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator(".")
}

fn load_file(path: &Path, overlay: Environment) -> Result<Auth5Config> {
    info!(config_file = %path.display(), "Loading config file");

    if !path.is_file() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let builder = Config::builder().add_source(File::from(path).format(FileFormat::Yaml));
    finish(builder, Some(overlay), &path.display().to_string())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn finish(
    mut builder: ConfigBuilder<DefaultState>,
    overlay: Option<Environment>,
    origin: &str,
) -> Result<Auth5Config> {
    // A broken environment only costs us the overlay, never the load
    if let Some(overlay) = overlay {
        match overlay.collect() {
            Ok(overrides) => {
                if !overrides.is_empty() {
                    let keys: Vec<_> = overrides.keys().collect();
                    debug!(?keys, "Applying environment overrides");
                }
                builder = builder.add_source(overlay);

                for key in ENV_LIST_KEYS {
                    let Some(value) = overrides.get(*key) else {
                        continue;
                    };
                    let items = split_list(&value.to_string());
                    builder = builder
                        .set_override(*key, items)
                        .map_err(|e| ConfigError::Parse {
                            origin: format!("environment override of {key}"),
                            reason: e.to_string(),
                        })?;
                }
            }
            Err(e) => {
                error!(error = %e, prefix = ENV_PREFIX, "Error loading environment variables");
            }
        }
    }

    let merged = builder.build().map_err(|e| ConfigError::Parse {
        origin: origin.to_string(),
        reason: e.to_string(),
    })?;

    let config: Auth5Config = merged
        .try_deserialize()
        .map_err(|e| ConfigError::Deserialize(e.to_string()))?;

    validate_config(&config).inspect_err(|e| {
        for violation in e.violations().into_iter().flatten() {
            error!(field = %violation.field, rule = %violation.rule, "Invalid configuration value");
        }
    })?;

    Ok(config)
}
