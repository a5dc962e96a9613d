//! Configuration module
//!
//! Loads `auth5.yml`, overlays `AUTH5_*` environment variables, validates
//! the result and exposes it through read-only accessors.

mod accessors;
pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{
    CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE, ENV_PREFIX, load_config, load_config_from_path,
    load_config_from_str, load_config_with_env, resolve_config_path,
};
pub use types::*;
pub use validation::validate_config;
