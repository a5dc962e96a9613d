//! auth5 configuration
//!
//! Layered configuration for the auth5 service: a YAML settings file with
//! environment-variable overrides, validated once at startup.
//!
//! ## Sources
//!
//! ```text
//! auth5.yml ($AUTH5_CONFIG)  <  AUTH5_* environment variables
//! ```
//!
//! Overrides address keys by their dotted path after the prefix, so
//! `AUTH5_SERVER.PORT=9090` replaces `server.port`.
//!
//! ## Example Configuration
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//! emails:
//!   - nickname: noreply
//!     smtp:
//!       name: auth5
//!       from: noreply@example.com
//!       username: noreply@example.com
//!       password: secret
//!       host: smtp.example.com
//!       port: 587
//!       tls: false
//! ```
//!
//! See `auth5.example.yml` for every section. A loaded [`Auth5Config`] is
//! immutable; share it as `Arc<Auth5Config>` and read it through its
//! accessors, e.g. [`Auth5Config::mail_profile`].

pub mod config;
pub mod error;
pub mod util;

// Re-export main types
pub use crate::config::{Auth5Config, load_config};
pub use error::{ConfigError, MailProfileNotFound, Result};
