//! Configuration types for auth5
//!
//! Mirrors the layout of `auth5.yml`. Every section defaults to empty values
//! so that a missing key surfaces as a `required` violation with its key path
//! instead of a bare deserialization error.

use crate::util::SecretString;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

/// Root configuration structure
///
/// Only obtainable from the loader; read it through the accessor methods.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Auth5Config {
    pub(crate) server: ServerConfig,
    pub(crate) swagger: SwaggerConfig,
    pub(crate) stripe: StripeConfig,
    pub(crate) maxmind: MaxMindConfig,
    pub(crate) sentry: SentryConfig,
    pub(crate) emails: Vec<EmailConfig>,
    pub(crate) cors: CorsConfig,
    pub(crate) database: DatabaseConfig,
    pub(crate) site: SiteConfig,
    pub(crate) oauth: OAuthProviders,
}

/// Public identity of the deployment
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Display name used in mails and pages
    pub name: String,

    /// Frontend base URL
    pub url: String,

    /// Public base URL of this API
    pub api_url: String,
}

/// HTTP listener settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address, must be an IP literal
    pub host: String,

    pub port: u16,
}

impl ServerConfig {
    /// Listener address, `None` if `host` is not an IP literal
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        self.host
            .parse::<IpAddr>()
            .ok()
            .map(|ip| SocketAddr::new(ip, self.port))
    }
}

/// API documentation (Swagger UI) settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SwaggerConfig {
    /// Serve the web UI
    pub web: bool,

    /// Mount path of the docs
    pub path: String,
}

/// Payment provider credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StripeConfig {
    pub secret_key: SecretString,
    pub webhook: WebhookConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Signing secret for incoming webhook events
    pub secret: SecretString,
}

/// Geolocation database feeds
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MaxMindConfig {
    pub geolite2: GeoLite2Config,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeoLite2Config {
    /// Download URL of the GeoLite2 country database
    pub country: String,
}

/// Error reporting
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SentryConfig {
    pub dsn: SecretString,
}

/// One named outbound mail profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Lookup key, e.g. "noreply" or "alerts"
    pub nickname: String,
    pub smtp: SmtpConfig,
}

/// SMTP transport settings of a mail profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SmtpConfig {
    /// Sender display name
    pub name: String,
    pub from: String,
    pub username: String,
    pub password: SecretString,
    pub host: String,
    pub port: u16,
    /// Use implicit TLS instead of STARTTLS
    pub tls: bool,
}

/// Cross-origin policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    pub origins: Vec<String>,
}

/// Persistence backends
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub mongodb: MongoDbConfig,
    pub badger: BadgerConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MongoDbConfig {
    /// Connection string, may embed credentials
    pub uri: SecretString,
    pub db_name: String,
}

/// Embedded key/value store
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BadgerConfig {
    pub dir: String,
}

/// OAuth client registration for one identity provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: SecretString,
    pub redirect_url: String,
}

/// Supported identity providers
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OAuthProviders {
    pub google: OAuthConfig,
    pub github: OAuthConfig,
}
