//! Read-only views into a loaded [`Auth5Config`]
//!
//! These are the only way the rest of the service reads configuration.
//! Share the root as `Arc<Auth5Config>`; nothing hands out `&mut`.

use crate::config::types::{
    Auth5Config, CorsConfig, DatabaseConfig, EmailConfig, MaxMindConfig, OAuthProviders,
    SentryConfig, ServerConfig, SiteConfig, SmtpConfig, StripeConfig, SwaggerConfig,
};
use crate::error::MailProfileNotFound;

impl Auth5Config {
    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// API documentation settings
    pub fn swagger(&self) -> &SwaggerConfig {
        &self.swagger
    }

    /// Payment provider settings
    pub fn stripe(&self) -> &StripeConfig {
        &self.stripe
    }

    /// Geolocation feed settings
    pub fn maxmind(&self) -> &MaxMindConfig {
        &self.maxmind
    }

    /// Error reporting settings
    pub fn sentry(&self) -> &SentryConfig {
        &self.sentry
    }

    pub fn cors(&self) -> &CorsConfig {
        &self.cors
    }

    pub fn database(&self) -> &DatabaseConfig {
        &self.database
    }

    /// Identity provider credentials
    pub fn oauth(&self) -> &OAuthProviders {
        &self.oauth
    }

    /// All mail profiles, in file order
    pub fn emails(&self) -> &[EmailConfig] {
        &self.emails
    }

    /// Nicknames of the configured mail profiles, in file order
    pub fn mail_profile_nicknames(&self) -> impl Iterator<Item = &str> {
        self.emails.iter().map(|e| e.nickname.as_str())
    }

    /// Get the SMTP transport of the mail profile named `nickname`.
    ///
    /// Matching is exact and case-sensitive. Nicknames are not required to be
    /// unique; the first profile in file order wins.
    pub fn mail_profile(&self, nickname: &str) -> Result<&SmtpConfig, MailProfileNotFound> {
        self.emails
            .iter()
            .find(|email| email.nickname == nickname)
            .map(|email| &email.smtp)
            .ok_or_else(|| MailProfileNotFound::new(nickname))
    }
}
