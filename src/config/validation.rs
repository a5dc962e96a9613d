//! Structural validation of a deserialized [`Auth5Config`]
//!
//! Each section checks its own fields against the rule table and records
//! every failure under the field's dotted key path. Nothing short-circuits,
//! so one pass reports all problems in the file.

use crate::config::types::{
    Auth5Config, CorsConfig, DatabaseConfig, EmailConfig, MaxMindConfig, OAuthConfig,
    OAuthProviders, SentryConfig, ServerConfig, SiteConfig, StripeConfig, SwaggerConfig,
};
use crate::error::{ConfigError, Rule, Violations};
use crate::util::SecretString;
use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

/// Validate configuration values
pub fn validate_config(config: &Auth5Config) -> Result<(), ConfigError> {
    let mut v = Validator::default();

    config.server.validate("server", &mut v);
    config.swagger.validate("swagger", &mut v);
    config.stripe.validate("stripe", &mut v);
    config.maxmind.validate("maxmind", &mut v);
    config.sentry.validate("sentry", &mut v);
    if v.min_items("emails", config.emails.len(), 1) {
        for (i, email) in config.emails.iter().enumerate() {
            email.validate(&format!("emails[{i}]"), &mut v);
        }
    }
    config.cors.validate("cors", &mut v);
    config.database.validate("database", &mut v);
    config.site.validate("site", &mut v);
    config.oauth.validate("oauth", &mut v);

    v.finish()
}

/// Absolute URL with a scheme (`https://example.com`, `mailto:a@b.c`)
pub fn is_valid_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

/// IPv4 or IPv6 literal
pub fn is_valid_ip(value: &str) -> bool {
    value.parse::<IpAddr>().is_ok()
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Rules over one section, keyed under `prefix`
trait Validate {
    fn validate(&self, prefix: &str, v: &mut Validator);
}

fn key(prefix: &str, field: &str) -> String {
    format!("{prefix}.{field}")
}

/// Collects violations for one validation pass.
///
/// Every check returns whether the value passed so callers can skip
/// dependent checks.
#[derive(Default)]
struct Validator {
    violations: Violations,
}

impl Validator {
    fn fail(&mut self, field: String, rule: Rule) -> bool {
        self.violations.push(field, rule);
        false
    }

    fn required(&mut self, field: String, value: &str) -> bool {
        if value.is_empty() {
            return self.fail(field, Rule::Required);
        }
        true
    }

    fn required_secret(&mut self, field: String, value: &SecretString) -> bool {
        self.required(field, value.expose_secret())
    }

    fn url(&mut self, field: String, value: &str) -> bool {
        if !self.required(field.clone(), value) {
            return false;
        }
        if !is_valid_url(value) {
            return self.fail(field, Rule::Url);
        }
        true
    }

    fn ip(&mut self, field: String, value: &str) -> bool {
        if !self.required(field.clone(), value) {
            return false;
        }
        if !is_valid_ip(value) {
            return self.fail(field, Rule::IpAddr);
        }
        true
    }

    fn email(&mut self, field: String, value: &str) -> bool {
        if !self.required(field.clone(), value) {
            return false;
        }
        if !is_valid_email(value) {
            return self.fail(field, Rule::Email);
        }
        true
    }

    fn port(&mut self, field: String, value: u16) -> bool {
        // u16 already caps the upper bound
        if value == 0 {
            return self.fail(field, Rule::PortRange);
        }
        true
    }

    fn min_items(&mut self, field: &str, len: usize, min: usize) -> bool {
        if len < min {
            return self.fail(field.to_string(), Rule::MinItems(min));
        }
        true
    }

    fn finish(self) -> Result<(), ConfigError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(self.violations))
        }
    }
}

impl Validate for SiteConfig {
    fn validate(&self, prefix: &str, v: &mut Validator) {
        v.required(key(prefix, "name"), &self.name);
        v.url(key(prefix, "url"), &self.url);
        v.url(key(prefix, "api_url"), &self.api_url);
    }
}

impl Validate for ServerConfig {
    fn validate(&self, prefix: &str, v: &mut Validator) {
        v.ip(key(prefix, "host"), &self.host);
        v.port(key(prefix, "port"), self.port);
    }
}

impl Validate for SwaggerConfig {
    fn validate(&self, prefix: &str, v: &mut Validator) {
        v.required(key(prefix, "path"), &self.path);
    }
}

impl Validate for StripeConfig {
    fn validate(&self, prefix: &str, v: &mut Validator) {
        v.required_secret(key(prefix, "secret_key"), &self.secret_key);
        v.required_secret(key(prefix, "webhook.secret"), &self.webhook.secret);
    }
}

impl Validate for MaxMindConfig {
    fn validate(&self, prefix: &str, v: &mut Validator) {
        v.url(key(prefix, "geolite2.country"), &self.geolite2.country);
    }
}

impl Validate for SentryConfig {
    fn validate(&self, prefix: &str, v: &mut Validator) {
        v.required_secret(key(prefix, "dsn"), &self.dsn);
    }
}

impl Validate for EmailConfig {
    fn validate(&self, prefix: &str, v: &mut Validator) {
        v.required(key(prefix, "nickname"), &self.nickname);

        let smtp = &self.smtp;
        v.required(key(prefix, "smtp.name"), &smtp.name);
        v.email(key(prefix, "smtp.from"), &smtp.from);
        v.email(key(prefix, "smtp.username"), &smtp.username);
        v.required_secret(key(prefix, "smtp.password"), &smtp.password);
        v.required(key(prefix, "smtp.host"), &smtp.host);
        v.port(key(prefix, "smtp.port"), smtp.port);
    }
}

impl Validate for CorsConfig {
    fn validate(&self, prefix: &str, v: &mut Validator) {
        let field = key(prefix, "origins");
        if v.min_items(&field, self.origins.len(), 1) {
            for (i, origin) in self.origins.iter().enumerate() {
                v.url(format!("{field}[{i}]"), origin);
            }
        }
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self, prefix: &str, v: &mut Validator) {
        v.required_secret(key(prefix, "mongodb.uri"), &self.mongodb.uri);
        v.required(key(prefix, "mongodb.db_name"), &self.mongodb.db_name);
        v.required(key(prefix, "badger.dir"), &self.badger.dir);
    }
}

impl Validate for OAuthConfig {
    fn validate(&self, prefix: &str, v: &mut Validator) {
        v.required(key(prefix, "client_id"), &self.client_id);
        v.required_secret(key(prefix, "client_secret"), &self.client_secret);
        v.url(key(prefix, "redirect_url"), &self.redirect_url);
    }
}

impl Validate for OAuthProviders {
    fn validate(&self, prefix: &str, v: &mut Validator) {
        self.google.validate(&key(prefix, "google"), v);
        self.github.validate(&key(prefix, "github"), v);
    }
}
