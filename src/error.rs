//! Error types for auth5-config
//!
//! Load-time errors ([`ConfigError`]) are meant to stop the service before it
//! serves traffic. [`MailProfileNotFound`] is the only error raised after
//! startup and is returned to the caller to handle.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration from {origin}: {reason}")]
    Parse { origin: String, reason: String },

    #[error("Failed to deserialize configuration: {0}")]
    Deserialize(String),

    #[error("Configuration validation failed: {0}")]
    Invalid(Violations),
}

impl ConfigError {
    /// Validation violations, if this is a validation failure
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            ConfigError::Invalid(violations) => Some(violations),
            _ => None,
        }
    }
}

/// No mail profile carries the requested nickname
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("SMTP configuration not found for nickname: {nickname}")]
pub struct MailProfileNotFound {
    pub nickname: String,
}

impl MailProfileNotFound {
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
        }
    }
}

/// The constraint a field failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    Url,
    IpAddr,
    Email,
    PortRange,
    MinItems(usize),
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => f.write_str("is required"),
            Rule::Url => f.write_str("must be a valid absolute URL"),
            Rule::IpAddr => f.write_str("must be a valid IP address"),
            Rule::Email => f.write_str("must be a valid email address"),
            Rule::PortRange => f.write_str("must be between 1 and 65535"),
            Rule::MinItems(min) => write!(f, "must contain at least {min} item(s)"),
        }
    }
}

/// A failed rule, addressed by the dotted key path of the field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub rule: Rule,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.rule)
    }
}

/// Every violation found in one validation pass, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub(crate) fn push(&mut self, field: String, rule: Rule) {
        self.0.push(Violation { field, rule });
    }

    pub fn first(&self) -> Option<&Violation> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The rule `field` failed, if any
    pub fn rule_for(&self, field: &str) -> Option<Rule> {
        self.0.iter().find(|v| v.field == field).map(|v| v.rule)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Result type alias for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violations_display() {
        let mut violations = Violations::default();
        violations.push("server.host".into(), Rule::IpAddr);
        violations.push("emails".into(), Rule::MinItems(1));

        assert_eq!(
            violations.to_string(),
            "server.host must be a valid IP address; emails must contain at least 1 item(s)"
        );
        assert_eq!(violations.len(), 2);
        assert_eq!(violations.first().unwrap().field, "server.host");
        assert_eq!(violations.rule_for("emails"), Some(Rule::MinItems(1)));
        assert_eq!(violations.rule_for("server.port"), None);
    }

    #[test]
    fn test_config_error_violations() {
        let mut violations = Violations::default();
        violations.push("site.name".into(), Rule::Required);
        let err = ConfigError::Invalid(violations);
        assert!(err.to_string().contains("site.name is required"));
        assert_eq!(err.violations().unwrap().len(), 1);

        let err = ConfigError::Deserialize("bad".into());
        assert!(err.violations().is_none());
    }

    #[test]
    fn test_mail_profile_not_found_names_nickname() {
        let err = MailProfileNotFound::new("missing");
        assert_eq!(err.nickname, "missing");
        assert!(err.to_string().contains("missing"));
    }
}
