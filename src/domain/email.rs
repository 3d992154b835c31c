//! Email value object.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{BLOCKED_EMAIL_DOMAINS, MAX_EMAIL_LENGTH};
use crate::errors::{AppError, AppResult};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Validated email address, compared case-insensitively.
#[derive(Debug, Clone)]
pub struct Email(String);

impl Email {
    /// Validate and wrap an email address.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();

        if value.is_empty() {
            return Err(AppError::validation("Email cannot be empty"));
        }
        if value.trim().is_empty() {
            return Err(AppError::validation("Invalid email format"));
        }
        if !EMAIL_PATTERN.is_match(&value) {
            return Err(AppError::validation(format!("Invalid email format: {}", value)));
        }
        if value.chars().count() > MAX_EMAIL_LENGTH {
            return Err(AppError::validation("Email too long"));
        }

        let (local, domain) = value
            .split_once('@')
            .ok_or_else(|| AppError::validation("Invalid email format"))?;

        if local.starts_with('.') || local.ends_with('.') {
            return Err(AppError::validation("Invalid email format"));
        }

        let bad_label = domain
            .split('.')
            .any(|label| label.is_empty() || label.starts_with('-') || label.ends_with('-'));
        if bad_label {
            return Err(AppError::validation("Invalid email format"));
        }

        if BLOCKED_EMAIL_DOMAINS.contains(&domain) {
            return Err(AppError::validation(format!(
                "Email domain not allowed: {}",
                domain
            )));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl Eq for Email {}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
