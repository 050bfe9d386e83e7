//! Ready-made failure records.
//!
//! Plain immutable values with a derived message. Nothing else in the crate
//! depends on them; any `Any + Send` value can be raised.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("validation error [{code}] on field '{field}': {message}")]
pub struct ValidationFailure {
    pub field: String,
    pub message: String,
    pub code: i32,
}

impl ValidationFailure {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: i32) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }
}

/// A storage operation (SELECT, INSERT, ...) failed on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("database error during {operation} on table '{resource}': {cause}")]
pub struct StorageFailure {
    pub operation: String,
    pub resource: String,
    pub cause: String,
}

impl StorageFailure {
    pub fn new(
        operation: impl Into<String>,
        resource: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        Self {
            operation: operation.into(),
            resource: resource.into(),
            cause: cause.into(),
        }
    }
}

/// A remote call failed, either with a status code or by timing out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkFailure {
    pub url: String,
    pub status_code: u16,
    pub timeout: bool,
}

impl NetworkFailure {
    pub fn new(url: impl Into<String>, status_code: u16) -> Self {
        Self {
            url: url.into(),
            status_code,
            timeout: false,
        }
    }

    /// Timeouts carry no status code (0).
    pub fn timeout(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status_code: 0,
            timeout: true,
        }
    }
}

impl fmt::Display for NetworkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.timeout {
            write!(f, "network timeout when accessing {}", self.url)
        } else {
            write!(
                f,
                "network error {} when accessing {}",
                self.status_code, self.url
            )
        }
    }
}

impl std::error::Error for NetworkFailure {}

/// A business rule was violated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("business rule violation: {rule} - {details}")]
pub struct RuleViolation {
    pub rule: String,
    pub details: String,
}

impl RuleViolation {
    pub fn new(rule: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            details: details.into(),
        }
    }
}
