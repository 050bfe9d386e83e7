use thiserror::Error;

use crate::payload::Payload;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("handler for failure type '{0}' is already registered")]
    DuplicateType(&'static str),

    #[error("catch-all handler is already set")]
    CatchAllAlreadySet,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid uncaught policy '{0}' (expected 'abort' or 'panic')")]
    InvalidPolicy(String),
}

/// Panic payload used when a raise finds no enclosing `attempt` and the
/// uncaught policy is `Panic`. The original payload is kept intact.
#[derive(Debug, Error)]
#[error("uncaught failure of type {}", .payload.type_name())]
pub struct UncaughtFailure {
    pub payload: Payload,
}

impl UncaughtFailure {
    pub fn into_payload(self) -> Payload {
        self.payload
    }
}
