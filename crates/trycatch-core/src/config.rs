//! Config - what happens when a raise has no enclosing `attempt`.
//!
//! The setting is process-wide. It is read only on the uncaught path, so
//! installing a config never changes how captured failures behave.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::ConfigError;

/// Environment variable read by [`Config::from_env`].
pub const UNCAUGHT_ENV: &str = "TRYCATCH_UNCAUGHT";

/// Policy for a raise that no `attempt` encloses.
///
/// - `Abort`: report and abort the process (default)
/// - `Panic`: turn it into a genuine panic carrying `UncaughtFailure`
///
/// Only `Abort` guarantees an uncaught failure is never dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UncaughtPolicy {
    #[default]
    Abort,
    /// Escape hatch for test harnesses and embedding hosts.
    ///
    /// The panic can be recovered with `catch_unwind` or `JoinHandle::join`,
    /// and the caller then owns the failure. Nothing stops it from being
    /// discarded there.
    Panic,
}

impl UncaughtPolicy {
    fn as_u8(self) -> u8 {
        match self {
            UncaughtPolicy::Abort => 0,
            UncaughtPolicy::Panic => 1,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            1 => UncaughtPolicy::Panic,
            _ => UncaughtPolicy::Abort,
        }
    }
}

impl FromStr for UncaughtPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(UncaughtPolicy::Abort),
            "panic" => Ok(UncaughtPolicy::Panic),
            _ => Err(ConfigError::InvalidPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for UncaughtPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UncaughtPolicy::Abort => f.write_str("abort"),
            UncaughtPolicy::Panic => f.write_str("panic"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub uncaught: UncaughtPolicy,
}

static UNCAUGHT: AtomicU8 = AtomicU8::new(0);

impl Config {
    pub fn with_uncaught(mut self, policy: UncaughtPolicy) -> Self {
        self.uncaught = policy;
        self
    }

    /// Build a config from `TRYCATCH_UNCAUGHT`. Unset means the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_value(std::env::var(UNCAUGHT_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Result<Self, ConfigError> {
        match value {
            None => Ok(Self::default()),
            Some(v) => Ok(Self::default().with_uncaught(v.parse()?)),
        }
    }

    /// Make this config the process-wide one.
    pub fn install(self) {
        UNCAUGHT.store(self.uncaught.as_u8(), Ordering::SeqCst);
        tracing::debug!(uncaught = %self.uncaught, "trycatch config installed");
    }
}

/// The currently installed config.
pub fn current() -> Config {
    Config {
        uncaught: UncaughtPolicy::from_u8(UNCAUGHT.load(Ordering::SeqCst)),
    }
}
