//! trycatch-core
//!
//! Structured try / catch / finally on top of unwinding.
//!
//! ```
//! use trycatch_core::failures::{StorageFailure, ValidationFailure};
//! use trycatch_core::{attempt, raise};
//!
//! let mut steps = Vec::new();
//! attempt(|| raise(ValidationFailure::new("name", "required", 1001)))
//!     .catch::<StorageFailure, _>(|_| steps.push("storage"))
//!     .catch::<ValidationFailure, _>(|e| {
//!         assert_eq!(e.code, 1001);
//!         steps.push("validation");
//!     })
//!     .finally(|| steps.push("cleanup"));
//! assert_eq!(steps, ["validation", "cleanup"]);
//! ```
//!
//! # Modules
//! - **unwind**: `raise` and `attempt` (capture)
//! - **block**: `TryBlock`, the result record threaded through a chain
//! - **dispatch**: `catch`, `catch_with_return`, `catch_any`
//! - **finally**: cleanup plus re-raise of unhandled failures
//! - **typed**: `CatchChain` and the `Handler` traits
//! - **config**: policy for raises that nothing encloses
//! - **failures**: ready-made failure records

pub mod block;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod failures;
pub mod finally;
pub mod payload;
pub mod typed;
pub mod unwind;

pub use block::{BlockState, TryBlock};
pub use config::{Config, UncaughtPolicy};
pub use dispatch::{catch, catch_any, catch_with_return};
pub use error::{ChainError, ConfigError, UncaughtFailure};
pub use finally::finally;
pub use payload::Payload;
pub use typed::{CatchChain, Handler};
pub use unwind::{attempt, attempt_with_return, capture_depth, raise, raise_payload};
