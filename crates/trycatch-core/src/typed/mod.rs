//! Typed - handler types for declarative dispatch chains.
//!
//! # Two layers
//! - **Typed**: `Handler<T>`, registered per failure type
//! - **Dyn**: `DynHandler`, object-safe, so one chain holds many types

pub mod chain;
pub mod handler;

pub use self::chain::CatchChain;
pub use self::handler::{DynHandler, Handler, TypedHandler};
