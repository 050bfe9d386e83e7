//! TryBlock - result record of a protected computation.
//!
//! # State transitions
//! - `Clean`: the computation finished; nothing to dispatch
//! - `Unhandled(payload)`: a raise was captured and nobody consumed it yet
//! - `Handled`: exactly one handler consumed the payload (terminal)
//!
//! The block is an owned value moved through each dispatch call and returned,
//! so a single chain is the only writer.

use serde::Serialize;

use crate::payload::Payload;

#[derive(Debug)]
enum Inner {
    Clean,
    Unhandled(Payload),
    Handled { type_name: &'static str },
}

/// Result of [`attempt`](crate::attempt).
///
/// `None` converts into an empty `Clean` block, so every dispatch step and
/// `finally` also accept an absent block.
#[derive(Debug)]
#[must_use = "an unhandled failure is only re-raised by `finally`"]
pub struct TryBlock {
    inner: Inner,
}

/// Summary of a block's state, for assertions and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockState {
    Clean,
    Unhandled,
    Handled,
}

impl TryBlock {
    pub fn clean() -> Self {
        Self {
            inner: Inner::Clean,
        }
    }

    pub(crate) fn unhandled(payload: Payload) -> Self {
        Self {
            inner: Inner::Unhandled(payload),
        }
    }

    pub fn state(&self) -> BlockState {
        match self.inner {
            Inner::Clean => BlockState::Clean,
            Inner::Unhandled(_) => BlockState::Unhandled,
            Inner::Handled { .. } => BlockState::Handled,
        }
    }

    pub fn is_clean(&self) -> bool {
        matches!(self.inner, Inner::Clean)
    }

    pub fn is_unhandled(&self) -> bool {
        matches!(self.inner, Inner::Unhandled(_))
    }

    pub fn is_handled(&self) -> bool {
        matches!(self.inner, Inner::Handled { .. })
    }

    /// The pending failure, if one is still waiting for a handler.
    pub fn failure(&self) -> Option<&Payload> {
        match &self.inner {
            Inner::Unhandled(p) => Some(p),
            _ => None,
        }
    }

    /// Type name of the captured failure, pending or already handled.
    pub fn failure_type(&self) -> Option<&'static str> {
        match &self.inner {
            Inner::Clean => None,
            Inner::Unhandled(p) => Some(p.type_name()),
            Inner::Handled { type_name } => Some(type_name),
        }
    }

    /// Take the pending failure out without re-raising it.
    pub fn into_failure(self) -> Option<Payload> {
        match self.inner {
            Inner::Unhandled(p) => Some(p),
            _ => None,
        }
    }

    /// Offer the pending payload to `f`.
    ///
    /// `f` gets the payload by value and either consumes it (`Ok`) or hands
    /// it back (`Err`). A consumed payload moves the block to `Handled`; a
    /// returned one leaves it `Unhandled`. Non-pending blocks skip `f`.
    pub(crate) fn offer<R>(
        self,
        f: impl FnOnce(Payload) -> Result<R, Payload>,
    ) -> (Option<R>, Self) {
        match self.inner {
            Inner::Unhandled(payload) => {
                let type_name = payload.type_name();
                match f(payload) {
                    Ok(r) => (
                        Some(r),
                        Self {
                            inner: Inner::Handled { type_name },
                        },
                    ),
                    Err(payload) => (None, Self::unhandled(payload)),
                }
            }
            inner => (None, Self { inner }),
        }
    }
}

impl Default for TryBlock {
    fn default() -> Self {
        Self::clean()
    }
}

impl From<Option<TryBlock>> for TryBlock {
    fn from(block: Option<TryBlock>) -> Self {
        block.unwrap_or_default()
    }
}
