//! Raise and capture.
//!
//! `raise` unwinds with a private marker via `std::panic::resume_unwind`,
//! which skips the panic hook. `attempt` intercepts only that marker; any
//! other panic is resumed untouched and keeps its own (fatal) category.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

use crate::block::TryBlock;
use crate::config::{self, UncaughtPolicy};
use crate::error::UncaughtFailure;
use crate::payload::Payload;

/// Unwind marker that only `raise` produces.
struct Raised(Payload);

thread_local! {
    static CAPTURE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Keeps the per-thread capture depth balanced, also while unwinding.
struct CaptureScope;

impl CaptureScope {
    fn enter() -> Self {
        CAPTURE_DEPTH.with(|d| d.set(d.get() + 1));
        CaptureScope
    }
}

impl Drop for CaptureScope {
    fn drop(&mut self) {
        CAPTURE_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Number of `attempt` calls currently on this thread's stack.
pub fn capture_depth() -> usize {
    CAPTURE_DEPTH.with(Cell::get)
}

/// Raise `payload` to the nearest enclosing [`attempt`] on this thread.
///
/// With no enclosing `attempt` the installed [`UncaughtPolicy`] decides:
/// abort the process, or turn the raise into a genuine panic.
pub fn raise<P: Any + Send>(payload: P) -> ! {
    raise_payload(Payload::new(payload))
}

/// Raise an already captured payload without wrapping it again.
pub fn raise_payload(payload: Payload) -> ! {
    if capture_depth() == 0 {
        uncaught(payload);
    }
    tracing::trace!(failure = payload.type_name(), "raise");
    panic::resume_unwind(Box::new(Raised(payload)))
}

#[cold]
fn uncaught(payload: Payload) -> ! {
    match config::current().uncaught {
        UncaughtPolicy::Abort => {
            tracing::error!(
                failure = payload.type_name(),
                "raise with no enclosing attempt; aborting"
            );
            eprintln!(
                "trycatch: uncaught failure of type {}; aborting",
                payload.type_name()
            );
            std::process::abort()
        }
        UncaughtPolicy::Panic => panic::panic_any(UncaughtFailure { payload }),
    }
}

/// Run `f`, capturing any failure raised inside it.
///
/// Returns `Clean` when `f` finished and `Unhandled` when it raised. Panics
/// that did not come from [`raise`] pass through unchanged.
pub fn attempt<F>(f: F) -> TryBlock
where
    F: FnOnce(),
{
    let (_, block) = attempt_with_return(f);
    block
}

/// Like [`attempt`], also returning `f`'s value on the clean path.
pub fn attempt_with_return<F, R>(f: F) -> (Option<R>, TryBlock)
where
    F: FnOnce() -> R,
{
    let result = {
        let _scope = CaptureScope::enter();
        panic::catch_unwind(AssertUnwindSafe(f))
    };

    match result {
        Ok(value) => (Some(value), TryBlock::clean()),
        Err(unwind) => match unwind.downcast::<Raised>() {
            Ok(raised) => {
                let Raised(payload) = *raised;
                tracing::trace!(failure = payload.type_name(), "captured");
                (None, TryBlock::unhandled(payload))
            }
            Err(fault) => panic::resume_unwind(fault),
        },
    }
}
