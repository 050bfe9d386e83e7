//! Finally - guaranteed cleanup, then re-raise of whatever is still pending.

use crate::block::TryBlock;
use crate::unwind::raise_payload;

/// Run `cleanup` exactly once, then re-raise the pending failure if no
/// handler consumed it.
///
/// Cleanup always completes before the re-raise. An absent block runs cleanup
/// and returns.
pub fn finally<F>(block: impl Into<TryBlock>, cleanup: F)
where
    F: FnOnce(),
{
    let block = block.into();
    cleanup();
    tracing::trace!(state = ?block.state(), "cleanup ran");

    if let Some(payload) = block.into_failure() {
        tracing::trace!(failure = payload.type_name(), "re-raise after cleanup");
        raise_payload(payload);
    }
}

impl TryBlock {
    pub fn finally<F>(self, cleanup: F)
    where
        F: FnOnce(),
    {
        finally(self, cleanup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unwind::tests::uncaught_on_thread;
    use crate::unwind::{attempt, raise};
    use std::cell::RefCell;

    #[test]
    fn cleanup_runs_once_on_clean_path() {
        let mut runs = 0;
        attempt(|| {}).finally(|| runs += 1);
        assert_eq!(runs, 1);
    }

    #[test]
    fn cleanup_runs_once_after_handled_failure() {
        let mut runs = 0;
        let mut handled = false;
        attempt(|| raise("test error"))
            .catch::<&str, _>(|_| handled = true)
            .finally(|| runs += 1);
        assert!(handled);
        assert_eq!(runs, 1);
    }

    #[test]
    fn absent_block_runs_cleanup_without_reraise() {
        let mut runs = 0;
        finally(None::<TryBlock>, || runs += 1);
        assert_eq!(runs, 1);
    }

    #[test]
    fn unhandled_failure_is_reraised_after_cleanup() {
        let trace = RefCell::new(Vec::new());
        let outer = attempt(|| {
            let inner = attempt(|| raise(String::from("test error")));
            inner.finally(|| trace.borrow_mut().push("cleanup"));
            trace.borrow_mut().push("after finally");
        });
        trace.borrow_mut().push("outer");

        assert_eq!(*trace.borrow(), vec!["cleanup", "outer"]);
        let payload = outer.into_failure().unwrap();
        assert_eq!(payload.downcast::<String>().unwrap(), "test error");
    }

    #[test]
    fn reraise_keeps_the_same_type_for_the_enclosing_chain() {
        let mut caught = None;
        let outer = attempt(|| {
            attempt(|| raise(99_i64))
                .catch::<i32, _>(|_| {})
                .finally(|| {});
        })
        .catch::<i64, _>(|n| caught = Some(n));
        assert!(outer.is_handled());
        assert_eq!(caught, Some(99));
    }

    #[test]
    fn unhandled_without_enclosing_attempt_is_uncaught() {
        let payload = uncaught_on_thread(|| {
            attempt(|| raise(7_u8)).finally(|| {});
        })
        .unwrap();
        assert_eq!(payload.downcast::<u8>().unwrap(), 7);
    }
}
