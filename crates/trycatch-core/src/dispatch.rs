//! Typed dispatch and the catch-all fallback.
//!
//! Each step takes the block by value and returns it, so calls chain:
//!
//! ```
//! use trycatch_core::{attempt, catch, catch_any, raise};
//!
//! let tb = attempt(|| raise(7_i32));
//! let tb = catch::<String, _>(tb, |s| println!("string: {s}"));
//! let tb = catch::<i32, _>(tb, |n| assert_eq!(n, 7));
//! let tb = catch_any(tb, |_| unreachable!());
//! assert!(tb.is_handled());
//! ```

use std::any::Any;

use crate::block::TryBlock;
use crate::payload::Payload;

/// Run `handler` if the pending failure is exactly a `T`.
///
/// Clean, handled and mismatching blocks come back unchanged.
pub fn catch<T, H>(block: impl Into<TryBlock>, handler: H) -> TryBlock
where
    T: Any,
    H: FnOnce(T),
{
    let (_, block) = catch_with_return::<T, (), _>(block, handler);
    block
}

/// [`catch`] that also returns the handler's value; `None` when it did not run.
pub fn catch_with_return<T, R, H>(block: impl Into<TryBlock>, handler: H) -> (Option<R>, TryBlock)
where
    T: Any,
    H: FnOnce(T) -> R,
{
    block.into().offer(|payload| {
        let failure = payload.downcast::<T>()?;
        tracing::trace!(failure = std::any::type_name::<T>(), "caught");
        Ok(handler(failure))
    })
}

/// Run `handler` with the raw payload if a failure is still pending.
pub fn catch_any<H>(block: impl Into<TryBlock>, handler: H) -> TryBlock
where
    H: FnOnce(Payload),
{
    let (_, block) = block.into().offer(|payload| {
        tracing::trace!(failure = payload.type_name(), "caught by catch-all");
        Ok::<_, Payload>(handler(payload))
    });
    block
}

impl TryBlock {
    pub fn catch<T, H>(self, handler: H) -> Self
    where
        T: Any,
        H: FnOnce(T),
    {
        catch::<T, H>(self, handler)
    }

    pub fn catch_with_return<T, R, H>(self, handler: H) -> (Option<R>, Self)
    where
        T: Any,
        H: FnOnce(T) -> R,
    {
        catch_with_return::<T, R, H>(self, handler)
    }

    pub fn catch_any<H>(self, handler: H) -> Self
    where
        H: FnOnce(Payload),
    {
        catch_any(self, handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unwind::{attempt, raise};
    use rstest::rstest;
    use std::cell::RefCell;

    #[test]
    fn matching_type_runs_handler_once() {
        let calls = RefCell::new(Vec::new());
        let tb = attempt(|| raise(String::from("test string error")));
        let tb = catch::<String, _>(tb, |e| calls.borrow_mut().push(e));
        assert!(tb.is_handled());
        assert_eq!(*calls.borrow(), vec!["test string error".to_string()]);
    }

    #[test]
    fn non_matching_type_leaves_block_unhandled() {
        let mut called = false;
        let tb = attempt(|| raise(123_i32)).catch::<String, _>(|_| called = true);
        assert!(!called);
        assert!(tb.is_unhandled());
        assert!(tb.failure().unwrap().is::<i32>());
    }

    #[test]
    fn first_matching_registration_wins() {
        let hits = RefCell::new(Vec::new());
        let tb = attempt(|| raise("test error"))
            .catch::<i32, _>(|_| hits.borrow_mut().push("int"))
            .catch::<&str, _>(|_| hits.borrow_mut().push("first str"))
            .catch::<&str, _>(|_| hits.borrow_mut().push("second str"))
            .catch_any(|_| hits.borrow_mut().push("any"));
        assert!(tb.is_handled());
        assert_eq!(*hits.borrow(), vec!["first str"]);
    }

    #[test]
    fn handled_block_ignores_further_dispatch() {
        let mut extra = 0;
        let tb = attempt(|| raise(1_u32)).catch::<u32, _>(|_| {});
        let tb = catch::<u32, _>(tb, |_| extra += 1);
        let tb = catch_any(tb, |_| extra += 1);
        assert!(tb.is_handled());
        assert_eq!(extra, 0);
    }

    #[test]
    fn clean_block_fires_nothing() {
        let mut fired = false;
        let tb = attempt(|| {})
            .catch::<String, _>(|_| fired = true)
            .catch_any(|_| fired = true);
        assert!(tb.is_clean());
        assert!(!fired);
    }

    #[rstest]
    #[case::str_vs_string(Payload::new("x"), false)]
    #[case::string(Payload::new(String::from("x")), true)]
    #[case::boxed_str(Payload::new(Box::<str>::from("x")), false)]
    fn string_guard_matches_exact_type_only(#[case] payload: Payload, #[case] matches: bool) {
        let tb = attempt(|| crate::raise_payload(payload)).catch::<String, _>(|_| {});
        assert_eq!(tb.is_handled(), matches);
    }

    #[rstest]
    #[case::i32(Payload::new(1_i32), "i32")]
    #[case::i64(Payload::new(1_i64), "i64")]
    #[case::u8(Payload::new(1_u8), "any")]
    fn numeric_guards_do_not_widen(#[case] payload: Payload, #[case] expected: &str) {
        let mut hit = "";
        let _ = attempt(|| crate::raise_payload(payload))
            .catch::<i32, _>(|_| hit = "i32")
            .catch::<i64, _>(|_| hit = "i64")
            .catch_any(|_| hit = "any");
        assert_eq!(hit, expected);
    }

    #[test]
    fn catch_with_return_yields_value_on_match() {
        let tb = attempt(|| raise(String::from("test error")));
        let (result, tb) = catch_with_return::<String, _, _>(tb, |e| format!("handled: {e}"));
        assert_eq!(result.as_deref(), Some("handled: test error"));
        assert!(tb.is_handled());
    }

    #[test]
    fn catch_with_return_none_on_miss() {
        let tb = attempt(|| raise(5_i32));
        let (result, tb) = tb.catch_with_return::<String, usize, _>(|s| s.len());
        assert!(result.is_none());
        assert!(tb.is_unhandled());

        let (result, tb) = tb.catch_with_return::<i32, i32, _>(|n| n * 2);
        assert_eq!(result, Some(10));
        assert!(tb.is_handled());

        let (result, _) = tb.catch_with_return::<i32, i32, _>(|n| n * 3);
        assert!(result.is_none());
    }

    #[test]
    fn catch_any_receives_raw_payload() {
        let mut seen = None;
        let tb = attempt(|| raise("plain string")).catch_any(|p| seen = Some(p.describe()));
        assert!(tb.is_handled());
        assert_eq!(seen.as_deref(), Some("plain string"));
    }

    #[test]
    fn absent_block_is_treated_as_clean() {
        let mut fired = false;
        let tb = catch::<i32, _>(None::<TryBlock>, |_| fired = true);
        assert!(tb.is_clean());
        let (r, tb) = catch_with_return::<i32, (), _>(None::<TryBlock>, |_| fired = true);
        assert!(r.is_none());
        let tb = catch_any(Some(tb), |_| fired = true);
        assert!(tb.is_clean());
        assert!(!fired);
    }
}
