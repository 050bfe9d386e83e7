//! CatchChain - an ordered set of typed handlers applied in one call.
//!
//! `dispatch` behaves exactly like calling `catch` for every registered type
//! in registration order, then `catch_any` if a catch-all was set.
//!
//! ```
//! use trycatch_core::failures::{StorageFailure, ValidationFailure};
//! use trycatch_core::{attempt, raise, CatchChain};
//!
//! let chain = CatchChain::new()
//!     .on(|e: StorageFailure| println!("storage: {e}"))?
//!     .on(|e: ValidationFailure| println!("validation: {e}"))?
//!     .otherwise(|p| println!("other: {}", p.describe()))?;
//!
//! let tb = chain.dispatch(attempt(|| raise(ValidationFailure::new("name", "required", 1001))));
//! assert!(tb.is_handled());
//! # Ok::<(), trycatch_core::ChainError>(())
//! ```

use std::any::{Any, TypeId};

use super::handler::{DynHandler, Handler, TypedHandler};
use crate::block::TryBlock;
use crate::dispatch::catch_any;
use crate::error::ChainError;
use crate::finally::finally;
use crate::payload::Payload;

type CatchAll<'a> = Box<dyn FnOnce(Payload) + 'a>;

#[derive(Default)]
pub struct CatchChain<'a> {
    handlers: Vec<(TypeId, Box<dyn DynHandler + 'a>)>,
    catch_all: Option<CatchAll<'a>>,
}

impl<'a> CatchChain<'a> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            catch_all: None,
        }
    }

    /// Append a closure handler for failures of type `T`.
    pub fn on<T, F>(self, handler: F) -> Result<Self, ChainError>
    where
        T: Any,
        F: FnOnce(T) + 'a,
    {
        self.register::<T, F>(handler)
    }

    /// Append any [`Handler`] for failures of type `T`.
    ///
    /// A second handler for the same `T` could never run, so it is rejected.
    pub fn register<T, H>(mut self, handler: H) -> Result<Self, ChainError>
    where
        T: Any,
        H: Handler<T> + 'a,
    {
        let type_id = TypeId::of::<T>();
        if self.handlers.iter().any(|(id, _)| *id == type_id) {
            return Err(ChainError::DuplicateType(std::any::type_name::<T>()));
        }
        self.handlers
            .push((type_id, Box::new(TypedHandler::<T, H>::new(handler))));
        Ok(self)
    }

    /// Set the catch-all that runs when no typed handler matched.
    pub fn otherwise<F>(mut self, handler: F) -> Result<Self, ChainError>
    where
        F: FnOnce(Payload) + 'a,
    {
        if self.catch_all.is_some() {
            return Err(ChainError::CatchAllAlreadySet);
        }
        self.catch_all = Some(Box::new(handler));
        Ok(self)
    }

    /// Registered failure type names, in dispatch order.
    pub fn handled_types(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|(_, h)| h.failure_type()).collect()
    }

    pub fn has_catch_all(&self) -> bool {
        self.catch_all.is_some()
    }

    pub fn dispatch(self, block: impl Into<TryBlock>) -> TryBlock {
        let Self {
            handlers,
            catch_all,
        } = self;

        let mut block = block.into();
        for (_, handler) in handlers {
            if block.failure().is_none_or(|p| !handler.accepts(p)) {
                continue;
            }
            let (_, next) = block.offer(|payload| handler.handle_dyn(payload));
            block = next;
        }

        match catch_all {
            Some(handler) => catch_any(block, handler),
            None => block,
        }
    }

    /// `dispatch` followed by [`finally`]: a pending failure is re-raised
    /// after `cleanup`.
    pub fn run<F>(self, block: impl Into<TryBlock>, cleanup: F)
    where
        F: FnOnce(),
    {
        finally(self.dispatch(block), cleanup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failures::{NetworkFailure, RuleViolation, StorageFailure, ValidationFailure};
    use crate::unwind::{attempt, raise};
    use std::cell::RefCell;

    struct Record<'a>(&'a RefCell<Vec<String>>);

    impl Handler<NetworkFailure> for Record<'_> {
        fn handle(self, failure: NetworkFailure) {
            self.0.borrow_mut().push(failure.to_string());
        }
    }

    fn chain(log: &RefCell<Vec<String>>) -> CatchChain<'_> {
        CatchChain::new()
            .on(move |_: StorageFailure| log.borrow_mut().push("storage".into()))
            .unwrap()
            .on(move |e: ValidationFailure| log.borrow_mut().push(format!("validation {}", e.code)))
            .unwrap()
            .register::<NetworkFailure, _>(Record(log))
            .unwrap()
    }

    #[test]
    fn dispatches_to_the_matching_type_only() {
        let log = RefCell::new(Vec::new());
        let tb = chain(&log).dispatch(attempt(|| raise(ValidationFailure::new("name", "required", 1001))));
        assert!(tb.is_handled());
        assert_eq!(*log.borrow(), vec!["validation 1001".to_string()]);
    }

    #[test]
    fn struct_handlers_take_part_in_dispatch() {
        let log = RefCell::new(Vec::new());
        let tb = chain(&log).dispatch(attempt(|| raise(NetworkFailure::timeout("http://timeout.com"))));
        assert!(tb.is_handled());
        assert_eq!(
            *log.borrow(),
            vec!["network timeout when accessing http://timeout.com".to_string()]
        );
    }

    #[test]
    fn unmatched_failure_stays_pending_without_catch_all() {
        let log = RefCell::new(Vec::new());
        let tb = chain(&log).dispatch(attempt(|| raise(RuleViolation::new("refund_policy", "too late"))));
        assert!(tb.is_unhandled());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn catch_all_runs_last() {
        let log = RefCell::new(Vec::new());
        let tb = chain(&log)
            .otherwise(|p| log.borrow_mut().push(format!("any {}", p.describe())))
            .unwrap()
            .dispatch(attempt(|| raise("invalid number format")));
        assert!(tb.is_handled());
        assert_eq!(*log.borrow(), vec!["any invalid number format".to_string()]);
    }

    #[test]
    fn clean_and_absent_blocks_fire_nothing() {
        let log = RefCell::new(Vec::new());
        assert!(chain(&log).dispatch(attempt(|| {})).is_clean());
        assert!(chain(&log).dispatch(None::<TryBlock>).is_clean());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn duplicate_type_is_rejected() {
        let err = CatchChain::new()
            .on(|_: i32| {})
            .unwrap()
            .on(|_: i32| {})
            .err()
            .unwrap();
        assert!(matches!(err, ChainError::DuplicateType("i32")));
    }

    #[test]
    fn second_catch_all_is_rejected() {
        let err = CatchChain::new()
            .otherwise(|_| {})
            .unwrap()
            .otherwise(|_| {})
            .err()
            .unwrap();
        assert!(matches!(err, ChainError::CatchAllAlreadySet));
    }

    #[test]
    fn handled_types_follow_registration_order() {
        let log = RefCell::new(Vec::new());
        let c = chain(&log);
        assert_eq!(
            c.handled_types(),
            vec![
                std::any::type_name::<StorageFailure>(),
                std::any::type_name::<ValidationFailure>(),
                std::any::type_name::<NetworkFailure>(),
            ]
        );
        assert!(!c.has_catch_all());
    }

    #[test]
    fn run_reraises_unmatched_failure_after_cleanup() {
        let log = RefCell::new(Vec::new());
        let outer = attempt(|| {
            chain(&log).run(attempt(|| raise(RuleViolation::new("age_limit", "must be over 18"))), || {
                log.borrow_mut().push("cleanup".into())
            });
        });
        assert_eq!(*log.borrow(), vec!["cleanup".to_string()]);
        let rule = outer.into_failure().unwrap().downcast::<RuleViolation>().unwrap();
        assert_eq!(rule, RuleViolation::new("age_limit", "must be over 18"));
    }
}
