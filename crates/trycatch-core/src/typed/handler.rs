//! Handler trait - typed failure handlers and their type-erased form.
//!
//! - `Handler<T>`: what callers write (any `FnOnce(T)` qualifies)
//! - `DynHandler`: object-safe, so a chain can hold handlers of mixed types
//! - `TypedHandler<T, H>`: the adapter from the first to the second

use std::any::Any;
use std::marker::PhantomData;

use crate::payload::Payload;

/// Handles a failure of exactly type `T`.
///
/// ```ignore
/// struct LogValidation;
///
/// impl Handler<ValidationFailure> for LogValidation {
///     fn handle(self, failure: ValidationFailure) {
///         tracing::warn!(field = %failure.field, "validation failed");
///     }
/// }
/// ```
pub trait Handler<T> {
    fn handle(self, failure: T);
}

impl<T, F> Handler<T> for F
where
    F: FnOnce(T),
{
    fn handle(self, failure: T) {
        self(failure)
    }
}

/// Object-safe handler.
///
/// `handle_dyn` consumes the payload when its type matches and hands it back
/// otherwise. The handler itself is spent either way.
pub trait DynHandler {
    fn handle_dyn(self: Box<Self>, payload: Payload) -> Result<(), Payload>;
    fn failure_type(&self) -> &'static str;
    fn accepts(&self, payload: &Payload) -> bool;
}

pub struct TypedHandler<T, H> {
    handler: H,
    _marker: PhantomData<fn(T)>,
}

impl<T, H> TypedHandler<T, H>
where
    T: Any,
    H: Handler<T>,
{
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _marker: PhantomData,
        }
    }
}

impl<T, H> DynHandler for TypedHandler<T, H>
where
    T: Any,
    H: Handler<T>,
{
    fn handle_dyn(self: Box<Self>, payload: Payload) -> Result<(), Payload> {
        let failure = payload.downcast::<T>()?;
        self.handler.handle(failure);
        Ok(())
    }

    fn failure_type(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn accepts(&self, payload: &Payload) -> bool {
        payload.is::<T>()
    }
}
