//! Payload - the type-erased value carried by a raise.
//!
//! A payload is a discriminant (`TypeId` + type name) plus the boxed value.
//! Typed dispatch compares discriminants; only `catch_any` sees the value
//! without a type guard.

use std::any::{Any, TypeId};
use std::fmt;

/// A captured failure value of arbitrary runtime type.
///
/// # Exact-type matching
/// - `is::<T>()` is true only when the raised value was exactly a `T`
/// - no widening: a `String` payload is not a `&str`, an `i32` is not an `i64`
pub struct Payload {
    type_id: TypeId,
    type_name: &'static str,
    value: Box<dyn Any + Send>,
}

impl Payload {
    pub fn new<P: Any + Send>(value: P) -> Self {
        Self {
            type_id: TypeId::of::<P>(),
            type_name: std::any::type_name::<P>(),
            value: Box::new(value),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Name of the raised type, as reported by `std::any::type_name`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        if !self.is::<T>() {
            return None;
        }
        self.value.downcast_ref::<T>()
    }

    /// Take the value out as `T`.
    ///
    /// On a type mismatch the payload is handed back untouched so the caller
    /// can keep propagating it.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        let Self {
            type_id,
            type_name,
            value,
        } = self;
        match value.downcast::<T>() {
            Ok(v) => Ok(*v),
            Err(value) => Err(Self {
                type_id,
                type_name,
                value,
            }),
        }
    }

    /// The boxed value, for hosts that do their own `Any` downcasting.
    pub fn into_inner(self) -> Box<dyn Any + Send> {
        self.value
    }

    /// Best-effort text for logs and catch-all handlers.
    ///
    /// String payloads render as themselves; anything else renders as its
    /// type name.
    pub fn describe(&self) -> String {
        if let Some(s) = self.downcast_ref::<&'static str>() {
            return (*s).to_string();
        }
        if let Some(s) = self.downcast_ref::<String>() {
            return s.clone();
        }
        format!("<{}>", self.type_name)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
