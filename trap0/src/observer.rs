//! Change events and the observer/subscription vocabulary.

use crate::error::LayerError;
use crate::key::PropKey;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// One observed structural mutation: a single key mapped to its new value.
///
/// A deletion carries `value: None` — an explicit "absent" payload, never
/// an omitted key. Events are emitted one per mutation, never batched.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    /// The mutated property.
    pub key: PropKey,
    /// The new value; `None` means the property was removed.
    pub value: Option<Value>,
}

impl ChangeEvent {
    /// An assignment event.
    pub fn wrote(key: impl Into<PropKey>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// A removal event.
    pub fn removed(key: impl Into<PropKey>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    /// Whether this event records a removal.
    pub fn is_removal(&self) -> bool {
        self.value.is_none()
    }
}

/// Callback invoked once per change event.
pub type NextFn = Box<dyn Fn(&ChangeEvent) + Send + Sync>;
/// Callback invoked if the stream fails.
pub type ErrorFn = Box<dyn Fn(&LayerError) + Send + Sync>;
/// Callback invoked exactly once when the stream completes.
pub type CompleteFn = Box<dyn Fn() + Send + Sync>;

/// A consumer's callback record: up to three optional callbacks.
///
/// Both subscription shapes normalize to this one record — a bare `next`
/// closure via [`Observer::on_next`], or a full record built with the
/// chainable constructors.
#[derive(Default)]
pub struct Observer {
    /// Called once per change event.
    pub next: Option<NextFn>,
    /// Called if the stream fails. The layers in this workspace complete
    /// rather than error their streams; the slot exists for consumers
    /// that expect the full record.
    pub error: Option<ErrorFn>,
    /// Called exactly once when the stream completes.
    pub complete: Option<CompleteFn>,
}

impl Observer {
    /// An observer with no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// An observer from a bare `next` callback — the positional form.
    pub fn on_next(next: impl Fn(&ChangeEvent) + Send + Sync + 'static) -> Self {
        Self {
            next: Some(Box::new(next)),
            error: None,
            complete: None,
        }
    }

    /// Attach an `error` callback.
    pub fn with_error(mut self, error: impl Fn(&LayerError) + Send + Sync + 'static) -> Self {
        self.error = Some(Box::new(error));
        self
    }

    /// Attach a `complete` callback.
    pub fn with_complete(mut self, complete: impl Fn() + Send + Sync + 'static) -> Self {
        self.complete = Some(Box::new(complete));
        self
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("next", &self.next.is_some())
            .field("error", &self.error.is_some())
            .field("complete", &self.complete.is_some())
            .finish()
    }
}

/// Handle over one observer's membership in a stream.
///
/// [`Subscription::unsubscribe`] removes that exact observer; doing so
/// twice is harmless. Cancellation takes effect before the next dispatch,
/// not retroactively.
#[derive(Clone)]
pub struct Subscription {
    cancel: Arc<dyn Fn() + Send + Sync>,
}

impl Subscription {
    /// Wrap a cancel action. The action must be idempotent — removal by
    /// membership id naturally is.
    pub fn new(cancel: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Arc::new(cancel),
        }
    }

    /// Remove the observer this handle was issued for.
    pub fn unsubscribe(&self) {
        (self.cancel)();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Subscription")
    }
}

/// A subscribe-capable stream handle.
///
/// This is the capability a generic consumer receives when it requests
/// the observable-protocol key from a wrapped object: it can subscribe
/// without ever holding the layer itself. Cloning yields a handle bound
/// to the same subscription logic, and [`Observable::as_observable`] is
/// the conventional interop hop for consumers that re-resolve the
/// capability from whatever they were handed.
#[derive(Clone)]
pub struct Observable {
    subscribe: Arc<dyn Fn(Observer) -> Subscription + Send + Sync>,
}

impl Observable {
    /// Wrap subscription logic.
    pub fn new(subscribe: impl Fn(Observer) -> Subscription + Send + Sync + 'static) -> Self {
        Self {
            subscribe: Arc::new(subscribe),
        }
    }

    /// Add an observer to the stream.
    pub fn subscribe(&self, observer: Observer) -> Subscription {
        (self.subscribe)(observer)
    }

    /// The capability itself, again. Consumers following the observable
    /// convention call this on whatever value they were handed.
    pub fn as_observable(&self) -> Observable {
        self.clone()
    }

    /// Whether two handles are bound to the same subscription logic.
    pub fn same_source(&self, other: &Observable) -> bool {
        Arc::ptr_eq(&self.subscribe, &other.subscribe)
    }
}

impl fmt::Debug for Observable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Observable")
    }
}
