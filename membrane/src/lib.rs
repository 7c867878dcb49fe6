#![deny(missing_docs)]
//! # membrane — umbrella crate
//!
//! Provides a single import surface for the membrane layer system.
//! Re-exports the protocol crate and the layer implementations behind
//! feature flags, plus a `prelude` for the happy path.

#[cfg(feature = "observe")]
pub use membrane_observe;
#[cfg(feature = "reflect")]
pub use membrane_reflect;
#[cfg(feature = "stack")]
pub use membrane_stack;
#[cfg(feature = "core")]
pub use trap0;

/// Happy-path imports for composing layered objects.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use trap0::{
        ChangeEvent, Delegate, DelegateError, EndHandle, Gate, Layer, LayerError, ObjectRef,
        Observable, Observer, Opinion, PropKey, PropertyDescriptor, ProtocolKey, Subscription,
        Target, TrapKind, Value,
    };

    #[cfg(feature = "observe")]
    pub use membrane_observe::ObservableLayer;

    #[cfg(feature = "reflect")]
    pub use membrane_reflect::ReflectLayer;

    #[cfg(feature = "stack")]
    pub use membrane_stack::{LayerStack, Teardown};
}
