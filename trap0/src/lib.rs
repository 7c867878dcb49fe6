//! # trap0 — Trap protocol traits for composable object interception layers
//!
//! This crate defines the protocol boundary between a host that owns a
//! wrapped object and the layers that intercept structural operations
//! performed on it.
//!
//! ## The Protocol
//!
//! | Piece | Types | What it does |
//! |-------|-------|-------------|
//! | Vocabulary | [`TrapKind`], [`PropKey`], [`Value`] | The fixed set of structural operations and the keys/values they carry |
//! | Layer | [`Layer`], [`Opinion`] | One unit of interception; implements any subset of the traps |
//! | Delegate | [`Delegate`] | The primitive operation provider that performs the real effect |
//! | Lifecycle | [`Gate`], [`EndHandle`] | One-way `active → ended` gate surrendered to the host |
//! | Observation | [`ChangeEvent`], [`Observer`], [`Subscription`], [`Observable`] | The change-stream vocabulary layers expose to consumers |
//!
//! ## Design Principle
//!
//! Every trap method is operation-defined, not mechanism-defined.
//! [`Layer::set`] means "a property assignment is happening on this
//! object" — not "a hash map insert" or "a proxy handler fired." This is
//! what makes layers composable: a validator, a logger, and a change
//! stream all answer the same question without knowing who else is
//! listening or what storage sits underneath.
//!
//! Every trap method on [`Layer`] has a transparent default, so a concrete
//! layer implements only the operations it cares about and composes
//! cleanly with layers that care about the rest.
//!
//! ## Dependency Notes
//!
//! Property data is `serde_json::Value`. This is an intentional choice:
//! JSON is the universal interchange format for dynamic object graphs,
//! and `serde_json::Value` is the de facto standard in the Rust
//! ecosystem. The alternative (generic `T: Serialize`) would complicate
//! trait object safety without practical benefit.

#![deny(missing_docs)]

pub mod delegate;
pub mod error;
pub mod key;
pub mod layer;
pub mod lifecycle;
pub mod observer;
pub mod target;
pub mod trap;
pub mod value;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use delegate::Delegate;
pub use error::{DelegateError, LayerError};
pub use key::{PropKey, ProtocolKey};
pub use layer::{Layer, Opinion};
pub use lifecycle::{EndHandle, Gate};
pub use observer::{ChangeEvent, Observable, Observer, Subscription};
pub use target::{ObjectRef, PropertyDescriptor, Target};
pub use trap::TrapKind;
pub use value::Value;
