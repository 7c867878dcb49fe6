//! The Layer interface — interception of structural operations.

use crate::error::LayerError;
use crate::key::PropKey;
use crate::target::{ObjectRef, PropertyDescriptor};
use crate::value::Value;

/// What a layer says about one trap invocation.
///
/// `Pass` is the transparent answer: no opinion, let the next layer or
/// the delegate decide. `Claim` ends dispatch with this layer's answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Opinion<T> {
    /// No opinion — transparent.
    Pass,
    /// This layer answers; dispatch stops here.
    Claim(T),
}

impl<T> Opinion<T> {
    /// Whether this is the transparent answer.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// The claimed value, if any.
    pub fn claimed(self) -> Option<T> {
        match self {
            Self::Pass => None,
            Self::Claim(v) => Some(v),
        }
    }
}

/// A unit of interception composed with others into a pipeline around one
/// wrapped object.
///
/// The host owns the object, installs an ordered list of layers, and for
/// each structural operation invokes the corresponding trap method on
/// each layer in order. Each layer independently decides whether to
/// forward, short-circuit, transform, observe, or reject. The layer
/// doesn't know who else is in the pipeline.
///
/// Every trap method defaults to transparent ([`Opinion::Pass`]), so a
/// concrete layer implements only the subset it cares about.
///
/// Implementations:
/// - `ReflectLayer`: forward every operation verbatim to a delegate,
///   hard-failing once ended
/// - `ObservableLayer`: turn writes and deletes into a change stream,
///   transparent for everything else
///
/// Trap methods run synchronously to completion before control returns
/// to the caller; there is no suspension point and no queuing. Slow work
/// inside a trap stalls every mutation of the object — that cost is the
/// layer author's responsibility.
pub trait Layer: Send + Sync {
    /// Property assignment: `target[key] = value`.
    ///
    /// `receiver` is the object the assignment conceptually occurred on,
    /// supplied when an inherited setter is in play.
    fn set(
        &self,
        _target: &ObjectRef,
        _key: &PropKey,
        _value: &Value,
        _receiver: Option<&ObjectRef>,
    ) -> Result<Opinion<bool>, LayerError> {
        Ok(Opinion::Pass)
    }

    /// Property read: `target[key]`. A claim of `None` answers "the
    /// property is absent."
    fn get(
        &self,
        _target: &ObjectRef,
        _key: &PropKey,
        _receiver: Option<&ObjectRef>,
    ) -> Result<Opinion<Option<Value>>, LayerError> {
        Ok(Opinion::Pass)
    }

    /// Own-property descriptor lookup.
    fn get_own_property_descriptor(
        &self,
        _target: &ObjectRef,
        _key: &PropKey,
    ) -> Result<Opinion<Option<PropertyDescriptor>>, LayerError> {
        Ok(Opinion::Pass)
    }

    /// Prototype read.
    fn get_prototype_of(
        &self,
        _target: &ObjectRef,
    ) -> Result<Opinion<Option<ObjectRef>>, LayerError> {
        Ok(Opinion::Pass)
    }

    /// Prototype replacement.
    fn set_prototype_of(
        &self,
        _target: &ObjectRef,
        _proto: Option<&ObjectRef>,
    ) -> Result<Opinion<bool>, LayerError> {
        Ok(Opinion::Pass)
    }

    /// Property definition with explicit attributes.
    fn define_property(
        &self,
        _target: &ObjectRef,
        _key: &PropKey,
        _descriptor: &PropertyDescriptor,
    ) -> Result<Opinion<bool>, LayerError> {
        Ok(Opinion::Pass)
    }

    /// Property removal: `delete target[key]`.
    fn delete_property(
        &self,
        _target: &ObjectRef,
        _key: &PropKey,
    ) -> Result<Opinion<bool>, LayerError> {
        Ok(Opinion::Pass)
    }

    /// Enumerable-key walk, prototype chain included.
    fn enumerate(&self, _target: &ObjectRef) -> Result<Opinion<Vec<PropKey>>, LayerError> {
        Ok(Opinion::Pass)
    }

    /// Extensibility check.
    fn is_extensible(&self, _target: &ObjectRef) -> Result<Opinion<bool>, LayerError> {
        Ok(Opinion::Pass)
    }

    /// Own-key listing.
    fn own_keys(&self, _target: &ObjectRef) -> Result<Opinion<Vec<PropKey>>, LayerError> {
        Ok(Opinion::Pass)
    }

    /// Invocation of the object as a function.
    fn apply(
        &self,
        _target: &ObjectRef,
        _this: Option<&ObjectRef>,
        _args: &[Value],
    ) -> Result<Opinion<Option<Value>>, LayerError> {
        Ok(Opinion::Pass)
    }

    /// Invocation of the object as a constructor.
    fn construct(
        &self,
        _target: &ObjectRef,
        _args: &[Value],
        _new_target: &ObjectRef,
    ) -> Result<Opinion<ObjectRef>, LayerError> {
        Ok(Opinion::Pass)
    }

    /// Membership check: `key in target`, prototype chain included.
    fn has(&self, _target: &ObjectRef, _key: &PropKey) -> Result<Opinion<bool>, LayerError> {
        Ok(Opinion::Pass)
    }

    /// Making the object non-extensible.
    fn prevent_extensions(&self, _target: &ObjectRef) -> Result<Opinion<bool>, LayerError> {
        Ok(Opinion::Pass)
    }
}
