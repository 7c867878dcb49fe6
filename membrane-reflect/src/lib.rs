#![deny(missing_docs)]
//! Forwarding layer that reflects structural operations onto a delegate.
//!
//! [`ReflectLayer`] is the terminal pass-through of a layer pipeline: it
//! forwards every trap verbatim to the primitive operation provider and
//! claims the provider's answer, with no argument transformation and no
//! caching. Once its end handle fires, it refuses every trap with
//! [`LayerError::InvalidState`] naming the operation — the delegate is
//! never consulted again.

use std::sync::Arc;
use trap0::{
    Delegate, EndHandle, Gate, Layer, LayerError, ObjectRef, Opinion, PropKey,
    PropertyDescriptor, TrapKind, Value,
};

/// Pass-through layer over a primitive operation provider.
///
/// Active, it answers every trap with the delegate's result, unchanged.
/// Ended, it hard-fails every trap before the delegate is touched. The
/// transition is one-way and fired externally, through the [`EndHandle`]
/// surrendered at construction.
///
/// One deliberate asymmetry: the `set` trap drops its receiver before
/// forwarding, while `get` forwards its receiver unchanged. A delegate
/// honoring an inherited setter through the receiver would re-enter
/// layer dispatch on the wrong object; [`Delegate::set`]'s signature
/// makes that forwarding inexpressible.
pub struct ReflectLayer {
    delegate: Arc<dyn Delegate>,
    gate: Arc<Gate>,
}

impl ReflectLayer {
    /// Wrap `delegate` and surrender an end handle through `register`.
    ///
    /// `register` is called exactly once, during construction. The host
    /// invokes the handle when the wrapped object is torn down; firing
    /// it more than once is safe.
    pub fn new(delegate: Arc<dyn Delegate>, register: impl FnOnce(EndHandle)) -> Self {
        let gate = Arc::new(Gate::new());
        let end_gate = Arc::clone(&gate);
        register(EndHandle::new(move || {
            end_gate.end();
        }));
        Self { delegate, gate }
    }

    fn guard(&self, trap: TrapKind) -> Result<(), LayerError> {
        if self.gate.is_ended() {
            Err(LayerError::InvalidState { trap })
        } else {
            Ok(())
        }
    }
}

impl Layer for ReflectLayer {
    fn set(
        &self,
        target: &ObjectRef,
        key: &PropKey,
        value: &Value,
        _receiver: Option<&ObjectRef>,
    ) -> Result<Opinion<bool>, LayerError> {
        self.guard(TrapKind::Set)?;
        // The receiver stops here; see the type-level note on Delegate::set.
        Ok(Opinion::Claim(self.delegate.set(
            target,
            key.clone(),
            value.clone(),
        )?))
    }

    fn get(
        &self,
        target: &ObjectRef,
        key: &PropKey,
        receiver: Option<&ObjectRef>,
    ) -> Result<Opinion<Option<Value>>, LayerError> {
        self.guard(TrapKind::Get)?;
        Ok(Opinion::Claim(self.delegate.get(target, key, receiver)?))
    }

    fn get_own_property_descriptor(
        &self,
        target: &ObjectRef,
        key: &PropKey,
    ) -> Result<Opinion<Option<PropertyDescriptor>>, LayerError> {
        self.guard(TrapKind::GetOwnPropertyDescriptor)?;
        Ok(Opinion::Claim(
            self.delegate.get_own_property_descriptor(target, key)?,
        ))
    }

    fn get_prototype_of(
        &self,
        target: &ObjectRef,
    ) -> Result<Opinion<Option<ObjectRef>>, LayerError> {
        self.guard(TrapKind::GetPrototypeOf)?;
        Ok(Opinion::Claim(self.delegate.get_prototype_of(target)?))
    }

    fn set_prototype_of(
        &self,
        target: &ObjectRef,
        proto: Option<&ObjectRef>,
    ) -> Result<Opinion<bool>, LayerError> {
        self.guard(TrapKind::SetPrototypeOf)?;
        Ok(Opinion::Claim(
            self.delegate.set_prototype_of(target, proto.cloned())?,
        ))
    }

    fn define_property(
        &self,
        target: &ObjectRef,
        key: &PropKey,
        descriptor: &PropertyDescriptor,
    ) -> Result<Opinion<bool>, LayerError> {
        self.guard(TrapKind::DefineProperty)?;
        Ok(Opinion::Claim(self.delegate.define_property(
            target,
            key.clone(),
            descriptor.clone(),
        )?))
    }

    fn delete_property(
        &self,
        target: &ObjectRef,
        key: &PropKey,
    ) -> Result<Opinion<bool>, LayerError> {
        self.guard(TrapKind::DeleteProperty)?;
        Ok(Opinion::Claim(self.delegate.delete_property(target, key)?))
    }

    fn enumerate(&self, target: &ObjectRef) -> Result<Opinion<Vec<PropKey>>, LayerError> {
        self.guard(TrapKind::Enumerate)?;
        Ok(Opinion::Claim(self.delegate.enumerate(target)?))
    }

    fn is_extensible(&self, target: &ObjectRef) -> Result<Opinion<bool>, LayerError> {
        self.guard(TrapKind::IsExtensible)?;
        Ok(Opinion::Claim(self.delegate.is_extensible(target)?))
    }

    fn own_keys(&self, target: &ObjectRef) -> Result<Opinion<Vec<PropKey>>, LayerError> {
        self.guard(TrapKind::OwnKeys)?;
        Ok(Opinion::Claim(self.delegate.own_keys(target)?))
    }

    fn apply(
        &self,
        target: &ObjectRef,
        this: Option<&ObjectRef>,
        args: &[Value],
    ) -> Result<Opinion<Option<Value>>, LayerError> {
        self.guard(TrapKind::Apply)?;
        Ok(Opinion::Claim(self.delegate.apply(target, this, args)?))
    }

    fn construct(
        &self,
        target: &ObjectRef,
        args: &[Value],
        new_target: &ObjectRef,
    ) -> Result<Opinion<ObjectRef>, LayerError> {
        self.guard(TrapKind::Construct)?;
        Ok(Opinion::Claim(
            self.delegate.construct(target, args, new_target)?,
        ))
    }

    fn has(&self, target: &ObjectRef, key: &PropKey) -> Result<Opinion<bool>, LayerError> {
        self.guard(TrapKind::Has)?;
        Ok(Opinion::Claim(self.delegate.has(target, key)?))
    }

    fn prevent_extensions(&self, target: &ObjectRef) -> Result<Opinion<bool>, LayerError> {
        self.guard(TrapKind::PreventExtensions)?;
        Ok(Opinion::Claim(self.delegate.prevent_extensions(target)?))
    }
}
