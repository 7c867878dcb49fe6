//! The Delegate interface — the primitive operation provider.

use crate::error::DelegateError;
use crate::key::PropKey;
use crate::target::{ObjectRef, PropertyDescriptor};
use crate::value::Value;

/// The delegate that performs the real effect of a trap method once
/// forwarding reaches it.
///
/// Same trap surface and argument order as [`Layer`](crate::Layer), but a
/// delegate always answers — there is no `Pass`. Return values travel
/// back through the forwarding layer unchanged.
///
/// One asymmetry is built into the signatures: [`Delegate::set`] takes no
/// receiver. A delegate handed the receiver could honor an inherited
/// setter by re-entering layer dispatch on the wrong object, so the
/// contract makes forwarding it inexpressible. [`Delegate::get`] does
/// take its receiver, unchanged.
pub trait Delegate: Send + Sync {
    /// Perform the assignment. Returns whether it took effect.
    fn set(&self, target: &ObjectRef, key: PropKey, value: Value) -> Result<bool, DelegateError>;

    /// Perform the read. `None` means the property is absent.
    fn get(
        &self,
        target: &ObjectRef,
        key: &PropKey,
        receiver: Option<&ObjectRef>,
    ) -> Result<Option<Value>, DelegateError>;

    /// Look up the own descriptor for `key`.
    fn get_own_property_descriptor(
        &self,
        target: &ObjectRef,
        key: &PropKey,
    ) -> Result<Option<PropertyDescriptor>, DelegateError>;

    /// Read the prototype link.
    fn get_prototype_of(&self, target: &ObjectRef) -> Result<Option<ObjectRef>, DelegateError>;

    /// Replace the prototype link. Returns whether it took effect.
    fn set_prototype_of(
        &self,
        target: &ObjectRef,
        proto: Option<ObjectRef>,
    ) -> Result<bool, DelegateError>;

    /// Define a property with explicit attributes. Returns whether it
    /// took effect.
    fn define_property(
        &self,
        target: &ObjectRef,
        key: PropKey,
        descriptor: PropertyDescriptor,
    ) -> Result<bool, DelegateError>;

    /// Remove a property. Returns whether the property is now absent.
    fn delete_property(&self, target: &ObjectRef, key: &PropKey) -> Result<bool, DelegateError>;

    /// Walk the enumerable keys, prototype chain included.
    fn enumerate(&self, target: &ObjectRef) -> Result<Vec<PropKey>, DelegateError>;

    /// Check extensibility.
    fn is_extensible(&self, target: &ObjectRef) -> Result<bool, DelegateError>;

    /// List the own keys.
    fn own_keys(&self, target: &ObjectRef) -> Result<Vec<PropKey>, DelegateError>;

    /// Invoke the object as a function.
    fn apply(
        &self,
        target: &ObjectRef,
        this: Option<&ObjectRef>,
        args: &[Value],
    ) -> Result<Option<Value>, DelegateError>;

    /// Invoke the object as a constructor.
    fn construct(
        &self,
        target: &ObjectRef,
        args: &[Value],
        new_target: &ObjectRef,
    ) -> Result<ObjectRef, DelegateError>;

    /// Membership check, prototype chain included.
    fn has(&self, target: &ObjectRef, key: &PropKey) -> Result<bool, DelegateError>;

    /// Make the object non-extensible. Returns whether it took effect.
    fn prevent_extensions(&self, target: &ObjectRef) -> Result<bool, DelegateError>;
}
