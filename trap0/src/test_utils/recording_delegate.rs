//! RecordingDelegate — records every call and answers with canned results.

use crate::delegate::Delegate;
use crate::error::DelegateError;
use crate::key::PropKey;
use crate::target::{ObjectRef, PropertyDescriptor};
use crate::trap::TrapKind;
use crate::value::Value;
use std::sync::Mutex;

/// The full argument tuple of one recorded delegate call.
///
/// `Set` has no receiver field: [`Delegate::set`] takes none, so a
/// forwarding layer cannot leak one through even by accident.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum DelegateCall {
    Set {
        target: ObjectRef,
        key: PropKey,
        value: Value,
    },
    Get {
        target: ObjectRef,
        key: PropKey,
        receiver: Option<ObjectRef>,
    },
    GetOwnPropertyDescriptor {
        target: ObjectRef,
        key: PropKey,
    },
    GetPrototypeOf {
        target: ObjectRef,
    },
    SetPrototypeOf {
        target: ObjectRef,
        proto: Option<ObjectRef>,
    },
    DefineProperty {
        target: ObjectRef,
        key: PropKey,
        descriptor: PropertyDescriptor,
    },
    DeleteProperty {
        target: ObjectRef,
        key: PropKey,
    },
    Enumerate {
        target: ObjectRef,
    },
    IsExtensible {
        target: ObjectRef,
    },
    OwnKeys {
        target: ObjectRef,
    },
    Apply {
        target: ObjectRef,
        this: Option<ObjectRef>,
        args: Vec<Value>,
    },
    Construct {
        target: ObjectRef,
        args: Vec<Value>,
        new_target: ObjectRef,
    },
    Has {
        target: ObjectRef,
        key: PropKey,
    },
    PreventExtensions {
        target: ObjectRef,
    },
}

impl DelegateCall {
    /// Which trap this call came through.
    pub fn kind(&self) -> TrapKind {
        match self {
            Self::Set { .. } => TrapKind::Set,
            Self::Get { .. } => TrapKind::Get,
            Self::GetOwnPropertyDescriptor { .. } => TrapKind::GetOwnPropertyDescriptor,
            Self::GetPrototypeOf { .. } => TrapKind::GetPrototypeOf,
            Self::SetPrototypeOf { .. } => TrapKind::SetPrototypeOf,
            Self::DefineProperty { .. } => TrapKind::DefineProperty,
            Self::DeleteProperty { .. } => TrapKind::DeleteProperty,
            Self::Enumerate { .. } => TrapKind::Enumerate,
            Self::IsExtensible { .. } => TrapKind::IsExtensible,
            Self::OwnKeys { .. } => TrapKind::OwnKeys,
            Self::Apply { .. } => TrapKind::Apply,
            Self::Construct { .. } => TrapKind::Construct,
            Self::Has { .. } => TrapKind::Has,
            Self::PreventExtensions { .. } => TrapKind::PreventExtensions,
        }
    }
}

/// A delegate that records every call with its full argument tuple and
/// answers with fixed defaults. Use [`RecordingDelegate::calls`] and
/// [`RecordingDelegate::call_count`] to inspect what was forwarded.
///
/// Canned answers: boolean traps succeed (`true`), reads come back absent
/// (`None`), key walks come back empty, `construct` echoes `new_target`.
#[derive(Debug, Default)]
pub struct RecordingDelegate {
    calls: Mutex<Vec<DelegateCall>>,
}

impl RecordingDelegate {
    /// A fresh recorder with no calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every recorded call, in invocation order.
    pub fn calls(&self) -> Vec<DelegateCall> {
        self.calls.lock().unwrap().clone()
    }

    /// How many calls arrived through the given trap.
    pub fn call_count(&self, trap: TrapKind) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.kind() == trap)
            .count()
    }

    fn record(&self, call: DelegateCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Delegate for RecordingDelegate {
    fn set(&self, target: &ObjectRef, key: PropKey, value: Value) -> Result<bool, DelegateError> {
        self.record(DelegateCall::Set {
            target: target.clone(),
            key,
            value,
        });
        Ok(true)
    }

    fn get(
        &self,
        target: &ObjectRef,
        key: &PropKey,
        receiver: Option<&ObjectRef>,
    ) -> Result<Option<Value>, DelegateError> {
        self.record(DelegateCall::Get {
            target: target.clone(),
            key: key.clone(),
            receiver: receiver.cloned(),
        });
        Ok(None)
    }

    fn get_own_property_descriptor(
        &self,
        target: &ObjectRef,
        key: &PropKey,
    ) -> Result<Option<PropertyDescriptor>, DelegateError> {
        self.record(DelegateCall::GetOwnPropertyDescriptor {
            target: target.clone(),
            key: key.clone(),
        });
        Ok(None)
    }

    fn get_prototype_of(&self, target: &ObjectRef) -> Result<Option<ObjectRef>, DelegateError> {
        self.record(DelegateCall::GetPrototypeOf {
            target: target.clone(),
        });
        Ok(None)
    }

    fn set_prototype_of(
        &self,
        target: &ObjectRef,
        proto: Option<ObjectRef>,
    ) -> Result<bool, DelegateError> {
        self.record(DelegateCall::SetPrototypeOf {
            target: target.clone(),
            proto,
        });
        Ok(true)
    }

    fn define_property(
        &self,
        target: &ObjectRef,
        key: PropKey,
        descriptor: PropertyDescriptor,
    ) -> Result<bool, DelegateError> {
        self.record(DelegateCall::DefineProperty {
            target: target.clone(),
            key,
            descriptor,
        });
        Ok(true)
    }

    fn delete_property(&self, target: &ObjectRef, key: &PropKey) -> Result<bool, DelegateError> {
        self.record(DelegateCall::DeleteProperty {
            target: target.clone(),
            key: key.clone(),
        });
        Ok(true)
    }

    fn enumerate(&self, target: &ObjectRef) -> Result<Vec<PropKey>, DelegateError> {
        self.record(DelegateCall::Enumerate {
            target: target.clone(),
        });
        Ok(Vec::new())
    }

    fn is_extensible(&self, target: &ObjectRef) -> Result<bool, DelegateError> {
        self.record(DelegateCall::IsExtensible {
            target: target.clone(),
        });
        Ok(true)
    }

    fn own_keys(&self, target: &ObjectRef) -> Result<Vec<PropKey>, DelegateError> {
        self.record(DelegateCall::OwnKeys {
            target: target.clone(),
        });
        Ok(Vec::new())
    }

    fn apply(
        &self,
        target: &ObjectRef,
        this: Option<&ObjectRef>,
        args: &[Value],
    ) -> Result<Option<Value>, DelegateError> {
        self.record(DelegateCall::Apply {
            target: target.clone(),
            this: this.cloned(),
            args: args.to_vec(),
        });
        Ok(None)
    }

    fn construct(
        &self,
        target: &ObjectRef,
        args: &[Value],
        new_target: &ObjectRef,
    ) -> Result<ObjectRef, DelegateError> {
        self.record(DelegateCall::Construct {
            target: target.clone(),
            args: args.to_vec(),
            new_target: new_target.clone(),
        });
        Ok(new_target.clone())
    }

    fn has(&self, target: &ObjectRef, key: &PropKey) -> Result<bool, DelegateError> {
        self.record(DelegateCall::Has {
            target: target.clone(),
            key: key.clone(),
        });
        Ok(false)
    }

    fn prevent_extensions(&self, target: &ObjectRef) -> Result<bool, DelegateError> {
        self.record(DelegateCall::PreventExtensions {
            target: target.clone(),
        });
        Ok(true)
    }
}
