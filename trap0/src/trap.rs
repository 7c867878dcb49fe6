//! The closed vocabulary of structural operations a layer can intercept.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One operation in the fixed trap vocabulary.
///
/// The set is closed: hosts dispatch exactly these operations and layers
/// implement a subset of them. The [`Display`](fmt::Display) form names
/// the operation in error messages and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrapKind {
    /// Property assignment.
    Set,
    /// Property read.
    Get,
    /// Own-property descriptor lookup.
    GetOwnPropertyDescriptor,
    /// Prototype read.
    GetPrototypeOf,
    /// Prototype replacement.
    SetPrototypeOf,
    /// Property definition with explicit attributes.
    DefineProperty,
    /// Property removal.
    DeleteProperty,
    /// Enumerable-key walk, prototype chain included.
    Enumerate,
    /// Extensibility check.
    IsExtensible,
    /// Own-key listing.
    OwnKeys,
    /// Invocation of the object as a function.
    Apply,
    /// Invocation of the object as a constructor.
    Construct,
    /// Membership check, prototype chain included.
    Has,
    /// Making the object non-extensible.
    PreventExtensions,
}

impl TrapKind {
    /// Every trap kind, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::Set,
        Self::Get,
        Self::GetOwnPropertyDescriptor,
        Self::GetPrototypeOf,
        Self::SetPrototypeOf,
        Self::DefineProperty,
        Self::DeleteProperty,
        Self::Enumerate,
        Self::IsExtensible,
        Self::OwnKeys,
        Self::Apply,
        Self::Construct,
        Self::Has,
        Self::PreventExtensions,
    ];

    /// The snake_case operation name used in messages and log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Get => "get",
            Self::GetOwnPropertyDescriptor => "get_own_property_descriptor",
            Self::GetPrototypeOf => "get_prototype_of",
            Self::SetPrototypeOf => "set_prototype_of",
            Self::DefineProperty => "define_property",
            Self::DeleteProperty => "delete_property",
            Self::Enumerate => "enumerate",
            Self::IsExtensible => "is_extensible",
            Self::OwnKeys => "own_keys",
            Self::Apply => "apply",
            Self::Construct => "construct",
            Self::Has => "has",
            Self::PreventExtensions => "prevent_extensions",
        }
    }
}

impl fmt::Display for TrapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
