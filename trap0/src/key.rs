//! Property keys — the names structural operations address.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A reserved interoperability key.
///
/// Protocol keys are the contract between a layer and generic consumers
/// that discover capabilities on a wrapped object without holding a
/// reference to the layer itself. They live in a closed enum so they can
/// never collide with user data keys — the role a well-known symbol plays
/// in ecosystems that share a runtime registry.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolKey {
    /// Marks the subscribe-capable stream surface of a wrapped object.
    /// Reading this key from an observing layer yields a
    /// [`Value::Stream`](crate::Value::Stream).
    Observable,
}

/// A property key: a string name, an integer index, or a reserved
/// protocol key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropKey {
    /// A named property.
    Name(String),
    /// An integer-indexed property.
    Index(u64),
    /// A reserved protocol key.
    Protocol(ProtocolKey),
}

impl PropKey {
    /// The observable-protocol key.
    pub fn observable() -> Self {
        Self::Protocol(ProtocolKey::Observable)
    }
}

impl From<&str> for PropKey {
    fn from(s: &str) -> Self {
        Self::Name(s.to_owned())
    }
}

impl From<String> for PropKey {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

impl From<u64> for PropKey {
    fn from(n: u64) -> Self {
        Self::Index(n)
    }
}

impl fmt::Display for PropKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(s) => f.write_str(s),
            Self::Index(n) => write!(f, "{n}"),
            Self::Protocol(ProtocolKey::Observable) => f.write_str("@@observable"),
        }
    }
}
