//! Dynamic property values.

use crate::observer::Observable;
use std::fmt;

/// A dynamic value as seen by trap methods.
///
/// Property data is JSON. The `Stream` variant carries a
/// subscribe-capable handle, so a protocol capability travels through the
/// same channel as an ordinary property read — a consumer that requests
/// the observable key gets back a [`Value`] like any other `get` answer.
///
/// Streams are synthesized by layers, never stored: the slot tables of
/// [`Target`](crate::Target) objects hold `Data` values only.
#[derive(Clone)]
pub enum Value {
    /// Plain structured data.
    Data(serde_json::Value),
    /// A subscribe-capable stream handle.
    Stream(Observable),
}

impl Value {
    /// Wrap plain data.
    pub fn data(value: impl Into<serde_json::Value>) -> Self {
        Self::Data(value.into())
    }

    /// The data payload, if this is a `Data` value.
    pub fn as_data(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Data(v) => Some(v),
            Self::Stream(_) => None,
        }
    }

    /// The stream handle, if this is a `Stream` value.
    pub fn as_stream(&self) -> Option<&Observable> {
        match self {
            Self::Data(_) => None,
            Self::Stream(o) => Some(o),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Self::Data(v)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Data(a), Self::Data(b)) => a == b,
            // Streams compare by subscription-source identity.
            (Self::Stream(a), Self::Stream(b)) => a.same_source(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(v) => f.debug_tuple("Data").field(v).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}
