//! Error types for the trap protocol.

use crate::trap::TrapKind;
use thiserror::Error;

/// Errors a layer's trap methods can raise.
///
/// A structural failure must reach the caller that performed the
/// mutation, so hosts propagate these instead of swallowing them.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LayerError {
    /// The layer received its end signal; the named trap was refused
    /// without consulting anything downstream.
    #[error("attempted {trap} after layer end")]
    InvalidState {
        /// The trap method that was attempted.
        trap: TrapKind,
    },

    /// The delegate refused or failed the forwarded operation.
    #[error("delegate error: {0}")]
    Delegate(#[from] DelegateError),

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl LayerError {
    /// The trap refused by an [`LayerError::InvalidState`], if that is
    /// what this error is.
    pub fn refused_trap(&self) -> Option<TrapKind> {
        match self {
            Self::InvalidState { trap } => Some(*trap),
            _ => None,
        }
    }
}

/// Errors a primitive operation provider can raise.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DelegateError {
    /// `apply` was invoked on a target that is not callable.
    #[error("target is not callable")]
    NotCallable,

    /// `construct` was invoked on a target that is not a constructor.
    #[error("target is not a constructor")]
    NotConstructable,

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
