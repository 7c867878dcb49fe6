//! In-memory implementations for testing.
//!
//! Available behind the `test-utils` feature flag. These are minimal
//! implementations that prove the trait APIs are usable.

mod collecting_observer;
mod memory_delegate;
mod recording_delegate;

pub use collecting_observer::CollectingObserver;
pub use memory_delegate::MemoryDelegate;
pub use recording_delegate::{DelegateCall, RecordingDelegate};
