//! The one-way `active → ended` lifecycle every layer is gated by.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// One-way lifecycle flag: `active` until ended, then permanently ended.
///
/// The transition is monotonic and irreversible — there is no path back
/// to `active` and no reset.
#[derive(Debug, Default)]
pub struct Gate {
    ended: AtomicBool,
}

impl Gate {
    /// A fresh, active gate.
    pub fn new() -> Self {
        Self {
            ended: AtomicBool::new(false),
        }
    }

    /// Flip to ended. Returns `true` iff this call performed the
    /// transition — every later call returns `false` and has no effect.
    pub fn end(&self) -> bool {
        !self.ended.swap(true, Ordering::AcqRel)
    }

    /// Whether the gate has ended.
    pub fn is_ended(&self) -> bool {
        self.ended.load(Ordering::Acquire)
    }
}

/// The end-of-life handle a layer surrenders to its host at construction.
///
/// Every layer constructor takes a registration function and calls it
/// exactly once, passing its own `EndHandle`. The host invokes
/// [`EndHandle::end`] when the wrapped object is torn down. Invoking it
/// more than once is safe: the underlying transition is a one-way flag,
/// not a counter.
#[derive(Clone)]
pub struct EndHandle {
    on_end: Arc<dyn Fn() + Send + Sync>,
}

impl EndHandle {
    /// Wrap a layer's end behavior. The behavior itself must be
    /// idempotent; layers guard it with a [`Gate`] transition.
    pub fn new(on_end: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            on_end: Arc::new(on_end),
        }
    }

    /// Fire the end signal.
    pub fn end(&self) {
        (self.on_end)();
    }
}

impl fmt::Debug for EndHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EndHandle")
    }
}
