//! CollectingObserver — records delivered events and completion marks.

use crate::observer::{ChangeEvent, Observer};
use std::sync::{Arc, Mutex};

/// Builds [`Observer`]s whose deliveries land in shared vectors for
/// inspection in tests. Clone the collector, hand out observers, then
/// assert on `.events()` and `.completions()`.
#[derive(Debug, Clone, Default)]
pub struct CollectingObserver {
    events: Arc<Mutex<Vec<ChangeEvent>>>,
    completions: Arc<Mutex<u32>>,
}

impl CollectingObserver {
    /// A fresh collector with nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// An observer wired to this collector's `next` and `complete` slots.
    pub fn observer(&self) -> Observer {
        let events = Arc::clone(&self.events);
        let completions = Arc::clone(&self.completions);
        Observer::on_next(move |event| events.lock().unwrap().push(event.clone()))
            .with_complete(move || *completions.lock().unwrap() += 1)
    }

    /// Snapshot of every delivered event, in delivery order.
    pub fn events(&self) -> Vec<ChangeEvent> {
        self.events.lock().unwrap().clone()
    }

    /// How many times `complete` fired.
    pub fn completions(&self) -> u32 {
        *self.completions.lock().unwrap()
    }
}
