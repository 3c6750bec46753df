use std::sync::{Arc, RwLock};

use crate::features::reports::models::Report;

/// The Record Store: the latest fetched snapshot of reports.
///
/// Snapshots are swapped wholesale, never edited in place. Clones share one
/// slot, so a session logout hook can drop the cache a page still owns.
#[derive(Clone, Default)]
pub struct RecordStore {
    slot: Arc<RwLock<Arc<Vec<Report>>>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<Vec<Report>> {
        match self.slot.read() {
            Ok(current) => Arc::clone(&current),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn replace(&self, records: Vec<Report>) {
        let next = Arc::new(records);
        match self.slot.write() {
            Ok(mut current) => *current = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    pub fn clear(&self) {
        self.replace(Vec::new());
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}
