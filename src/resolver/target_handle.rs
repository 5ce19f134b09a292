use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::datamodel::QueryTarget;

/// Shared handle on the query target of one panel.
///
/// The panel and the resolver both hold a clone. The lock is only taken for
/// synchronous reads and writes, never across a gateway call.
#[derive(Debug, Clone, Default)]
pub struct QueryTargetHandle(Arc<Mutex<QueryTarget>>);

impl QueryTargetHandle {
    pub fn new(target: QueryTarget) -> Self {
        Self(Arc::new(Mutex::new(target)))
    }

    // Writers only assign whole fields, so a poisoned target is still consistent.
    fn lock(&self) -> MutexGuard<'_, QueryTarget> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> QueryTarget {
        self.lock().clone()
    }

    pub fn read<R>(&self, f: impl FnOnce(&QueryTarget) -> R) -> R {
        f(&self.lock())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut QueryTarget) -> R) -> R {
        f(&mut self.lock())
    }
}

impl From<QueryTarget> for QueryTargetHandle {
    fn from(target: QueryTarget) -> Self {
        Self::new(target)
    }
}
