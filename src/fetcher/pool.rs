//! Bounded pool of page slots
//!
//! A lease is held for the duration of one fetch and returned on drop.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use super::FetchError;

#[derive(Debug, Clone)]
pub struct PagePool {
    permits: Arc<Semaphore>,
    capacity: usize,
}

/// One occupied page slot
#[derive(Debug)]
pub struct PageLease {
    _permit: OwnedSemaphorePermit,
}

impl PagePool {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Take a slot without waiting; fails with `Busy` when all slots are in use
    pub fn try_acquire(&self) -> Result<PageLease, FetchError> {
        Arc::clone(&self.permits)
            .try_acquire_owned()
            .map(|permit| PageLease { _permit: permit })
            .map_err(|_| FetchError::Busy(self.capacity))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn in_use(&self) -> usize {
        self.capacity - self.permits.available_permits()
    }
}
