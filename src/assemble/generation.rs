//! Load generations.
//!
//! Each page load takes a [`LoadToken`]. Starting another load makes every
//! earlier token stale, and results gathered under a stale token are thrown
//! away instead of being injected.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

#[derive(Debug, Clone, Default)]
pub struct LoadGenerations {
    current: Arc<AtomicU64>,
}

impl LoadGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, superseding all previous tokens.
    pub fn begin(&self) -> LoadToken {
        let generation = self.current.fetch_add(1, Ordering::AcqRel) + 1;
        LoadToken {
            generation,
            current: Arc::clone(&self.current),
        }
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone)]
pub struct LoadToken {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl LoadToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::Acquire) == self.generation
    }
}
