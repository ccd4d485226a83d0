//! Busy signalling and operation serialization for a session.
//!
//! The busy indicator is reference counted: every in-flight request holds a
//! guard, and the indicator reads busy while any guard lives. Overlapping
//! guards (the upload sequence runs ingest then create-session) therefore
//! cannot strand the signal, and an early error return releases it through
//! `Drop`.
//!
//! The operation slot serializes whole session operations: at most one
//! upload, new-chat, ask, or history load may be in flight at a time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Reference-counted busy signal.
#[derive(Clone, Debug, Default)]
pub struct BusyIndicator {
    active: Arc<AtomicUsize>,
}

impl BusyIndicator {
    /// Creates a new, idle indicator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the start of an in-flight request.
    ///
    /// The indicator stays busy until the returned guard is dropped.
    pub fn begin(&self) -> BusyGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        BusyGuard {
            active: Arc::clone(&self.active),
        }
    }

    /// Returns true while any request is in flight.
    pub fn is_busy(&self) -> bool {
        self.active.load(Ordering::SeqCst) > 0
    }
}

/// RAII guard holding the busy indicator on.
#[derive(Debug)]
pub struct BusyGuard {
    active: Arc<AtomicUsize>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Single-slot guard serializing session operations.
///
/// `try_acquire` hands out at most one permit at a time; a second caller is
/// refused rather than queued.
#[derive(Clone, Debug, Default)]
pub struct OpSlot {
    held: Arc<AtomicBool>,
}

impl OpSlot {
    /// Creates a new, free slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to claim the slot.
    ///
    /// Returns `None` when another operation already holds it.
    pub fn try_acquire(&self) -> Option<OpPermit> {
        if self
            .held
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            Some(OpPermit {
                held: Arc::clone(&self.held),
            })
        } else {
            None
        }
    }

    /// Returns true while an operation holds the slot.
    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }
}

/// RAII permit for the operation slot.
#[derive(Debug)]
pub struct OpPermit {
    held: Arc<AtomicBool>,
}

impl Drop for OpPermit {
    fn drop(&mut self) {
        self.held.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_refcounts_overlapping_guards() {
        let busy = BusyIndicator::new();
        assert!(!busy.is_busy());

        let outer = busy.begin();
        assert!(busy.is_busy());

        let inner = busy.begin();
        drop(inner);
        // Still busy: the outer request is in flight.
        assert!(busy.is_busy());

        drop(outer);
        assert!(!busy.is_busy());
    }

    #[test]
    fn busy_released_on_early_return() {
        fn failing(busy: &BusyIndicator) -> Result<(), ()> {
            let _guard = busy.begin();
            Err(())
        }

        let busy = BusyIndicator::new();
        assert!(failing(&busy).is_err());
        assert!(!busy.is_busy());
    }

    #[test]
    fn op_slot_is_single_occupancy() {
        let slot = OpSlot::new();
        let permit = slot.try_acquire().unwrap();
        assert!(slot.is_held());
        assert!(slot.try_acquire().is_none());

        drop(permit);
        assert!(!slot.is_held());
        assert!(slot.try_acquire().is_some());
    }
}
