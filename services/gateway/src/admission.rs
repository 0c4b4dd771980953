//! Bounded-concurrency admission gate
//!
//! Limits how many registrations may be in flight at once. A slot is taken
//! with a single compare-and-swap on the in-flight counter and handed back
//! when the returned [`AdmissionPermit`] is dropped, so every exit path of
//! the caller releases it exactly once.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use tracing::{debug, warn};

#[derive(Debug)]
struct GateState {
    capacity: usize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    rejected: AtomicU64,
}

/// Shared handle to one gate. Clones observe the same counter.
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    state: Arc<GateState>,
}

impl AdmissionGate {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Arc::new(GateState {
                capacity,
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
                rejected: AtomicU64::new(0),
            }),
        }
    }

    /// Take a slot if `in_flight + 1 <= capacity`.
    ///
    /// Returns `None` when the gate is exhausted; the counter is unchanged
    /// in that case.
    pub fn try_acquire(&self) -> Option<AdmissionPermit> {
        let capacity = self.state.capacity;
        let acquired = self.state.in_flight.fetch_update(
            Ordering::AcqRel,
            Ordering::Acquire,
            |current| (current < capacity).then(|| current + 1),
        );

        match acquired {
            Ok(previous) => {
                let in_flight = previous + 1;
                self.state.peak.fetch_max(in_flight, Ordering::Relaxed);
                debug!(in_flight, capacity, "Admission slot acquired");
                Some(AdmissionPermit {
                    state: Arc::clone(&self.state),
                })
            }
            Err(current) => {
                let rejected = self.state.rejected.fetch_add(1, Ordering::Relaxed) + 1;
                warn!(
                    in_flight = current,
                    capacity,
                    rejected_total = rejected,
                    "Admission gate exhausted"
                );
                None
            }
        }
    }

    pub fn capacity(&self) -> usize {
        self.state.capacity
    }

    /// Registrations currently holding a slot.
    pub fn in_flight(&self) -> usize {
        self.state.in_flight.load(Ordering::Acquire)
    }

    /// Slots still free.
    pub fn available(&self) -> usize {
        self.state.capacity.saturating_sub(self.in_flight())
    }

    /// Highest in-flight count ever observed.
    pub fn peak_in_flight(&self) -> usize {
        self.state.peak.load(Ordering::Relaxed)
    }

    /// Number of `try_acquire` calls refused since creation.
    pub fn rejected_total(&self) -> u64 {
        self.state.rejected.load(Ordering::Relaxed)
    }
}

/// One acquired slot. Dropping it releases the slot.
#[derive(Debug)]
#[must_use = "dropping the permit releases the slot immediately"]
pub struct AdmissionPermit {
    state: Arc<GateState>,
}

impl AdmissionPermit {
    /// Release the slot now instead of at end of scope.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for AdmissionPermit {
    fn drop(&mut self) {
        let previous = self.state.in_flight.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(previous > 0, "admission counter underflow");
        debug!(in_flight = previous - 1, "Admission slot released");
    }
}
