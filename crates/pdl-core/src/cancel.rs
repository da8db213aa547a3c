//! Batch-wide cancellation: one shared abort flag observed by every worker.
//!
//! The dispatcher owns the signal for the duration of one batch run and is the
//! only component that flips it. Workers, the job runner and the transport
//! hold clones and poll it at each suspension point.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One-way `Active -> Cancelled` flag shared by all tasks of a batch.
#[derive(Debug, Clone, Default)]
pub struct CancellationSignal {
    cancelled: Arc<AtomicBool>,
}

impl CancellationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the signal to cancelled. Returns true only for the call that
    /// performed the transition; later calls are no-ops.
    pub fn cancel(&self) -> bool {
        self.cancelled
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
