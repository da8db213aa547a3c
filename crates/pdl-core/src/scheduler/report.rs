//! Messages from workers and the aggregate result of a batch.

use crate::retry::{FailureReason, Outcome};

/// Terminal outcome of one job, sent from a worker to the dispatcher.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub index: usize,
    pub target: String,
    pub attempts: u32,
    pub outcome: Outcome,
}

/// One job charged to the error budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFailure {
    /// Position of the target in the input list.
    pub index: usize,
    pub target: String,
    pub attempts: u32,
    pub reason: FailureReason,
}

/// Result of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    /// Jobs that reached a terminal failure and were charged to the error budget.
    pub terminal_failure_count: u64,
    /// Jobs whose terminal outcome was accounted (successes plus counted failures).
    pub reported: usize,
    pub succeeded: usize,
    /// True if the batch was cancelled before every job was accounted.
    pub cancelled: bool,
    /// Counted failures, ordered by input position.
    pub failures: Vec<TargetFailure>,
}

impl BatchResult {
    pub fn is_success(&self) -> bool {
        self.terminal_failure_count == 0 && !self.cancelled
    }
}
