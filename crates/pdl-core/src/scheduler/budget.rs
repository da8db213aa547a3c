//! Batch error budget.
//!
//! Owned by the dispatcher's accounting loop, which is its only writer, so no
//! atomics are needed: workers report outcomes over a channel and never touch
//! the count directly.

/// Result of charging one terminal failure to the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetState {
    Within,
    Exceeded,
}

/// Count of terminal failures against an optional limit (0 = unlimited).
#[derive(Debug, Clone, Default)]
pub struct ErrorBudget {
    count: u64,
    limit: u64,
}

impl ErrorBudget {
    pub fn new(limit: u64) -> Self {
        Self { count: 0, limit }
    }

    /// Charge one terminal failure. Call exactly once per failed job, never per attempt.
    pub fn record_failure(&mut self) -> BudgetState {
        self.count += 1;
        if self.is_exceeded() {
            BudgetState::Exceeded
        } else {
            BudgetState::Within
        }
    }

    /// True iff a limit is set and the count has gone past it.
    pub fn is_exceeded(&self) -> bool {
        self.limit != 0 && self.count > self.limit
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}
