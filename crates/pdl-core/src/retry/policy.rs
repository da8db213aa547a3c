/// Per-job attempt budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttemptPolicy {
    /// Maximum transport calls per job (0 = unlimited).
    pub max_attempts: u32,
}

impl AttemptPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// True when no further attempt may be made after `attempts_made` calls.
    pub fn exhausted(&self, attempts_made: u32) -> bool {
        self.max_attempts != 0 && attempts_made >= self.max_attempts
    }
}
