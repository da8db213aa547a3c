//! Shared job queue, filled once before workers start.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// In-flight record for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Position of the target in the input list.
    pub index: usize,
    pub target: String,
    /// Transport calls made so far; only the worker holding the job mutates it.
    pub attempts_made: u32,
}

impl Job {
    pub fn new(index: usize, target: impl Into<String>) -> Self {
        Self {
            index,
            target: target.into(),
            attempts_made: 0,
        }
    }
}

/// FIFO of admitted jobs shared by all workers.
///
/// Capacity equals the number of targets so admission never waits. Every job
/// is admitted before the first worker starts, so an empty queue means closed
/// and drained.
#[derive(Debug)]
pub struct JobQueue {
    jobs: Mutex<VecDeque<Job>>,
}

impl JobQueue {
    /// Admit all `targets` in input order.
    pub fn admit<S: AsRef<str>>(targets: &[S]) -> Self {
        let jobs: VecDeque<Job> = targets
            .iter()
            .enumerate()
            .map(|(i, t)| Job::new(i, t.as_ref()))
            .collect();
        Self {
            jobs: Mutex::new(jobs),
        }
    }

    /// Take the next job, or `None` once drained.
    pub fn pop(&self) -> Option<Job> {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    /// Remove every job that was never dispatched; returns how many.
    pub fn drain(&self) -> usize {
        let mut q = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let n = q.len();
        q.clear();
        n
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
