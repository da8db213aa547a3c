//! Long-lived worker: pull a job, run it, report, wait for the report to be
//! accounted, repeat.

use std::fmt;
use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::cancel::CancellationSignal;

use super::queue::JobQueue;
use super::report::JobReport;
use super::runner::JobRunner;

/// `Idle -> Running -> Idle -> ... -> Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Running,
    Stopped,
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkerState::Idle => "idle",
            WorkerState::Running => "running",
            WorkerState::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// What a worker did before stopping; returned through its join handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub jobs_run: usize,
}

pub struct Worker {
    id: usize,
    state: WorkerState,
    queue: Arc<JobQueue>,
    runner: Arc<JobRunner>,
    reports: Sender<(usize, JobReport)>,
    acks: Receiver<()>,
    cancel: CancellationSignal,
}

impl Worker {
    pub fn new(
        id: usize,
        queue: Arc<JobQueue>,
        runner: Arc<JobRunner>,
        reports: Sender<(usize, JobReport)>,
        acks: Receiver<()>,
        cancel: CancellationSignal,
    ) -> Self {
        Self {
            id,
            state: WorkerState::Idle,
            queue,
            runner,
            reports,
            acks,
            cancel,
        }
    }

    /// Run on a dedicated OS thread named `pdl-worker-<id>`.
    pub fn spawn(self) -> io::Result<JoinHandle<WorkerStats>> {
        thread::Builder::new()
            .name(format!("pdl-worker-{}", self.id))
            .spawn(move || self.run())
    }

    /// Consume jobs until the queue is drained, the batch is cancelled, or the
    /// dispatcher stops listening. Reporting never blocks: the result channel
    /// is unbounded and a closed channel ends the loop.
    ///
    /// After each report the worker waits for the dispatcher's ack before
    /// taking another job, so no job starts once the budget has been exceeded.
    /// The dispatcher drops every ack sender when it stops accounting, which
    /// releases any waiting worker.
    pub fn run(mut self) -> WorkerStats {
        let mut stats = WorkerStats::default();
        while !self.cancel.is_cancelled() {
            let Some(mut job) = self.queue.pop() else {
                break;
            };
            self.transition(WorkerState::Running);
            let outcome = self.runner.run(&mut job);
            stats.jobs_run += 1;

            let report = JobReport {
                index: job.index,
                target: job.target,
                attempts: job.attempts_made,
                outcome,
            };
            if self.reports.send((self.id, report)).is_err() {
                self.transition(WorkerState::Idle);
                break;
            }
            self.transition(WorkerState::Idle);
            if self.acks.recv().is_err() {
                break;
            }
        }
        self.transition(WorkerState::Stopped);
        stats
    }

    fn transition(&mut self, to: WorkerState) {
        tracing::trace!(worker = self.id, from = %self.state, to = %to, "worker state");
        self.state = to;
    }
}
