//! Dispatcher: job queue, worker pool, error budget and cancellation for one batch.
//!
//! All jobs are admitted up front, then `effective_concurrency` workers drain
//! the queue and report terminal outcomes over a channel. A worker takes its
//! next job only after its previous report has been accounted. The accounting loop
//! in [`Dispatcher::run`] is the only writer of the error budget and the only
//! place that cancels on budget overrun. Once the signal fires the count is
//! frozen: later reports (jobs aborted by the cancellation) are not charged.
//! Every worker thread is joined before `run` returns.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::cancel::CancellationSignal;
use crate::config::Options;
use crate::retry::{AttemptPolicy, FailureReason, Outcome};
use crate::storage::Persister;
use crate::transport::Transport;

use super::budget::{BudgetState, ErrorBudget};
use super::queue::JobQueue;
use super::report::{BatchResult, JobReport, TargetFailure};
use super::runner::JobRunner;
use super::worker::{Worker, WorkerStats};

pub struct Dispatcher {
    options: Options,
    transport: Arc<dyn Transport>,
    persister: Arc<dyn Persister>,
    budget: ErrorBudget,
    cancel: CancellationSignal,
}

impl Dispatcher {
    pub fn new(options: &Options, transport: Arc<dyn Transport>, persister: Arc<dyn Persister>) -> Self {
        Self {
            options: options.clone(),
            transport,
            persister,
            budget: ErrorBudget::new(options.max_error_budget),
            cancel: CancellationSignal::new(),
        }
    }

    /// Handle for process-level cancellation (e.g. Ctrl-C). Cancelling it
    /// stops the batch the same way an exceeded budget does.
    pub fn cancel_signal(&self) -> CancellationSignal {
        self.cancel.clone()
    }

    /// Run every target to a terminal outcome, or until the batch is cancelled.
    pub fn run<S: AsRef<str>>(mut self, targets: &[S]) -> BatchResult {
        let total = targets.len();
        let mut result = BatchResult::default();
        if total == 0 {
            return result;
        }

        let queue = Arc::new(JobQueue::admit(targets));
        let runner = Arc::new(JobRunner::new(
            Arc::clone(&self.transport),
            Arc::clone(&self.persister),
            AttemptPolicy::new(self.options.max_attempts_per_job),
            self.cancel.clone(),
        ));
        let (tx, rx) = mpsc::channel::<(usize, JobReport)>();
        let (handles, acks) = self.spawn_workers(&queue, &runner, &tx);
        drop(tx);

        tracing::info!(
            jobs = total,
            workers = handles.len(),
            max_errors = self.budget.limit(),
            max_attempts = self.options.max_attempts_per_job,
            "batch started"
        );

        let mut accounted = vec![false; total];
        let mut pending = total;
        while pending > 0 {
            let Ok((worker, report)) = rx.recv() else {
                break;
            };
            if self.cancel.is_cancelled() {
                break;
            }
            pending -= 1;
            accounted[report.index] = true;
            if self.account(report, &mut result) == BudgetState::Exceeded {
                if self.cancel.cancel() {
                    tracing::info!(
                        failures = self.budget.count(),
                        limit = self.budget.limit(),
                        "error budget exceeded, cancelling batch"
                    );
                }
                break;
            }
            if let Some(ack) = acks.get(worker) {
                // A dead worker has dropped its receiver.
                let _ = ack.send(());
            }
        }
        drop(acks);
        drop(rx);

        let cancelled = self.cancel.is_cancelled();
        if cancelled {
            let skipped = queue.drain();
            if skipped > 0 {
                tracing::info!(skipped, "jobs never dispatched");
            }
        }

        self.join_workers(handles);

        // Workers are gone but some jobs never reported: a worker died mid-job,
        // or none could be started. Charge each such job once.
        if !cancelled && pending > 0 {
            queue.drain();
            for (index, target) in targets.iter().enumerate() {
                if accounted[index] {
                    continue;
                }
                tracing::error!(url = target.as_ref(), "job lost without a report");
                let report = JobReport {
                    index,
                    target: target.as_ref().to_string(),
                    attempts: 0,
                    outcome: Outcome::PermanentFailure(FailureReason::WorkerLost),
                };
                self.account(report, &mut result);
            }
        }

        result.terminal_failure_count = self.budget.count();
        result.cancelled = cancelled;
        result.failures.sort_by_key(|f| f.index);
        tracing::info!(
            succeeded = result.succeeded,
            failed = result.terminal_failure_count,
            cancelled,
            "batch finished"
        );
        result
    }

    fn spawn_workers(
        &self,
        queue: &Arc<JobQueue>,
        runner: &Arc<JobRunner>,
        tx: &mpsc::Sender<(usize, JobReport)>,
    ) -> (Vec<JoinHandle<WorkerStats>>, Vec<mpsc::Sender<()>>) {
        let count = self.options.effective_concurrency(queue.len());
        let mut handles = Vec::with_capacity(count);
        let mut acks = Vec::with_capacity(count);
        for id in 0..count {
            let (ack_tx, ack_rx) = mpsc::channel();
            let worker = Worker::new(
                id,
                Arc::clone(queue),
                Arc::clone(runner),
                tx.clone(),
                ack_rx,
                self.cancel.clone(),
            );
            match worker.spawn() {
                Ok(h) => {
                    handles.push(h);
                    acks.push(ack_tx);
                }
                Err(e) => {
                    tracing::error!(worker = id, "failed to spawn worker: {}", e);
                    break;
                }
            }
        }
        (handles, acks)
    }

    fn join_workers(&self, handles: Vec<JoinHandle<WorkerStats>>) {
        for (id, h) in handles.into_iter().enumerate() {
            match h.join() {
                Ok(stats) => tracing::debug!(worker = id, jobs = stats.jobs_run, "worker stopped"),
                Err(_) => tracing::error!(worker = id, "worker panicked"),
            }
        }
    }

    /// Record one terminal outcome. The only place the error budget is charged.
    fn account(&mut self, report: JobReport, result: &mut BatchResult) -> BudgetState {
        result.reported += 1;
        let reason = match report.outcome {
            Outcome::Success => {
                result.succeeded += 1;
                tracing::debug!(url = %report.target, attempts = report.attempts, "job succeeded");
                return BudgetState::Within;
            }
            Outcome::PermanentFailure(reason) | Outcome::RetryableFailure(reason) => reason,
        };
        tracing::warn!(
            url = %report.target,
            attempts = report.attempts,
            "job failed: {}",
            reason
        );
        result.failures.push(TargetFailure {
            index: report.index,
            target: report.target,
            attempts: report.attempts,
            reason,
        });
        self.budget.record_failure()
    }
}
