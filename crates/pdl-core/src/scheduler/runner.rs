//! Per-job attempt loop: fetch, classify, persist, then retry or stop.

use std::sync::Arc;

use crate::cancel::CancellationSignal;
use crate::retry::{
    classify_status, classify_transport_error, AttemptPolicy, FailureReason, Outcome, StatusClass,
};
use crate::storage::Persister;
use crate::transport::Transport;

use super::queue::Job;

/// Drives one job to a terminal [`Outcome`]. Holds no shared mutable state;
/// the result is reported upward by the worker.
pub struct JobRunner {
    transport: Arc<dyn Transport>,
    persister: Arc<dyn Persister>,
    policy: AttemptPolicy,
    cancel: CancellationSignal,
}

impl JobRunner {
    pub fn new(
        transport: Arc<dyn Transport>,
        persister: Arc<dyn Persister>,
        policy: AttemptPolicy,
        cancel: CancellationSignal,
    ) -> Self {
        Self {
            transport,
            persister,
            policy,
            cancel,
        }
    }

    /// Loop until success or a permanent failure. Retryable failures are
    /// retried immediately. Returns `Success` or `PermanentFailure`, never
    /// `RetryableFailure`.
    pub fn run(&self, job: &mut Job) -> Outcome {
        let mut last: Option<FailureReason> = None;
        loop {
            if self.cancel.is_cancelled() {
                return Outcome::PermanentFailure(FailureReason::Cancelled);
            }
            if self.policy.exhausted(job.attempts_made) {
                return Outcome::PermanentFailure(FailureReason::AttemptsExhausted {
                    attempts: job.attempts_made,
                    last: last.map(Box::new),
                });
            }

            job.attempts_made = job.attempts_made.saturating_add(1);
            match self.attempt(&job.target) {
                Outcome::RetryableFailure(reason) => {
                    tracing::debug!(
                        url = %job.target,
                        attempt = job.attempts_made,
                        "retryable failure: {}",
                        reason
                    );
                    last = Some(reason);
                }
                terminal => return terminal,
            }
        }
    }

    /// One transport call, classified. Persists the body on a successful status.
    fn attempt(&self, target: &str) -> Outcome {
        let response = match self.transport.fetch(target, &self.cancel) {
            Ok(r) => r,
            Err(e) => return classify_transport_error(&e),
        };

        match classify_status(response.status) {
            StatusClass::ServerError => {
                Outcome::RetryableFailure(FailureReason::ServerError(response.status))
            }
            StatusClass::ClientError => {
                Outcome::PermanentFailure(FailureReason::ClientError(response.status))
            }
            StatusClass::Success => match self.persister.save(target, &response.body) {
                Ok(_) => Outcome::Success,
                Err(e) => Outcome::RetryableFailure(FailureReason::Persist(e.to_string())),
            },
        }
    }
}
