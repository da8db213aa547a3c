//! Outcome taxonomy and retry decisions.
//!
//! Every transport or persist result is classified into an [`Outcome`]:
//! success, a retryable failure (network error, 5xx, failed write) or a
//! permanent failure (4xx, attempts exhausted, cancelled). The job runner
//! loops on retryable failures until [`AttemptPolicy`] says stop; retries are
//! immediate, with no backoff.

mod classify;
mod outcome;
mod policy;

pub use classify::{classify_status, classify_transport_error, StatusClass};
pub use outcome::{FailureReason, Outcome};
pub use policy::AttemptPolicy;
