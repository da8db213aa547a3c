//! Classify HTTP status codes and transport errors into outcomes.

use crate::transport::TransportError;

use super::outcome::{FailureReason, Outcome};

/// Coarse class of an HTTP status for retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Anything below 400: the body is persisted.
    Success,
    /// 400..=499: cannot self-resolve, never retried.
    ClientError,
    /// 500 and above: retried.
    ServerError,
}

/// Classify an HTTP status code.
pub fn classify_status(code: u32) -> StatusClass {
    match code {
        400..=499 => StatusClass::ClientError,
        500..=u32::MAX => StatusClass::ServerError,
        _ => StatusClass::Success,
    }
}

/// Classify a failed transport call. Cancellation is permanent; everything
/// else the transport reports (connect, DNS, timeout, reset) is retryable.
pub fn classify_transport_error(e: &TransportError) -> Outcome {
    match e {
        TransportError::Cancelled => Outcome::PermanentFailure(FailureReason::Cancelled),
        other => Outcome::RetryableFailure(FailureReason::Transport(other.to_string())),
    }
}
