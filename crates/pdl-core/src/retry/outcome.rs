use std::fmt;

/// Why an attempt or a job failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Network-level failure or timeout reported by the transport.
    Transport(String),
    /// HTTP status >= 500.
    ServerError(u32),
    /// HTTP status in 400..=499.
    ClientError(u32),
    /// The body was fetched but could not be written.
    Persist(String),
    /// The attempt budget ran out; `last` is the final retryable failure observed.
    AttemptsExhausted {
        attempts: u32,
        last: Option<Box<FailureReason>>,
    },
    /// The batch was cancelled while the job was pending or in flight.
    Cancelled,
    /// The worker holding the job died before reporting it.
    WorkerLost,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Transport(e) => write!(f, "transport: {}", e),
            FailureReason::ServerError(code) => write!(f, "HTTP {} (server error)", code),
            FailureReason::ClientError(code) => write!(f, "HTTP {} (client error)", code),
            FailureReason::Persist(e) => write!(f, "persist: {}", e),
            FailureReason::AttemptsExhausted { attempts, last } => {
                write!(f, "gave up after {} attempt(s)", attempts)?;
                if let Some(last) = last {
                    write!(f, ": {}", last)?;
                }
                Ok(())
            }
            FailureReason::Cancelled => write!(f, "cancelled"),
            FailureReason::WorkerLost => write!(f, "worker lost"),
        }
    }
}

/// Classified result of one attempt, or the terminal result of a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    RetryableFailure(FailureReason),
    PermanentFailure(FailureReason),
}
