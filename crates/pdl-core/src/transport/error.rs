use std::fmt;

/// Failure of a single transport call (no HTTP status was obtained).
#[derive(Debug)]
pub enum TransportError {
    /// libcurl reported an error (timeout, connection, DNS, bad URL, ...).
    Curl(curl::Error),
    /// I/O failure from a non-curl transport.
    Io(std::io::Error),
    /// The call was aborted because the batch was cancelled.
    Cancelled,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Curl(e) => write!(f, "{}", e),
            TransportError::Io(e) => write!(f, "{}", e),
            TransportError::Cancelled => write!(f, "request cancelled"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Curl(e) => Some(e),
            TransportError::Io(e) => Some(e),
            TransportError::Cancelled => None,
        }
    }
}

impl From<curl::Error> for TransportError {
    fn from(e: curl::Error) -> Self {
        TransportError::Curl(e)
    }
}

impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> Self {
        TransportError::Io(e)
    }
}
