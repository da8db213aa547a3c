//! One HTTP GET per call, with no retry logic inside.
//!
//! [`Transport`] is the seam the job runner calls through; [`CurlTransport`]
//! is the libcurl-backed default. Implementations must return promptly once
//! the [`CancellationSignal`] fires.

mod http;
mod error;

pub use http::CurlTransport;
pub use error::TransportError;

use crate::cancel::CancellationSignal;

/// Status and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u32,
    pub body: Vec<u8>,
}

/// Performs a single GET for a target.
pub trait Transport: Send + Sync {
    fn fetch(&self, target: &str, cancel: &CancellationSignal) -> Result<Response, TransportError>;
}
