//! libcurl GET transport.

use std::time::Duration;

use crate::cancel::CancellationSignal;

use super::{Response, Transport, TransportError};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_REDIRECTS: u32 = 10;

/// GET via a fresh `curl::easy::Easy` handle per call.
///
/// Follows redirects. Cancellation is observed through the progress callback,
/// which libcurl invokes frequently during a transfer (and about once a second
/// while idle), so an in-flight request aborts shortly after the signal fires.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    timeout: Option<Duration>,
}

impl CurlTransport {
    /// `timeout` bounds one whole request; `None` means no limit.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl Transport for CurlTransport {
    fn fetch(&self, target: &str, cancel: &CancellationSignal) -> Result<Response, TransportError> {
        if cancel.is_cancelled() {
            return Err(TransportError::Cancelled);
        }

        let mut body = Vec::new();
        let mut easy = curl::easy::Easy::new();
        easy.url(target)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        easy.connect_timeout(self.timeout.map_or(CONNECT_TIMEOUT, |t| t.min(CONNECT_TIMEOUT)))?;
        if let Some(timeout) = self.timeout {
            easy.timeout(timeout)?;
        }
        easy.progress(true)?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.progress_function(|_, _, _, _| !cancel.is_cancelled())?;
            transfer.perform()
        };

        if let Err(e) = performed {
            if cancel.is_cancelled() {
                tracing::debug!(url = target, "transfer aborted by cancellation");
                return Err(TransportError::Cancelled);
            }
            return Err(TransportError::Curl(e));
        }

        let status = easy.response_code()?;
        Ok(Response { status, body })
    }
}
