//! Batch entry point: validate collaborators, run one dispatcher per call.
//!
//! A [`Client`] holds only read-only configuration and shared collaborators.
//! Each `download*` call builds a fresh [`Dispatcher`], so concurrent calls
//! from different threads never share counters, queues or signals.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Options;
use crate::scheduler::{BatchResult, Dispatcher};
use crate::storage::{FsPersister, Persister};
use crate::transport::{CurlTransport, Transport};

/// Misconfiguration detected before any job runs.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("no transport configured")]
    MissingTransport,
    #[error("no persister configured")]
    MissingPersister,
    #[error("output location is not a directory: {}", .0.display())]
    OutputNotDirectory(PathBuf),
}

/// Builder for a [`Client`] with explicit collaborators.
pub struct ClientBuilder {
    options: Options,
    transport: Option<Arc<dyn Transport>>,
    persister: Option<Arc<dyn Persister>>,
}

impl ClientBuilder {
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn persister(mut self, persister: Arc<dyn Persister>) -> Self {
        self.persister = Some(persister);
        self
    }

    pub fn build(self) -> Result<Client, ClientError> {
        let transport = self.transport.ok_or(ClientError::MissingTransport)?;
        let persister = self.persister.ok_or(ClientError::MissingPersister)?;
        Ok(Client {
            options: self.options,
            transport,
            persister,
        })
    }
}

pub struct Client {
    options: Options,
    transport: Arc<dyn Transport>,
    persister: Arc<dyn Persister>,
}

impl Client {
    /// Client with the curl transport and a filesystem persister writing into
    /// `options.output`, which must be an existing directory.
    pub fn new(options: Options) -> Result<Self, ClientError> {
        if !options.output.is_dir() {
            return Err(ClientError::OutputNotDirectory(options.output.clone()));
        }
        let transport = Arc::new(CurlTransport::new(options.request_timeout()));
        let persister = Arc::new(FsPersister::new(options.output.clone()));
        Self::builder(options)
            .transport(transport)
            .persister(persister)
            .build()
    }

    /// Builder with no collaborators set; `build` fails until both are given.
    pub fn builder(options: Options) -> ClientBuilder {
        ClientBuilder {
            options,
            transport: None,
            persister: None,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Fetch and persist every target; returns the number of jobs that failed
    /// permanently. Blocks until the batch is done or cancelled.
    pub fn download<S: AsRef<str>>(&self, targets: &[S]) -> u64 {
        self.download_report(targets).terminal_failure_count
    }

    /// Like [`Client::download`] but returns the full per-batch report.
    pub fn download_report<S: AsRef<str>>(&self, targets: &[S]) -> BatchResult {
        self.dispatcher().run(targets)
    }

    /// Fresh dispatcher for one batch. Use this to grab
    /// [`Dispatcher::cancel_signal`] before starting a long run.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(
            &self.options,
            Arc::clone(&self.transport),
            Arc::clone(&self.persister),
        )
    }
}
