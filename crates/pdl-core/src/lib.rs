pub mod config;
pub mod logging;

pub mod cancel;
pub mod client;
pub mod retry;
pub mod scheduler;
pub mod storage;
pub mod transport;
pub mod url_model;

#[cfg(test)]
mod testing;

pub use cancel::CancellationSignal;
pub use client::{Client, ClientBuilder, ClientError};
pub use config::Options;
pub use scheduler::BatchResult;
