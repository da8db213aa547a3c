//! Scripted transport and in-memory persister for unit tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::cancel::CancellationSignal;
use crate::storage::{PersistError, Persister};
use crate::transport::{Response, Transport, TransportError};

/// Scripted reply for one transport call.
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Status(u32, &'static [u8]),
    /// Network-level failure.
    Error,
    /// Block until the batch is cancelled.
    Hang,
}

/// Transport that replays a per-target script. The last reply of a script
/// repeats forever; unknown targets get `default`.
pub(crate) struct ScriptedTransport {
    routes: HashMap<String, Vec<Reply>>,
    default: Reply,
    delay: Duration,
    calls: Mutex<HashMap<String, u32>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self {
            routes: HashMap::new(),
            default: Reply::Status(200, b"ok"),
            delay: Duration::ZERO,
            calls: Mutex::new(HashMap::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub(crate) fn route(mut self, target: &str, script: Vec<Reply>) -> Self {
        self.routes.insert(target.to_string(), script);
        self
    }

    pub(crate) fn default_reply(mut self, reply: Reply) -> Self {
        self.default = reply;
        self
    }

    /// Hold every call open for `delay` so overlapping calls can be observed.
    pub(crate) fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn calls(&self, target: &str) -> u32 {
        self.calls.lock().unwrap().get(target).copied().unwrap_or(0)
    }

    pub(crate) fn total_calls(&self) -> u32 {
        self.calls.lock().unwrap().values().sum()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn next_reply(&self, target: &str) -> Reply {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            let n = calls.entry(target.to_string()).or_insert(0);
            *n += 1;
            *n as usize
        };
        match self.routes.get(target) {
            Some(script) if !script.is_empty() => script[(n - 1).min(script.len() - 1)].clone(),
            _ => self.default.clone(),
        }
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Transport for ScriptedTransport {
    fn fetch(&self, target: &str, cancel: &CancellationSignal) -> Result<Response, TransportError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.in_flight);
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let reply = self.next_reply(target);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        match reply {
            Reply::Status(status, body) => Ok(Response {
                status,
                body: body.to_vec(),
            }),
            Reply::Error => Err(TransportError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "scripted reset",
            ))),
            Reply::Hang => {
                while !cancel.is_cancelled() {
                    std::thread::sleep(Duration::from_millis(1));
                }
                Err(TransportError::Cancelled)
            }
        }
    }
}

/// Persister that keeps bodies in memory and can fail its first N writes.
#[derive(Default)]
pub(crate) struct MemoryPersister {
    files: Mutex<HashMap<String, Vec<u8>>>,
    writes: AtomicU32,
    fail_first: AtomicU32,
}

impl MemoryPersister {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_first(n: u32) -> Self {
        let p = Self::default();
        p.fail_first.store(n, Ordering::SeqCst);
        p
    }

    pub(crate) fn writes(&self) -> u32 {
        self.writes.load(Ordering::SeqCst)
    }

    pub(crate) fn file(&self, name: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(name).cloned()
    }

    pub(crate) fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

impl Persister for MemoryPersister {
    fn save(&self, target: &str, body: &[u8]) -> Result<PathBuf, PersistError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let name = crate::url_model::derive_filename(target);
        let failed = self
            .fail_first
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(PersistError::Write {
                path: PathBuf::from(&name),
                source: std::io::Error::new(std::io::ErrorKind::Other, "scripted disk full"),
            });
        }
        self.files.lock().unwrap().insert(name.clone(), body.to_vec());
        Ok(PathBuf::from(name))
    }
}
