//! Minimal HTTP/1.1 server with fixed routes for integration tests.
//!
//! Routes: `/ok1`, `/ok2` (200 with a small body), `/moved-permanently`
//! (301 to `/ok1`), `/bad-request` (400), `/not-found` (404), `/error` (500),
//! `/hang` (never answers; closes after a few seconds). Counts requests per path.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub struct TestServer {
    base: String,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl TestServer {
    /// Starts the server on an ephemeral port in a background thread. The
    /// server runs until the process exits.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let base = format!("http://127.0.0.1:{}", port);
        let hits = Arc::new(Mutex::new(HashMap::new()));
        let server_hits = Arc::clone(&hits);
        let server_base = base.clone();
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let hits = Arc::clone(&server_hits);
                let base = server_base.clone();
                thread::spawn(move || handle(stream, &base, &hits));
            }
        });
        Self { base, hits }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }
}

fn handle(mut stream: TcpStream, base: &str, hits: &Mutex<HashMap<String, usize>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let Some(path) = read_request_path(&mut stream) else {
        return;
    };
    *hits.lock().unwrap().entry(path.clone()).or_insert(0) += 1;

    let (status, extra, body): (&str, String, &[u8]) = match path.as_str() {
        "/ok1" => ("200 OK", String::new(), &b"OK1\n"[..]),
        "/ok2" => ("200 OK", String::new(), &b"OK2\n"[..]),
        "/moved-permanently" => (
            "301 Moved Permanently",
            format!("Location: {}/ok1\r\n", base),
            &b""[..],
        ),
        "/bad-request" => ("400 Bad Request", String::new(), &b"Bad Request\n"[..]),
        "/error" => ("500 Internal Server Error", String::new(), &b"Internal Server Error\n"[..]),
        "/hang" => {
            thread::sleep(Duration::from_secs(5));
            return;
        }
        _ => ("404 Not Found", String::new(), &b"404 page not found\n"[..]),
    };
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n",
        status,
        body.len(),
        extra
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}

/// Reads the request head and returns the path of the request line.
fn read_request_path(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let head = String::from_utf8_lossy(&buf);
    let request_line = head.lines().next()?;
    let path = request_line.split_whitespace().nth(1)?;
    Some(path.to_string())
}
