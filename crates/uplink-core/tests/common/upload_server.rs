//! Minimal HTTP/1.1 server for upload integration tests.
//!
//! Responds with a scripted `(status, body)` sequence (repeating the last
//! entry once exhausted) and captures every request (method, target,
//! headers, body) so tests can assert on what was actually sent. Handles
//! `Expect: 100-continue`, which libcurl sends for larger upload bodies.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or("")
    }

    pub fn query(&self) -> &str {
        self.target.split_once('?').map(|(_, q)| q).unwrap_or("")
    }
}

pub struct UploadServer {
    base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl UploadServer {
    /// Base URL with trailing slash, e.g. "http://127.0.0.1:12345/".
    pub fn url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Number of requests served so far (= attempts made against us).
    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. The server runs until the
/// process exits; connections are handled serially, which matches the
/// uploader's one-attempt-at-a-time model.
pub fn start(script: Vec<(u32, &'static str)>) -> UploadServer {
    assert!(!script.is_empty(), "script must have at least one response");
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests: Arc<Mutex<Vec<CapturedRequest>>> = Arc::default();
    let captured = Arc::clone(&requests);

    thread::spawn(move || {
        let mut served = 0usize;
        for stream in listener.incoming().flatten() {
            let idx = served.min(script.len() - 1);
            let (status, body) = script[idx];
            served += 1;
            handle(stream, status, body, &captured);
        }
    });

    UploadServer {
        base_url: format!("http://127.0.0.1:{}/", port),
        requests,
    }
}

fn handle(stream: TcpStream, status: u32, body: &str, captured: &Mutex<Vec<CapturedRequest>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(5)));
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let target = parts.next().unwrap_or("").to_string();

    let mut headers = Vec::new();
    let mut content_length = 0usize;
    let mut expect_continue = false;
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim().to_string();
            let value = value.trim().to_string();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            }
            if name.eq_ignore_ascii_case("expect") && value.eq_ignore_ascii_case("100-continue") {
                expect_continue = true;
            }
            headers.push((name, value));
        }
    }

    if expect_continue {
        let _ = reader.get_mut().write_all(b"HTTP/1.1 100 Continue\r\n\r\n");
    }

    let mut request_body = vec![0u8; content_length];
    if content_length > 0 && reader.read_exact(&mut request_body).is_err() {
        return;
    }

    captured.lock().unwrap().push(CapturedRequest {
        method,
        target,
        headers,
        body: request_body,
    });

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );
    let _ = reader.get_mut().write_all(response.as_bytes());
}

fn reason(status: u32) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
