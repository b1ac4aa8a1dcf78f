//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves scripted responses per path (a sequence of status/body pairs,
//! the last repeating forever), counts requests per path, and captures
//! Authorization headers and request bodies so tests can assert attempt
//! counts and request decoration.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Scripted responses for one path; the last entry repeats forever.
#[derive(Clone)]
pub struct Route {
    responses: Vec<(u16, String)>,
}

impl Route {
    /// Responds 200 with `body` on every request.
    pub fn json(body: &str) -> Self {
        Self::always(200, body)
    }

    /// Responds with `status`/`body` on every request.
    pub fn always(status: u16, body: &str) -> Self {
        Self {
            responses: vec![(status, body.to_string())],
        }
    }

    /// Responds with each pair in order; the last pair repeats.
    pub fn sequence(responses: Vec<(u16, &str)>) -> Self {
        Self {
            responses: responses
                .into_iter()
                .map(|(s, b)| (s, b.to_string()))
                .collect(),
        }
    }
}

struct State {
    routes: HashMap<String, Route>,
    hits: Mutex<HashMap<String, usize>>,
    auth_headers: Mutex<Vec<String>>,
    bodies: Mutex<Vec<String>>,
}

/// Handle to a running mock server.
pub struct ApiServer {
    state: Arc<State>,
    base_url: String,
}

impl ApiServer {
    /// Starts the server in a background thread serving `routes`. Unknown
    /// paths get a 404 with a JSON error body. The server runs until the
    /// process exits.
    pub fn start(routes: Vec<(&str, Route)>) -> ApiServer {
        let state = Arc::new(State {
            routes: routes
                .into_iter()
                .map(|(p, r)| (p.to_string(), r))
                .collect(),
            hits: Mutex::new(HashMap::new()),
            auth_headers: Mutex::new(Vec::new()),
            bodies: Mutex::new(Vec::new()),
        });
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let st = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let st = Arc::clone(&st);
                thread::spawn(move || handle(stream, &st));
            }
        });
        ApiServer {
            state,
            base_url: format!("http://127.0.0.1:{}", port),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Number of requests seen for `path`.
    pub fn hits(&self, path: &str) -> usize {
        *self.state.hits.lock().unwrap().get(path).unwrap_or(&0)
    }

    /// Authorization header values seen so far, in arrival order.
    pub fn auth_headers(&self) -> Vec<String> {
        self.state.auth_headers.lock().unwrap().clone()
    }

    /// Request bodies seen so far, in arrival order.
    pub fn bodies(&self) -> Vec<String> {
        self.state.bodies.lock().unwrap().clone()
    }
}

fn handle(mut stream: TcpStream, state: &State) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut raw = Vec::new();
    let mut buf = [0u8; 8192];
    let header_end = loop {
        match stream.read(&mut buf) {
            Ok(0) => return,
            Ok(n) => {
                raw.extend_from_slice(&buf[..n]);
                if let Some(pos) = find_header_end(&raw) {
                    break pos;
                }
                if raw.len() > 64 * 1024 {
                    return;
                }
            }
            Err(_) => return,
        }
    };

    let head = match std::str::from_utf8(&raw[..header_end]) {
        Ok(s) => s.to_string(),
        Err(_) => return,
    };
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let _method = parts.next().unwrap_or_default();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if name.eq_ignore_ascii_case("authorization") {
            state.auth_headers.lock().unwrap().push(value.to_string());
        } else if name.eq_ignore_ascii_case("content-length") {
            content_length = value.parse().unwrap_or(0);
        }
    }

    let body_start = header_end + 4;
    while raw.len() < body_start + content_length {
        match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => raw.extend_from_slice(&buf[..n]),
            Err(_) => break,
        }
    }
    if content_length > 0 && raw.len() >= body_start {
        let end = raw.len().min(body_start + content_length);
        if let Ok(body) = std::str::from_utf8(&raw[body_start..end]) {
            state.bodies.lock().unwrap().push(body.to_string());
        }
    }

    let idx = {
        let mut hits = state.hits.lock().unwrap();
        let counter = hits.entry(path.clone()).or_insert(0);
        let idx = *counter;
        *counter += 1;
        idx
    };

    let (status, body) = match state.routes.get(&path) {
        Some(route) => route
            .responses
            .get(idx)
            .or_else(|| route.responses.last())
            .cloned()
            .unwrap_or((500, String::new())),
        None => (
            404,
            r#"{"title": "Not Found", "description": "no such route"}"#.to_string(),
        ),
    };

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

fn find_header_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|w| w == b"\r\n\r\n")
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
