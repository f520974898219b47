//! Loopback HTTP server answering with canned responses.
//!
//! Each accepted connection consumes one [`Reply`]; the server thread exits
//! once the replies run out. Request lines are recorded for assertions.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// What the server does with one connection.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Answer with the given status and body.
    Body { status: u16, body: String },
    /// Read the request, then hold the connection open without answering.
    Stall(Duration),
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Self::Body {
            status: 200,
            body: body.to_owned(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self::Body {
            status,
            body: String::from(r#"{"error":"unavailable"}"#),
        }
    }
}

/// A running canned server.
#[derive(Debug)]
pub struct CannedServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    pub fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .unwrap_or_else(|err| panic!("failed to bind loopback listener: {err}"));
        let addr = listener
            .local_addr()
            .unwrap_or_else(|err| panic!("failed to read listener address: {err}"));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        thread::spawn(move || {
            for reply in replies {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                serve(stream, &reply, &recorded);
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request lines received so far, e.g. `GET /search?q=... HTTP/1.1`.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|err| panic!("request log poisoned: {err}"))
            .clone()
    }
}

fn serve(mut stream: TcpStream, reply: &Reply, recorded: &Mutex<Vec<String>>) {
    let request_line = read_request_line(&mut stream);
    if let Ok(mut log) = recorded.lock() {
        log.push(request_line);
    }

    match reply {
        Reply::Body { status, body } => {
            let response = format!(
                "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
        Reply::Stall(duration) => thread::sleep(*duration),
    }
}

fn read_request_line(stream: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];
    while !buffer.windows(4).any(|window| window == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(read) => buffer.extend_from_slice(&chunk[..read]),
        }
    }
    String::from_utf8_lossy(&buffer)
        .lines()
        .next()
        .unwrap_or_default()
        .to_owned()
}

/// Base URL of a loopback port with nothing listening on it.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .unwrap_or_else(|err| panic!("failed to bind loopback listener: {err}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|err| panic!("failed to read listener address: {err}"));
    drop(listener);
    format!("http://{addr}")
}
