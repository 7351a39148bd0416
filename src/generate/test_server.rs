//! Minimal keep-alive HTTP/1.1 server for exercising `GeminiClient` over a real socket.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// A request as seen by the server.
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub request_line: String,
    pub api_key: Option<String>,
    pub body: String,
}

pub struct TestServer {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl TestServer {
    /// Serves `response_body` as a 200 JSON reply to every request.
    pub fn start(response_body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let received = Arc::new(Mutex::new(Vec::new()));
        let body = response_body.to_string();

        let log = Arc::clone(&received);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let log = Arc::clone(&log);
                let body = body.clone();
                thread::spawn(move || serve_connection(stream, &body, &log));
            }
        });

        Self { addr, received }
    }

    /// Base URL in the shape of `GEMINI_BASE_URL`.
    pub fn base_url(&self) -> String {
        format!("http://{}/v1beta", self.addr)
    }

    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.received.lock().unwrap().clone()
    }
}

fn serve_connection(stream: TcpStream, body: &str, log: &Mutex<Vec<ReceivedRequest>>) {
    let Ok(write_half) = stream.try_clone() else {
        return;
    };
    let mut reader = BufReader::new(stream);
    let mut writer = write_half;

    // Keep answering on the same connection until the client hangs up.
    loop {
        let mut request_line = String::new();
        match reader.read_line(&mut request_line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }

        let mut content_length = 0usize;
        let mut api_key = None;
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap_or(0) == 0 {
                return;
            }
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                match name.trim().to_ascii_lowercase().as_str() {
                    "content-length" => content_length = value.trim().parse().unwrap_or(0),
                    "x-goog-api-key" => api_key = Some(value.trim().to_string()),
                    _ => {}
                }
            }
        }

        let mut request_body = vec![0u8; content_length];
        if reader.read_exact(&mut request_body).is_err() {
            return;
        }

        log.lock().unwrap().push(ReceivedRequest {
            request_line: request_line.trim_end().to_string(),
            api_key,
            body: String::from_utf8_lossy(&request_body).into_owned(),
        });

        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: keep-alive\r\n\r\n{}",
            body.len(),
            body
        );
        if writer.write_all(response.as_bytes()).is_err() || writer.flush().is_err() {
            return;
        }
    }
}
