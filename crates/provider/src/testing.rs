//! A minimal HTTP/1.1 server for exercising providers against canned
//! responses.
//!
//! Each server accepts a single connection, records the full request
//! (including a streamed body) and answers with the configured status and
//! body.

use std::collections::HashMap;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

/// A request captured by [`MockHttpServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Header names are lower-cased.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Look up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The body as lossy UTF-8.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A one-shot mock HTTP server bound to an ephemeral local port.
pub struct MockHttpServer {
    listener: TcpListener,
    base_url: String,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock server");
        let port = listener.local_addr().unwrap().port();
        let base_url = format!("http://127.0.0.1:{port}");
        Self { listener, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Accept one request, read it completely and answer with `status`.
    pub async fn respond_once(self, status: u16, body: &str) -> RecordedRequest {
        let (stream, _) = self.listener.accept().await.unwrap();
        let mut reader = BufReader::new(stream);
        let recorded = read_request(&mut reader).await;

        let content_type = if body.is_empty() {
            "text/plain"
        } else {
            "application/json"
        };
        let response = format!(
            "HTTP/1.1 {status} {}\r\n\
             Content-Type: {content_type}\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\
             \r\n\
             {body}",
            reason(status),
            body.len()
        );

        let mut stream = reader.into_inner();
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
        recorded
    }

    /// Answer with a JSON value.
    pub async fn respond_json(self, status: u16, body: &serde_json::Value) -> RecordedRequest {
        self.respond_once(status, &body.to_string()).await
    }

    /// Accept one connection, read the request head and never answer.
    pub async fn stall(self) {
        let (stream, _) = self.listener.accept().await.unwrap();
        let mut reader = BufReader::new(stream);
        let _ = read_head(&mut reader).await;
        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    }
}

async fn read_head(
    reader: &mut BufReader<TcpStream>,
) -> (String, String, HashMap<String, String>) {
    let mut request_line = String::new();
    reader.read_line(&mut request_line).await.unwrap();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_owned();
    let path = parts.next().unwrap_or_default().to_owned();

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await.unwrap() == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_owned());
        }
    }
    (method, path, headers)
}

async fn read_request(reader: &mut BufReader<TcpStream>) -> RecordedRequest {
    let (method, path, headers) = read_head(reader).await;

    let chunked = headers
        .get("transfer-encoding")
        .is_some_and(|v| v.eq_ignore_ascii_case("chunked"));
    let body = if chunked {
        read_chunked(reader).await
    } else {
        let len = headers
            .get("content-length")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0);
        let mut body = vec![0u8; len];
        reader.read_exact(&mut body).await.unwrap();
        body
    };

    RecordedRequest {
        method,
        path,
        headers,
        body,
    }
}

async fn read_chunked(reader: &mut BufReader<TcpStream>) -> Vec<u8> {
    let mut body = Vec::new();
    loop {
        let mut size_line = String::new();
        reader.read_line(&mut size_line).await.unwrap();
        let size_hex = size_line.trim().split(';').next().unwrap_or("0");
        let size = usize::from_str_radix(size_hex, 16).unwrap_or(0);
        if size == 0 {
            // trailer terminator
            let mut end = String::new();
            reader.read_line(&mut end).await.unwrap();
            return body;
        }
        let start = body.len();
        body.resize(start + size, 0);
        reader.read_exact(&mut body[start..]).await.unwrap();
        let mut crlf = [0u8; 2];
        reader.read_exact(&mut crlf).await.unwrap();
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
