//! Shared test utilities: a one-shot local HTTP stub.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// The request the stub received.
pub struct RecordedRequest {
    pub head: String,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// First line of the request, e.g. `"GET /v3/accounts HTTP/1.1"`.
    pub fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    /// Value of the first header named `name`, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim())
        })
    }
}

/// Accepts one connection, records the request, and answers with `raw_response`.
pub async fn serve_raw(raw_response: String) -> (String, JoinHandle<RecordedRequest>) {
    serve_parts(vec![raw_response]).await
}

/// Answers one request with `status_line` and a JSON `body`.
pub async fn serve_json(status_line: &str, body: &str) -> (String, JoinHandle<RecordedRequest>) {
    serve_raw(format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    ))
    .await
}

/// Answers one request with a close-delimited body written in `parts`,
/// pausing between writes so the client sees separate chunks.
pub async fn serve_stream(parts: Vec<&str>) -> (String, JoinHandle<RecordedRequest>) {
    let mut writes = vec![
        "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n"
            .to_string(),
    ];
    writes.extend(parts.into_iter().map(String::from));
    serve_parts(writes).await
}

async fn serve_parts(writes: Vec<String>) -> (String, JoinHandle<RecordedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub listener");
    let addr = listener.local_addr().expect("stub has no local address");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("failed to accept");
        let request = read_request(&mut socket).await;
        for write in writes {
            socket
                .write_all(write.as_bytes())
                .await
                .expect("failed to write response");
            socket.flush().await.expect("failed to flush");
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{addr}"), handle)
}

async fn read_request(socket: &mut TcpStream) -> RecordedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        let n = socket.read(&mut chunk).await.expect("failed to read request");
        assert!(n > 0, "connection closed before request head");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (key, value) = line.split_once(':')?;
            if key.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    while buf.len() < head_end + content_length {
        let n = socket.read(&mut chunk).await.expect("failed to read body");
        assert!(n > 0, "connection closed before request body");
        buf.extend_from_slice(&chunk[..n]);
    }

    RecordedRequest {
        head,
        body: buf[head_end..head_end + content_length].to_vec(),
    }
}
