//! Minimal IPFS gateway stub for tests
//!
//! Accepts HTTP/1.1 connections, captures the multipart request and replies
//! with a canned response.

#![allow(dead_code)]

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

pub const CID_ROOT: &str = "bafybeifx7yeb55armcsxwwitkymga5xf53dxiarykms3ygqic223w5sk3m";
pub const CID_FILE: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub head: String,
    pub body: String,
}

impl CapturedRequest {
    pub fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or("")
    }

    pub fn header(&self, name: &str) -> Option<String> {
        let prefix = format!("{}:", name.to_ascii_lowercase());
        self.head
            .lines()
            .find(|line| line.to_ascii_lowercase().starts_with(&prefix))
            .map(|line| line[prefix.len()..].trim().to_string())
    }
}

pub struct StubGateway {
    pub url: String,
    requests: mpsc::UnboundedReceiver<CapturedRequest>,
}

impl StubGateway {
    /// Reply to every request with `status` and `body`
    pub async fn start(status: u16, reason: &'static str, body: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let (tx, requests) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            loop {
                let (mut socket, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => break,
                };
                let tx = tx.clone();
                let body = body.clone();
                tokio::spawn(async move {
                    let Ok(request) = read_request(&mut socket).await else {
                        return;
                    };
                    let _ = tx.send(request);

                    let response = format!(
                        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n{}",
                        status, reason, body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self { url, requests }
    }

    /// Successful `add` of one file, streamed with progress
    pub async fn single_file(name: &str) -> Self {
        let body = format!(
            "{{\"Name\":\"{name}\",\"Bytes\":11}}\n{{\"Name\":\"{name}\",\"Hash\":\"{cid}\",\"Size\":\"19\"}}\n",
            name = name,
            cid = CID_FILE
        );
        Self::start(200, "OK", body).await
    }

    pub async fn next_request(&mut self) -> CapturedRequest {
        tokio::time::timeout(Duration::from_secs(5), self.requests.recv())
            .await
            .expect("gateway should receive a request")
            .expect("gateway channel closed")
    }
}

/// A gateway that reads the request and never answers
pub async fn start_silent_gateway() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let _ = read_request(&mut socket).await;
                tokio::time::sleep(Duration::from_secs(3600)).await;
                drop(socket);
            });
        }
    });

    url
}

async fn read_request(socket: &mut TcpStream) -> std::io::Result<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];

    loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = find(&buf, b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_string();
            let complete = match boundary(&head) {
                Some(boundary) => find(&buf[end..], format!("--{}--", boundary).as_bytes()).is_some(),
                None => true,
            };
            if complete {
                return Ok(CapturedRequest {
                    head,
                    body: String::from_utf8_lossy(&buf[end + 4..]).to_string(),
                });
            }
        }
    }

    Err(std::io::Error::new(
        std::io::ErrorKind::UnexpectedEof,
        "connection closed before request completed",
    ))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn boundary(head: &str) -> Option<String> {
    head.lines()
        .find(|line| line.to_ascii_lowercase().starts_with("content-type:"))
        .and_then(|line| line.split("boundary=").nth(1))
        .map(|b| b.trim().trim_matches('"').to_string())
}
