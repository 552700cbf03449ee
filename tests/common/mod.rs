//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{header::SET_COOKIE, HeaderMap, Method, Response, StatusCode},
    routing::{any, get},
    Router,
};
use forward_proxy::config::ProxyConfig;
use forward_proxy::http::HttpServer;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Bytes served by `/big`; several times larger than any hyper read buffer.
pub const BIG_BODY_LEN: usize = 5 * 1024 * 1024;

/// Deterministic payload of the given length.
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// Start the proxy on an ephemeral port.
pub async fn start_proxy() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = ProxyConfig::default();
    config.listener.bind_address = addr.to_string();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    addr
}

/// Client that sends every `http://` request through the proxy.
pub fn proxied_client(proxy: SocketAddr) -> reqwest::Client {
    reqwest::Client::builder()
        .proxy(reqwest::Proxy::http(format!("http://{}", proxy)).unwrap())
        .build()
        .unwrap()
}

/// Serve `app` on an ephemeral port.
pub async fn start_origin(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Origin with a handful of deterministic endpoints.
pub fn origin_router() -> Router {
    Router::new()
        .route("/hello", get(hello))
        .route("/headers", any(dump_headers))
        .route("/echo", any(echo))
        .route("/big", get(big))
        .route("/cookies", get(cookies))
        .route("/teapot", get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }))
}

async fn hello() -> Response<Body> {
    Response::builder()
        .header("X-Test", "ok")
        .body(Body::from("hello"))
        .unwrap()
}

/// One `name: value` line per received header value.
async fn dump_headers(headers: HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}\n", name, value.to_str().unwrap_or("?")))
        .collect()
}

async fn echo(method: Method, body: Bytes) -> Response<Body> {
    Response::builder()
        .header("X-Method", method.as_str())
        .body(Body::from(body))
        .unwrap()
}

async fn big() -> Vec<u8> {
    pattern(BIG_BODY_LEN)
}

async fn cookies() -> Response<Body> {
    Response::builder()
        .header(SET_COOKIE, "a=1")
        .header(SET_COOKIE, "b=2")
        .body(Body::empty())
        .unwrap()
}

/// Start a raw TCP backend that answers every request with `head` and `body`.
///
/// `head` is the status line plus headers, without the trailing blank line;
/// `Content-Length` is added.
pub async fn start_raw_backend(head: &'static str, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        read_request_head(&mut socket).await;
                        let response_str = format!(
                            "{}\r\nContent-Length: {}\r\n\r\n{}",
                            head,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
    addr
}

/// Start a raw TCP backend that promises `declared_len` body bytes, sends
/// only `body`, then closes the connection.
pub async fn start_truncating_backend(declared_len: usize, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                read_request_head(&mut socket).await;
                let response_str = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n{}",
                    declared_len, body
                );
                let _ = socket.write_all(response_str.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    addr
}

async fn read_request_head(socket: &mut tokio::net::TcpStream) {
    let mut received = Vec::new();
    let mut buf = [0u8; 1024];
    while !received.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => received.extend_from_slice(&buf[..n]),
        }
    }
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
