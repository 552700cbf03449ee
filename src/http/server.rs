//! HTTP server setup and the relay handler.
//!
//! # Responsibilities
//! - Create the Axum Router with a single catch-all relay route
//! - Wire up middleware (request tracing)
//! - Serve connections from the bound listener, one task per connection
//! - Forward every request to the origin named by its URI and relay the answer

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::error::RelayError;
use crate::http::request::prepare_outbound;
use crate::http::response::{proxy_error_response, relay_response};

/// Client used to reach origins: plain HTTP/1.1, no redirects, no caching.
pub type UpstreamClient = Client<HttpConnector, Body>;

/// Build the origin-facing client.
pub fn upstream_client() -> UpstreamClient {
    Client::builder(TokioExecutor::new()).build(HttpConnector::new())
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: UpstreamClient,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let state = AppState {
            client: upstream_client(),
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router: every method and path goes to the relay.
    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(relay_handler))
            .route("/", any(relay_handler))
            .fallback(relay_handler)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns only when serving fails.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            configured = %self.config.listener.bind_address,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app).await
    }
}

/// Route entry point: pulls the peer address off the connection, if any.
async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response<Body> {
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string());

    relay(&state.client, request, remote_addr.as_deref()).await
}

/// Relay one request to its origin and hand back the origin's response.
///
/// Dispatch failures become a plain 500; they never escape this call.
pub async fn relay(
    client: &UpstreamClient,
    request: Request<Body>,
    remote_addr: Option<&str>,
) -> Response<Body> {
    let peer = remote_addr.unwrap_or("-");
    tracing::info!(
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
        remote_addr = peer,
        "Relaying request"
    );

    let response = match dispatch(client, request, remote_addr).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(remote_addr = peer, error = %e.detail(), "Proxy server error");
            return proxy_error_response();
        }
    };

    tracing::info!(
        remote_addr = peer,
        status = %response.status(),
        "Remote backend response"
    );

    relay_response(response, remote_addr)
}

async fn dispatch(
    client: &UpstreamClient,
    request: Request<Body>,
    remote_addr: Option<&str>,
) -> Result<Response<hyper::body::Incoming>, RelayError> {
    let outbound = prepare_outbound(request, remote_addr)?;
    Ok(client.request(outbound).await?)
}
