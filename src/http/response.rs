//! Response handling and transformation.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers from the origin response
//! - Copy the remaining headers value by value
//! - Stream the origin body to the client, logging copy failures
//! - Render the fixed error response when dispatch fails
//!
//! # Design Decisions
//! - Streaming responses avoid buffering entire body
//! - Once the head is sent, body failures can only be logged
//! - The origin body is owned by `RelayBody` and released on drop

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::header::{HeaderValue, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use axum::http::{Response, StatusCode};
use http_body_util::Full;
use hyper::body::{Body as HttpBody, Bytes, Frame, SizeHint};

use crate::security::headers::{copy_headers, strip_hop_by_hop};

/// Fixed body sent when the origin cannot be reached.
pub const PROXY_ERROR_BODY: &str = "Proxy server error\n";

/// Build the client-facing response from the origin's response.
pub fn relay_response<B>(upstream: Response<B>, remote_addr: Option<&str>) -> Response<Body>
where
    B: HttpBody<Data = Bytes> + Send + Unpin + 'static,
    B::Error: Into<axum::BoxError> + std::fmt::Display,
{
    let (mut parts, body) = upstream.into_parts();
    strip_hop_by_hop(&mut parts.headers);

    let mut response = Response::new(Body::new(RelayBody::new(body, remote_addr)));
    *response.status_mut() = parts.status;
    copy_headers(response.headers_mut(), &parts.headers);
    response
}

/// Plain-text 500 returned when the origin could not be reached.
pub fn proxy_error_response() -> Response<Body> {
    let mut response = Response::new(Body::new(Full::new(Bytes::from_static(
        PROXY_ERROR_BODY.as_bytes(),
    ))));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    let headers = response.headers_mut();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    response
}

/// Origin body relayed frame by frame to the client.
///
/// Errors from the origin are logged as they surface. If the body is dropped
/// before reaching its end (client went away), that is logged too.
pub struct RelayBody<B> {
    inner: B,
    remote_addr: Option<String>,
    finished: bool,
}

impl<B: HttpBody> RelayBody<B> {
    pub fn new(inner: B, remote_addr: Option<&str>) -> Self {
        let finished = inner.is_end_stream();
        Self {
            inner,
            remote_addr: remote_addr.map(str::to_owned),
            finished,
        }
    }
}

impl<B> HttpBody for RelayBody<B>
where
    B: HttpBody + Unpin,
    B::Error: std::fmt::Display,
{
    type Data = B::Data;
    type Error = B::Error;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = &mut *self;
        match Pin::new(&mut this.inner).poll_frame(cx) {
            Poll::Ready(None) => {
                this.finished = true;
                Poll::Ready(None)
            }
            Poll::Ready(Some(Err(e))) => {
                this.finished = true;
                tracing::error!(
                    remote_addr = this.remote_addr.as_deref().unwrap_or("-"),
                    error = %e,
                    "Copy error"
                );
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(Some(Ok(frame))) => {
                // Known-length bodies may never be polled past their last frame.
                if this.inner.is_end_stream() {
                    this.finished = true;
                }
                Poll::Ready(Some(Ok(frame)))
            }
            Poll::Pending => Poll::Pending,
        }
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

impl<B> Drop for RelayBody<B> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!(
                remote_addr = self.remote_addr.as_deref().unwrap_or("-"),
                "Copy error: client went away before the response body completed"
            );
        }
    }
}
