//! Translation of an inbound request into its outbound counterpart.
//!
//! # Responsibilities
//! - Collect the body of POST/PUT/PATCH in full before dispatch
//! - Point the request at the upstream authority, path and query verbatim
//! - Strip the headers that describe the inbound hop
//!
//! The method is never changed and no other header is touched.

use axum::body::{Body, Bytes};
use axum::http::request::Parts;
use axum::http::uri::{PathAndQuery, Scheme};
use axum::http::{header, HeaderMap, HeaderName, Method, Request, Uri, Version};

use crate::config::UpstreamTarget;
use crate::http::error::RelayError;

/// Headers describing the inbound connection. `Content-Length` and
/// `Transfer-Encoding` are recomputed by the client from the forwarded body.
const HOP_HEADERS: [HeaderName; 4] = [
    header::HOST,
    header::CONNECTION,
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
];

/// Whether a request body is read and forwarded for this method.
pub fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// Read the inbound body to completion, or drop it unread for methods that
/// carry none. A body that fails mid-stream is never forwarded.
pub async fn collect_body(method: &Method, body: Body) -> Result<Option<Bytes>, RelayError> {
    if !carries_body(method) {
        return Ok(None);
    }

    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(RelayError::Transport)?;
    tracing::debug!(bytes = bytes.len(), "Request body collected");
    Ok(Some(bytes))
}

/// Upstream URI: fixed authority, inbound path and query unchanged.
pub fn outbound_uri(target: &UpstreamTarget, inbound: &Uri) -> Result<Uri, axum::http::Error> {
    let path_and_query = inbound
        .path_and_query()
        .cloned()
        .unwrap_or_else(|| PathAndQuery::from_static("/"));

    Uri::builder()
        .scheme(Scheme::HTTP)
        .authority(target.authority().clone())
        .path_and_query(path_and_query)
        .build()
}

/// Inbound headers minus the per-hop ones.
pub fn outbound_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = inbound.clone();
    for name in HOP_HEADERS.iter() {
        headers.remove(name);
    }
    headers
}

/// Assemble the request sent upstream.
pub fn build_outbound(
    parts: &Parts,
    body: Option<Bytes>,
    target: &UpstreamTarget,
) -> Result<Request<Body>, RelayError> {
    let mut req = Request::builder()
        .method(parts.method.clone())
        .uri(outbound_uri(target, &parts.uri)?)
        .version(Version::HTTP_11);

    if let Some(headers) = req.headers_mut() {
        *headers = outbound_headers(&parts.headers);
    }

    let body = match body {
        Some(bytes) => Body::from(bytes),
        None => Body::empty(),
    };

    Ok(req.body(body)?)
}
