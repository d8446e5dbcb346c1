//! HTTP server setup and the relay handler.
//!
//! # Responsibilities
//! - Create the Axum router with a single catch-all handler
//! - Wire up middleware (cross-origin headers, tracing)
//! - Answer preflights locally
//! - Forward everything else to the upstream and stream the answer back
//!
//! Each inbound connection is served on its own task; the only state shared
//! between transactions is the immutable target and the outbound client.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{ConfigError, RelayConfig, UpstreamTarget};
use crate::http::cors::with_cors_headers;
use crate::http::error::RelayError;
use crate::http::forward;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct RelayState {
    pub client: Client<HttpConnector, Body>,
    pub upstream: Arc<UpstreamTarget>,
}

/// HTTP server for the relay.
pub struct RelayServer {
    router: Router,
    upstream: Arc<UpstreamTarget>,
}

impl RelayServer {
    /// Create a new relay server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, ConfigError> {
        let upstream = UpstreamTarget::from_config(&config.upstream)
            .map(Arc::new)
            .map_err(|e| ConfigError::Validation(vec![e]))?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(
            config.upstream.connect_timeout_secs,
        )));
        connector.set_nodelay(true);

        // No idle pooling: every transaction gets its own upstream connection.
        let client = Client::builder(TokioExecutor::new())
            .pool_max_idle_per_host(0)
            .build(connector);

        let state = RelayState {
            client,
            upstream: upstream.clone(),
        };

        Ok(Self {
            router: Self::build_router(state),
            upstream,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: RelayState) -> Router {
        let router = Router::new()
            .fallback(relay_handler)
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        with_cors_headers(router)
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.upstream,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for driving the relay without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn upstream(&self) -> &UpstreamTarget {
        &self.upstream
    }
}

/// Entry point for every inbound transaction.
async fn relay_handler(State(state): State<RelayState>, request: Request<Body>) -> Response {
    let span = tracing::info_span!(
        "transaction",
        request_id = %Uuid::new_v4(),
        method = %request.method(),
        uri = %request.uri(),
    );

    async move {
        match relay(state, request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, detail = %e.detail(), status = %e.status(), "Proxy request error");
                e.into_response()
            }
        }
    }
    .instrument(span)
    .await
}

async fn relay(state: RelayState, request: Request<Body>) -> Result<Response, RelayError> {
    // Preflight never reaches the upstream.
    if request.method() == Method::OPTIONS {
        tracing::info!("Handling OPTIONS preflight request");
        return Ok(StatusCode::OK.into_response());
    }

    let (parts, body) = request.into_parts();
    let body = forward::collect_body(&parts.method, body).await?;
    let outbound = forward::build_outbound(&parts, body, &state.upstream)?;

    tracing::info!(upstream_uri = %outbound.uri(), "Proxying request");

    let response: axum::http::Response<Incoming> = state
        .client
        .request(outbound)
        .await
        .map_err(RelayError::Upstream)?;

    tracing::info!(status = %response.status(), "Received response");

    // Body is handed over as a stream, never buffered.
    let (parts, body) = response.into_parts();
    Ok(Response::from_parts(parts, Body::new(body)))
}
