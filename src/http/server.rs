//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router around the API dispatcher
//! - Configure HTTP/1.1 and HTTP/2 support (TLS with ALPN, or h2c)
//! - Wire up middleware (panic capture, request ID, tracing, concurrency limit)
//! - Bind server to listener and drain it on shutdown
//! - Observability (metrics, request logs)

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, Version},
    response::Response,
    Router,
};
use axum_server::Handle;
use tokio::sync::broadcast;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::catalog::Catalog;
use crate::config::{ListenerConfig, ServerConfig};
use crate::http::error::ApiError;
use crate::http::protocol::ProtocolInfo;
use crate::http::response::{encode, ApiReply};
use crate::net::tls::{load_tls_config, TlsError};
use crate::observability::metrics;
use crate::routing::{ApiRouter, Dispatch, RequestHead};

/// Error type for running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TLS error: {0}")]
    Tls(#[from] TlsError),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ApiRouter>,
}

/// HTTP server for the API.
pub struct ApiServer {
    router: Router,
    api: Arc<ApiRouter>,
    config: ServerConfig,
}

impl ApiServer {
    /// Create a new server over `catalog` with the given configuration.
    pub fn new(config: ServerConfig, catalog: Catalog) -> Self {
        let api = Arc::new(ApiRouter::new(Arc::new(catalog)));
        let state = AppState {
            router: Arc::clone(&api),
        };
        let router = Self::build_router(&config.listener, state);
        Self {
            router,
            api,
            config,
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers listed first wrap the ones after them.
    pub fn build_router(config: &ListenerConfig, state: AppState) -> Router {
        Router::new().fallback(api_handler).with_state(state).layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(ConcurrencyLimitLayer::new(config.max_concurrent_requests)),
        )
    }

    /// The assembled router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires, then drain.
    pub async fn run(
        self,
        listener: std::net::TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;
        let listener_config = &self.config.listener;

        let handle = Handle::new();
        let grace = Duration::from_secs(listener_config.shutdown_grace_secs);
        let drain = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!(grace_secs = grace.as_secs(), "Draining connections");
            drain.graceful_shutdown(Some(grace));
        });

        tracing::info!(
            address = %addr,
            tls = listener_config.tls.is_some(),
            http2_only = listener_config.http2_only,
            max_concurrent_streams = listener_config.max_concurrent_streams,
            "HTTP server starting"
        );
        for entry in self.api.routes() {
            tracing::info!(method = %entry.method, path = %entry.pattern.template(), "Route registered");
        }

        let app = self.router.into_make_service();
        let streams = listener_config.max_concurrent_streams;
        match &listener_config.tls {
            Some(tls) => {
                let rustls = load_tls_config(tls, listener_config.http2_only)?;
                let mut server = axum_server::from_tcp_rustls(listener, rustls).handle(handle);
                server.http_builder().http2().max_concurrent_streams(streams);
                server.serve(app).await?;
            }
            None => {
                let mut server = axum_server::from_tcp(listener).handle(handle);
                server.http_builder().http2().max_concurrent_streams(streams);
                server.serve(app).await?;
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Catch-all handler: hands the request head to the dispatcher.
async fn api_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let started = Instant::now();
    let (parts, _body) = request.into_parts();
    let protocol = ProtocolInfo::from(parts.version);
    let target = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| parts.uri.path());

    let head = RequestHead::new(&parts.method, target, parts.version);
    let dispatch = guarded(parts.method.as_str(), parts.uri.path(), || state.router.handle(&head));

    let status = dispatch.reply.status;
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
    if status.is_server_error() {
        tracing::error!(
            method = %parts.method,
            path = %parts.uri.path(),
            route = %dispatch.route,
            status = status.as_u16(),
            latency_ms,
            "Request failed"
        );
    } else {
        tracing::info!(
            method = %parts.method,
            path = %parts.uri.path(),
            route = %dispatch.route,
            status = status.as_u16(),
            latency_ms,
            "Request completed"
        );
    }
    metrics::record_request(&dispatch.route, status.as_u16(), started);

    encode(dispatch.reply, protocol)
}

/// Run `dispatch`, turning a panic into a 500 reply naming the request.
pub fn guarded(method: &str, path: &str, dispatch: impl FnOnce() -> Dispatch) -> Dispatch {
    panic::catch_unwind(AssertUnwindSafe(dispatch)).unwrap_or_else(|payload| {
        let err = ApiError::Internal {
            details: panic_message(payload.as_ref()),
            path: Some(path.to_string()),
            method: Some(method.to_string()),
        };
        Dispatch {
            reply: ApiReply::from_error(&err),
            route: "panic".to_string(),
        }
    })
}

/// Last-resort response for panics outside the dispatcher.
fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let details = panic_message(payload.as_ref());
    tracing::error!(details = %details, "Panic while serving request");
    encode(
        ApiReply::from_error(&ApiError::internal(details)),
        ProtocolInfo::from(Version::HTTP_11),
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed;
    use axum::http::{Method, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        ApiServer::new(ServerConfig::default(), seed::reference()).router()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn dispatches_through_the_router() {
        let request = Request::builder()
            .uri("/api/users?role=admin")
            .version(Version::HTTP_2)
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-protocol-version"], "HTTP/2");
        assert_eq!(response.headers()["content-type"], "application/json");
        assert!(response.headers().contains_key("x-request-id"));
        let body = body_json(response).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["users"][0]["name"], "John Doe");
    }

    #[tokio::test]
    async fn unknown_route_is_404_json() {
        let request = Request::builder().uri("/nope").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["x-server-protocol"], "http/1.1");
        assert_eq!(body_json(response).await, serde_json::json!({"error": "Route not found"}));
    }

    #[tokio::test]
    async fn preflight_is_empty() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/products")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("content-type").is_none());
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn caller_request_id_is_propagated() {
        let request = Request::builder()
            .uri("/api/health")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    #[test]
    fn dispatcher_panics_become_500() {
        let dispatch = guarded("GET", "/api/users", || panic!("catalog exploded"));
        assert_eq!(dispatch.reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_slice(&dispatch.reply.bytes()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "error": "Internal server error",
                "details": "catalog exploded",
                "path": "/api/users",
                "method": "GET"
            })
        );
    }

    #[test]
    fn outer_panic_response_is_json() {
        let response = panic_response(Box::new(String::from("encoder failed")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()["content-type"], "application/json");
    }
}
