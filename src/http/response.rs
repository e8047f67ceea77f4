//! Response encoding.
//!
//! # Responsibilities
//! - Serialize handler results to JSON bytes
//! - Attach the fixed no-cache and CORS header set to every response
//! - Set content-length to the exact byte length of the body
//!
//! # Design Decisions
//! - Success and error replies share one encoder; only status and body vary
//! - Serialization failures degrade to a constant 500 body, never a dropped stream

use axum::body::{Body, Bytes};
use axum::http::header::{
    HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_LENGTH,
    CONTENT_TYPE, EXPIRES, PRAGMA,
};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use serde::Serialize;

use super::error::ApiError;
use super::protocol::ProtocolInfo;

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization, Accept, Origin";

const X_PROTOCOL_VERSION: HeaderName = HeaderName::from_static("x-protocol-version");
const X_SERVER_PROTOCOL: HeaderName = HeaderName::from_static("x-server-protocol");

const FALLBACK_ERROR_BODY: &[u8] = br#"{"error":"Internal server error"}"#;

/// Body of a reply before transport encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyBody {
    /// Encoded JSON document.
    Json(Bytes),
    /// No body and no content type (preflight).
    Empty,
}

/// Transport-independent result of dispatching one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: StatusCode,
    pub body: ReplyBody,
}

impl ApiReply {
    pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| ApiError::internal(format!("failed to encode response: {e}")))?;
        Ok(Self {
            status,
            body: ReplyBody::Json(Bytes::from(bytes)),
        })
    }

    pub fn ok<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        Self::json(StatusCode::OK, value)
    }

    /// Empty 200 answer to a CORS preflight.
    pub fn preflight() -> Self {
        Self {
            status: StatusCode::OK,
            body: ReplyBody::Empty,
        }
    }

    pub fn from_error(err: &ApiError) -> Self {
        let status = err.status();
        Self::json(status, &err.body()).unwrap_or_else(|_| Self {
            status,
            body: ReplyBody::Json(Bytes::from_static(FALLBACK_ERROR_BODY)),
        })
    }

    /// Body bytes, empty for a preflight reply.
    pub fn bytes(&self) -> Bytes {
        match &self.body {
            ReplyBody::Json(bytes) => bytes.clone(),
            ReplyBody::Empty => Bytes::new(),
        }
    }
}

impl From<Result<ApiReply, ApiError>> for ApiReply {
    fn from(result: Result<ApiReply, ApiError>) -> Self {
        result.unwrap_or_else(|err| Self::from_error(&err))
    }
}

/// Headers shared by every response, success or error.
pub fn common_headers(protocol: ProtocolInfo) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(12);
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));
    headers.insert(X_PROTOCOL_VERSION, HeaderValue::from_static(protocol.name));
    headers.insert(X_SERVER_PROTOCOL, HeaderValue::from_static(protocol.alpn));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOWED_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOWED_HEADERS));
    headers
}

/// Turn a reply into an HTTP response for the negotiated protocol.
pub fn encode(reply: ApiReply, protocol: ProtocolInfo) -> Response {
    let mut headers = common_headers(protocol);

    let body = match reply.body {
        ReplyBody::Json(bytes) => {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            bytes
        }
        ReplyBody::Empty => Bytes::new(),
    };
    headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = reply.status;
    *response.headers_mut() = headers;
    response
}
