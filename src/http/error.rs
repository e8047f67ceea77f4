//! Request-level error taxonomy.
//!
//! Every variant is encoded at the point of detection into a JSON
//! `{error, details?, path?, method?}` body; nothing crosses the request
//! boundary un-encoded.

use axum::http::StatusCode;
use serde::Serialize;

use crate::query::QueryError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Missing or empty method / request target.
    #[error("Invalid request")]
    MalformedRequest,

    /// Non-numeric record identifier. Carries the singular resource name.
    #[error("Invalid {0} ID")]
    InvalidId(&'static str),

    /// Well-formed identifier without a matching record. Carries the label.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Route not found")]
    RouteNotFound,

    #[error("invalid query: {0}")]
    Query(#[from] QueryError),

    /// A fault raised while producing a response.
    #[error("Internal server error: {details}")]
    Internal {
        details: String,
        path: Option<String>,
        method: Option<String>,
    },
}

/// Wire shape of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            path: None,
            method: None,
        }
    }

    fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl ApiError {
    pub fn internal(details: impl Into<String>) -> Self {
        Self::Internal {
            details: details.into(),
            path: None,
            method: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedRequest | Self::InvalidId(_) | Self::Query(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            Self::Query(err @ QueryError::MalformedEscape(_)) => {
                ErrorBody::new("Invalid query string").with_details(err.to_string())
            }
            Self::Query(err) => ErrorBody::new("Invalid query parameter").with_details(err.to_string()),
            Self::Internal {
                details,
                path,
                method,
            } => ErrorBody {
                error: "Internal server error".to_string(),
                details: Some(details.clone()),
                path: path.clone(),
                method: method.clone(),
            },
            other => ErrorBody::new(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_follow_resource_names() {
        assert_eq!(ApiError::InvalidId("user").body().error, "Invalid user ID");
        assert_eq!(ApiError::NotFound("Product").body().error, "Product not found");
        assert_eq!(ApiError::RouteNotFound.body().error, "Route not found");
        assert_eq!(ApiError::MalformedRequest.body().error, "Invalid request");
    }

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::MalformedRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidId("post").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("Post").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Query(QueryError::NotPositiveInteger("limit")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn query_errors_carry_details() {
        let body = ApiError::from(QueryError::NotPositiveInteger("limit")).body();
        assert_eq!(body.error, "Invalid query parameter");
        assert_eq!(body.details.as_deref(), Some("limit must be a positive integer"));

        let body = ApiError::from(QueryError::MalformedEscape("%zz".into())).body();
        assert_eq!(body.error, "Invalid query string");
    }

    #[test]
    fn simple_errors_serialize_without_optional_fields() {
        let json = serde_json::to_string(&ApiError::RouteNotFound.body()).unwrap();
        assert_eq!(json, r#"{"error":"Route not found"}"#);
    }

    #[test]
    fn internal_error_keeps_request_context() {
        let err = ApiError::Internal {
            details: "boom".into(),
            path: Some("/api/stats".into()),
            method: Some("GET".into()),
        };
        let json = serde_json::to_value(err.body()).unwrap();
        assert_eq!(json["error"], "Internal server error");
        assert_eq!(json["details"], "boom");
        assert_eq!(json["path"], "/api/stats");
        assert_eq!(json["method"], "GET");
    }
}
