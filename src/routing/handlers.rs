//! Endpoint handlers.
//!
//! Each handler is a pure function of the catalog and the request pieces
//! it needs, returning either an encoded reply or an `ApiError`.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::catalog::{Catalog, Record};
use crate::collection::{filter, paginate, RecordFilter, Stats};
use crate::http::error::ApiError;
use crate::http::protocol::ProtocolInfo;
use crate::http::response::ApiReply;
use crate::query::options::ResourceQuery;
use crate::query::QueryParams;

#[derive(Serialize)]
struct Endpoints {
    users: &'static str,
    products: &'static str,
    posts: &'static str,
    health: &'static str,
    stats: &'static str,
}

#[derive(Serialize)]
struct ServiceDescriptor {
    message: &'static str,
    version: &'static str,
    protocol: &'static str,
    endpoints: Endpoints,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Health {
    status: &'static str,
    timestamp: String,
    protocol: &'static str,
    http_version: &'static str,
}

/// `GET /`
pub fn service_descriptor(protocol: ProtocolInfo) -> Result<ApiReply, ApiError> {
    ApiReply::ok(&ServiceDescriptor {
        message: "HTTP/2 API Server is running!",
        version: env!("CARGO_PKG_VERSION"),
        protocol: protocol.name,
        endpoints: Endpoints {
            users: "/api/users",
            products: "/api/products",
            posts: "/api/posts",
            health: "/api/health",
            stats: "/api/stats",
        },
    })
}

/// `GET /api/health`
pub fn health(protocol: ProtocolInfo) -> Result<ApiReply, ApiError> {
    ApiReply::ok(&Health {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        protocol: protocol.name,
        http_version: protocol.version,
    })
}

/// `GET /api/stats`
pub fn stats(catalog: &Catalog) -> Result<ApiReply, ApiError> {
    ApiReply::ok(&Stats::compute(catalog))
}

/// `GET /api/<collection>`: typed query → filter → paginate.
pub fn list<Q>(records: &[Q::Record], params: &QueryParams) -> Result<ApiReply, ApiError>
where
    Q: ResourceQuery + RecordFilter<Q::Record>,
    Q::Record: Serialize,
{
    let query = Q::from_params(params)?;
    let matched = filter(records, &query);
    let page = paginate(&matched, query.window());
    ApiReply::ok(&page.keyed(<Q::Record as Record>::COLLECTION))
}

/// `GET /api/<collection>/{id}`
pub fn get_one<R>(records: &[R], raw_id: &str) -> Result<ApiReply, ApiError>
where
    R: Record + Serialize,
{
    let id: i64 = raw_id.parse().map_err(|_| ApiError::InvalidId(R::SINGULAR))?;
    let record = records
        .iter()
        .find(|r| r.id() == id)
        .ok_or(ApiError::NotFound(R::LABEL))?;
    ApiReply::ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{seed, User};
    use crate::http::response::ReplyBody;
    use crate::query::UserQuery;
    use axum::http::{StatusCode, Version};

    fn json(reply: &ApiReply) -> serde_json::Value {
        match &reply.body {
            ReplyBody::Json(bytes) => serde_json::from_slice(bytes).unwrap(),
            ReplyBody::Empty => serde_json::Value::Null,
        }
    }

    #[test]
    fn get_one_distinguishes_invalid_and_missing_ids() {
        let catalog = seed::reference();
        assert_eq!(
            get_one::<User>(catalog.users(), "abc"),
            Err(ApiError::InvalidId("user"))
        );
        assert_eq!(
            get_one::<User>(catalog.users(), "999"),
            Err(ApiError::NotFound("User"))
        );
        assert_eq!(
            get_one::<User>(catalog.users(), "-1"),
            Err(ApiError::NotFound("User"))
        );

        let reply = get_one::<User>(catalog.users(), "2").unwrap();
        assert_eq!(json(&reply)["name"], "Jane Smith");
    }

    #[test]
    fn list_echoes_window() {
        let catalog = seed::reference();
        let params = QueryParams::parse("page=2&limit=2").unwrap();
        let reply = list::<UserQuery>(catalog.users(), &params).unwrap();
        let body = json(&reply);
        assert_eq!(body["users"].as_array().unwrap().len(), 2);
        assert_eq!(body["users"][0]["id"], 3);
        assert_eq!(body["total"], 5);
        assert_eq!(body["page"], 2);
        assert_eq!(body["limit"], 2);
        assert_eq!(body["totalPages"], 3);
    }

    #[test]
    fn health_reports_protocol() {
        let reply = health(ProtocolInfo::from(Version::HTTP_2)).unwrap();
        assert_eq!(reply.status, StatusCode::OK);
        let body = json(&reply);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["protocol"], "HTTP/2");
        assert_eq!(body["httpVersion"], "2.0");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn descriptor_lists_endpoints() {
        let body = json(&service_descriptor(ProtocolInfo::from(Version::HTTP_2)).unwrap());
        assert_eq!(body["message"], "HTTP/2 API Server is running!");
        assert_eq!(body["endpoints"]["users"], "/api/users");
        assert_eq!(body["endpoints"]["health"], "/api/health");
    }
}
