//! Route table and request dispatch.
//!
//! # Responsibilities
//! - Hold the declarative route table (method, pattern, endpoint)
//! - Reject malformed requests before routing
//! - Short-circuit CORS preflights before any table lookup
//! - Dispatch the first matching entry and encode its outcome as `ApiReply`
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - First match wins, in the order of `ROUTE_TABLE`
//! - Explicit `RouteNotFound` rather than a silent default

use std::sync::Arc;

use axum::http::{Method, Version};

use super::handlers;
use super::matcher::RoutePattern;
use crate::catalog::{Catalog, Post, Product, User};
use crate::http::error::ApiError;
use crate::http::protocol::ProtocolInfo;
use crate::http::response::ApiReply;
use crate::query::{split_target, PostQuery, ProductQuery, QueryParams, UserQuery};

/// What a matched route does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ServiceDescriptor,
    Health,
    Stats,
    ListUsers,
    GetUser,
    ListProducts,
    GetProduct,
    ListPosts,
    GetPost,
}

/// One row of the route table.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub method: Method,
    pub pattern: RoutePattern,
    pub endpoint: Endpoint,
}

/// The routes, in match priority order.
const ROUTE_TABLE: [(RoutePattern, Endpoint); 9] = [
    (RoutePattern::Exact("/"), Endpoint::ServiceDescriptor),
    (RoutePattern::Exact("/api/health"), Endpoint::Health),
    (RoutePattern::Exact("/api/stats"), Endpoint::Stats),
    (RoutePattern::Exact("/api/users"), Endpoint::ListUsers),
    (RoutePattern::Member("/api/users"), Endpoint::GetUser),
    (RoutePattern::Exact("/api/products"), Endpoint::ListProducts),
    (RoutePattern::Member("/api/products"), Endpoint::GetProduct),
    (RoutePattern::Exact("/api/posts"), Endpoint::ListPosts),
    (RoutePattern::Member("/api/posts"), Endpoint::GetPost),
];

/// The parts of an incoming request the dispatcher looks at.
#[derive(Debug, Clone)]
pub struct RequestHead<'a> {
    pub method: Option<&'a Method>,
    /// Request target: path plus optional `?query`.
    pub target: Option<&'a str>,
    pub version: Version,
}

impl<'a> RequestHead<'a> {
    pub fn new(method: &'a Method, target: &'a str, version: Version) -> Self {
        Self {
            method: Some(method),
            target: Some(target),
            version,
        }
    }
}

/// Outcome of dispatching one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub reply: ApiReply,
    /// Label of the matched route, for logs and metrics.
    pub route: String,
}

/// Immutable router over an injected catalog.
#[derive(Debug, Clone)]
pub struct ApiRouter {
    catalog: Arc<Catalog>,
    routes: Vec<RouteEntry>,
}

impl ApiRouter {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let routes = ROUTE_TABLE
            .iter()
            .map(|(pattern, endpoint)| RouteEntry {
                method: Method::GET,
                pattern: *pattern,
                endpoint: *endpoint,
            })
            .collect();
        Self { catalog, routes }
    }

    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Find the first entry matching `method` and `path`, with its raw id.
    pub fn resolve<'p>(&self, method: &Method, path: &'p str) -> Option<(&RouteEntry, Option<&'p str>)> {
        self.routes
            .iter()
            .filter(|entry| entry.method == *method)
            .find_map(|entry| entry.pattern.matches(path).map(|m| (entry, m.id)))
    }

    /// Dispatch a request. Never fails: every error is already encoded.
    pub fn handle(&self, head: &RequestHead<'_>) -> Dispatch {
        let (Some(method), Some(target)) = (head.method, head.target.filter(|t| !t.is_empty())) else {
            return Dispatch {
                reply: ApiReply::from_error(&ApiError::MalformedRequest),
                route: "malformed".to_string(),
            };
        };

        if *method == Method::OPTIONS {
            return Dispatch {
                reply: ApiReply::preflight(),
                route: "preflight".to_string(),
            };
        }

        let (path, query) = split_target(target);
        let Some((entry, id)) = self.resolve(method, path) else {
            return Dispatch {
                reply: ApiReply::from_error(&ApiError::RouteNotFound),
                route: "unmatched".to_string(),
            };
        };

        let protocol = ProtocolInfo::from(head.version);
        let reply = self.run(entry.endpoint, id.unwrap_or_default(), query, protocol);

        Dispatch {
            reply: reply.into(),
            route: entry.pattern.template(),
        }
    }

    fn run(
        &self,
        endpoint: Endpoint,
        id: &str,
        query: Option<&str>,
        protocol: ProtocolInfo,
    ) -> Result<ApiReply, ApiError> {
        let catalog = self.catalog.as_ref();
        match endpoint {
            Endpoint::ServiceDescriptor => handlers::service_descriptor(protocol),
            Endpoint::Health => handlers::health(protocol),
            Endpoint::Stats => handlers::stats(catalog),
            Endpoint::ListUsers => handlers::list::<UserQuery>(catalog.users(), &parse_query(query)?),
            Endpoint::ListProducts => {
                handlers::list::<ProductQuery>(catalog.products(), &parse_query(query)?)
            }
            Endpoint::ListPosts => handlers::list::<PostQuery>(catalog.posts(), &parse_query(query)?),
            Endpoint::GetUser => handlers::get_one::<User>(catalog.users(), id),
            Endpoint::GetProduct => handlers::get_one::<Product>(catalog.products(), id),
            Endpoint::GetPost => handlers::get_one::<Post>(catalog.posts(), id),
        }
    }
}

fn parse_query(query: Option<&str>) -> Result<QueryParams, ApiError> {
    Ok(query.map(QueryParams::parse).transpose()?.unwrap_or_default())
}
