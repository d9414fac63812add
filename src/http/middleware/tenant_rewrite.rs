//! Tenant rewrite middleware.
//!
//! Runs before route dispatch. A tenant request has its URI path replaced
//! by `/tenant/{subdomain}{path}` in place. The client never sees that
//! path: there is no redirect and no header carrying it. `OriginalUri`
//! keeps the client-visible URI for handlers that need it.

use std::time::Instant;

use axum::{
    body::Body,
    extract::{OriginalUri, State},
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::host::request_host;
use crate::routing::{rewrite_uri, RouteDecision, Subdomain};

/// Tenant attached to rewritten requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTenant(pub Subdomain);

pub async fn tenant_rewrite_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let host = request_host(&req).unwrap_or_default().to_string();
    let path = req.uri().path().to_string();
    let decision = state.policy.load().decide(Some(host.as_str()), &path);

    let outcome = match &decision {
        RouteDecision::Bypass { .. } => decision.outcome(),
        RouteDecision::Root { .. } => {
            tracing::info!(
                request_id = %request_id(req.headers()),
                host = %host,
                path = %path,
                subdomain = "none",
                rewritten = "none",
                "Resolved host"
            );
            decision.outcome()
        }
        RouteDecision::Tenant { subdomain, .. } => match rewrite_uri(req.uri(), subdomain) {
            Ok(uri) => {
                tracing::info!(
                    request_id = %request_id(req.headers()),
                    host = %host,
                    path = %path,
                    subdomain = %subdomain,
                    rewritten = %uri.path(),
                    "Resolved host"
                );
                if req.extensions().get::<OriginalUri>().is_none() {
                    let original = OriginalUri(req.uri().clone());
                    req.extensions_mut().insert(original);
                }
                req.extensions_mut().insert(ResolvedTenant(subdomain.clone()));
                *req.uri_mut() = uri;
                decision.outcome()
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id(req.headers()),
                    host = %host,
                    path = %path,
                    subdomain = %subdomain,
                    error = %e,
                    "Tenant rewrite failed, routing to root domain"
                );
                "rewrite_failed"
            }
        },
    };
    metrics::record_resolution(outcome);

    let response = next.run(req).await;
    metrics::record_request(&method, response.status().as_u16(), start);
    response
}
