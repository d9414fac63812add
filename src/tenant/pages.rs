//! Page handlers behind the rewrite.
//!
//! Tenant handlers receive the subdomain as a plain path parameter. They do
//! no validation or lookup, so any label renders.

use axum::{
    extract::{OriginalUri, Path, State},
    http::{Extensions, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::http::middleware::ResolvedTenant;
use crate::http::server::AppState;
use crate::routing::host::raw_host;
use crate::tenant::links::tenant_url;
use crate::tenant::stats::{ActivityEntry, HomeSummary, TenantStats};

/// Tenants linked from the landing page.
pub const EXAMPLE_TENANTS: &[&str] = &["test", "john"];

#[derive(Debug, Serialize)]
pub struct TenantLink {
    pub tenant: String,
    pub home: String,
    pub dashboard: String,
}

#[derive(Debug, Serialize)]
pub struct LandingView {
    pub title: &'static str,
    pub root_domain: String,
    pub tenants: Vec<TenantLink>,
}

#[derive(Debug, Serialize)]
pub struct TenantHomeView {
    pub tenant: String,
    pub welcome: String,
    pub host: String,
    /// Path as the client sent it, before the rewrite.
    pub visible_path: String,
    /// Reached through a tenant host rather than the raw `/tenant` path.
    pub via_subdomain: bool,
    #[serde(flatten)]
    pub summary: HomeSummary,
    pub dashboard_path: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub tenant: String,
    pub title: String,
    pub stats: TenantStats,
    pub recent_activity: Vec<ActivityEntry>,
    pub home_path: &'static str,
}

pub async fn landing(State(state): State<AppState>, headers: HeaderMap) -> Json<LandingView> {
    let policy = state.policy.load();
    let host = raw_host(&headers);
    let mode = policy.mode_for(host);

    let tenants = EXAMPLE_TENANTS
        .iter()
        .filter_map(|tenant| {
            let home = tenant_url(mode, host, policy.root_domain(), tenant, "/").ok()?;
            let dashboard = tenant_url(mode, host, policy.root_domain(), tenant, "/dashboard").ok()?;
            Some(TenantLink {
                tenant: tenant.to_string(),
                home: home.into(),
                dashboard: dashboard.into(),
            })
        })
        .collect();

    Json(LandingView {
        title: "Multi-tenant demo",
        root_domain: policy.root_domain().to_string(),
        tenants,
    })
}

pub async fn tenant_home(
    State(state): State<AppState>,
    Path(subdomain): Path<String>,
    OriginalUri(original): OriginalUri,
    headers: HeaderMap,
    extensions: Extensions,
) -> Json<TenantHomeView> {
    Json(TenantHomeView {
        welcome: format!("Welcome to {subdomain}"),
        host: raw_host(&headers).to_string(),
        visible_path: original.path().to_string(),
        via_subdomain: extensions.get::<ResolvedTenant>().is_some(),
        summary: state.stats.home_summary(&subdomain),
        dashboard_path: "/dashboard",
        tenant: subdomain,
    })
}

pub async fn tenant_dashboard(
    State(state): State<AppState>,
    Path(subdomain): Path<String>,
) -> Json<DashboardView> {
    Json(DashboardView {
        title: format!("{subdomain} Dashboard"),
        stats: state.stats.stats(&subdomain),
        recent_activity: state.stats.recent_activity(&subdomain),
        home_path: "/",
        tenant: subdomain,
    })
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn not_found(OriginalUri(original): OriginalUri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "not found",
            "path": original.path(),
        })),
    )
}
