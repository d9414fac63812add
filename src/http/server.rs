//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Run the tenant rewrite before route dispatch
//! - Apply routing policy reloads
//! - Bind server to listener and drain on shutdown
//!
//! # Design Decisions
//! - The application router is the fallback service of an outer router.
//!   Middleware on the outer router runs before the inner router matches,
//!   so a rewritten URI is dispatched as if the client had sent it.
//! - Only the routing section reloads live; other sections need a restart

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{body::Body, http::Request, middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::TenantConfig;
use crate::http::middleware::tenant_rewrite_middleware;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::lifecycle::shutdown::recv_shutdown;
use crate::lifecycle::signals::shutdown_signal;
use crate::routing::TenantRouter;
use crate::tenant::pages;
use crate::tenant::{RandomStatsProvider, TenantStatsProvider};

/// Routing policy shared between the middleware and the reload task.
pub type SharedPolicy = Arc<ArcSwap<TenantRouter>>;

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub policy: SharedPolicy,
    pub stats: Arc<dyn TenantStatsProvider>,
}

/// HTTP server for the tenant edge.
pub struct HttpServer {
    router: Router,
    config: TenantConfig,
    policy: SharedPolicy,
}

impl HttpServer {
    /// Create a new HTTP server with random demo stats.
    pub fn new(config: TenantConfig) -> Self {
        Self::with_stats_provider(config, Arc::new(RandomStatsProvider))
    }

    /// Create a new HTTP server with the given stats source.
    pub fn with_stats_provider(config: TenantConfig, stats: Arc<dyn TenantStatsProvider>) -> Self {
        let policy: SharedPolicy = Arc::new(ArcSwap::from_pointee(TenantRouter::from_config(&config.routing)));

        let state = AppState {
            policy: policy.clone(),
            stats,
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            policy,
        }
    }

    /// Routes as seen after the rewrite.
    fn app_routes(state: AppState) -> Router {
        Router::new()
            .route("/", get(pages::landing))
            .route("/tenant/{subdomain}", get(pages::tenant_home))
            .route("/tenant/{subdomain}/", get(pages::tenant_home))
            .route("/tenant/{subdomain}/dashboard", get(pages::tenant_dashboard))
            .route("/api/health", get(pages::health))
            .fallback(pages::not_found)
            .with_state(state)
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &TenantConfig, state: AppState) -> Router {
        let app = Self::app_routes(state.clone());

        Router::new()
            .fallback_service(app)
            .layer(middleware::from_fn_with_state(state, tenant_rewrite_middleware))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id(request.headers()),
                )
            }))
            .layer(set_request_id_layer())
    }

    /// The complete service, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Handle to the live routing policy.
    pub fn policy(&self) -> SharedPolicy {
        self.policy.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &TenantConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Reloaded configs arriving on `config_updates` replace the routing
    /// policy. Stops on `shutdown` or on SIGINT/SIGTERM.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<TenantConfig>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            root_domain = %self.policy.load().root_domain(),
            "HTTP server starting"
        );

        let policy = self.policy.clone();
        let current = self.config.clone();
        let reload = tokio::spawn(async move {
            let mut current = current;
            while let Some(new_config) = config_updates.recv().await {
                apply_config(&policy, &current, &new_config);
                current = new_config;
            }
        });

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = recv_shutdown(shutdown) => tracing::info!("Shutdown requested"),
                    _ = shutdown_signal() => {}
                }
            })
            .await?;

        reload.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Swap in the routing policy of `new`. Other sections are reported, not applied.
pub fn apply_config(policy: &SharedPolicy, current: &TenantConfig, new: &TenantConfig) {
    policy.store(Arc::new(TenantRouter::from_config(&new.routing)));
    tracing::info!(
        root_domain = %new.routing.root_domain,
        deployment_mode = ?new.routing.deployment_mode,
        bypass_prefixes = ?new.routing.bypass_prefixes,
        "Routing policy reloaded"
    );

    if current.listener != new.listener
        || current.timeouts != new.timeouts
        || current.security != new.security
        || current.observability != new.observability
    {
        tracing::warn!("Non-routing configuration changed; restart to apply");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::DeploymentMode;

    #[test]
    fn test_apply_config_swaps_policy() {
        let server = HttpServer::new(TenantConfig::default());
        let policy = server.policy();
        assert_eq!(policy.load().decide(Some("john.devbox"), "/").outcome(), "root");

        let mut new = TenantConfig::default();
        new.routing.deployment_mode = Some(DeploymentMode::Local);
        new.routing.root_domain = "devbox".into();
        apply_config(&policy, server.config(), &new);

        assert_eq!(policy.load().root_domain(), "devbox");
        assert_eq!(policy.load().decide(Some("john.devbox"), "/").outcome(), "tenant");
    }
}
