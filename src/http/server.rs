//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the check handler
//! - Wire up middleware (tracing, limits, timeouts, request ID)
//! - Bind server to listener
//! - Look up the request's scope and evaluate it
//! - Swap in new scopes on config reload

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use http_body_util::BodyExt;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::check::evaluate;
use crate::config::GateConfig;
use crate::http::request::{request_id, MakeRequestUuid};
use crate::observability::metrics;
use crate::routing::ScopeTable;
use crate::rules::ConfigError;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub scopes: Arc<ArcSwap<ScopeTable>>,
}

/// HTTP server answering allow/deny checks.
pub struct HttpServer {
    router: Router,
    scopes: Arc<ArcSwap<ScopeTable>>,
}

impl HttpServer {
    /// Resolve the configured scopes and build the router.
    pub fn new(config: GateConfig) -> Result<Self, ConfigError> {
        let table = ScopeTable::from_config(&config.server)?;
        tracing::info!(
            server_enabled = table.server().enabled(),
            server_rules = table.server().rules().rules().len(),
            locations = table.location_count(),
            "Scopes resolved"
        );

        let scopes = Arc::new(ArcSwap::from_pointee(table));
        let state = AppState {
            scopes: scopes.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, scopes })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GateConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(check_handler))
            .route("/", any(check_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(GlobalConcurrencyLimitLayer::new(
                        config.listener.max_concurrent_requests,
                    ))
                    .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Configurations received on `config_updates` replace the served scopes;
    /// listener and limit settings stay as they were at startup.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<GateConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let scopes = self.scopes.clone();
        tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                match apply_update(&scopes, &config) {
                    Ok(()) => tracing::info!(
                        locations = scopes.load().location_count(),
                        "Scopes reloaded"
                    ),
                    Err(e) => tracing::error!(
                        error = %e,
                        "Failed to resolve reloaded scopes, keeping current ones"
                    ),
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Router with all layers, for serving without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Handle to the currently served scopes.
    pub fn scopes(&self) -> Arc<ArcSwap<ScopeTable>> {
        self.scopes.clone()
    }
}

/// Resolve `config` and publish it as the served scope table.
pub fn apply_update(scopes: &ArcSwap<ScopeTable>, config: &GateConfig) -> Result<(), ConfigError> {
    let table = ScopeTable::from_config(&config.server)?;
    scopes.store(Arc::new(table));
    Ok(())
}

/// Read and drop the request body one frame at a time.
async fn drain_body(mut body: Body) -> Result<(), axum::Error> {
    while let Some(frame) = body.frame().await {
        frame?;
    }
    Ok(())
}

/// Main check handler.
/// Looks up the scope, evaluates the query and drains the body.
async fn check_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let scopes = state.scopes.load_full();
    let scope = scopes.lookup(&path);

    if !scope.enabled() {
        tracing::debug!(
            request_id = %request_id,
            path = %path,
            scope = %scope.name(),
            "Check not enabled for scope"
        );
        metrics::record_request(scope.name(), StatusCode::NOT_FOUND, None, start_time);
        return StatusCode::NOT_FOUND.into_response();
    }

    let check = evaluate(&method, request.uri().query(), scope.rules());

    if check.status() != StatusCode::OK {
        tracing::debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %check.status(),
            "Check rejected"
        );
        metrics::record_request(scope.name(), check.status(), None, start_time);
        return check.into_response();
    }

    if let Err(e) = drain_body(request.into_body()).await {
        tracing::warn!(
            request_id = %request_id,
            error = %e,
            "Failed to discard request body"
        );
        metrics::record_request(scope.name(), StatusCode::BAD_REQUEST, None, start_time);
        return StatusCode::BAD_REQUEST.into_response();
    }

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        scope = %scope.name(),
        verdict = check.verdict().map(|v| v.label()).unwrap_or("none"),
        "Check answered"
    );
    metrics::record_request(scope.name(), check.status(), check.verdict(), start_time);

    check.into_response()
}
