//! Web Server
//!
//! Axum server with embedded pages, the route gate, CORS, and graceful
//! shutdown.

use crate::api::{ApiError, ErrorResponse};
use crate::config::Config;
use crate::dashboard::api::{api_router, AppState};
use crate::gate::{route_gate, GateState, RouteTable};
use axum::{
    body::Body,
    extract::Request,
    http::{header, Method, StatusCode},
    middleware,
    response::{IntoResponse, Json, Response},
    Router,
};
use rust_embed::Embed;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Embedded page shells and assets
#[derive(Embed)]
#[folder = "src/dashboard/static/"]
struct StaticAssets;

/// Web server
pub struct DashboardServer {
    config: Config,
    state: Arc<AppState>,
    gate: Arc<GateState>,
}

impl DashboardServer {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let state = Arc::new(AppState::new(&config.api, config.dashboard.secure_cookies)?);
        let gate = Arc::new(GateState::new(
            RouteTable::default(),
            config.dashboard.secure_cookies,
        ));

        Ok(Self {
            config,
            state,
            gate,
        })
    }

    /// Replace the route table (defaults to the built-in one)
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.gate = Arc::new(GateState::new(routes, self.config.dashboard.secure_cookies));
        self
    }

    /// Build the router with all routes and middleware
    pub fn router(&self) -> Router {
        let dashboard = &self.config.dashboard;

        let mut router = api_router(self.state.clone())
            .fallback(page_handler)
            .layer(middleware::from_fn_with_state(self.gate.clone(), route_gate));

        if dashboard.cors_enabled {
            let cors = CorsLayer::new()
                .allow_origin(
                    dashboard
                        .cors_origins
                        .iter()
                        .filter_map(|o| o.parse().ok())
                        .collect::<Vec<_>>(),
                )
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true);
            router = router.layer(cors);
        }

        if dashboard.log_requests {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Start the server and run until shutdown signal
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.config.dashboard.socket_addr();
        let router = self.router();

        info!("Starting web server on {}", addr);
        info!("Backend API at {}", self.state.api.base_url());

        if !self.config.dashboard.is_localhost() && !self.config.dashboard.secure_cookies {
            warn!("Serving on {} with non-secure cookies", addr);
        }

        let listener = tokio::net::TcpListener::bind(addr).await?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Web server shut down gracefully");
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Prefix of the JSON data routes; never answered with a page
const DATA_API_PREFIX: &str = "/dashboard/api";

/// Page file for a request path: exact asset first, then the page named by
/// the first path segment (`/dashboard/runs/7` serves `dashboard.html`).
fn resolve_page(path: &str) -> Option<String> {
    if is_data_api(path) {
        return None;
    }

    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Some("index.html".to_string());
    }

    if StaticAssets::get(trimmed).is_some() {
        return Some(trimmed.to_string());
    }

    let first = trimmed.split('/').next()?;
    let page = format!("{}.html", first);
    StaticAssets::get(&page).map(|_| page)
}

fn is_data_api(path: &str) -> bool {
    path == DATA_API_PREFIX || path.starts_with("/dashboard/api/")
}

/// Serve pages and assets from the embedded folder
async fn page_handler(req: Request) -> Response {
    let path = req.uri().path();

    if path.contains("..") {
        return StatusCode::BAD_REQUEST.into_response();
    }

    if is_data_api(path) {
        let body = Json(ErrorResponse {
            error: "Not Found".to_string(),
            message: format!("No data route at {}", path),
        });
        return (StatusCode::NOT_FOUND, body).into_response();
    }

    let Some(name) = resolve_page(path) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let Some(content) = StaticAssets::get(&name) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let mime = mime_guess::from_path(&name).first_or_octet_stream().to_string();
    let cache = if name.ends_with(".html") {
        "no-cache"
    } else {
        "public, max-age=3600"
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime)
        .header(header::CACHE_CONTROL, cache)
        .body(Body::from(content.data.into_owned()))
        .unwrap_or_else(|e| {
            error!("Failed to build page response: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
