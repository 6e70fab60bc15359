//! Web Front
//!
//! Serves the marketing pages, the auth pages and the dashboard shell, all
//! behind the route gate, plus the JSON routes the dashboard loads its data
//! from.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                   Web Server                     │
//! ├──────────────────────────────────────────────────┤
//! │  route gate (every request)                      │
//! │  GET  /, /docs, /terms, ...   → embedded pages   │
//! │  GET  /health /healthz /readyz → probes          │
//! │  GET  /session                 → session probe   │
//! │  POST /logout                  → end session     │
//! │  *    /dashboard/api/*         → backend relay   │
//! └──────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod server;

pub use api::{api_router, data_router, health_router, session_router, AppState};
pub use config::DashboardConfig;
pub use server::DashboardServer;
