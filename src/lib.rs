//! Driftcheck Web
//!
//! Web front for the Driftcheck LLM regression-testing service: marketing
//! pages, the login/signup/invite flow, and a dashboard over traces, test
//! runs and API keys served by an external backend API.
//!
//! # Architecture
//!
//! ```text
//! Browser ──► Route Gate ──► Pages / Dashboard API ──► Backend API
//!               │                     │
//!               ├── Token Inspector   └── ApiClient (cookies forwarded)
//!               └── Route Table
//! ```
//!
//! The gate only optimises redirects. It decodes token expiry without
//! checking signatures; the backend authorises every data request itself.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod gate;
pub mod session;

pub use api::{ApiClient, ApiConfig, ApiError};
pub use config::{Config, ConfigError};
pub use dashboard::{DashboardConfig, DashboardServer};
pub use gate::{evaluate, route_gate, GateDecision, GateState, RouteClass, RouteTable};
pub use session::{decode_claims, is_authenticated, is_expired, CookieSource, DocumentCookies};
