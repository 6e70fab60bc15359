//! Route Gate
//!
//! Per-request allow/redirect decision made before a page is served. This is
//! a UX redirect optimisation only: tokens are never signature-checked here,
//! and the backend API remains the sole authority on every data request.
//!
//! ```text
//! request ──► classify(path) ──► public + no session ──────────► allow
//!                    │          protected + no session ───────► 307 /login
//!                    │          auth-only + session ──┬ valid ─► 307 /dashboard
//!                    │                                └ stale ─► allow, expire cookies
//!                    └──────── anything else ─────────────────► allow
//! ```

pub mod decision;
pub mod middleware;
pub mod routes;

pub use decision::{evaluate, GateDecision};
pub use middleware::{route_gate, GateState};
pub use routes::{
    RouteClass, RouteTable, AUTH_ROUTES, DASHBOARD_PATH, LOGIN_PATH, PROTECTED_ROUTES,
    PUBLIC_ROUTES,
};
