//! Web layer for the schedule proxy.
//!
//! Provides the three JSON endpoints (schedule search, station suggest,
//! train detail) plus a health check.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
