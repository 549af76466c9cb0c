//! HTTP API module for the Compensation Engine.
//!
//! This module provides the REST endpoints for both calculators, a health
//! check, and a proxy that forwards severance requests to an upstream
//! calculation service.

mod handlers;
mod proxy;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use proxy::{ProxyError, SEVERANCE_PATH, UPSTREAM_TIMEOUT, UpstreamProxy};
pub use request::{DATE_FORMAT, IncapacityRequest, SeveranceRequest, parse_date};
pub use response::{ApiError, ApiErrorResponse, HealthResponse};
pub use state::AppState;
