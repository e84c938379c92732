//! HTTP API module for the pension engine.
//!
//! This module provides the REST API endpoints for generating payment
//! schedules and calculating State Pension age.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PaymentsRequest, SpaRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
