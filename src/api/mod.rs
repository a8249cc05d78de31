//! HTTP API module for the take-home pay engine.
//!
//! This module provides the REST API endpoints for calculating take-home
//! pay and comparing it across countries.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, ComparisonRequest};
pub use response::{ApiError, CalculationResponse, ComparisonResponse, CountrySummary};
pub use state::AppState;
