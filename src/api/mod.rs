//! HTTP API module for the on-call report.
//!
//! This module exposes `POST /report`, which builds a report from a timeline
//! response posted by the caller.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ReportRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
