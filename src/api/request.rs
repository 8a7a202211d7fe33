//! Request types for the on-call report API.
//!
//! This module defines the JSON request structure for the `/report` endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::HolidaySet;
use crate::models::TimelineResponse;

/// Request body for the `/report` endpoint.
///
/// Carries an already-fetched timeline response together with the month it
/// was queried for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// First day of the reported month.
    pub month_start: NaiveDate,
    /// Holiday days-of-month; the server's configured set when omitted.
    #[serde(default)]
    pub holidays: Option<HolidaySet>,
    /// The timeline response as returned by the schedule service.
    pub timeline: TimelineResponse,
}
