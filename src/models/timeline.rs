//! Wire model of the upstream schedule timeline response.
//!
//! Field names follow the service's camelCase JSON. Only `schedule.timezone`,
//! the timeline bounds, and each period's bounds and recipients feed the
//! report; the rest is carried for display and diagnostics.

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};

/// Top-level timeline response.
///
/// # Example
///
/// ```
/// use oncall_report::models::parse_timeline;
///
/// let body = br#"{
///     "schedule": {"timezone": "UTC", "name": "ops", "team": "platform"},
///     "timeline": {
///         "startTime": 0,
///         "endTime": 3600000,
///         "finalSchedule": {"rotations": []}
///     }
/// }"#;
/// let response = parse_timeline(body, "ops").unwrap();
/// assert_eq!(response.schedule.team, "platform");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResponse {
    /// Schedule metadata.
    pub schedule: Schedule,
    /// Server-side processing time, in milliseconds.
    #[serde(default)]
    pub took: i64,
    /// The timeline itself.
    pub timeline: Timeline,
}

/// Schedule metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// IANA timezone identifier of the schedule.
    pub timezone: String,
    /// Schedule name.
    pub name: String,
    /// Schedule identifier.
    #[serde(default)]
    pub id: String,
    /// Owning team.
    #[serde(default)]
    pub team: String,
    /// Whether the schedule is enabled.
    #[serde(default)]
    pub enabled: bool,
}

/// The queried timeline window and its rotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    /// Window start, epoch milliseconds.
    pub start_time: i64,
    /// Window end, epoch milliseconds.
    pub end_time: i64,
    /// The resolved schedule after overrides.
    pub final_schedule: FinalSchedule,
}

/// The resolved schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalSchedule {
    /// Rotations, each with its periods.
    #[serde(default)]
    pub rotations: Vec<Rotation>,
}

/// One rotation of the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rotation {
    /// Rotation name.
    pub name: String,
    /// Rotation identifier.
    #[serde(default)]
    pub id: String,
    /// Display order.
    #[serde(default)]
    pub order: f64,
    /// Assignment periods in source order.
    #[serde(default)]
    pub periods: Vec<Period>,
}

/// One raw assignment period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    /// Period start, epoch milliseconds.
    pub start_time: i64,
    /// Period end, epoch milliseconds.
    pub end_time: i64,
    /// Period type as reported by the service (e.g. "default", "override").
    #[serde(rename = "type", default)]
    pub period_type: String,
    /// Recipients with teams and escalations expanded to individuals.
    #[serde(default)]
    pub flattened_recipients: Vec<Recipient>,
    /// Recipients as configured.
    #[serde(default)]
    pub recipients: Vec<Recipient>,
}

/// A period recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    /// Human-readable name.
    #[serde(default)]
    pub display_name: String,
    /// Login name.
    #[serde(default)]
    pub name: String,
    /// Recipient identifier.
    #[serde(default)]
    pub id: String,
    /// Recipient type (e.g. "user").
    #[serde(rename = "type", default)]
    pub recipient_type: String,
}

impl Recipient {
    /// The identity a report attributes time to: the display name, falling
    /// back to the login name and then the id.
    pub fn label(&self) -> &str {
        [&self.display_name, &self.name, &self.id]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Decodes a timeline response body.
///
/// Any decode failure, including missing required fields, is a
/// [`ReportError::MalformedResponse`] for `schedule`.
pub fn parse_timeline(body: &[u8], schedule: &str) -> ReportResult<TimelineResponse> {
    serde_json::from_slice(body).map_err(|e| ReportError::MalformedResponse {
        schedule: schedule.to_string(),
        message: e.to_string(),
    })
}
