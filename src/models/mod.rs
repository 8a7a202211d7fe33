//! Core data models for the on-call report.
//!
//! This module contains the upstream timeline wire model, single-assignee
//! periods, and the report types.

mod period;
mod report;
mod timeline;

pub use period::AssignmentPeriod;
pub use report::{
    People, PeriodLine, PeriodSummary, PersonAccumulator, PersonSummary, Report, ReportSummary,
    duration_to_hours,
};
pub use timeline::{
    FinalSchedule, Period, Recipient, Rotation, Schedule, Timeline, TimelineResponse,
    parse_timeline,
};
