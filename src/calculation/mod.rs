//! Calculation logic for the on-call report.
//!
//! This module contains the workday calendar, the night-hours overlap
//! calculator, the instant clamper that keeps period bounds inside the
//! reporting month, and the aggregator that turns a timeline into a report.

mod aggregator;
mod clamp;
mod local_time;
mod night_hours;
mod workday;

pub use aggregator::{accumulate, build_report, collect_periods};
pub use clamp::{CLAMP_TICK_NANOS, month_end_bound, to_instant};
pub use local_time::{local_datetime, resolve_timezone};
pub use night_hours::{
    NIGHT_END_HOUR, NIGHT_START_HOUR, NON_WORKDAY_HOURS, WORKDAY_NIGHT_HOURS, valid_hours,
};
pub use workday::is_workday;
