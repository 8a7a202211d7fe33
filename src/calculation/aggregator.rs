//! Report aggregation.
//!
//! Walks every period of every rotation in source order, clamps it into the
//! reporting month, and accumulates total and valid time per assignee.

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::{debug, info};

use crate::config::HolidaySet;
use crate::error::ReportResult;
use crate::models::{
    AssignmentPeriod, People, PeriodLine, Report, TimelineResponse, duration_to_hours,
};

use super::clamp::to_instant;
use super::local_time::resolve_timezone;
use super::night_hours::valid_hours;

/// Converts every raw period of `response` into an [`AssignmentPeriod`].
///
/// Fails on the first period that cannot be attributed to exactly one person.
pub fn collect_periods(
    response: &TimelineResponse,
    tz: &Tz,
    month_start: NaiveDate,
) -> ReportResult<Vec<AssignmentPeriod>> {
    let mut periods = Vec::new();
    for rotation in &response.timeline.final_schedule.rotations {
        for (index, raw) in rotation.periods.iter().enumerate() {
            periods.push(AssignmentPeriod::from_raw(
                raw,
                &rotation.name,
                index,
                tz,
                month_start,
            )?);
        }
    }
    Ok(periods)
}

/// Computes one [`PeriodLine`] per period and the per-person totals.
pub fn accumulate(periods: &[AssignmentPeriod], holidays: &HolidaySet) -> (Vec<PeriodLine>, People) {
    let mut lines = Vec::with_capacity(periods.len());
    let mut people = People::new();

    for period in periods {
        let duration = period.duration();
        let valid = valid_hours(period.start, period.end, holidays);

        debug!(
            rotation = %period.rotation,
            assignee = %period.assignee,
            start = %period.start,
            end = %period.end,
            hours = %duration_to_hours(duration),
            valid_hours = %duration_to_hours(valid),
            "Processed period"
        );

        people
            .entry(period.assignee.clone())
            .or_default()
            .add(duration, valid);

        lines.push(PeriodLine {
            rotation: period.rotation.clone(),
            assignee: period.assignee.clone(),
            start: period.start,
            end: period.end,
            duration,
            valid,
        });
    }

    (lines, people)
}

/// Builds the report for one timeline response.
///
/// # Errors
///
/// - [`crate::error::ReportError::InvalidTimezone`] if the schedule timezone
///   is unknown; nothing is computed in that case
/// - [`crate::error::ReportError::MultipleRecipients`],
///   [`crate::error::ReportError::MissingRecipient`] or
///   [`crate::error::ReportError::InvalidPeriod`] for a period that cannot be
///   attributed; the whole run fails
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use oncall_report::calculation::build_report;
/// use oncall_report::config::HolidaySet;
/// use oncall_report::models::parse_timeline;
///
/// // Monday 2024-03-04 09:00Z to 21:00Z, one person
/// let body = br#"{
///     "schedule": {"timezone": "UTC", "name": "ops", "team": "platform"},
///     "timeline": {
///         "startTime": 1709251200000,
///         "endTime": 1711929600000,
///         "finalSchedule": {"rotations": [{
///             "name": "primary",
///             "periods": [{
///                 "startTime": 1709542800000,
///                 "endTime": 1709586000000,
///                 "flattenedRecipients": [{"displayName": "Alice"}],
///                 "recipients": [{"displayName": "Alice"}]
///             }]
///         }]}
///     }
/// }"#;
///
/// let response = parse_timeline(body, "ops").unwrap();
/// let march = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let report = build_report(&response, &HolidaySet::new(), march).unwrap();
///
/// let alice = &report.people["Alice"];
/// assert_eq!(alice.total.num_hours(), 12);
/// assert_eq!(alice.valid_night.num_hours(), 2);
/// ```
pub fn build_report(
    response: &TimelineResponse,
    holidays: &HolidaySet,
    month_start: NaiveDate,
) -> ReportResult<Report> {
    let tz = resolve_timezone(&response.schedule.timezone)?;

    info!(
        schedule = %response.schedule.name,
        team = %response.schedule.team,
        timezone = %tz.name(),
        month_start = %month_start,
        holidays = holidays.len(),
        "Building on-call report"
    );

    let periods = collect_periods(response, &tz, month_start)?;
    let (lines, people) = accumulate(&periods, holidays);

    info!(
        schedule = %response.schedule.name,
        periods = lines.len(),
        people = people.len(),
        "On-call report built"
    );

    Ok(Report {
        team: response.schedule.team.clone(),
        schedule_name: response.schedule.name.clone(),
        timezone: tz,
        month_start,
        start: to_instant(response.timeline.start_time, &tz, month_start),
        end: to_instant(response.timeline.end_time, &tz, month_start),
        periods: lines,
        people,
    })
}
