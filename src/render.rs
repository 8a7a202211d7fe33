//! Report rendering for the console.
//!
//! [`render_text`] produces the classic plain-text report: schedule header,
//! one line per period, then per-person on-call and valid night totals.
//! [`render_json`] emits the [`ReportSummary`](crate::models::ReportSummary).

use chrono::{DateTime, Duration};
use chrono_tz::Tz;

use crate::models::{Report, duration_to_hours};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z %Z";

fn timestamp(instant: &DateTime<Tz>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

fn hours(duration: Duration) -> String {
    format!("{:.2}", duration_to_hours(duration))
}

/// Renders the report as plain text.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, TimeZone};
/// use chrono_tz::Tz;
/// use oncall_report::models::{People, Report};
/// use oncall_report::render::render_text;
///
/// let tz = Tz::UTC;
/// let report = Report {
///     team: "ops".to_string(),
///     schedule_name: "ops_schedule".to_string(),
///     timezone: tz,
///     month_start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     start: tz.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
///     end: tz.with_ymd_and_hms(2024, 3, 31, 23, 0, 0).unwrap(),
///     periods: vec![],
///     people: People::new(),
/// };
///
/// let text = render_text(&report);
/// assert!(text.starts_with("Team: ops\nSchedule: ops_schedule\n"));
/// ```
pub fn render_text(report: &Report) -> String {
    let mut lines = vec![
        format!("Team: {}", report.team),
        format!("Schedule: {}", report.schedule_name),
        format!("Start time: {}", timestamp(&report.start)),
        format!("End time: {}", timestamp(&report.end)),
        String::new(),
        "====== schedule ======".to_string(),
    ];

    lines.extend(report.periods.iter().map(|line| {
        format!(
            "{} : Start: {} End: {} Duration: {} ValidHours: {}",
            line.assignee,
            timestamp(&line.start),
            timestamp(&line.end),
            hours(line.duration),
            hours(line.valid),
        )
    }));

    lines.push(String::new());
    lines.push("====== on call time ======".to_string());
    lines.extend(
        report
            .people
            .iter()
            .map(|(assignee, acc)| format!("{}: {}", assignee, hours(acc.total))),
    );

    lines.push(String::new());
    lines.push("====== valid on call time 19h - 07h ======".to_string());
    lines.extend(
        report
            .people
            .iter()
            .map(|(assignee, acc)| format!("{}: {}", assignee, hours(acc.valid_night))),
    );

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Renders the report summary as pretty-printed JSON.
pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&report.summary())
}
