//! Report models: per-person accumulators and the finished report.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Converts a duration to decimal hours, exact to the millisecond.
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use oncall_report::models::duration_to_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(duration_to_hours(Duration::minutes(90)), Decimal::new(15, 1));
/// ```
pub fn duration_to_hours(duration: Duration) -> Decimal {
    (Decimal::from(duration.num_milliseconds()) / Decimal::from(MILLIS_PER_HOUR)).normalize()
}

/// Running totals for one person.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonAccumulator {
    /// Total assigned time.
    pub total: Duration,
    /// Assigned time inside the night window, or on non-workdays.
    pub valid_night: Duration,
}

impl Default for PersonAccumulator {
    fn default() -> Self {
        Self {
            total: Duration::zero(),
            valid_night: Duration::zero(),
        }
    }
}

impl PersonAccumulator {
    /// Adds one period's total and valid time.
    pub fn add(&mut self, total: Duration, valid_night: Duration) {
        self.total = self.total + total;
        self.valid_night = self.valid_night + valid_night;
    }

    /// Total assigned time in decimal hours.
    pub fn total_hours(&self) -> Decimal {
        duration_to_hours(self.total)
    }

    /// Valid night time in decimal hours.
    pub fn valid_hours(&self) -> Decimal {
        duration_to_hours(self.valid_night)
    }
}

/// Accumulators keyed by assignee.
pub type People = BTreeMap<String, PersonAccumulator>;

/// One processed period as it appears in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodLine {
    /// Rotation name.
    pub rotation: String,
    /// Person on call.
    pub assignee: String,
    /// Clamped start.
    pub start: DateTime<Tz>,
    /// Clamped end.
    pub end: DateTime<Tz>,
    /// `end - start`.
    pub duration: Duration,
    /// Night-window share of `duration`.
    pub valid: Duration,
}

/// The finished report for one schedule and month.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Owning team.
    pub team: String,
    /// Schedule name.
    pub schedule_name: String,
    /// Schedule timezone.
    pub timezone: Tz,
    /// First day of the reported month.
    pub month_start: NaiveDate,
    /// Clamped timeline start.
    pub start: DateTime<Tz>,
    /// Clamped timeline end.
    pub end: DateTime<Tz>,
    /// Processed periods in source order.
    pub periods: Vec<PeriodLine>,
    /// Per-person totals.
    pub people: People,
}

impl Report {
    /// Builds the serializable summary of this report.
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            team: self.team.clone(),
            schedule: self.schedule_name.clone(),
            timezone: self.timezone.name().to_string(),
            month_start: self.month_start,
            start: self.start.to_rfc3339(),
            end: self.end.to_rfc3339(),
            periods: self
                .periods
                .iter()
                .map(|line| PeriodSummary {
                    rotation: line.rotation.clone(),
                    assignee: line.assignee.clone(),
                    start: line.start.to_rfc3339(),
                    end: line.end.to_rfc3339(),
                    hours: duration_to_hours(line.duration).round_dp(2),
                    valid_hours: duration_to_hours(line.valid).round_dp(2),
                })
                .collect(),
            people: self
                .people
                .iter()
                .map(|(assignee, acc)| PersonSummary {
                    assignee: assignee.clone(),
                    total_hours: acc.total_hours().round_dp(2),
                    valid_hours: acc.valid_hours().round_dp(2),
                })
                .collect(),
        }
    }
}

/// Serializable view of a [`Report`], with hours rounded to two places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Owning team.
    pub team: String,
    /// Schedule name.
    pub schedule: String,
    /// IANA timezone name.
    pub timezone: String,
    /// First day of the reported month.
    pub month_start: NaiveDate,
    /// Clamped timeline start, RFC 3339.
    pub start: String,
    /// Clamped timeline end, RFC 3339.
    pub end: String,
    /// Processed periods in source order.
    pub periods: Vec<PeriodSummary>,
    /// Per-person totals, sorted by assignee.
    pub people: Vec<PersonSummary>,
}

/// Serializable view of a [`PeriodLine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Rotation name.
    pub rotation: String,
    /// Person on call.
    pub assignee: String,
    /// Start, RFC 3339.
    pub start: String,
    /// End, RFC 3339.
    pub end: String,
    /// Duration in hours.
    pub hours: Decimal,
    /// Valid night hours.
    pub valid_hours: Decimal,
}

/// Serializable per-person totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSummary {
    /// Person on call.
    pub assignee: String,
    /// Total on-call hours.
    pub total_hours: Decimal,
    /// Valid night hours.
    pub valid_hours: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_duration_to_hours_exact() {
        assert_eq!(duration_to_hours(Duration::hours(12)), dec("12"));
        assert_eq!(duration_to_hours(Duration::minutes(45)), dec("0.75"));
        assert_eq!(duration_to_hours(Duration::zero()), dec("0"));
    }

    #[test]
    fn test_accumulator_starts_at_zero() {
        let acc = PersonAccumulator::default();
        assert_eq!(acc.total, Duration::zero());
        assert_eq!(acc.valid_night, Duration::zero());
    }

    #[test]
    fn test_accumulator_adds() {
        let mut acc = PersonAccumulator::default();
        acc.add(Duration::hours(12), Duration::hours(2));
        acc.add(Duration::hours(24), Duration::hours(12));
        assert_eq!(acc.total_hours(), dec("36"));
        assert_eq!(acc.valid_hours(), dec("14"));
    }

    #[test]
    fn test_summary_rounds_and_sorts() {
        let tz = Tz::UTC;
        let start = tz.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = tz.with_ymd_and_hms(2024, 3, 1, 1, 0, 0).unwrap();

        let mut people = People::new();
        people
            .entry("Zed".to_string())
            .or_default()
            .add(Duration::minutes(20), Duration::minutes(20));
        people
            .entry("Amy".to_string())
            .or_default()
            .add(Duration::minutes(40), Duration::zero());

        let report = Report {
            team: "ops".to_string(),
            schedule_name: "ops_schedule".to_string(),
            timezone: tz,
            month_start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            start,
            end,
            periods: vec![],
            people,
        };

        let summary = report.summary();
        assert_eq!(summary.timezone, "UTC");
        assert_eq!(summary.people[0].assignee, "Amy");
        assert_eq!(summary.people[0].total_hours, dec("0.67"));
        assert_eq!(summary.people[1].valid_hours, dec("0.33"));
        assert_eq!(summary.start, "2024-03-01T00:00:00+00:00");
    }
}
