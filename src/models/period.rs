//! Single-assignee assignment periods.

use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;

use crate::calculation::to_instant;
use crate::error::{ReportError, ReportResult};

use super::timeline::Period;

/// A contiguous interval owned by exactly one person.
///
/// Built from a raw [`Period`] by clamping both bounds into the reporting
/// month and checking that exactly one recipient is attributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentPeriod {
    /// The rotation the period belongs to.
    pub rotation: String,
    /// The person on call.
    pub assignee: String,
    /// Clamped start.
    pub start: DateTime<Tz>,
    /// Clamped end; never before `start`.
    pub end: DateTime<Tz>,
}

impl AssignmentPeriod {
    /// Converts a raw period, clamping its bounds to the month starting at
    /// `month_start`.
    ///
    /// # Errors
    ///
    /// - [`ReportError::MultipleRecipients`] if more than one flattened
    ///   recipient is on call at once
    /// - [`ReportError::MissingRecipient`] if nobody is
    /// - [`ReportError::InvalidPeriod`] if the raw start is after the raw end
    pub fn from_raw(
        raw: &Period,
        rotation: &str,
        period_index: usize,
        tz: &Tz,
        month_start: NaiveDate,
    ) -> ReportResult<Self> {
        if raw.flattened_recipients.len() > 1 {
            return Err(ReportError::MultipleRecipients {
                rotation: rotation.to_string(),
                period_index,
                count: raw.flattened_recipients.len(),
            });
        }

        let assignee = raw
            .recipients
            .first()
            .or_else(|| raw.flattened_recipients.first())
            .map(|r| r.label())
            .filter(|label| !label.is_empty())
            .ok_or_else(|| ReportError::MissingRecipient {
                rotation: rotation.to_string(),
                period_index,
            })?;

        if raw.start_time > raw.end_time {
            return Err(ReportError::InvalidPeriod {
                rotation: rotation.to_string(),
                period_index,
                message: format!(
                    "start {} is after end {}",
                    raw.start_time, raw.end_time
                ),
            });
        }

        Ok(Self {
            rotation: rotation.to_string(),
            assignee: assignee.to_string(),
            start: to_instant(raw.start_time, tz, month_start),
            end: to_instant(raw.end_time, tz, month_start),
        })
    }

    /// Total length of the period.
    pub fn duration(&self) -> Duration {
        self.end.signed_duration_since(self.start)
    }
}
