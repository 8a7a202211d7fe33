//! Error types for the on-call report.
//!
//! Every failure is a [`ReportError`]. Variants carry enough context (schedule,
//! rotation, period index) to diagnose the problem, and [`ReportError::kind`]
//! lets callers tell permanent data problems apart from retryable fetch failures.

use thiserror::Error;

/// The main error type for the on-call report.
///
/// # Example
///
/// ```
/// use oncall_report::error::{ErrorKind, ReportError};
///
/// let error = ReportError::InvalidTimezone {
///     timezone: "Mars/Olympus".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid timezone: Mars/Olympus");
/// assert_eq!(error.kind(), ErrorKind::Configuration);
/// ```
#[derive(Debug, Error)]
pub enum ReportError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The schedule timezone is not a known IANA identifier.
    #[error("Invalid timezone: {timezone}")]
    InvalidTimezone {
        /// The identifier as received.
        timezone: String,
    },

    /// A reference date could not be parsed as `YYYY-MM-DD`.
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected value.
        value: String,
    },

    /// A period was attributed to more than one recipient at once.
    #[error(
        "Period {period_index} of rotation '{rotation}' has {count} recipients; only single-recipient periods are supported"
    )]
    MultipleRecipients {
        /// The rotation holding the period.
        rotation: String,
        /// Zero-based index of the period within its rotation.
        period_index: usize,
        /// Number of flattened recipients found.
        count: usize,
    },

    /// A period carried no recipient at all.
    #[error("Period {period_index} of rotation '{rotation}' has no recipient")]
    MissingRecipient {
        /// The rotation holding the period.
        rotation: String,
        /// Zero-based index of the period within its rotation.
        period_index: usize,
    },

    /// A period's bounds are inconsistent.
    #[error("Invalid period {period_index} of rotation '{rotation}': {message}")]
    InvalidPeriod {
        /// The rotation holding the period.
        rotation: String,
        /// Zero-based index of the period within its rotation.
        period_index: usize,
        /// A description of the problem.
        message: String,
    },

    /// The upstream timeline response could not be decoded.
    #[error("Malformed timeline response for schedule '{schedule}': {message}")]
    MalformedResponse {
        /// The schedule that was queried.
        schedule: String,
        /// A description of the decode failure.
        message: String,
    },

    /// The timeline could not be fetched.
    #[error("Failed to fetch timeline for schedule '{schedule}': {message}")]
    Transport {
        /// The schedule that was queried.
        schedule: String,
        /// A description of the transport failure.
        message: String,
    },
}

/// Broad classification of a [`ReportError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad configuration: config file, timezone, reference date.
    Configuration,
    /// The schedule contains a period the report cannot attribute.
    DataShape,
    /// The upstream payload could not be decoded.
    Input,
    /// The upstream service could not be reached.
    Transport,
}

impl ReportError {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::ConfigNotFound { .. }
            | ReportError::ConfigParseError { .. }
            | ReportError::InvalidTimezone { .. }
            | ReportError::InvalidDate { .. } => ErrorKind::Configuration,
            ReportError::MultipleRecipients { .. }
            | ReportError::MissingRecipient { .. }
            | ReportError::InvalidPeriod { .. } => ErrorKind::DataShape,
            ReportError::MalformedResponse { .. } => ErrorKind::Input,
            ReportError::Transport { .. } => ErrorKind::Transport,
        }
    }

    /// Whether retrying the same run could succeed.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}

/// A type alias for Results that return ReportError.
pub type ReportResult<T> = Result<T, ReportError>;
