//! Timeline source: fetches a schedule's monthly timeline over HTTP.
//!
//! The client performs exactly one request per call. Failures to reach the
//! service surface as [`ReportError::Transport`] and are left to the caller
//! to retry; bodies that do not decode surface as
//! [`ReportError::MalformedResponse`].

use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::ReportConfig;
use crate::error::{ReportError, ReportResult};
use crate::models::{TimelineResponse, parse_timeline};

/// Path of the timeline endpoint, relative to the service base URL.
pub const TIMELINE_PATH: &str = "/v1/json/schedule/timeline";

/// HTTP client for the schedule timeline endpoint.
#[derive(Debug, Clone)]
pub struct TimelineClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TimelineClient {
    /// Creates a client from a report configuration.
    pub fn new(config: &ReportConfig) -> ReportResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ReportError::Transport {
                schedule: config.schedule_name.clone(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// The query parameters for one month of `schedule` starting at `month_start`.
    pub fn query(&self, schedule: &str, month_start: NaiveDate) -> Vec<(&'static str, String)> {
        vec![
            ("apiKey", self.api_key.clone()),
            ("name", schedule.to_string()),
            ("intervalUnit", "months".to_string()),
            ("date", format!("{} 00:00", month_start.format("%Y-%m-%d"))),
        ]
    }

    /// Fetches and decodes the timeline of `schedule` for the month starting
    /// at `month_start`.
    pub async fn fetch(
        &self,
        schedule: &str,
        month_start: NaiveDate,
    ) -> ReportResult<TimelineResponse> {
        let url = format!("{}{}", self.base_url, TIMELINE_PATH);
        info!(schedule, month_start = %month_start, url = %url, "Fetching timeline");

        let transport = |message: String| ReportError::Transport {
            schedule: schedule.to_string(),
            message,
        };

        let response = self
            .http
            .get(&url)
            .query(&self.query(schedule, month_start))
            .send()
            .await
            .map_err(|e| transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(transport(format!(
                "Timeline request failed ({}): {}",
                status,
                String::from_utf8_lossy(&body).trim()
            )));
        }

        debug!(schedule, bytes = body.len(), "Timeline received");
        parse_timeline(&body, schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ReportConfig {
        let mut config =
            ReportConfig::from_args("secret", "ops_schedule", "2024-03-01", None).unwrap();
        config.api_url = "https://timeline.example.com/".to_string();
        config
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = TimelineClient::new(&config()).unwrap();
        assert_eq!(client.base_url, "https://timeline.example.com");
    }

    #[test]
    fn test_query_parameters() {
        let client = TimelineClient::new(&config()).unwrap();
        let month = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let query = client.query("ops_schedule", month);

        assert!(query.contains(&("apiKey", "secret".to_string())));
        assert!(query.contains(&("name", "ops_schedule".to_string())));
        assert!(query.contains(&("intervalUnit", "months".to_string())));
        assert!(query.contains(&("date", "2024-03-01 00:00".to_string())));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let mut config = config();
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        config.api_url = "http://127.0.0.1:9".to_string();
        config.timeout_secs = 2;
        let client = TimelineClient::new(&config).unwrap();

        let month = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let result = client.fetch("ops_schedule", month).await;

        match result {
            Err(err @ ReportError::Transport { .. }) => assert!(err.is_retryable()),
            other => panic!("Expected Transport error, got {:?}", other),
        }
    }
}
