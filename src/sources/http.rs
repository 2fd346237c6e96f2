// ABOUTME: HTTP activity source speaking the Strava-style REST API shape
// ABOUTME: Paginated run listing plus per-activity stream fetch with 429 backoff
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! HTTP-backed activity source
//!
//! Speaks the `athlete/activities` + `activities/{id}/streams` surface of a
//! Strava-compatible API. Listing walks pages until a short page signals the
//! end; non-run activities are dropped at the wire boundary. Every request
//! retries on 429 with exponential backoff and carries a per-request timeout.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use runscore_core::{RawStreams, RunSummary};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{ActivitySource, SourceError};

/// Activity type string the API uses for runs
const RUN_ACTIVITY_TYPE: &str = "Run";

/// Retry behavior for throttled requests
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Initial backoff delay in milliseconds; doubles per attempt
    pub initial_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 1000,
        }
    }
}

impl RetryConfig {
    /// Backoff before retry `attempt` (1-based), exponential in the attempt
    #[must_use]
    pub const fn backoff_ms(&self, attempt: u32) -> u64 {
        self.initial_backoff_ms * 2_u64.pow(attempt.saturating_sub(1))
    }
}

/// Connection settings for an [`HttpSource`]
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Base URL of the activity API, without a trailing slash
    pub api_base_url: String,
    /// Ready-to-use bearer token; token exchange happens outside this crate
    pub access_token: String,
    /// Page size for activity listing
    pub per_page: usize,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Retry behavior on 429 responses
    pub retry: RetryConfig,
}

impl HttpSourceConfig {
    /// Settings for the public Strava API with the given bearer token
    #[must_use]
    pub fn strava(access_token: impl Into<String>) -> Self {
        Self {
            api_base_url: "https://www.strava.com/api/v3".into(),
            access_token: access_token.into(),
            per_page: 50,
            request_timeout_secs: 30,
            retry: RetryConfig::default(),
        }
    }
}

/// Activity row as the listing endpoint returns it
#[derive(Debug, Deserialize)]
struct ActivityRow {
    id: u64,
    name: String,
    #[serde(rename = "type")]
    activity_type: String,
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    moving_time: u64,
    #[serde(default)]
    total_elevation_gain: f64,
    start_date: DateTime<Utc>,
    average_watts: Option<f64>,
    average_heartrate: Option<f64>,
    start_latlng: Option<Vec<f64>>,
}

impl ActivityRow {
    fn into_summary(self) -> RunSummary {
        let start_latlng = match self.start_latlng.as_deref() {
            Some([lat, lng, ..]) => Some((*lat, *lng)),
            _ => None,
        };
        RunSummary {
            id: self.id.to_string(),
            name: self.name,
            start_date: self.start_date,
            distance_meters: self.distance,
            moving_time_seconds: self.moving_time,
            elevation_gain_meters: self.total_elevation_gain,
            average_power: self.average_watts,
            average_heart_rate: self.average_heartrate,
            start_latlng,
        }
    }
}

/// One stream as returned with `key_by_type=true`
#[derive(Debug, Deserialize)]
struct StreamPayload {
    #[serde(default)]
    data: Vec<f64>,
}

/// Stream set for one activity; absent keys mean the device never recorded them
#[derive(Debug, Deserialize)]
struct StreamSet {
    watts: Option<StreamPayload>,
    heartrate: Option<StreamPayload>,
}

/// Activity source backed by a Strava-shaped REST API
pub struct HttpSource {
    config: HttpSourceConfig,
    client: Client,
}

impl HttpSource {
    /// Source against the public Strava API with the given bearer token
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_config(HttpSourceConfig::strava(access_token))
    }

    /// Source with custom connection settings
    #[must_use]
    pub fn with_config(config: HttpSourceConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Authenticated GET with 429 retry and exponential backoff
    async fn get_with_retry<T>(&self, url: &str) -> Result<T, SourceError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut attempt = 0;
        loop {
            let response = self
                .client
                .get(url)
                .header(
                    "Authorization",
                    format!("Bearer {}", self.config.access_token),
                )
                .timeout(Duration::from_secs(self.config.request_timeout_secs))
                .send()
                .await?;

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                attempt += 1;
                let max_retries = self.config.retry.max_retries;
                if attempt >= max_retries {
                    warn!("activity API rate limit exceeded - max retries ({max_retries}) reached");
                    return Err(SourceError::RateLimited {
                        retries: max_retries,
                    });
                }

                let backoff_ms = self.config.retry.backoff_ms(attempt);
                warn!(
                    "activity API rate limit hit (429) - retry {attempt}/{max_retries} after {backoff_ms}ms backoff"
                );
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                continue;
            }

            if status == StatusCode::NOT_FOUND {
                return Err(SourceError::NotFound {
                    id: url.rsplit('/').next().unwrap_or_default().to_owned(),
                });
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(SourceError::Api {
                    status: status.as_u16(),
                    body,
                });
            }

            return Ok(response.json().await?);
        }
    }
}

#[async_trait]
impl ActivitySource for HttpSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn list_runs(
        &self,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<RunSummary>, SourceError> {
        let per_page = self.config.per_page.max(1);
        let mut runs = Vec::new();
        let mut page = 1_usize;
        loop {
            let mut url = format!(
                "{}/athlete/activities?per_page={per_page}&page={page}",
                self.config.api_base_url
            );
            if let Some(after) = after {
                url.push_str(&format!("&after={}", after.timestamp()));
            }

            let rows: Vec<ActivityRow> = self.get_with_retry(&url).await?;
            let page_len = rows.len();
            runs.extend(
                rows.into_iter()
                    .filter(|row| row.activity_type == RUN_ACTIVITY_TYPE)
                    .map(ActivityRow::into_summary),
            );

            // A short page is the last page.
            if page_len < per_page {
                break;
            }
            page += 1;
        }

        runs.sort_by_key(|run| run.start_date);
        debug!(runs = runs.len(), "activity listing complete");
        Ok(runs)
    }

    async fn fetch_streams(&self, id: &str) -> Result<RawStreams, SourceError> {
        let url = format!(
            "{}/activities/{id}/streams?keys=watts,heartrate&key_by_type=true",
            self.config.api_base_url
        );
        let set: StreamSet = self.get_with_retry(&url).await?;
        Ok(RawStreams::new(
            set.watts.map_or_else(Vec::new, |s| s.data),
            set.heartrate.map_or_else(Vec::new, |s| s.data),
        ))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn backoff_doubles_per_attempt() {
        let retry = RetryConfig {
            max_retries: 5,
            initial_backoff_ms: 100,
        };
        assert_eq!(retry.backoff_ms(1), 100);
        assert_eq!(retry.backoff_ms(2), 200);
        assert_eq!(retry.backoff_ms(3), 400);
        assert_eq!(retry.backoff_ms(4), 800);
    }

    #[test]
    fn activity_row_maps_to_summary() {
        let json = r#"{
            "id": 987654321,
            "name": "Morning Run",
            "type": "Run",
            "distance": 10234.5,
            "moving_time": 2861,
            "total_elevation_gain": 87.0,
            "start_date": "2024-06-02T06:31:00Z",
            "average_watts": 243.1,
            "average_heartrate": 158.2,
            "start_latlng": [45.5017, -73.5673]
        }"#;
        let row: ActivityRow = serde_json::from_str(json).unwrap();
        let summary = row.into_summary();
        assert_eq!(summary.id, "987654321");
        assert_eq!(summary.moving_time_seconds, 2861);
        assert_eq!(summary.start_latlng, Some((45.5017, -73.5673)));
        assert_eq!(summary.average_power, Some(243.1));
    }

    #[test]
    fn activity_row_tolerates_sparse_fields() {
        // Trainer activities often lack coordinates and summary averages.
        let json = r#"{
            "id": 1,
            "name": "Treadmill",
            "type": "Run",
            "start_date": "2024-06-02T06:31:00Z",
            "average_watts": null,
            "average_heartrate": null,
            "start_latlng": null
        }"#;
        let row: ActivityRow = serde_json::from_str(json).unwrap();
        let summary = row.into_summary();
        assert!(summary.average_power.is_none());
        assert!(summary.start_latlng.is_none());
        assert!((summary.distance_meters - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stream_set_tolerates_missing_keys() {
        let set: StreamSet = serde_json::from_str(r#"{"watts": {"data": [200.0, 210.0]}}"#).unwrap();
        assert_eq!(set.watts.map(|s| s.data.len()), Some(2));
        assert!(set.heartrate.is_none());
    }
}
