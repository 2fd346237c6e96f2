// ABOUTME: Activity source abstraction: where run summaries and raw streams come from
// ABOUTME: HTTP-backed and seeded synthetic implementations share one async trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! Activity sources
//!
//! A source lists finished runs and serves their per-second power and
//! heart-rate streams. The engine never talks to a source directly; the
//! ingest pipeline drives one and hands the engine plain values.
//!
//! Token acquisition is the caller's problem: [`HttpSource`] takes a ready
//! bearer token and never performs an OAuth exchange.

mod http;
mod synthetic;

pub use http::{HttpSource, HttpSourceConfig, RetryConfig};
pub use synthetic::SyntheticSource;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use runscore_core::{RawStreams, RunSummary};
use thiserror::Error;

/// Failure modes shared by every activity source
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport-level failure before any response arrived
    #[error("source request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The source throttled us and retries were exhausted
    #[error("source rate limit exceeded after {retries} retries")]
    RateLimited {
        /// Retry attempts performed before giving up
        retries: u32,
    },

    /// Non-success response from the source API
    #[error("source returned status {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body text, as far as it could be read
        body: String,
    },

    /// The requested activity does not exist at this source
    #[error("activity {id} not found")]
    NotFound {
        /// Activity id that was requested
        id: String,
    },
}

/// One place finished runs can be pulled from
///
/// Implementations must be cheap to share across tasks; the pipeline calls
/// [`fetch_streams`](ActivitySource::fetch_streams) from a bounded pool of
/// concurrent futures.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Short stable identifier used in logs and reports
    fn name(&self) -> &'static str;

    /// List run summaries, oldest first
    ///
    /// `after` bounds the listing to runs starting strictly after the given
    /// instant; `None` lists everything the source has.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] when the listing cannot be completed at
    /// all. Per-activity problems belong to
    /// [`fetch_streams`](ActivitySource::fetch_streams).
    async fn list_runs(&self, after: Option<DateTime<Utc>>)
        -> Result<Vec<RunSummary>, SourceError>;

    /// Fetch the power and heart-rate streams for one activity
    ///
    /// Streams the device never recorded come back empty rather than
    /// erroring; completeness is the caller's call via
    /// [`RawStreams::is_complete`].
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] when the activity is unknown or the source
    /// cannot be reached.
    async fn fetch_streams(&self, id: &str) -> Result<RawStreams, SourceError>;
}
