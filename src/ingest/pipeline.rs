// ABOUTME: Sync pipeline pulling runs from a source, scoring them, writing records
// ABOUTME: Bounded concurrent stream fetch, duplicate skip, per-activity failure tolerance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! Sync pipeline
//!
//! One [`run`](SyncPipeline::run) call brings the store up to date with the
//! source: list runs, drop the ones already stored, fetch streams with a
//! bounded pool, then score and write in start-date order so each run's
//! gamification feedback sees exactly the history that preceded it.
//!
//! A failed stream fetch or store write costs that one activity, never the
//! batch. Runs whose streams are shorter than the scoreable minimum are
//! skipped the way the original device pairing loses its first minutes.

use chrono::{DateTime, Utc};
use futures_util::{stream, StreamExt};
use runscore_core::constants::ingest;
use runscore_core::{RawStreams, RunMetrics, RunRecord, RunSummary, WeatherSample};
use runscore_engine::{GamingFeedback, ScoreEngine};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::AthleteProfile;
use crate::sources::{ActivitySource, SourceError};
use crate::store::{RunStore, StoreError};

/// Collaborator hook resolving historical weather at a run's start
///
/// The HTTP client behind it stays outside this crate; the pipeline only
/// cares that coordinates plus a timestamp may yield a sample. `None` scores
/// the run against the neutral baseline.
pub type WeatherLookup = dyn Fn(f64, f64, DateTime<Utc>) -> Option<WeatherSample> + Send + Sync;

/// Why a sync batch could not run at all
///
/// Per-activity problems are tolerated and counted in the [`SyncReport`];
/// these variants abort the batch before any scoring happens.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source could not list runs
    #[error("activity listing failed: {0}")]
    List(#[from] SourceError),

    /// The store could not return the existing history
    #[error("history load failed: {0}")]
    History(#[from] StoreError),
}

/// Outcome counts of one sync batch
///
/// `fetched == scored + skipped + failed` always holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
    /// Run summaries the source listed
    pub fetched: usize,
    /// Runs scored and written to the store
    pub scored: usize,
    /// Runs skipped: already stored or streams below the minimum
    pub skipped: usize,
    /// Runs lost to a stream-fetch or store-write failure
    pub failed: usize,
    /// Feedback for the most recently scored run, when any run was scored
    pub feedback: Option<GamingFeedback>,
}

/// Source-to-store sync driver
pub struct SyncPipeline<'a> {
    source: &'a dyn ActivitySource,
    store: &'a dyn RunStore,
    engine: &'a ScoreEngine,
    athlete: AthleteProfile,
    weather: Option<Box<WeatherLookup>>,
    concurrency: usize,
    min_stream_samples: usize,
}

impl<'a> SyncPipeline<'a> {
    /// Pipeline with the default fetch concurrency and stream minimum
    #[must_use]
    pub fn new(
        source: &'a dyn ActivitySource,
        store: &'a dyn RunStore,
        engine: &'a ScoreEngine,
        athlete: AthleteProfile,
    ) -> Self {
        Self {
            source,
            store,
            engine,
            athlete,
            weather: None,
            concurrency: ingest::FETCH_CONCURRENCY,
            min_stream_samples: ingest::MIN_SCOREABLE_SAMPLES,
        }
    }

    /// Override the bounded fetch pool size
    #[must_use]
    pub const fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Override the minimum stream length a run needs to be scoreable
    #[must_use]
    pub const fn with_min_stream_samples(mut self, samples: usize) -> Self {
        self.min_stream_samples = samples;
        self
    }

    /// Attach a weather collaborator; without one every run scores neutral
    #[must_use]
    pub fn with_weather_lookup(mut self, lookup: Box<WeatherLookup>) -> Self {
        self.weather = Some(lookup);
        self
    }

    /// Sync the store with every source run starting after `after`
    ///
    /// # Errors
    ///
    /// Returns a [`PipelineError`] when the source cannot list runs or the
    /// store cannot return its history. Individual activity failures are
    /// counted in the report instead.
    pub async fn run(&self, after: Option<DateTime<Utc>>) -> Result<SyncReport, PipelineError> {
        let existing = self.store.history().await?;
        let known: HashSet<&str> = existing.iter().map(|record| record.id.as_str()).collect();
        let mut score_history: Vec<f64> = existing.iter().map(|record| record.score).collect();

        let summaries = self.source.list_runs(after).await?;
        let mut report = SyncReport {
            fetched: summaries.len(),
            ..SyncReport::default()
        };
        debug!(
            source = self.source.name(),
            listed = report.fetched,
            stored = existing.len(),
            "sync batch listed"
        );

        let fresh: Vec<RunSummary> = summaries
            .into_iter()
            .filter(|summary| {
                if known.contains(summary.id.as_str()) {
                    debug!(id = %summary.id, "already stored; skipping");
                    report.skipped += 1;
                    false
                } else {
                    true
                }
            })
            .collect();

        // Fetch concurrently, then score sequentially in start-date order so
        // each run's feedback sees only the runs that actually preceded it.
        let source = self.source;
        let mut fetched: Vec<(RunSummary, Result<RawStreams, SourceError>)> =
            stream::iter(fresh.into_iter().map(|summary| async move {
                let streams = source.fetch_streams(&summary.id).await;
                (summary, streams)
            }))
            .buffer_unordered(self.concurrency.max(1))
            .collect()
            .await;
        fetched.sort_by_key(|(summary, _)| summary.start_date);

        for (summary, streams) in fetched {
            let streams = match streams {
                Ok(streams) => streams,
                Err(error) => {
                    warn!(id = %summary.id, %error, "stream fetch failed; skipping activity");
                    report.failed += 1;
                    continue;
                }
            };

            if !streams.is_complete(self.min_stream_samples) {
                debug!(
                    id = %summary.id,
                    watts = streams.watts.len(),
                    heart_rate = streams.heart_rate.len(),
                    minimum = self.min_stream_samples,
                    "streams below scoreable minimum; skipping"
                );
                report.skipped += 1;
                continue;
            }

            let record = self.score_run(summary, streams);
            let score = record.score;
            let id = record.id.clone();
            match self.store.upsert(record).await {
                Ok(()) => {
                    score_history.push(score);
                    let feedback = self.engine.gaming_feedback(&score_history);
                    if !feedback.achievements.is_empty() {
                        info!(
                            id = %id,
                            achievements = feedback.achievements.len(),
                            "run earned achievements"
                        );
                    }
                    report.feedback = Some(feedback);
                    report.scored += 1;
                }
                Err(error) => {
                    warn!(id = %id, %error, "store write failed; run not recorded");
                    report.failed += 1;
                }
            }
        }

        info!(
            source = self.source.name(),
            fetched = report.fetched,
            scored = report.scored,
            skipped = report.skipped,
            failed = report.failed,
            "sync batch complete"
        );
        Ok(report)
    }

    /// Score one fetched run into a storable record
    fn score_run(&self, summary: RunSummary, streams: RawStreams) -> RunRecord {
        // Summary averages win when the source reports them; zero or absent
        // values fall back to the stream means.
        let avg_power = summary
            .average_power
            .filter(|power| *power > 0.0)
            .or_else(|| streams.mean_power())
            .unwrap_or_default();
        let avg_hr = summary
            .average_heart_rate
            .filter(|hr| *hr > 0.0)
            .or_else(|| streams.mean_heart_rate())
            .unwrap_or_default();

        let weather = match (&self.weather, summary.start_latlng) {
            (Some(lookup), Some((lat, lng))) => lookup(lat, lng, summary.start_date),
            _ => None,
        };

        let metrics = RunMetrics {
            avg_power,
            avg_hr,
            distance_meters: summary.distance_meters,
            moving_time_seconds: summary.moving_time_seconds,
            elevation_gain_meters: summary.elevation_gain_meters,
            weight_kg: self.athlete.weight_kg,
            hr_max: self.athlete.hr_max,
            hr_rest: self.athlete.hr_rest,
            age: self.athlete.age,
            sex: self.athlete.sex,
            weather,
            surface: None,
        };

        let decoupling = self
            .engine
            .calculate_decoupling(&streams.watts, &streams.heart_rate);
        let result = self.engine.compute_score(&metrics, decoupling);
        let rank = self.engine.get_rank(result.score);
        debug!(
            id = %summary.id,
            score = result.score,
            decoupling,
            rank = rank.label(),
            "run scored"
        );

        RunRecord {
            id: summary.id,
            name: summary.name,
            start_date: summary.start_date,
            metrics,
            streams,
            decoupling,
            score: result.score,
            version: result.version,
            rank,
            quality: result.quality,
        }
    }
}
