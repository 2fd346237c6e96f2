// ABOUTME: Deterministic synthetic activity source for demos and pipeline tests
// ABOUTME: Seeded ChaCha8 generation of plausible run summaries and sensor streams
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! Synthetic activity source
//!
//! Generates a training block of plausible runs (recovery, tempo, long,
//! intervals) with per-second power and heart-rate streams, entirely offline.
//! Generation is seeded, so the same seed always yields the same runs; the
//! `demo` CLI command and the pipeline tests lean on that.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use runscore_core::{RawStreams, RunSummary};
use std::collections::HashMap;

use super::{ActivitySource, SourceError};

/// Session type a generated run follows
#[derive(Debug, Clone, Copy)]
enum RunShape {
    Recovery,
    Tempo,
    Long,
    Intervals,
}

impl RunShape {
    const CYCLE: [Self; 4] = [Self::Recovery, Self::Tempo, Self::Long, Self::Intervals];

    const fn label(self) -> &'static str {
        match self {
            Self::Recovery => "Recovery run",
            Self::Tempo => "Tempo run",
            Self::Long => "Long run",
            Self::Intervals => "Interval session",
        }
    }

    /// Duration band in minutes
    const fn duration_minutes(self) -> (f64, f64) {
        match self {
            Self::Recovery => (30.0, 45.0),
            Self::Tempo => (40.0, 60.0),
            Self::Long => (75.0, 120.0),
            Self::Intervals => (45.0, 60.0),
        }
    }

    /// Average pace band in minutes per km
    const fn pace_min_per_km(self) -> (f64, f64) {
        match self {
            Self::Recovery => (6.2, 6.8),
            Self::Tempo => (4.6, 5.2),
            Self::Long => (5.6, 6.2),
            Self::Intervals => (5.0, 5.6),
        }
    }

    /// Average power band in watts
    const fn power_watts(self) -> (f64, f64) {
        match self {
            Self::Recovery => (170.0, 200.0),
            Self::Tempo => (250.0, 290.0),
            Self::Long => (200.0, 235.0),
            Self::Intervals => (240.0, 280.0),
        }
    }

    /// Average heart-rate band in bpm
    const fn heart_rate_bpm(self) -> (f64, f64) {
        match self {
            Self::Recovery => (125.0, 140.0),
            Self::Tempo => (155.0, 172.0),
            Self::Long => (140.0, 155.0),
            Self::Intervals => (150.0, 168.0),
        }
    }

    /// End-of-run cardiac drift band in bpm
    const fn hr_drift_bpm(self) -> (f64, f64) {
        match self {
            Self::Recovery => (0.0, 3.0),
            Self::Tempo => (2.0, 6.0),
            Self::Long => (4.0, 10.0),
            Self::Intervals => (2.0, 6.0),
        }
    }
}

/// Offline activity source with seeded, reproducible content
pub struct SyntheticSource {
    runs: Vec<RunSummary>,
    streams: HashMap<String, RawStreams>,
}

impl SyntheticSource {
    /// Generate `count` runs from `seed`, one per day ending yesterday
    #[must_use]
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let base_date = Utc::now() - Duration::days(count as i64);

        let mut runs = Vec::with_capacity(count);
        let mut streams = HashMap::with_capacity(count);

        for index in 0..count {
            let shape = RunShape::CYCLE[index % RunShape::CYCLE.len()];
            let id = format!("synthetic-{seed}-{index:03}");
            let start_date = base_date
                + Duration::days(index as i64)
                + Duration::minutes(rng.gen_range(360..540));

            let (summary, raw) = generate_run(&mut rng, &id, shape, index, start_date);
            runs.push(summary);
            streams.insert(id, raw);
        }

        Self { runs, streams }
    }
}

/// Build one run's summary and streams
fn generate_run(
    rng: &mut ChaCha8Rng,
    id: &str,
    shape: RunShape,
    index: usize,
    start_date: DateTime<Utc>,
) -> (RunSummary, RawStreams) {
    let (lo, hi) = shape.duration_minutes();
    let duration_minutes = rng.gen_range(lo..hi);
    let duration_seconds = (duration_minutes * 60.0) as u64;

    let (lo, hi) = shape.pace_min_per_km();
    let pace = rng.gen_range(lo..hi);
    let distance_meters = duration_minutes / pace * 1000.0;

    let (lo, hi) = shape.power_watts();
    let base_power = rng.gen_range(lo..hi);
    let (lo, hi) = shape.heart_rate_bpm();
    let base_hr = rng.gen_range(lo..hi);
    let (lo, hi) = shape.hr_drift_bpm();
    let end_drift = rng.gen_range(lo..hi);

    let samples = duration_seconds as usize;
    let mut watts = Vec::with_capacity(samples);
    let mut heart_rate = Vec::with_capacity(samples);
    for t in 0..samples {
        let progress = t as f64 / samples.max(1) as f64;
        // Interval sessions alternate 3 min on / 3 min off around the base.
        let block = if matches!(shape, RunShape::Intervals) {
            if (t / 180) % 2 == 0 {
                35.0
            } else {
                -35.0
            }
        } else {
            0.0
        };
        watts.push((base_power + block + rng.gen_range(-8.0..8.0)).max(0.0));
        heart_rate.push(end_drift.mul_add(progress, base_hr) + rng.gen_range(-2.0..2.0));
    }

    let elevation_gain_meters = distance_meters / 1000.0 * rng.gen_range(4.0..12.0);

    // Some devices report no summary averages; the pipeline then falls back
    // to the stream means.
    let with_summary_averages = rng.gen_bool(0.8);
    let average_power = with_summary_averages.then(|| mean(&watts));
    let average_heart_rate = with_summary_averages.then(|| mean(&heart_rate));

    // Occasional treadmill run without coordinates.
    let start_latlng = rng.gen_bool(0.9).then(|| {
        (
            45.5017 + rng.gen_range(-0.01..0.01),
            -73.5673 + rng.gen_range(-0.01..0.01),
        )
    });

    let summary = RunSummary {
        id: id.to_owned(),
        name: format!("{} {}", shape.label(), index + 1),
        start_date,
        distance_meters,
        moving_time_seconds: duration_seconds,
        elevation_gain_meters,
        average_power,
        average_heart_rate,
        start_latlng,
    };

    (summary, RawStreams::new(watts, heart_rate))
}

fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    }
}

#[async_trait]
impl ActivitySource for SyntheticSource {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    async fn list_runs(
        &self,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<RunSummary>, SourceError> {
        Ok(self
            .runs
            .iter()
            .filter(|run| after.is_none_or(|bound| run.start_date > bound))
            .cloned()
            .collect())
    }

    async fn fetch_streams(&self, id: &str) -> Result<RawStreams, SourceError> {
        self.streams
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound { id: id.to_owned() })
    }
}
