// ABOUTME: Integration tests for the sync pipeline: skip, filter, and failure tolerance
// ABOUTME: Uses scripted source and store doubles to exercise every report counter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use runscore::sources::{ActivitySource, SourceError};
use runscore::store::{MemoryStore, RunStore, StoreError};
use runscore::{AthleteProfile, SyncPipeline};
use runscore_core::{RawStreams, RunRecord, RunSummary, ScoreFormulaVersion, WeatherSample};
use runscore_engine::ScoreEngine;
use std::collections::{HashMap, HashSet};

/// How the scripted source answers a stream fetch
enum StreamPlan {
    Streams(RawStreams),
    Fail,
}

/// Source double serving a fixed listing and scripted stream fetches
struct ScriptedSource {
    runs: Vec<RunSummary>,
    plans: HashMap<String, StreamPlan>,
}

impl ScriptedSource {
    fn new() -> Self {
        Self {
            runs: Vec::new(),
            plans: HashMap::new(),
        }
    }

    fn with_run(mut self, summary: RunSummary, plan: StreamPlan) -> Self {
        self.plans.insert(summary.id.clone(), plan);
        self.runs.push(summary);
        self
    }
}

#[async_trait]
impl ActivitySource for ScriptedSource {
    fn name(&self) -> &'static str {
        "scripted"
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
        match self.plans.get(id) {
            Some(StreamPlan::Streams(streams)) => Ok(streams.clone()),
            Some(StreamPlan::Fail) => Err(SourceError::Api {
                status: 500,
                body: "injected failure".into(),
            }),
            None => Err(SourceError::NotFound { id: id.to_owned() }),
        }
    }
}

/// Store double rejecting writes for selected activity ids
struct RejectingStore {
    inner: MemoryStore,
    reject: HashSet<String>,
}

#[async_trait]
impl RunStore for RejectingStore {
    async fn contains(&self, id: &str) -> Result<bool, StoreError> {
        self.inner.contains(id).await
    }

    async fn upsert(&self, record: RunRecord) -> Result<(), StoreError> {
        if self.reject.contains(&record.id) {
            return Err(StoreError::Backend {
                message: "injected write failure".into(),
            });
        }
        self.inner.upsert(record).await
    }

    async fn get(&self, id: &str) -> Result<Option<RunRecord>, StoreError> {
        self.inner.get(id).await
    }

    async fn history(&self) -> Result<Vec<RunRecord>, StoreError> {
        self.inner.history().await
    }
}

fn summary(id: &str, day: u32) -> RunSummary {
    RunSummary {
        id: id.to_owned(),
        name: format!("Run {id}"),
        start_date: Utc.with_ymd_and_hms(2024, 6, day, 7, 0, 0).unwrap(),
        distance_meters: 10_000.0,
        moving_time_seconds: 2_700,
        elevation_gain_meters: 50.0,
        average_power: None,
        average_heart_rate: None,
        start_latlng: Some((45.5017, -73.5673)),
    }
}

fn steady_streams(samples: usize, power: f64, hr: f64) -> RawStreams {
    RawStreams::new(vec![power; samples], vec![hr; samples])
}

#[tokio::test]
async fn new_runs_are_scored_and_stored() {
    let source = ScriptedSource::new()
        .with_run(
            summary("a", 1),
            StreamPlan::Streams(steady_streams(2_700, 230.0, 155.0)),
        )
        .with_run(
            summary("b", 2),
            StreamPlan::Streams(steady_streams(2_700, 245.0, 158.0)),
        )
        .with_run(
            summary("c", 3),
            StreamPlan::Streams(steady_streams(2_700, 260.0, 161.0)),
        );
    let store = MemoryStore::new();
    let engine = ScoreEngine::new();
    let pipeline = SyncPipeline::new(&source, &store, &engine, AthleteProfile::default());

    let report = pipeline.run(None).await.unwrap();

    assert_eq!(report.fetched, 3);
    assert_eq!(report.scored, 3);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.failed, 0);
    assert!(report.feedback.is_some(), "a scored batch carries feedback");

    let history = store.history().await.unwrap();
    assert_eq!(history.len(), 3);
    for record in &history {
        assert_eq!(record.version, ScoreFormulaVersion::CURRENT);
        assert!(record.score > 0.0 && record.score < 100.0);
        assert!(
            (record.metrics.avg_power - record.streams.mean_power().unwrap()).abs() < 1e-9,
            "summary without averages falls back to the stream mean"
        );
    }
}

#[tokio::test]
async fn already_stored_runs_are_skipped() {
    let source = ScriptedSource::new()
        .with_run(
            summary("a", 1),
            StreamPlan::Streams(steady_streams(2_700, 230.0, 155.0)),
        )
        .with_run(
            summary("b", 2),
            StreamPlan::Streams(steady_streams(2_700, 245.0, 158.0)),
        );
    let store = MemoryStore::new();
    let engine = ScoreEngine::new();
    let pipeline = SyncPipeline::new(&source, &store, &engine, AthleteProfile::default());

    let first = pipeline.run(None).await.unwrap();
    assert_eq!(first.scored, 2);

    let second = pipeline.run(None).await.unwrap();
    assert_eq!(second.fetched, 2);
    assert_eq!(second.scored, 0);
    assert_eq!(second.skipped, 2);
    assert_eq!(store.len().await, 2, "no duplicate records");
}

#[tokio::test]
async fn short_streams_are_filtered_out() {
    let source = ScriptedSource::new()
        .with_run(
            summary("short", 1),
            StreamPlan::Streams(steady_streams(120, 230.0, 155.0)),
        )
        .with_run(
            summary("full", 2),
            StreamPlan::Streams(steady_streams(2_700, 245.0, 158.0)),
        );
    let store = MemoryStore::new();
    let engine = ScoreEngine::new();
    let pipeline = SyncPipeline::new(&source, &store, &engine, AthleteProfile::default());

    let report = pipeline.run(None).await.unwrap();

    assert_eq!(report.scored, 1);
    assert_eq!(report.skipped, 1);
    assert!(!store.contains("short").await.unwrap());
    assert!(store.contains("full").await.unwrap());
}

#[tokio::test]
async fn fetch_failure_costs_only_that_activity() {
    let source = ScriptedSource::new()
        .with_run(
            summary("a", 1),
            StreamPlan::Streams(steady_streams(2_700, 230.0, 155.0)),
        )
        .with_run(summary("broken", 2), StreamPlan::Fail)
        .with_run(
            summary("c", 3),
            StreamPlan::Streams(steady_streams(2_700, 260.0, 161.0)),
        );
    let store = MemoryStore::new();
    let engine = ScoreEngine::new();
    let pipeline = SyncPipeline::new(&source, &store, &engine, AthleteProfile::default());

    let report = pipeline.run(None).await.unwrap();

    assert_eq!(report.fetched, 3);
    assert_eq!(report.scored, 2);
    assert_eq!(report.failed, 1);
    assert!(!store.contains("broken").await.unwrap());
    assert!(store.contains("a").await.unwrap());
    assert!(store.contains("c").await.unwrap());
}

#[tokio::test]
async fn store_write_failure_counts_as_failed() {
    let source = ScriptedSource::new()
        .with_run(
            summary("a", 1),
            StreamPlan::Streams(steady_streams(2_700, 230.0, 155.0)),
        )
        .with_run(
            summary("rejected", 2),
            StreamPlan::Streams(steady_streams(2_700, 245.0, 158.0)),
        );
    let store = RejectingStore {
        inner: MemoryStore::new(),
        reject: HashSet::from(["rejected".to_owned()]),
    };
    let engine = ScoreEngine::new();
    let pipeline = SyncPipeline::new(&source, &store, &engine, AthleteProfile::default());

    let report = pipeline.run(None).await.unwrap();

    assert_eq!(report.scored, 1);
    assert_eq!(report.failed, 1);
    assert!(!store.contains("rejected").await.unwrap());
}

#[tokio::test]
async fn report_counters_always_balance() {
    let store = MemoryStore::new();
    let engine = ScoreEngine::new();

    // Seed the duplicate through its own sync first.
    let seed_source = ScriptedSource::new().with_run(
        summary("dup", 1),
        StreamPlan::Streams(steady_streams(2_700, 230.0, 155.0)),
    );
    let seed = SyncPipeline::new(&seed_source, &store, &engine, AthleteProfile::default());
    assert_eq!(seed.run(None).await.unwrap().scored, 1);

    let source = ScriptedSource::new()
        .with_run(
            summary("dup", 1),
            StreamPlan::Streams(steady_streams(2_700, 230.0, 155.0)),
        )
        .with_run(
            summary("short", 2),
            StreamPlan::Streams(steady_streams(50, 230.0, 155.0)),
        )
        .with_run(summary("broken", 3), StreamPlan::Fail)
        .with_run(
            summary("good-1", 4),
            StreamPlan::Streams(steady_streams(2_700, 240.0, 156.0)),
        )
        .with_run(
            summary("good-2", 5),
            StreamPlan::Streams(steady_streams(2_700, 250.0, 158.0)),
        );
    let pipeline = SyncPipeline::new(&source, &store, &engine, AthleteProfile::default());
    let report = pipeline.run(None).await.unwrap();

    assert_eq!(report.fetched, 5);
    assert_eq!(report.scored, 2);
    assert_eq!(report.skipped, 2, "one duplicate plus one short stream");
    assert_eq!(report.failed, 1);
    assert_eq!(
        report.fetched,
        report.scored + report.skipped + report.failed,
        "every listed run is accounted for exactly once"
    );
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn weather_lookup_feeds_the_score() {
    let hot = WeatherSample {
        temperature_c: 35.0,
        humidity_pct: 80.0,
    };

    let build_source = || {
        ScriptedSource::new().with_run(
            summary("a", 1),
            StreamPlan::Streams(steady_streams(2_700, 245.0, 158.0)),
        )
    };
    let engine = ScoreEngine::new();

    let neutral_store = MemoryStore::new();
    let neutral_source = build_source();
    let neutral = SyncPipeline::new(
        &neutral_source,
        &neutral_store,
        &engine,
        AthleteProfile::default(),
    );
    neutral.run(None).await.unwrap();

    let weather_store = MemoryStore::new();
    let weather_source = build_source();
    let with_weather = SyncPipeline::new(
        &weather_source,
        &weather_store,
        &engine,
        AthleteProfile::default(),
    )
    .with_weather_lookup(Box::new(move |_, _, _| Some(hot)));
    with_weather.run(None).await.unwrap();

    let neutral_record = neutral_store.get("a").await.unwrap().unwrap();
    let weather_record = weather_store.get("a").await.unwrap().unwrap();

    assert!(neutral_record.metrics.weather.is_none());
    assert_eq!(weather_record.metrics.weather, Some(hot));
    assert!(
        weather_record.score > neutral_record.score,
        "heat above baseline rewards the same run: {} vs {}",
        weather_record.score,
        neutral_record.score
    );
}

#[tokio::test]
async fn scoring_follows_start_date_order() {
    // Listed newest-first on purpose; feedback must still see the oldest
    // runs first so the comparison matches the date order.
    let source = ScriptedSource::new()
        .with_run(
            summary("newest", 9),
            StreamPlan::Streams(steady_streams(2_700, 280.0, 160.0)),
        )
        .with_run(
            summary("oldest", 1),
            StreamPlan::Streams(steady_streams(2_700, 220.0, 155.0)),
        )
        .with_run(
            summary("middle", 5),
            StreamPlan::Streams(steady_streams(2_700, 250.0, 158.0)),
        );
    let store = MemoryStore::new();
    let engine = ScoreEngine::new();
    let pipeline = SyncPipeline::new(&source, &store, &engine, AthleteProfile::default());

    let report = pipeline.run(None).await.unwrap();
    let history = store.history().await.unwrap();
    let ids: Vec<&str> = history.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["oldest", "middle", "newest"]);

    let feedback = report.feedback.unwrap();
    let comparison = feedback.comparison.unwrap();
    assert_eq!(comparison.window, 2);
    assert!(
        (comparison.latest - history.last().unwrap().score).abs() < 1e-9,
        "feedback describes the newest run by date"
    );
}

#[tokio::test]
async fn synthetic_demo_flow_scores_every_run_deterministically() {
    let engine = ScoreEngine::new();

    let run_once = || async {
        let source = runscore::SyntheticSource::new(12, 42);
        let store = MemoryStore::new();
        let pipeline = SyncPipeline::new(&source, &store, &engine, AthleteProfile::default());
        let report = pipeline.run(None).await.unwrap();
        let scores: Vec<f64> = store
            .history()
            .await
            .unwrap()
            .iter()
            .map(|record| record.score)
            .collect();
        (report, scores)
    };

    let (report, scores) = run_once().await;
    assert_eq!(report.fetched, 12);
    assert_eq!(report.scored, 12, "every generated run carries full streams");
    assert_eq!(report.failed, 0);
    assert!(scores.iter().all(|s| s.is_finite() && (0.0..100.0).contains(s)));

    let (_, replayed) = run_once().await;
    assert_eq!(scores, replayed, "same seed must reproduce the same block");
}

#[tokio::test]
async fn weather_lookup_is_skipped_without_coordinates() {
    let mut treadmill = summary("treadmill", 1);
    treadmill.start_latlng = None;

    let source = ScriptedSource::new().with_run(
        treadmill,
        StreamPlan::Streams(steady_streams(2_700, 245.0, 158.0)),
    );
    let store = MemoryStore::new();
    let engine = ScoreEngine::new();
    let pipeline = SyncPipeline::new(&source, &store, &engine, AthleteProfile::default())
        .with_weather_lookup(Box::new(|_, _, _| {
            panic!("lookup must not run for a run without coordinates")
        }));

    let report = pipeline.run(None).await.unwrap();
    assert_eq!(report.scored, 1);
    let record = store.get("treadmill").await.unwrap().unwrap();
    assert!(record.metrics.weather.is_none());
}
