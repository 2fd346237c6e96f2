// ABOUTME: Main library entry point for the runscore running-analytics platform
// ABOUTME: Wires activity sources, the run store, and the ingest pipeline around the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

#![deny(unsafe_code)]

//! # Runscore
//!
//! Power-based running performance scoring. Runs come in from an activity
//! source (a Strava-shaped HTTP API, a watch-export file, or a seeded
//! synthetic generator), pass through the scoring engine, and land in a run
//! store as immutable scored records.
//!
//! ## Features
//!
//! - **Composite scoring**: five multiplicative terms (power, intensity,
//!   weather, pace, stability) normalized to a bounded 0-100 score
//! - **Population percentiles**: log-normal finishing-time models per
//!   distance, sex, and age
//! - **Aerobic decoupling**: first-half/second-half efficiency drift from
//!   raw power and heart-rate streams
//! - **Gamification**: achievements, quality trend, and run comparison over
//!   the score history
//! - **Replayable history**: stored scores keep their formula revision and
//!   can be re-scored under the current one without mutation
//!
//! ## Architecture
//!
//! The workspace splits along change frequency:
//! - `runscore-core`: domain models and physiological constants
//! - `runscore-engine`: the pure scoring engine
//! - this crate: sources, store, ingest pipeline, and the CLI
//!
//! ## Example
//!
//! ```rust
//! use runscore_core::RunMetrics;
//! use runscore_engine::ScoreEngine;
//!
//! let engine = ScoreEngine::new();
//! let metrics = RunMetrics {
//!     avg_power: 250.0,
//!     avg_hr: 160.0,
//!     distance_meters: 10_000.0,
//!     moving_time_seconds: 2_700,
//!     ..RunMetrics::default()
//! };
//! let result = engine.compute_score(&metrics, 0.02);
//! assert!(result.score > 0.0 && result.score < 100.0);
//! ```

/// Ingest layer: sync pipeline, device-log import, athlete profile
pub mod ingest;

/// Logging configuration and tracing subscriber setup for the binaries
pub mod logging;

/// Activity sources: the async trait plus HTTP and synthetic implementations
pub mod sources;

/// Run stores: the async trait plus the in-memory implementation
pub mod store;

pub use ingest::{AthleteProfile, DeviceLogError, PipelineError, SyncPipeline, SyncReport};
pub use sources::{ActivitySource, HttpSource, SourceError, SyntheticSource};
pub use store::{MemoryStore, RunStore, StoreError};
