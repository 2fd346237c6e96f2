// ABOUTME: Running performance scoring engine: drift, percentile models, composite score
// ABOUTME: Pure closed-form math with injectable configuration and a never-crash boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

#![deny(unsafe_code)]

//! # Runscore Engine
//!
//! The scoring core of the runscore platform. Every entry point is a pure
//! function of its inputs and an immutable [`config::EngineConfig`]; there is
//! no global state and concurrent callers need no synchronization.
//!
//! The public boundary never panics and never returns an error for degenerate
//! numeric input: empty streams yield zero drift, unknown times yield the
//! median percentile, and invalid metrics collapse to a zero score with a
//! warning logged. Formula failures exist only as internal [`errors::FormulaError`]
//! values caught at the [`engine::ScoreEngine`] boundary.
//!
//! ## Modules
//!
//! - **engine**: `ScoreEngine` facade tying the per-concern modules together
//! - **config**: immutable engine configuration with env-var overrides
//! - **decoupling**: first-half/second-half aerobic efficiency drift
//! - **reference**: distance buckets, population percentiles, reference times
//! - **formula**: the composite score (five terms, logistic normalization)
//! - **rank**: score-to-tier ladder
//! - **zones**: FTP-based power zone distribution
//! - **gamification**: quality grades, achievements, trends, comparisons
//! - **replay**: re-score stored runs under the current formula revision

/// Immutable engine configuration with env-var overrides
pub mod config;

/// First-half/second-half aerobic efficiency drift
pub mod decoupling;

/// `ScoreEngine` facade over the per-concern modules
pub mod engine;

/// Internal formula and configuration error types
pub mod errors;

/// Composite score formula (five terms, logistic normalization)
pub mod formula;

/// Quality grades, achievements, trends, and history comparisons
pub mod gamification;

/// Score-to-tier rank ladder
pub mod rank;

/// Distance buckets, population percentiles, and reference times
pub mod reference;

/// Re-score stored runs under the current formula revision
pub mod replay;

/// FTP-based power zone distribution
pub mod zones;

pub use config::EngineConfig;
pub use engine::ScoreEngine;
pub use gamification::{Achievement, GamingFeedback, QualityTrend, RunComparison, TrendDirection};
pub use reference::DistanceBucket;
pub use replay::ReplayOutcome;
pub use zones::PowerZone;
