// ABOUTME: Core domain types and physiological constants for the runscore platform
// ABOUTME: Foundation crate with run metrics, streams, score results, and reference tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

#![deny(unsafe_code)]

//! # Runscore Core
//!
//! Foundation crate providing shared types and constants for the runscore
//! scoring platform. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **models**: Domain value objects (`RunMetrics`, `RawStreams`, `ScoreResult`, `RunRecord`)
//! - **constants**: Physiological and model constants organized by domain

/// Physiological and scoring-model constants organized by domain
pub mod constants;

/// Core data models (`RunMetrics`, `RawStreams`, `ScoreResult`, `RunRecord`, etc.)
pub mod models;

pub use models::{
    format_duration, RankTier, RawStreams, RunMetrics, RunQuality, RunRecord, RunSummary,
    ScoreDetails, ScoreFormulaVersion, ScoreResult, Sex, Surface, WeatherSample,
};

// Timestamp types used throughout the workspace come from chrono; re-export
// so downstream crates agree on the version without a direct dependency.
pub use chrono::{DateTime, Utc};
