// ABOUTME: Ingest layer turning source activities and device logs into scored records
// ABOUTME: Holds the athlete profile, the sync pipeline, and the device-log importer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! Activity ingest
//!
//! Two ways in: [`SyncPipeline`] pulls runs from an [`ActivitySource`] and
//! writes scored records into a [`RunStore`]; [`devicelog`] imports a single
//! watch-export JSON file. Both produce the same engine inputs, so a run
//! scores identically no matter which door it came through.
//!
//! [`ActivitySource`]: crate::sources::ActivitySource
//! [`RunStore`]: crate::store::RunStore

pub mod devicelog;
pub mod pipeline;

pub use devicelog::{DeviceLogError, DeviceLogImport};
pub use pipeline::{PipelineError, SyncPipeline, SyncReport};

use runscore_core::constants::athlete_defaults;
use runscore_core::Sex;
use serde::{Deserialize, Serialize};

/// Athlete context the sources cannot supply
///
/// Summaries and streams describe the run; weight, heart-rate bounds, age,
/// and sex describe the runner. The pipeline stamps this profile into every
/// [`RunMetrics`](runscore_core::RunMetrics) it builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Body weight (kg)
    pub weight_kg: f64,
    /// Maximal heart rate (bpm)
    pub hr_max: u32,
    /// Resting heart rate (bpm)
    pub hr_rest: u32,
    /// Age (years)
    pub age: u32,
    /// Biological sex for the reference tables
    pub sex: Sex,
    /// Functional threshold power (watts), used for zone bucketing
    pub ftp_watts: f64,
}

impl Default for AthleteProfile {
    fn default() -> Self {
        Self {
            weight_kg: athlete_defaults::WEIGHT_KG,
            hr_max: athlete_defaults::HR_MAX,
            hr_rest: athlete_defaults::HR_REST,
            age: athlete_defaults::AGE_YEARS,
            sex: Sex::Male,
            ftp_watts: athlete_defaults::FTP_WATTS,
        }
    }
}
