// ABOUTME: Reference-time model tunables: record anchors, age/sex/level/surface factors
// ABOUTME: Defaults from core constants with environment variable overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

use runscore_core::constants::{population, reference_time, world_records};
use serde::{Deserialize, Serialize};
use std::env;

/// Tunables of the reference-time and population-percentile model
///
/// The log-normal population tables themselves live in
/// [`runscore_core::constants::population`]; they are fitted model data, not
/// tunables. What is configurable here: the record anchors and the factors
/// layered on top of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceConfig {
    /// 5 km record anchor (seconds)
    pub five_k_record_seconds: f64,
    /// 10 km record anchor (seconds)
    pub ten_k_record_seconds: f64,
    /// Half-marathon record anchor (seconds)
    pub half_record_seconds: f64,
    /// Marathon record anchor (seconds)
    pub marathon_record_seconds: f64,
    /// Quadratic coefficient of the age factor
    pub age_quadratic_coeff: f64,
    /// Multiplier applied to female reference times
    pub female_factor: f64,
    /// Temperature above which reference times slow down (Celsius)
    pub temperature_baseline_c: f64,
    /// Reference-time slowdown per degree above the baseline
    pub temperature_slowdown_per_degree: f64,
    /// Percentile bound of the elite level step
    pub elite_percentile: f64,
    /// Reference-time multiplier of the elite level step
    pub elite_factor: f64,
    /// Percentile bound of the competitive level step
    pub competitive_percentile: f64,
    /// Reference-time multiplier of the competitive level step
    pub competitive_factor: f64,
    /// Percentile bound of the trained level step
    pub trained_percentile: f64,
    /// Reference-time multiplier of the trained level step
    pub trained_factor: f64,
    /// Percentile bound of the recreational level step
    pub recreational_percentile: f64,
    /// Reference-time multiplier of the recreational level step
    pub recreational_factor: f64,
    /// Reference-time multiplier beyond the recreational bound
    pub novice_factor: f64,
    /// Median slowdown per year of age past the fit age, in ln-space
    pub age_ln_mean_drift_per_year: f64,
    /// Spread increase per year of age past the fit age, in ln-space
    pub age_ln_sigma_drift_per_year: f64,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            five_k_record_seconds: world_records::FIVE_K_SECONDS,
            ten_k_record_seconds: world_records::TEN_K_SECONDS,
            half_record_seconds: world_records::HALF_MARATHON_SECONDS,
            marathon_record_seconds: world_records::MARATHON_SECONDS,
            age_quadratic_coeff: reference_time::AGE_QUADRATIC_COEFF,
            female_factor: reference_time::FEMALE_FACTOR,
            temperature_baseline_c: reference_time::TEMPERATURE_BASELINE_C,
            temperature_slowdown_per_degree: reference_time::TEMPERATURE_SLOWDOWN_PER_DEGREE,
            elite_percentile: reference_time::ELITE_PERCENTILE,
            elite_factor: reference_time::ELITE_FACTOR,
            competitive_percentile: reference_time::COMPETITIVE_PERCENTILE,
            competitive_factor: reference_time::COMPETITIVE_FACTOR,
            trained_percentile: reference_time::TRAINED_PERCENTILE,
            trained_factor: reference_time::TRAINED_FACTOR,
            recreational_percentile: reference_time::RECREATIONAL_PERCENTILE,
            recreational_factor: reference_time::RECREATIONAL_FACTOR,
            novice_factor: reference_time::NOVICE_FACTOR,
            age_ln_mean_drift_per_year: population::AGE_LN_MEAN_DRIFT_PER_YEAR,
            age_ln_sigma_drift_per_year: population::AGE_LN_SIGMA_DRIFT_PER_YEAR,
        }
    }
}

impl ReferenceConfig {
    /// Load reference-time configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            five_k_record_seconds: env::var("REFERENCE_FIVE_K_RECORD_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(world_records::FIVE_K_SECONDS),
            ten_k_record_seconds: env::var("REFERENCE_TEN_K_RECORD_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(world_records::TEN_K_SECONDS),
            half_record_seconds: env::var("REFERENCE_HALF_RECORD_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(world_records::HALF_MARATHON_SECONDS),
            marathon_record_seconds: env::var("REFERENCE_MARATHON_RECORD_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(world_records::MARATHON_SECONDS),
            age_quadratic_coeff: env::var("REFERENCE_AGE_QUADRATIC_COEFF")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(reference_time::AGE_QUADRATIC_COEFF),
            female_factor: env::var("REFERENCE_FEMALE_FACTOR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(reference_time::FEMALE_FACTOR),
            temperature_baseline_c: env::var("REFERENCE_TEMPERATURE_BASELINE_C")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(reference_time::TEMPERATURE_BASELINE_C),
            temperature_slowdown_per_degree: env::var("REFERENCE_TEMPERATURE_SLOWDOWN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(reference_time::TEMPERATURE_SLOWDOWN_PER_DEGREE),
            elite_percentile: env::var("REFERENCE_ELITE_PERCENTILE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(reference_time::ELITE_PERCENTILE),
            elite_factor: env::var("REFERENCE_ELITE_FACTOR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(reference_time::ELITE_FACTOR),
            competitive_percentile: env::var("REFERENCE_COMPETITIVE_PERCENTILE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(reference_time::COMPETITIVE_PERCENTILE),
            competitive_factor: env::var("REFERENCE_COMPETITIVE_FACTOR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(reference_time::COMPETITIVE_FACTOR),
            trained_percentile: env::var("REFERENCE_TRAINED_PERCENTILE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(reference_time::TRAINED_PERCENTILE),
            trained_factor: env::var("REFERENCE_TRAINED_FACTOR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(reference_time::TRAINED_FACTOR),
            recreational_percentile: env::var("REFERENCE_RECREATIONAL_PERCENTILE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(reference_time::RECREATIONAL_PERCENTILE),
            recreational_factor: env::var("REFERENCE_RECREATIONAL_FACTOR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(reference_time::RECREATIONAL_FACTOR),
            novice_factor: env::var("REFERENCE_NOVICE_FACTOR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(reference_time::NOVICE_FACTOR),
            age_ln_mean_drift_per_year: env::var("REFERENCE_AGE_LN_MEAN_DRIFT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(population::AGE_LN_MEAN_DRIFT_PER_YEAR),
            age_ln_sigma_drift_per_year: env::var("REFERENCE_AGE_LN_SIGMA_DRIFT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(population::AGE_LN_SIGMA_DRIFT_PER_YEAR),
        }
    }
}
