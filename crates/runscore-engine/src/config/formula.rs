// ABOUTME: Composite score formula tunables: term clamps, weather model, logistic shape
// ABOUTME: Defaults from core constants with environment variable overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

use runscore_core::constants::{decoupling, heart_rate, pace, power, scoring, weather};
use serde::{Deserialize, Serialize};
use std::env;

/// Tunables of the composite score formula
///
/// One instance describes one formula parameterization; the formula revision
/// itself is fixed by [`runscore_core::ScoreFormulaVersion::CURRENT`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormulaConfig {
    /// Elite power-to-weight benchmark the power term is measured against (W/kg)
    pub reference_wkg: f64,
    /// Lowest accepted heart rate reserve fraction
    pub hrr_floor: f64,
    /// Highest accepted heart rate reserve fraction
    pub hrr_ceiling: f64,
    /// Temperature above which the weather factor grows (Celsius)
    pub neutral_temperature_c: f64,
    /// Humidity above which the weather factor grows (percent)
    pub neutral_humidity_pct: f64,
    /// Weather factor growth per degree above the neutral temperature
    pub temperature_penalty_per_degree: f64,
    /// Weather factor growth per humidity point above the neutral humidity
    pub humidity_penalty_per_point: f64,
    /// Upper bound of the weather factor
    pub max_weather_factor: f64,
    /// Floor of the reference-to-actual pace ratio
    pub pace_ratio_floor: f64,
    /// Ceiling of the reference-to-actual pace ratio
    pub pace_ratio_ceiling: f64,
    /// Exponential damping applied to positive drift in the stability term
    pub drift_damping_alpha: f64,
    /// Duration floor used when normalizing drift by run length (hours)
    pub min_duration_hours: f64,
    /// Drift fraction above which the efficiency malus flag is raised
    pub drift_warning_threshold: f64,
    /// Steepness of the logistic mapping to the 0-100 scale
    pub logistic_steepness: f64,
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self {
            reference_wkg: power::REFERENCE_WKG,
            hrr_floor: heart_rate::HRR_FLOOR,
            hrr_ceiling: heart_rate::HRR_CEILING,
            neutral_temperature_c: weather::NEUTRAL_TEMPERATURE_C,
            neutral_humidity_pct: weather::NEUTRAL_HUMIDITY_PCT,
            temperature_penalty_per_degree: weather::TEMPERATURE_PENALTY_PER_DEGREE,
            humidity_penalty_per_point: weather::HUMIDITY_PENALTY_PER_POINT,
            max_weather_factor: weather::MAX_WEATHER_FACTOR,
            pace_ratio_floor: pace::RATIO_FLOOR,
            pace_ratio_ceiling: pace::RATIO_CEILING,
            drift_damping_alpha: decoupling::DRIFT_DAMPING_ALPHA,
            min_duration_hours: decoupling::MIN_DURATION_HOURS,
            drift_warning_threshold: decoupling::DRIFT_WARNING_THRESHOLD,
            logistic_steepness: scoring::LOGISTIC_STEEPNESS,
        }
    }
}

impl FormulaConfig {
    /// Load formula configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            reference_wkg: env::var("SCORE_FORMULA_REFERENCE_WKG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(power::REFERENCE_WKG),
            hrr_floor: env::var("SCORE_FORMULA_HRR_FLOOR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(heart_rate::HRR_FLOOR),
            hrr_ceiling: env::var("SCORE_FORMULA_HRR_CEILING")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(heart_rate::HRR_CEILING),
            neutral_temperature_c: env::var("SCORE_FORMULA_NEUTRAL_TEMPERATURE_C")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(weather::NEUTRAL_TEMPERATURE_C),
            neutral_humidity_pct: env::var("SCORE_FORMULA_NEUTRAL_HUMIDITY_PCT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(weather::NEUTRAL_HUMIDITY_PCT),
            temperature_penalty_per_degree: env::var("SCORE_FORMULA_TEMPERATURE_PENALTY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(weather::TEMPERATURE_PENALTY_PER_DEGREE),
            humidity_penalty_per_point: env::var("SCORE_FORMULA_HUMIDITY_PENALTY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(weather::HUMIDITY_PENALTY_PER_POINT),
            max_weather_factor: env::var("SCORE_FORMULA_MAX_WEATHER_FACTOR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(weather::MAX_WEATHER_FACTOR),
            pace_ratio_floor: env::var("SCORE_FORMULA_PACE_RATIO_FLOOR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(pace::RATIO_FLOOR),
            pace_ratio_ceiling: env::var("SCORE_FORMULA_PACE_RATIO_CEILING")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(pace::RATIO_CEILING),
            drift_damping_alpha: env::var("SCORE_FORMULA_DRIFT_ALPHA")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(decoupling::DRIFT_DAMPING_ALPHA),
            min_duration_hours: env::var("SCORE_FORMULA_MIN_DURATION_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(decoupling::MIN_DURATION_HOURS),
            drift_warning_threshold: env::var("SCORE_FORMULA_DRIFT_WARNING_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(decoupling::DRIFT_WARNING_THRESHOLD),
            logistic_steepness: env::var("SCORE_FORMULA_LOGISTIC_STEEPNESS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(scoring::LOGISTIC_STEEPNESS),
        }
    }
}
