// ABOUTME: The v4 composite score formula: five multiplicative terms plus normalization
// ABOUTME: Fallible core used by ScoreEngine; every term is range-guarded and finite-checked
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! Composite score evaluation
//!
//! The score multiplies five terms and squashes the product onto 0-100:
//!
//! * **power**: `ln(1 + wkg / reference_wkg)` where wkg is elevation-boosted
//!   watts per kilogram
//! * **intensity**: `ln(1 + 1 / hrr)` over the clamped heart-rate-reserve
//!   fraction, rewarding aerobic restraint at a given output
//! * **weather**: heat and humidity bonus above the neutral band, capped
//! * **pace**: `ln(1 + reference_time / actual_time)` against the athlete's
//!   cohort reference, ratio clamped to keep outliers bounded
//! * **stability**: exponential damping by positive aerobic decoupling,
//!   relaxed for longer runs
//!
//! [`evaluate`] returns `Err` for metrics that cannot support a meaningful
//! score or for a non-finite intermediate. `ScoreEngine::compute_score` maps
//! those to the zero-score fallback so the public surface stays total.

use crate::config::EngineConfig;
use crate::errors::FormulaError;
use crate::gamification;
use crate::reference::{self, DistanceBucket};
use runscore_core::constants::scoring;
use runscore_core::{
    format_duration, RunMetrics, RunQuality, ScoreDetails, ScoreFormulaVersion, ScoreResult,
};
use std::collections::BTreeMap;
use tracing::warn;

/// Evaluate the current composite formula for one run
///
/// `drift` is the aerobic decoupling fraction from
/// [`crate::decoupling::aerobic_decoupling`]; negative drift counts as zero.
/// Metrics are sanitized before use, so out-of-range profile values fall
/// back to defaults rather than poisoning a term.
///
/// # Errors
///
/// [`FormulaError::InvalidMetrics`] when average power, average heart rate,
/// or moving time is missing or non-positive after sanitization.
/// [`FormulaError::NonFinite`] when a term evaluates to NaN or infinity,
/// which only happens with pathological configuration overrides.
pub fn evaluate(
    metrics: &RunMetrics,
    drift: f64,
    config: &EngineConfig,
) -> Result<ScoreResult, FormulaError> {
    let metrics = metrics.clone().sanitized();

    if metrics.avg_power <= 0.0 {
        return Err(FormulaError::InvalidMetrics {
            reason: "average power is missing or non-positive",
        });
    }
    if metrics.avg_hr <= 0.0 {
        return Err(FormulaError::InvalidMetrics {
            reason: "average heart rate is missing or non-positive",
        });
    }
    if metrics.moving_time_seconds == 0 {
        return Err(FormulaError::InvalidMetrics {
            reason: "moving time is zero",
        });
    }

    let power = power_term(&metrics, config)?;
    let intensity = intensity_term(&metrics, config)?;
    let weather = finite(weather_factor(&metrics, config), "weather")?;
    let (pace, percentile, target_seconds) = pace_term(&metrics, config)?;
    let stability = stability_term(&metrics, drift, config)?;

    let raw = power * intensity * weather * pace * stability;
    let raw = finite(raw, "composite")?;
    let score = normalize(raw, config);

    let mut contributions = BTreeMap::new();
    contributions.insert("Power".to_owned(), power);
    contributions.insert("Intensity".to_owned(), intensity);
    contributions.insert("Weather".to_owned(), weather);
    contributions.insert("Pace".to_owned(), pace);
    contributions.insert("Stability".to_owned(), stability);

    Ok(ScoreResult {
        score,
        details: ScoreDetails {
            contributions,
            target_time: format_duration(target_seconds),
            efficiency_malus: drift > config.formula.drift_warning_threshold,
        },
        weather_factor: weather,
        relative_performance_pct: (1.0 - percentile) * 100.0,
        quality: gamification::quality_for(score, &config.gamification),
        version: ScoreFormulaVersion::CURRENT,
    })
}

/// Evaluate, mapping any failure to the zero-score fallback
///
/// The never-crash boundary shared by `ScoreEngine::compute_score` and the
/// replay path: failures are logged at warn level and swallowed.
pub(crate) fn evaluate_or_fallback(
    metrics: &RunMetrics,
    drift: f64,
    config: &EngineConfig,
) -> ScoreResult {
    evaluate(metrics, drift, config).unwrap_or_else(|error| {
        warn!(error = %error, "score evaluation failed, returning zero score");
        fallback_result()
    })
}

/// The zero-score result returned when [`evaluate`] fails
#[must_use]
pub fn fallback_result() -> ScoreResult {
    ScoreResult {
        score: 0.0,
        details: ScoreDetails::default(),
        weather_factor: 1.0,
        relative_performance_pct: 0.0,
        quality: RunQuality::Wasted,
        version: ScoreFormulaVersion::CURRENT,
    }
}

fn finite(value: f64, term: &'static str) -> Result<f64, FormulaError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormulaError::NonFinite { term })
    }
}

/// Elevation-boosted watts per kilogram, log-compressed against the reference
fn power_term(metrics: &RunMetrics, config: &EngineConfig) -> Result<f64, FormulaError> {
    let grade_boost = if metrics.distance_meters > 0.0 {
        1.0 + metrics.elevation_gain_meters / metrics.distance_meters
    } else {
        1.0
    };
    let wkg = metrics.avg_power * grade_boost / metrics.weight_kg;
    finite((wkg / config.formula.reference_wkg).ln_1p(), "power")
}

/// Inverse heart-rate-reserve fraction, log-compressed
///
/// A lower working fraction of the reserve at the same output means better
/// aerobic economy, so the term grows as hrr shrinks. The clamp keeps both
/// resting-rate artifacts and redlined efforts inside a sane band.
fn intensity_term(metrics: &RunMetrics, config: &EngineConfig) -> Result<f64, FormulaError> {
    let span = f64::from(metrics.hr_max) - f64::from(metrics.hr_rest);
    let hrr = ((metrics.avg_hr - f64::from(metrics.hr_rest)) / span)
        .clamp(config.formula.hrr_floor, config.formula.hrr_ceiling);
    finite(hrr.recip().ln_1p(), "intensity")
}

/// Heat and humidity multiplier, `1.0` when no weather sample exists
fn weather_factor(metrics: &RunMetrics, config: &EngineConfig) -> f64 {
    metrics.weather.map_or(1.0, |sample| {
        let heat = (sample.temperature_c - config.formula.neutral_temperature_c).max(0.0);
        let humidity = (sample.humidity_pct - config.formula.neutral_humidity_pct).max(0.0);
        config
            .formula
            .temperature_penalty_per_degree
            .mul_add(
                heat,
                config
                    .formula
                    .humidity_penalty_per_point
                    .mul_add(humidity, 1.0),
            )
            .min(config.formula.max_weather_factor)
    })
}

/// Pace against the athlete's cohort reference, plus the percentile and the
/// reference seconds it was judged against
fn pace_term(
    metrics: &RunMetrics,
    config: &EngineConfig,
) -> Result<(f64, f64, f64), FormulaError> {
    let bucket = DistanceBucket::for_distance(metrics.distance_meters);
    let seconds = metrics.moving_time_seconds as f64;
    let percentile = reference::population_percentile(
        bucket,
        metrics.sex,
        metrics.age,
        seconds,
        &config.reference,
    );
    let target = reference::reference_time(
        bucket,
        metrics.sex,
        metrics.age,
        percentile,
        metrics.surface,
        metrics.weather.map(|sample| sample.temperature_c),
        &config.reference,
    );
    let ratio = (target / seconds).clamp(
        config.formula.pace_ratio_floor,
        config.formula.pace_ratio_ceiling,
    );
    let term = finite(ratio.ln_1p(), "pace")?;
    Ok((term, percentile, target))
}

/// Exponential damping by positive drift, relaxed with run duration
fn stability_term(
    metrics: &RunMetrics,
    drift: f64,
    config: &EngineConfig,
) -> Result<f64, FormulaError> {
    let damped = config.formula.drift_damping_alpha * drift.max(0.0);
    let hours = metrics
        .duration_hours()
        .max(config.formula.min_duration_hours);
    finite((-damped / hours.sqrt()).exp(), "stability")
}

/// Squash the raw product onto the 0-100 scale with a saturating logistic
fn normalize(raw: f64, config: &EngineConfig) -> f64 {
    let decay = (-config.formula.logistic_steepness * raw.max(0.0)).exp_m1();
    (-scoring::MAX_SCORE * decay).clamp(0.0, scoring::MAX_SCORE)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use runscore_core::{RunQuality, Sex, WeatherSample};

    fn benchmark_run() -> RunMetrics {
        RunMetrics {
            avg_power: 250.0,
            avg_hr: 160.0,
            distance_meters: 10_000.0,
            moving_time_seconds: 2_700,
            elevation_gain_meters: 50.0,
            weight_kg: 70.0,
            hr_max: 185,
            hr_rest: 50,
            age: 30,
            sex: Sex::Male,
            weather: Some(WeatherSample::new(20.0, 50.0)),
            surface: None,
        }
    }

    #[test]
    fn benchmark_run_scores_the_pinned_value() {
        let config = EngineConfig::default();
        let result = evaluate(&benchmark_run(), 0.02, &config).unwrap();

        assert!(
            (result.score - 64.867).abs() < 0.01,
            "benchmark 45min 10k must score ~64.87, got {}",
            result.score
        );
        assert!((result.weather_factor - 1.0).abs() < f64::EPSILON);
        assert!(
            (result.relative_performance_pct - 81.94).abs() < 0.01,
            "got {}",
            result.relative_performance_pct
        );
        assert_eq!(result.details.target_time, "34:23");
        assert_eq!(result.quality, RunQuality::Solid);
        assert_eq!(result.version, ScoreFormulaVersion::V4Percentile);
        assert!(!result.details.efficiency_malus);
    }

    #[test]
    fn benchmark_run_term_breakdown() {
        let config = EngineConfig::default();
        let result = evaluate(&benchmark_run(), 0.02, &config).unwrap();
        let term = |name: &str| result.details.contributions[name];

        assert_eq!(result.details.contributions.len(), 5);
        assert!((term("Power") - 0.468_887).abs() < 1e-4, "power {}", term("Power"));
        assert!(
            (term("Intensity") - 0.800_778).abs() < 1e-4,
            "intensity {}",
            term("Intensity")
        );
        assert!((term("Weather") - 1.0).abs() < f64::EPSILON);
        assert!((term("Pace") - 0.567_568).abs() < 1e-4, "pace {}", term("Pace"));
        assert!(
            (term("Stability") - 0.981_694).abs() < 1e-4,
            "stability {}",
            term("Stability")
        );
    }

    #[test]
    fn missing_power_or_heart_rate_is_rejected() {
        let config = EngineConfig::default();
        let no_power = RunMetrics {
            avg_power: 0.0,
            ..benchmark_run()
        };
        let no_hr = RunMetrics {
            avg_hr: 0.0,
            ..benchmark_run()
        };
        let no_time = RunMetrics {
            moving_time_seconds: 0,
            ..benchmark_run()
        };

        for broken in [no_power, no_hr, no_time] {
            assert!(
                matches!(
                    evaluate(&broken, 0.0, &config),
                    Err(FormulaError::InvalidMetrics { .. })
                ),
                "degenerate metrics must be rejected: {broken:?}"
            );
        }
    }

    #[test]
    fn score_stays_on_the_scale_across_extremes() {
        let config = EngineConfig::default();
        let powers = [1.0, 180.0, 450.0, 2_000.0];
        let rates = [60.0, 150.0, 184.0];
        let distances = [400.0, 5_000.0, 42_195.0, 100_000.0];
        let times = [60_u64, 1_200, 14_400, 86_400];
        let drifts = [-0.5, 0.0, 0.04, 0.5];

        for &avg_power in &powers {
            for &avg_hr in &rates {
                for &distance_meters in &distances {
                    for &moving_time_seconds in &times {
                        for &drift in &drifts {
                            let metrics = RunMetrics {
                                avg_power,
                                avg_hr,
                                distance_meters,
                                moving_time_seconds,
                                ..benchmark_run()
                            };
                            let result = evaluate(&metrics, drift, &config).unwrap();
                            assert!(
                                result.score.is_finite()
                                    && (0.0..=100.0).contains(&result.score),
                                "score {} off the scale for power={avg_power} hr={avg_hr} \
                                 dist={distance_meters} time={moving_time_seconds} drift={drift}",
                                result.score
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn hot_humid_weather_raises_the_factor_up_to_the_cap() {
        let config = EngineConfig::default();
        let muggy = RunMetrics {
            weather: Some(WeatherSample::new(32.0, 90.0)),
            ..benchmark_run()
        };
        let furnace = RunMetrics {
            weather: Some(WeatherSample::new(80.0, 100.0)),
            ..benchmark_run()
        };

        let muggy_factor = evaluate(&muggy, 0.0, &config).unwrap().weather_factor;
        let furnace_factor = evaluate(&furnace, 0.0, &config).unwrap().weather_factor;

        let expected = 0.012_f64.mul_add(12.0, 0.000_5_f64.mul_add(30.0, 1.0));
        assert!(
            (muggy_factor - expected).abs() < 1e-9,
            "32C/90% must cost {expected}, got {muggy_factor}"
        );
        assert!(
            (furnace_factor - 1.5).abs() < f64::EPSILON,
            "factor must cap at 1.5, got {furnace_factor}"
        );
    }

    #[test]
    fn missing_weather_is_neutral() {
        let config = EngineConfig::default();
        let no_weather = RunMetrics {
            weather: None,
            ..benchmark_run()
        };
        let result = evaluate(&no_weather, 0.0, &config).unwrap();
        assert!((result.weather_factor - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_drift_is_not_a_bonus() {
        let config = EngineConfig::default();
        let steady = evaluate(&benchmark_run(), 0.0, &config).unwrap();
        let negative_split = evaluate(&benchmark_run(), -0.08, &config).unwrap();
        assert!(
            (steady.score - negative_split.score).abs() < 1e-9,
            "negative drift must clamp to neutral: {} vs {}",
            steady.score,
            negative_split.score
        );
    }

    #[test]
    fn heavy_drift_sets_the_efficiency_malus() {
        let config = EngineConfig::default();
        let drifting = evaluate(&benchmark_run(), 0.08, &config).unwrap();
        let steady = evaluate(&benchmark_run(), 0.02, &config).unwrap();
        assert!(drifting.details.efficiency_malus);
        assert!(!steady.details.efficiency_malus);
        assert!(
            drifting.score < steady.score,
            "drift must cost score: {} vs {}",
            drifting.score,
            steady.score
        );
    }

    #[test]
    fn more_power_at_the_same_effort_scores_higher() {
        let config = EngineConfig::default();
        let stronger = RunMetrics {
            avg_power: 280.0,
            ..benchmark_run()
        };
        let base = evaluate(&benchmark_run(), 0.0, &config).unwrap();
        let boosted = evaluate(&stronger, 0.0, &config).unwrap();
        assert!(
            boosted.score > base.score,
            "280W must outscore 250W: {} vs {}",
            boosted.score,
            base.score
        );
    }

    #[test]
    fn fallback_is_the_zero_score() {
        let fallback = fallback_result();
        assert!((fallback.score).abs() < f64::EPSILON);
        assert_eq!(fallback.quality, RunQuality::Wasted);
        assert_eq!(fallback.version, ScoreFormulaVersion::CURRENT);
        assert!(fallback.details.contributions.is_empty());
    }
}
