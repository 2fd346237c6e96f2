// ABOUTME: Population percentile and reference-time model for run performances
// ABOUTME: Log-normal finishing-time distributions anchored to world-record times
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! Reference model: who runs this fast, and what should it have taken?
//!
//! Two questions are answered here, both against log-normal population models
//! of finishing times fitted per race distance and sex:
//!
//! 1. [`population_percentile`]: the fraction of the reference population
//!    expected to finish *faster* than the given time (lower is better).
//! 2. [`reference_time`]: the finishing time expected of *this* athlete on
//!    *this* course, built from the world-record anchor and multiplicative
//!    age, sex, ability-level, surface, and temperature factors.
//!
//! Every function here is total: degenerate input falls back to the median
//! percentile or the nearest default factor instead of erroring.

use crate::config::ReferenceConfig;
use runscore_core::constants::population;
use runscore_core::{Sex, Surface};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Race-distance bucket a run is scored against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceBucket {
    /// Up to 8 km
    FiveK,
    /// Up to 16 km
    TenK,
    /// Up to 30 km
    HalfMarathon,
    /// Everything longer
    Marathon,
}

impl DistanceBucket {
    /// Map a run distance onto its nearest race-distance bucket
    #[must_use]
    pub fn for_distance(meters: f64) -> Self {
        use runscore_core::constants::distance_buckets as cuts;
        if meters <= cuts::FIVE_K_CEILING_METERS {
            Self::FiveK
        } else if meters <= cuts::TEN_K_CEILING_METERS {
            Self::TenK
        } else if meters <= cuts::HALF_CEILING_METERS {
            Self::HalfMarathon
        } else {
            Self::Marathon
        }
    }

    /// Human-readable bucket label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FiveK => "5k",
            Self::TenK => "10k",
            Self::HalfMarathon => "half marathon",
            Self::Marathon => "marathon",
        }
    }

    /// World-record anchor for this bucket (seconds)
    #[must_use]
    pub const fn record_seconds(self, config: &ReferenceConfig) -> f64 {
        match self {
            Self::FiveK => config.five_k_record_seconds,
            Self::TenK => config.ten_k_record_seconds,
            Self::HalfMarathon => config.half_record_seconds,
            Self::Marathon => config.marathon_record_seconds,
        }
    }

    /// Mean of ln(finishing seconds) for the base population
    fn ln_mean(self, sex: Sex) -> f64 {
        match (self, sex) {
            (Self::FiveK, Sex::Male) => population::FIVE_K_MALE_LN_MEAN,
            (Self::FiveK, Sex::Female) => population::FIVE_K_FEMALE_LN_MEAN,
            (Self::TenK, Sex::Male) => population::TEN_K_MALE_LN_MEAN,
            (Self::TenK, Sex::Female) => population::TEN_K_FEMALE_LN_MEAN,
            (Self::HalfMarathon, Sex::Male) => population::HALF_MALE_LN_MEAN,
            (Self::HalfMarathon, Sex::Female) => population::HALF_FEMALE_LN_MEAN,
            (Self::Marathon, Sex::Male) => population::MARATHON_MALE_LN_MEAN,
            (Self::Marathon, Sex::Female) => population::MARATHON_FEMALE_LN_MEAN,
        }
    }

    /// Standard deviation of ln(finishing seconds) for the base population
    const fn ln_sigma(self) -> f64 {
        match self {
            Self::FiveK => population::FIVE_K_LN_SIGMA,
            Self::TenK => population::TEN_K_LN_SIGMA,
            Self::HalfMarathon => population::HALF_LN_SIGMA,
            Self::Marathon => population::MARATHON_LN_SIGMA,
        }
    }
}

impl fmt::Display for DistanceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Standard normal cumulative distribution function
///
/// Abramowitz & Stegun formula 26.2.17, accurate to about `7.5e-8`, which is
/// far below the resolution of the percentile model it feeds. `NaN` maps to
/// the median.
#[must_use]
pub fn standard_normal_cdf(z: f64) -> f64 {
    if z.is_nan() {
        return 0.5;
    }
    // Beyond 8 sigma the tail mass is under 1e-15; avoid wasted exp() work.
    if z > 8.0 {
        return 1.0;
    }
    if z < -8.0 {
        return 0.0;
    }

    let abs_z = z.abs();
    let t = 1.0 / 0.231_641_9_f64.mul_add(abs_z, 1.0);
    let poly = 1.330_274_429_f64
        .mul_add(t, -1.821_255_978)
        .mul_add(t, 1.781_477_937)
        .mul_add(t, -0.356_563_782)
        .mul_add(t, 0.319_381_530)
        * t;
    let density = (-0.5 * abs_z * abs_z).exp() / (2.0 * PI).sqrt();
    let tail = density * poly;

    if z >= 0.0 {
        1.0 - tail
    } else {
        tail
    }
}

/// Fraction of the reference population expected to finish faster than
/// `seconds` (lower is better)
///
/// The base distribution is age-adjusted: the median drifts slower and the
/// spread widens past the fit age. Degenerate times (non-positive, NaN,
/// infinite) return the median `0.5`.
#[must_use]
pub fn population_percentile(
    bucket: DistanceBucket,
    sex: Sex,
    age: u32,
    seconds: f64,
    config: &ReferenceConfig,
) -> f64 {
    if !seconds.is_finite() || seconds <= f64::EPSILON {
        return 0.5;
    }

    let years_past_fit = f64::from(age.saturating_sub(population::REFERENCE_AGE_YEARS));
    let ln_mean = config
        .age_ln_mean_drift_per_year
        .mul_add(years_past_fit, bucket.ln_mean(sex));
    let ln_sigma = config
        .age_ln_sigma_drift_per_year
        .mul_add(years_past_fit, bucket.ln_sigma());
    if ln_sigma <= 0.0 {
        return 0.5;
    }

    let z = (seconds.ln() - ln_mean) / ln_sigma;
    standard_normal_cdf(z)
}

/// Expected finishing time of this athlete on this course (seconds)
///
/// World-record anchor for the bucket, multiplied by the age factor
/// (quadratic away from the peak age), the sex factor, the ability-level
/// step chosen from `level_percentile`, the surface factor, and the
/// temperature factor. An unknown surface scores as road; an unknown
/// temperature applies no slowdown.
#[must_use]
pub fn reference_time(
    bucket: DistanceBucket,
    sex: Sex,
    age: u32,
    level_percentile: f64,
    surface: Option<Surface>,
    temperature_c: Option<f64>,
    config: &ReferenceConfig,
) -> f64 {
    let record = bucket.record_seconds(config).max(1.0);

    let age_diff = f64::from(age) - f64::from(population::REFERENCE_AGE_YEARS);
    let age_factor = config.age_quadratic_coeff.mul_add(age_diff * age_diff, 1.0);

    let sex_factor = match sex {
        Sex::Male => 1.0,
        Sex::Female => config.female_factor,
    };

    let surface_factor = surface.unwrap_or_default().reference_factor();

    let temperature_factor = temperature_c.map_or(1.0, |t| {
        config
            .temperature_slowdown_per_degree
            .mul_add((t - config.temperature_baseline_c).max(0.0), 1.0)
    });

    record
        * age_factor
        * sex_factor
        * level_factor(level_percentile, config)
        * surface_factor
        * temperature_factor
}

/// Ability-level reference-time multiplier chosen from the population percentile
///
/// Elite performances are held to the record itself; each step down the
/// ladder is granted a slower reference so the pace term compares runners
/// against their own cohort rather than against the world record.
fn level_factor(percentile: f64, config: &ReferenceConfig) -> f64 {
    if percentile <= config.elite_percentile {
        config.elite_factor
    } else if percentile <= config.competitive_percentile {
        config.competitive_factor
    } else if percentile <= config.trained_percentile {
        config.trained_factor
    } else if percentile <= config.recreational_percentile {
        config.recreational_factor
    } else {
        config.novice_factor
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn buckets_cover_the_distance_line() {
        assert_eq!(DistanceBucket::for_distance(0.0), DistanceBucket::FiveK);
        assert_eq!(DistanceBucket::for_distance(5_000.0), DistanceBucket::FiveK);
        assert_eq!(DistanceBucket::for_distance(8_000.0), DistanceBucket::FiveK);
        assert_eq!(DistanceBucket::for_distance(8_000.1), DistanceBucket::TenK);
        assert_eq!(DistanceBucket::for_distance(16_000.0), DistanceBucket::TenK);
        assert_eq!(
            DistanceBucket::for_distance(21_097.5),
            DistanceBucket::HalfMarathon
        );
        assert_eq!(
            DistanceBucket::for_distance(42_195.0),
            DistanceBucket::Marathon
        );
    }

    #[test]
    fn normal_cdf_matches_reference_points() {
        assert!((standard_normal_cdf(0.0) - 0.5).abs() < 1e-7);
        assert!((standard_normal_cdf(1.96) - 0.975).abs() < 1e-3);
        assert!((standard_normal_cdf(-1.96) - 0.025).abs() < 1e-3);
        assert!((standard_normal_cdf(1.0) - 0.841_344_7).abs() < 1e-6);
        assert!(standard_normal_cdf(9.0) > 0.999_999);
        assert!(standard_normal_cdf(-9.0) < 1e-6);
        assert!((standard_normal_cdf(f64::NAN) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn normal_cdf_is_symmetric() {
        for z in [0.1, 0.5, 1.0, 2.0, 3.5] {
            let sum = standard_normal_cdf(z) + standard_normal_cdf(-z);
            assert!((sum - 1.0).abs() < 1e-7, "asymmetric at {z}: {sum}");
        }
    }

    #[test]
    fn faster_time_means_lower_percentile() {
        let config = ReferenceConfig::default();
        let fast = population_percentile(DistanceBucket::TenK, Sex::Male, 30, 2_400.0, &config);
        let slow = population_percentile(DistanceBucket::TenK, Sex::Male, 30, 3_600.0, &config);
        assert!(
            fast < slow,
            "40min 10k must rank above 60min 10k: {fast} vs {slow}"
        );
    }

    #[test]
    fn percentile_is_age_adjusted() {
        let config = ReferenceConfig::default();
        // Same finishing time ranks better in an older population
        let open = population_percentile(DistanceBucket::TenK, Sex::Male, 30, 3_000.0, &config);
        let masters = population_percentile(DistanceBucket::TenK, Sex::Male, 55, 3_000.0, &config);
        assert!(
            masters < open,
            "same 10k time must rank better at 55: {masters} vs {open}"
        );
    }

    #[test]
    fn degenerate_times_fall_back_to_the_median() {
        let config = ReferenceConfig::default();
        for bad in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let pct = population_percentile(DistanceBucket::FiveK, Sex::Female, 30, bad, &config);
            assert!((pct - 0.5).abs() < f64::EPSILON, "got {pct} for {bad}");
        }
    }

    #[test]
    fn median_time_sits_near_the_median_percentile() {
        let config = ReferenceConfig::default();
        // e^8.1019 is the fitted male 10k median
        let median_seconds = population::TEN_K_MALE_LN_MEAN.exp();
        let pct =
            population_percentile(DistanceBucket::TenK, Sex::Male, 30, median_seconds, &config);
        assert!((pct - 0.5).abs() < 1e-6, "median must map to 0.5, got {pct}");
    }

    #[test]
    fn reference_time_slows_with_heat_trail_and_age() {
        let config = ReferenceConfig::default();
        let base = reference_time(
            DistanceBucket::TenK,
            Sex::Male,
            30,
            0.5,
            None,
            None,
            &config,
        );
        let hot = reference_time(
            DistanceBucket::TenK,
            Sex::Male,
            30,
            0.5,
            None,
            Some(30.0),
            &config,
        );
        let trail = reference_time(
            DistanceBucket::TenK,
            Sex::Male,
            30,
            0.5,
            Some(Surface::Trail),
            None,
            &config,
        );
        let masters = reference_time(
            DistanceBucket::TenK,
            Sex::Male,
            60,
            0.5,
            None,
            None,
            &config,
        );
        assert!(hot > base, "heat must slow the reference: {hot} vs {base}");
        assert!(trail > base, "trail must slow the reference: {trail} vs {base}");
        assert!(masters > base, "age must slow the reference: {masters} vs {base}");
    }

    #[test]
    fn cold_weather_applies_no_speedup() {
        let config = ReferenceConfig::default();
        let base = reference_time(
            DistanceBucket::FiveK,
            Sex::Male,
            30,
            0.5,
            None,
            None,
            &config,
        );
        let cold = reference_time(
            DistanceBucket::FiveK,
            Sex::Male,
            30,
            0.5,
            None,
            Some(-5.0),
            &config,
        );
        assert!((cold - base).abs() < 1e-9, "cold must be neutral: {cold} vs {base}");
    }

    #[test]
    fn elite_percentile_earns_the_record_reference() {
        let config = ReferenceConfig::default();
        let elite = reference_time(
            DistanceBucket::FiveK,
            Sex::Male,
            30,
            0.01,
            None,
            None,
            &config,
        );
        assert!(
            (elite - config.five_k_record_seconds).abs() < 1e-9,
            "elite male 30 on road gets the raw record, got {elite}"
        );
    }

    #[test]
    fn level_ladder_is_monotone_in_percentile() {
        let config = ReferenceConfig::default();
        let mut last = 0.0;
        for pct in [0.01, 0.05, 0.2, 0.5, 0.9] {
            let t = reference_time(
                DistanceBucket::Marathon,
                Sex::Female,
                40,
                pct,
                None,
                None,
                &config,
            );
            assert!(t >= last, "reference must not speed up as percentile worsens");
            last = t;
        }
    }
}
