// ABOUTME: Physiological and scoring-model constants based on sports science sources
// ABOUTME: Reference tables for world records, population distributions, and formula parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! Physiological and model constants used throughout the scoring engine
//!
//! Values are drawn from published records, large public race-result
//! distributions, and established exercise-physiology guidelines. Every
//! tunable read by the engine configuration defaults to a constant defined
//! here, so the whole model is auditable in one place.

/// Default athlete profile applied when a measurement is missing or degenerate
///
/// References:
/// - ACSM Guidelines for Exercise Testing and Prescription, 11th Edition
///   (resting and maximal heart rate reference ranges)
pub mod athlete_defaults {
    /// Body weight fallback when the profile reports zero or negative (kg)
    pub const WEIGHT_KG: f64 = 70.0;

    /// Maximal heart rate fallback (bpm)
    /// Tanaka, H., Monahan, K.D., & Seals, D.R. (2001). Age-predicted maximal heart rate revisited
    pub const HR_MAX: u32 = 185;

    /// Resting heart rate fallback for a trained runner (bpm)
    pub const HR_REST: u32 = 50;

    /// Functional threshold power fallback for zone bucketing (watts)
    pub const FTP_WATTS: f64 = 250.0;

    /// Age fallback when the profile reports zero (years)
    pub const AGE_YEARS: u32 = 30;
}

/// Power-to-weight parameters for the power-efficiency term
///
/// References:
/// - Coggan, A. & Allen, H. (2010). Training and Racing with a Power Meter
/// - Stryd running-power population data for elite distance runners
pub mod power {
    /// Elite running power-to-weight benchmark (W/kg)
    /// Sustained race power of world-class distance runners sits near this value
    pub const REFERENCE_WKG: f64 = 6.0;
}

/// Heart rate reserve band accepted by the cardiac-cost term
///
/// References:
/// - Karvonen, M.J. (1957). The effects of training on heart rate
/// - ACSM intensity classification via %HRR
pub mod heart_rate {
    /// Lowest heart rate reserve fraction treated as a genuine aerobic effort
    /// Below this the recording is assumed corrupted (sensor dropouts, walk breaks)
    pub const HRR_FLOOR: f64 = 0.30;

    /// Highest heart rate reserve fraction accepted before clamping
    /// Sustained efforts above 95% HRR over a full run are measurement noise
    pub const HRR_CEILING: f64 = 0.95;
}

/// Weather penalty model for heat and humidity
///
/// References:
/// - Ely, M.R., et al. (2007). Impact of weather on marathon-running performance.
///   *Medicine & Science in Sports & Exercise*, 39(3), 487-493
pub mod weather {
    /// Temperature above which performance degrades (Celsius)
    pub const NEUTRAL_TEMPERATURE_C: f64 = 20.0;

    /// Relative humidity above which performance degrades (percent)
    pub const NEUTRAL_HUMIDITY_PCT: f64 = 60.0;

    /// Score credit per degree Celsius above the neutral temperature
    pub const TEMPERATURE_PENALTY_PER_DEGREE: f64 = 0.012;

    /// Score credit per humidity point above the neutral humidity
    pub const HUMIDITY_PENALTY_PER_POINT: f64 = 0.000_5;

    /// Upper bound for the combined weather factor
    pub const MAX_WEATHER_FACTOR: f64 = 1.5;
}

/// Pace-performance term bounds
pub mod pace {
    /// Floor for the reference-to-actual time ratio
    /// Keeps one disastrous run from zeroing the whole product
    pub const RATIO_FLOOR: f64 = 0.6;

    /// Ceiling for the reference-to-actual time ratio
    /// Keeps a single fast run from dominating the whole product
    pub const RATIO_CEILING: f64 = 1.2;
}

/// Aerobic decoupling (power:HR drift) parameters
///
/// References:
/// - Friel, J. (2012). Aerobic decoupling as a marker of aerobic endurance
/// - TrainingPeaks Pw:Hr decoupling guidance (5% as the well-trained threshold)
pub mod decoupling {
    /// Minimum per-second samples required in each stream before drift is computed
    /// Shorter recordings produce half-means too noisy to interpret
    pub const MIN_STREAM_SAMPLES: usize = 120;

    /// Exponential damping applied to positive drift in the stability term
    pub const DRIFT_DAMPING_ALPHA: f64 = 0.8;

    /// Duration floor used when normalizing drift by run length (hours)
    pub const MIN_DURATION_HOURS: f64 = 0.1;

    /// Drift above this fraction marks a noteworthy efficiency loss
    pub const DRIFT_WARNING_THRESHOLD: f64 = 0.05;

    /// Drift above this fraction marks a critical efficiency loss
    pub const DRIFT_CRITICAL_THRESHOLD: f64 = 0.10;
}

/// Logistic normalization of the raw multiplicative score
pub mod scoring {
    /// Steepness of the logistic mapping from raw product to the 0-100 scale
    /// `score = 100 * (1 - exp(-k * raw))`
    pub const LOGISTIC_STEEPNESS: f64 = 5.0;

    /// Upper asymptote of the normalized score
    pub const MAX_SCORE: f64 = 100.0;
}

/// World-record finishing times anchoring the reference-time model (seconds)
///
/// Men's road records as ratified or pending ratification in 2025:
/// - 5 km: 12:35 (Berihu Aregawi, Barcelona 2025)
/// - 10 km: 26:11 (Rhonex Kipruto lineage, rounded to the track mark)
/// - Half marathon: 56:42 (Jacob Kiplimo, Barcelona 2025)
/// - Marathon: 2:00:35 (Kelvin Kiptum, Chicago 2023)
pub mod world_records {
    /// 5 km world-record seconds
    pub const FIVE_K_SECONDS: f64 = 755.0;

    /// 10 km world-record seconds
    pub const TEN_K_SECONDS: f64 = 1_571.0;

    /// Half-marathon world-record seconds
    pub const HALF_MARATHON_SECONDS: f64 = 3_402.0;

    /// Marathon world-record seconds
    pub const MARATHON_SECONDS: f64 = 7_235.0;
}

/// Log-normal population models of finishing times per distance and sex
///
/// Parameters are fitted to `ln(finishing seconds)` over large public race
/// result sets (parkrun aggregate statistics and marathon census data).
/// The implied medians: male 5k 28:01, 10k 54:55, half 2:01:57, marathon
/// 4:21:07; female marks roughly 10% slower, matching published gender gaps.
///
/// References:
/// - RunRepeat/IAAF "The State of Running" population study
/// - parkrun aggregate finishing-time statistics
pub mod population {
    /// Mean of ln(seconds), male 5 km
    pub const FIVE_K_MALE_LN_MEAN: f64 = 7.4265;
    /// Mean of ln(seconds), female 5 km
    pub const FIVE_K_FEMALE_LN_MEAN: f64 = 7.5909;
    /// Standard deviation of ln(seconds), 5 km
    pub const FIVE_K_LN_SIGMA: f64 = 0.24;

    /// Mean of ln(seconds), male 10 km
    pub const TEN_K_MALE_LN_MEAN: f64 = 8.1019;
    /// Mean of ln(seconds), female 10 km
    pub const TEN_K_FEMALE_LN_MEAN: f64 = 8.2532;
    /// Standard deviation of ln(seconds), 10 km
    pub const TEN_K_LN_SIGMA: f64 = 0.22;

    /// Mean of ln(seconds), male half marathon
    pub const HALF_MALE_LN_MEAN: f64 = 8.8985;
    /// Mean of ln(seconds), female half marathon
    pub const HALF_FEMALE_LN_MEAN: f64 = 9.0216;
    /// Standard deviation of ln(seconds), half marathon
    pub const HALF_LN_SIGMA: f64 = 0.21;

    /// Mean of ln(seconds), male marathon
    pub const MARATHON_MALE_LN_MEAN: f64 = 9.6589;
    /// Mean of ln(seconds), female marathon
    pub const MARATHON_FEMALE_LN_MEAN: f64 = 9.7573;
    /// Standard deviation of ln(seconds), marathon
    pub const MARATHON_LN_SIGMA: f64 = 0.20;

    /// Median slowdown per year of age past the reference age, in ln-space
    pub const AGE_LN_MEAN_DRIFT_PER_YEAR: f64 = 0.003;

    /// Spread increase per year of age past the reference age, in ln-space
    pub const AGE_LN_SIGMA_DRIFT_PER_YEAR: f64 = 0.001;

    /// Age at which the base distribution parameters were fitted (years)
    pub const REFERENCE_AGE_YEARS: u32 = 30;
}

/// Reference-time adjustment factors layered onto the world-record base
///
/// References:
/// - WMA age-grading tables (quadratic decline away from peak age)
/// - Vickers, A.J. & Vertosick, E.A. (2016). An empirical study of race times
///   in recreational endurance runners
pub mod reference_time {
    /// Quadratic coefficient of the age factor: `1 + c * (age - 30)^2`
    pub const AGE_QUADRATIC_COEFF: f64 = 0.000_5;

    /// Multiplier applied to female reference times (records gap is ~10%)
    pub const FEMALE_FACTOR: f64 = 1.10;

    /// Temperature above which reference times slow down (Celsius)
    pub const TEMPERATURE_BASELINE_C: f64 = 15.0;

    /// Reference-time slowdown per degree Celsius above the baseline
    pub const TEMPERATURE_SLOWDOWN_PER_DEGREE: f64 = 0.002;

    /// Population percentile at or below which a runner is treated as elite
    pub const ELITE_PERCENTILE: f64 = 0.02;
    /// Reference-time multiplier for elite runners
    pub const ELITE_FACTOR: f64 = 1.0;

    /// Population percentile bound for competitive club runners
    pub const COMPETITIVE_PERCENTILE: f64 = 0.10;
    /// Reference-time multiplier for competitive club runners
    pub const COMPETITIVE_FACTOR: f64 = 1.15;

    /// Population percentile bound for trained recreational runners
    pub const TRAINED_PERCENTILE: f64 = 0.30;
    /// Reference-time multiplier for trained recreational runners
    pub const TRAINED_FACTOR: f64 = 1.30;

    /// Population percentile bound for recreational runners
    pub const RECREATIONAL_PERCENTILE: f64 = 0.60;
    /// Reference-time multiplier for recreational runners
    pub const RECREATIONAL_FACTOR: f64 = 1.50;

    /// Reference-time multiplier for novice runners (beyond the recreational bound)
    pub const NOVICE_FACTOR: f64 = 1.75;

    /// Surface multiplier: all-weather track (slightly faster than road)
    pub const TRACK_FACTOR: f64 = 0.995;
    /// Surface multiplier: asphalt road (baseline)
    pub const ROAD_FACTOR: f64 = 1.0;
    /// Surface multiplier: gravel and forest roads
    pub const GRAVEL_FACTOR: f64 = 1.08;
    /// Surface multiplier: single-track trail
    pub const TRAIL_FACTOR: f64 = 1.15;
    /// Surface multiplier: technical mountain trail
    pub const TECHNICAL_TRAIL_FACTOR: f64 = 1.30;
}

/// Distance cut-offs mapping a run onto its nearest race-distance bucket (meters)
pub mod distance_buckets {
    /// Runs up to this distance score against the 5 km model
    pub const FIVE_K_CEILING_METERS: f64 = 8_000.0;

    /// Runs up to this distance score against the 10 km model
    pub const TEN_K_CEILING_METERS: f64 = 16_000.0;

    /// Runs up to this distance score against the half-marathon model;
    /// anything longer scores against the marathon model
    pub const HALF_CEILING_METERS: f64 = 30_000.0;
}

/// Power zone cut-offs as fractions of functional threshold power
///
/// References:
/// - Coggan classic FTP zone model, adapted to six running-power bands
/// - Steve Palladino's running-power zone guidance
pub mod zones {
    /// Zone 1 ceiling (recovery)
    pub const ZONE1_CEILING: f64 = 0.55;
    /// Zone 2 ceiling (endurance)
    pub const ZONE2_CEILING: f64 = 0.75;
    /// Zone 3 ceiling (tempo)
    pub const ZONE3_CEILING: f64 = 0.90;
    /// Zone 4 ceiling (threshold)
    pub const ZONE4_CEILING: f64 = 1.05;
    /// Zone 5 ceiling (VO2max); everything above is zone 6 (anaerobic)
    pub const ZONE5_CEILING: f64 = 1.20;
}

/// Rank ladder thresholds on the normalized 0-100 score
pub mod rank {
    /// Minimum score for the Elite tier
    pub const ELITE_MIN: f64 = 85.0;
    /// Minimum score for the Pro tier
    pub const PRO_MIN: f64 = 70.0;
    /// Minimum score for the Advanced tier
    pub const ADVANCED_MIN: f64 = 55.0;
    /// Minimum score for the Intermediate tier; below is Rookie
    pub const INTERMEDIATE_MIN: f64 = 40.0;
}

/// Run-quality ladder thresholds on the normalized 0-100 score
pub mod quality {
    /// Minimum score for a Legendary run
    pub const LEGENDARY_MIN: f64 = 90.0;
    /// Minimum score for an Epic run
    pub const EPIC_MIN: f64 = 80.0;
    /// Minimum score for a Great run
    pub const GREAT_MIN: f64 = 70.0;
    /// Minimum score for a Solid run
    pub const SOLID_MIN: f64 = 55.0;
    /// Minimum score for an Okay run
    pub const OKAY_MIN: f64 = 40.0;
    /// Minimum score for a Weak run; below is Wasted
    pub const WEAK_MIN: f64 = 25.0;
}

/// Achievement, trend, and comparison parameters for the gamification layer
pub mod gamification {
    /// Latest-score threshold for the single-run Epic achievement
    pub const EPIC_RUN_MIN: f64 = 80.0;

    /// Latest-score threshold for the single-run Legend achievement
    pub const LEGEND_RUN_MIN: f64 = 90.0;

    /// Window length for the short consistency achievement
    pub const CONSISTENCY_SHORT_WINDOW: usize = 5;
    /// Minimum rolling average over the short consistency window
    pub const CONSISTENCY_SHORT_MIN_AVG: f64 = 70.0;

    /// Window length for the long consistency achievement
    pub const CONSISTENCY_LONG_WINDOW: usize = 10;
    /// Minimum rolling average over the long consistency window
    pub const CONSISTENCY_LONG_MIN_AVG: f64 = 65.0;

    /// Number of strictly improving runs that lights the On Fire streak
    pub const STREAK_LENGTH: usize = 3;

    /// A comeback starts from a score at or below this floor
    pub const COMEBACK_FLOOR: f64 = 40.0;
    /// A comeback completes with a score at or above this bar
    pub const COMEBACK_BAR: f64 = 70.0;
    /// How far back the comeback rule looks for the dip
    pub const COMEBACK_WINDOW: usize = 10;

    /// Window length compared by the quality-trend analysis
    pub const TREND_WINDOW: usize = 5;
    /// Average-score delta below which the trend reads as flat
    pub const TREND_FLAT_DELTA: f64 = 2.0;

    /// Number of prior runs the latest run is compared against
    pub const COMPARISON_WINDOW: usize = 10;
}

/// Ingest pipeline defaults
pub mod ingest {
    /// Minimum per-second samples a stream must carry to be scored at all;
    /// shorter activities are treated as unusable recordings and skipped
    pub const MIN_SCOREABLE_SAMPLES: usize = 300;

    /// Concurrent stream fetches issued against a source
    pub const FETCH_CONCURRENCY: usize = 5;
}
