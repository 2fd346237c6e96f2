// ABOUTME: Domain models for runs, sensor streams, scores, and athlete context
// ABOUTME: Serde value objects shared by the engine, the ingest pipeline, and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! Core data models shared across the workspace
//!
//! Everything here is a plain value object: cloneable, serializable, and free
//! of behavior beyond input sanitation and display helpers. The scoring
//! engine consumes these types but never mutates caller-owned data.

use crate::constants::athlete_defaults;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Biological sex used by the reference-time and population models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Sex {
    /// Male reference tables
    #[default]
    #[serde(rename = "M")]
    Male,
    /// Female reference tables
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    /// Single-letter code as stored by the upstream trackers
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

/// Running surface, when the source reports one
///
/// Each surface carries a reference-time multiplier: road is the baseline,
/// track is marginally faster, and trail surfaces slow the expected time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// All-weather athletics track
    Track,
    /// Asphalt road (baseline surface)
    #[default]
    Road,
    /// Gravel or forest road
    Gravel,
    /// Single-track trail
    Trail,
    /// Technical mountain trail
    TechnicalTrail,
}

impl Surface {
    /// Reference-time multiplier for this surface (road = 1.0)
    #[must_use]
    pub const fn reference_factor(self) -> f64 {
        use crate::constants::reference_time as rt;
        match self {
            Self::Track => rt::TRACK_FACTOR,
            Self::Road => rt::ROAD_FACTOR,
            Self::Gravel => rt::GRAVEL_FACTOR,
            Self::Trail => rt::TRAIL_FACTOR,
            Self::TechnicalTrail => rt::TECHNICAL_TRAIL_FACTOR,
        }
    }
}

/// Weather observed at the start of a run
///
/// Carried as `Option<WeatherSample>` on [`RunMetrics`]: an absent sample
/// means conditions are unknown and the score applies no weather credit,
/// rather than pretending a default measurement happened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// Air temperature in degrees Celsius
    pub temperature_c: f64,
    /// Relative humidity in percent (0-100)
    pub humidity_pct: f64,
}

impl WeatherSample {
    /// Build a sample from raw observations
    #[must_use]
    pub const fn new(temperature_c: f64, humidity_pct: f64) -> Self {
        Self {
            temperature_c,
            humidity_pct,
        }
    }
}

/// Aggregated metrics of one completed run, plus the athlete context
/// needed to interpret them
///
/// Construct with struct-update syntax over [`RunMetrics::default`] and call
/// [`RunMetrics::sanitized`] before feeding the value into formulas; the
/// engine does the latter itself, so degenerate profiles can never divide
/// by zero inside the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Average running power over the run (watts)
    pub avg_power: f64,
    /// Average heart rate over the run (bpm)
    pub avg_hr: f64,
    /// Total distance (meters)
    pub distance_meters: f64,
    /// Moving time (seconds)
    pub moving_time_seconds: u64,
    /// Total elevation gain (meters)
    pub elevation_gain_meters: f64,
    /// Athlete body weight (kg)
    pub weight_kg: f64,
    /// Athlete maximal heart rate (bpm)
    pub hr_max: u32,
    /// Athlete resting heart rate (bpm)
    pub hr_rest: u32,
    /// Athlete age (years)
    pub age: u32,
    /// Athlete biological sex for the reference tables
    pub sex: Sex,
    /// Weather at the start of the run, when known
    pub weather: Option<WeatherSample>,
    /// Running surface, when the source reports one; `None` scores as road
    pub surface: Option<Surface>,
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self {
            avg_power: 0.0,
            avg_hr: 0.0,
            distance_meters: 0.0,
            moving_time_seconds: 0,
            elevation_gain_meters: 0.0,
            weight_kg: athlete_defaults::WEIGHT_KG,
            hr_max: athlete_defaults::HR_MAX,
            hr_rest: athlete_defaults::HR_REST,
            age: athlete_defaults::AGE_YEARS,
            sex: Sex::Male,
            weather: None,
            surface: None,
        }
    }
}

impl RunMetrics {
    /// Replace degenerate profile values with the documented defaults
    ///
    /// Measured values are floored at zero and non-finite floats are zeroed;
    /// profile values (weight, heart rates, age) fall back to
    /// [`crate::constants::athlete_defaults`]. The result is safe to divide by.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !self.avg_power.is_finite() || self.avg_power < 0.0 {
            self.avg_power = 0.0;
        }
        if !self.avg_hr.is_finite() || self.avg_hr < 0.0 {
            self.avg_hr = 0.0;
        }
        if !self.distance_meters.is_finite() || self.distance_meters < 0.0 {
            self.distance_meters = 0.0;
        }
        if !self.elevation_gain_meters.is_finite() || self.elevation_gain_meters < 0.0 {
            self.elevation_gain_meters = 0.0;
        }
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            self.weight_kg = athlete_defaults::WEIGHT_KG;
        }
        if self.hr_max == 0 || self.hr_rest >= self.hr_max {
            self.hr_max = athlete_defaults::HR_MAX;
            self.hr_rest = athlete_defaults::HR_REST;
        }
        if self.age == 0 {
            self.age = athlete_defaults::AGE_YEARS;
        }
        if let Some(weather) = self.weather {
            if !weather.temperature_c.is_finite() || !weather.humidity_pct.is_finite() {
                self.weather = None;
            }
        }
        self
    }

    /// Moving time in fractional hours
    #[must_use]
    pub fn duration_hours(&self) -> f64 {
        self.moving_time_seconds as f64 / 3600.0
    }
}

/// Raw per-second sensor streams of one run
///
/// The engine reads these as slices and never takes ownership; records and
/// sources use this owned carrier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStreams {
    /// Per-second running power samples (watts)
    pub watts: Vec<f64>,
    /// Per-second heart rate samples (bpm)
    pub heart_rate: Vec<f64>,
}

impl RawStreams {
    /// Build a stream pair from sample vectors
    #[must_use]
    pub const fn new(watts: Vec<f64>, heart_rate: Vec<f64>) -> Self {
        Self { watts, heart_rate }
    }

    /// Whether both streams carry at least `min_samples` samples
    #[must_use]
    pub fn is_complete(&self, min_samples: usize) -> bool {
        self.watts.len() >= min_samples && self.heart_rate.len() >= min_samples
    }

    /// Mean of the power stream, `None` when empty
    #[must_use]
    pub fn mean_power(&self) -> Option<f64> {
        if self.watts.is_empty() {
            return None;
        }
        Some(self.watts.iter().sum::<f64>() / self.watts.len() as f64)
    }

    /// Mean of the heart rate stream, `None` when empty
    #[must_use]
    pub fn mean_heart_rate(&self) -> Option<f64> {
        if self.heart_rate.is_empty() {
            return None;
        }
        Some(self.heart_rate.iter().sum::<f64>() / self.heart_rate.len() as f64)
    }
}

/// Score formula revision tags
///
/// Exactly one revision is live: [`ScoreFormulaVersion::CURRENT`]. Older tags
/// exist so stored scores keep their provenance and can be replayed under the
/// current formula; the legacy formulas themselves are not implemented.
///
/// Revision history:
///
/// - `V1Additive`: weighted sum `0.5*power + 0.3*volume + 0.2*intensity`
///   minus a drift malus. Bounded but insensitive at the extremes.
/// - `V2PaceRatio`: multiplicative form against a flat reference pace.
///   Unbounded above; scores drifted between sync batches.
/// - `V3WorldRecord`: multiplicative form anchored to world-record W/kg.
///   Compressed all recreational runs into a narrow band.
/// - `V4Percentile`: multiplicative terms against a percentile-calibrated
///   reference time, logistic-normalized to [0, 100). The live revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFormulaVersion {
    /// Legacy weighted-sum revision
    V1Additive,
    /// Legacy flat-reference-pace revision
    V2PaceRatio,
    /// Legacy world-record-anchored revision
    V3WorldRecord,
    /// Percentile-calibrated, logistic-normalized revision
    V4Percentile,
}

impl ScoreFormulaVersion {
    /// The revision every new score is computed under
    pub const CURRENT: Self = Self::V4Percentile;

    /// Stable identifier used in logs and exports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1Additive => "v1-additive",
            Self::V2PaceRatio => "v2-pace-ratio",
            Self::V3WorldRecord => "v3-world-record",
            Self::V4Percentile => "v4-percentile",
        }
    }
}

impl fmt::Display for ScoreFormulaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank tier assigned from the normalized 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankTier {
    /// Top of the ladder
    Elite,
    /// Second tier
    Pro,
    /// Third tier
    Advanced,
    /// Fourth tier
    Intermediate,
    /// Catch-all bottom tier
    Rookie,
}

impl RankTier {
    /// Human-readable tier label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Elite => "Elite",
            Self::Pro => "Pro",
            Self::Advanced => "Advanced",
            Self::Intermediate => "Intermediate",
            Self::Rookie => "Rookie",
        }
    }

    /// Hex color hint used by dashboard badges
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Elite => "#FFD700",
            Self::Pro => "#C0C0C0",
            Self::Advanced => "#CD7F32",
            Self::Intermediate => "#4CAF50",
            Self::Rookie => "#9E9E9E",
        }
    }
}

impl fmt::Display for RankTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Quality grade of a single run on the gamification ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunQuality {
    /// Score of 90 or above
    Legendary,
    /// Score of 80 or above
    Epic,
    /// Score of 70 or above
    Great,
    /// Score of 55 or above
    Solid,
    /// Score of 40 or above
    Okay,
    /// Score of 25 or above
    Weak,
    /// Everything below the Weak threshold
    #[default]
    Wasted,
}

impl RunQuality {
    /// Human-readable grade label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Legendary => "Legendary",
            Self::Epic => "Epic",
            Self::Great => "Great",
            Self::Solid => "Solid",
            Self::Okay => "Okay",
            Self::Weak => "Weak",
            Self::Wasted => "Wasted",
        }
    }

    /// Hex color hint used by dashboard badges
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Legendary => "#FFD700",
            Self::Epic => "#9C27B0",
            Self::Great => "#2196F3",
            Self::Solid => "#4CAF50",
            Self::Okay => "#FFC107",
            Self::Weak => "#FF9800",
            Self::Wasted => "#9E9E9E",
        }
    }
}

impl fmt::Display for RunQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-term breakdown backing an explainable score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetails {
    /// Raw multiplier contributed by each term, keyed by term name
    /// (`Power`, `Intensity`, `Weather`, `Pace`, `Stability`)
    pub contributions: BTreeMap<String, f64>,
    /// Reference finishing time for this athlete and course, formatted
    /// as `m:ss` or `h:mm:ss`
    pub target_time: String,
    /// Whether aerobic drift exceeded the warning threshold on this run
    pub efficiency_malus: bool,
}

/// Complete outcome of scoring one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Normalized score in [0, 100)
    pub score: f64,
    /// Per-term breakdown and reference-time context
    pub details: ScoreDetails,
    /// Weather difficulty factor applied (1.0 = neutral conditions)
    pub weather_factor: f64,
    /// Share of the reference population expected to finish slower,
    /// in percent (higher is better)
    pub relative_performance_pct: f64,
    /// Quality grade of this run
    pub quality: RunQuality,
    /// Formula revision that produced this score
    pub version: ScoreFormulaVersion,
}

/// Listing entry returned by an activity source before streams are fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Source-assigned activity identifier
    pub id: String,
    /// Activity title as entered by the athlete
    pub name: String,
    /// Start timestamp in UTC
    pub start_date: DateTime<Utc>,
    /// Total distance (meters)
    pub distance_meters: f64,
    /// Moving time (seconds)
    pub moving_time_seconds: u64,
    /// Total elevation gain (meters)
    pub elevation_gain_meters: f64,
    /// Average power reported by the source summary, when present
    pub average_power: Option<f64>,
    /// Average heart rate reported by the source summary, when present
    pub average_heart_rate: Option<f64>,
    /// Start coordinates (latitude, longitude), when recorded
    pub start_latlng: Option<(f64, f64)>,
}

/// One fully scored run as persisted in a run store
///
/// Records are append-mostly and immutable once written; replaying a record
/// under a newer formula produces a fresh [`ScoreResult`] without touching
/// the stored values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Source-assigned activity identifier
    pub id: String,
    /// Activity title as entered by the athlete
    pub name: String,
    /// Start timestamp in UTC
    pub start_date: DateTime<Utc>,
    /// Aggregated metrics and athlete context used for the stored score
    pub metrics: RunMetrics,
    /// Raw sensor streams backing drift and zone calculations
    pub streams: RawStreams,
    /// Signed aerobic decoupling of this run (negative = second half
    /// more efficient)
    pub decoupling: f64,
    /// Stored normalized score
    pub score: f64,
    /// Formula revision the stored score was computed under
    pub version: ScoreFormulaVersion,
    /// Rank tier at the time of scoring
    pub rank: RankTier,
    /// Quality grade at the time of scoring
    pub quality: RunQuality,
}

/// Format a duration in seconds as `m:ss` or `h:mm:ss`
///
/// Degenerate inputs render as `--:--` instead of failing.
#[must_use]
pub fn format_duration(total_seconds: f64) -> String {
    if !total_seconds.is_finite() || total_seconds <= 0.0 {
        return "--:--".to_owned();
    }
    let secs = total_seconds.round() as u64;
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn sanitized_replaces_degenerate_profile_values() {
        let metrics = RunMetrics {
            avg_power: f64::NAN,
            weight_kg: -5.0,
            hr_max: 60,
            hr_rest: 80,
            age: 0,
            ..RunMetrics::default()
        }
        .sanitized();

        assert!((metrics.avg_power - 0.0).abs() < f64::EPSILON);
        assert!((metrics.weight_kg - athlete_defaults::WEIGHT_KG).abs() < f64::EPSILON);
        assert_eq!(metrics.hr_max, athlete_defaults::HR_MAX);
        assert_eq!(metrics.hr_rest, athlete_defaults::HR_REST);
        assert_eq!(metrics.age, athlete_defaults::AGE_YEARS);
    }

    #[test]
    fn sanitized_keeps_valid_values_untouched() {
        let metrics = RunMetrics {
            avg_power: 250.0,
            avg_hr: 160.0,
            distance_meters: 10_000.0,
            weight_kg: 72.5,
            hr_max: 190,
            hr_rest: 42,
            age: 44,
            ..RunMetrics::default()
        };
        let sanitized = metrics.clone().sanitized();
        assert_eq!(metrics, sanitized);
    }

    #[test]
    fn sanitized_drops_non_finite_weather() {
        let metrics = RunMetrics {
            weather: Some(WeatherSample::new(f64::INFINITY, 50.0)),
            ..RunMetrics::default()
        }
        .sanitized();
        assert!(metrics.weather.is_none());
    }

    #[test]
    fn streams_completeness_requires_both_streams() {
        let streams = RawStreams::new(vec![200.0; 300], vec![150.0; 100]);
        assert!(!streams.is_complete(300));
        assert!(streams.is_complete(100));
    }

    #[test]
    fn duration_formats_with_and_without_hours() {
        assert_eq!(format_duration(2_063.0), "34:23");
        assert_eq!(format_duration(3_912.0), "1:05:12");
        assert_eq!(format_duration(-3.0), "--:--");
        assert_eq!(format_duration(f64::NAN), "--:--");
    }

    #[test]
    fn formula_version_serializes_as_snake_case_tag() {
        let json = serde_json::to_string(&ScoreFormulaVersion::CURRENT).unwrap();
        assert_eq!(json, "\"v4_percentile\"");
        let back: ScoreFormulaVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ScoreFormulaVersion::V4Percentile);
    }
}
