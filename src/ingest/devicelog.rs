// ABOUTME: Watch-export JSON import: DeviceLog/Header/Samples into engine inputs
// ABOUTME: Pairs HR and power samples, fixing sub-10 heart-rate values logged in Hz
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! Device-log import
//!
//! Sport watches export sessions as a `DeviceLog` JSON envelope: a `Header`
//! with the session totals and a `Samples` array mixing sensor readings.
//! Only samples carrying both a heart-rate and a power value feed the
//! streams; everything else (GPS fixes, barometer rows) is skipped.
//!
//! Some firmwares log heart rate in beats per *second*. Values below 10 are
//! taken as Hz and scaled by 60 before they enter the stream.

use chrono::{DateTime, NaiveDateTime, Utc};
use runscore_core::constants::athlete_defaults;
use runscore_core::{RawStreams, RunMetrics};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Heart-rate readings below this are Hz, not bpm
const HR_HZ_CEILING: f64 = 10.0;

/// Why a device log could not be imported
#[derive(Debug, Error)]
pub enum DeviceLogError {
    /// The file could not be read at all
    #[error("cannot read device log: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON or lacks the `DeviceLog` envelope
    #[error("device log is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// No sample carried both a heart-rate and a power value
    #[error("device log has no samples carrying both heart rate and power")]
    NoUsableSamples,
}

/// A device log lifted into engine inputs
///
/// Athlete context (weight, resting heart rate, age, sex) is not part of a
/// watch export; the metrics carry the documented defaults until the caller
/// overlays a profile.
#[derive(Debug, Clone)]
pub struct DeviceLogImport {
    /// Session start, `Utc::now()` when the header carries no timestamp
    pub start_date: DateTime<Utc>,
    /// Aggregated metrics ready for scoring
    pub metrics: RunMetrics,
    /// Paired per-sample power and heart-rate streams
    pub streams: RawStreams,
}

#[derive(Debug, Deserialize)]
struct DeviceLogFile {
    #[serde(rename = "DeviceLog")]
    device_log: DeviceLogBody,
}

#[derive(Debug, Deserialize, Default)]
struct DeviceLogBody {
    #[serde(rename = "Header", default)]
    header: Header,
    #[serde(rename = "Samples", default)]
    samples: Vec<Sample>,
}

#[derive(Debug, Deserialize, Default)]
struct Header {
    #[serde(rename = "Distance", default)]
    distance: f64,
    #[serde(rename = "Duration", default)]
    duration: f64,
    #[serde(rename = "Ascent", default)]
    ascent: f64,
    #[serde(rename = "HrMax")]
    hr_max: Option<f64>,
    #[serde(rename = "DateTime")]
    date_time: Option<String>,
}

/// One row of the `Samples` array; keys vary by firmware
#[derive(Debug, Deserialize)]
struct Sample {
    #[serde(rename = "HR")]
    hr: Option<f64>,
    #[serde(rename = "HeartRate")]
    heart_rate: Option<f64>,
    #[serde(rename = "Power")]
    power: Option<f64>,
}

/// Import a device log from a file on disk
///
/// # Errors
///
/// Returns a [`DeviceLogError`] when the file cannot be read, is not a
/// `DeviceLog` JSON envelope, or carries no usable samples.
pub fn import_device_log(path: &Path) -> Result<DeviceLogImport, DeviceLogError> {
    let raw = std::fs::read_to_string(path)?;
    parse_device_log(&raw)
}

/// Parse a device log from its JSON text
///
/// # Errors
///
/// Returns a [`DeviceLogError`] when the text is not a `DeviceLog` JSON
/// envelope or carries no usable samples.
pub fn parse_device_log(json: &str) -> Result<DeviceLogImport, DeviceLogError> {
    let file: DeviceLogFile = serde_json::from_str(json)?;
    let body = file.device_log;

    let mut watts = Vec::new();
    let mut heart_rate = Vec::new();
    for sample in &body.samples {
        let (Some(h), Some(p)) = (sample.hr.or(sample.heart_rate), sample.power) else {
            continue;
        };
        let bpm = if h < HR_HZ_CEILING { h * 60.0 } else { h };
        heart_rate.push(bpm);
        watts.push(p);
    }

    if watts.is_empty() {
        return Err(DeviceLogError::NoUsableSamples);
    }

    debug!(
        samples = body.samples.len(),
        paired = watts.len(),
        "device log parsed"
    );

    let streams = RawStreams::new(watts, heart_rate);
    let metrics = RunMetrics {
        avg_power: streams.mean_power().unwrap_or_default(),
        avg_hr: streams.mean_heart_rate().unwrap_or_default(),
        distance_meters: body.header.distance.max(0.0),
        moving_time_seconds: body.header.duration.max(0.0) as u64,
        elevation_gain_meters: body.header.ascent.max(0.0),
        hr_max: body
            .header
            .hr_max
            .map_or(athlete_defaults::HR_MAX, |h| h.max(0.0) as u32),
        ..RunMetrics::default()
    };

    Ok(DeviceLogImport {
        start_date: parse_start_date(body.header.date_time.as_deref()),
        metrics,
        streams,
    })
}

/// Header timestamps come with or without a timezone depending on firmware
fn parse_start_date(raw: Option<&str>) -> DateTime<Utc> {
    raw.and_then(|value| {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    })
    .unwrap_or_else(Utc::now)
}
