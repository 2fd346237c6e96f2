// ABOUTME: Power-zone distribution bucketing watt samples by fraction of FTP
// ABOUTME: Six bands cut at configurable ceilings; shares always close to 100 percent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! Time-in-zone distribution over a power stream
//!
//! Samples are bucketed by their fraction of the athlete's functional
//! threshold power. The returned map always carries all six zones so callers
//! can render a stable table, and the shares are raw (unrounded) so they sum
//! to 100 up to float tolerance.

use crate::config::ZonesConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Power zone relative to functional threshold power
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerZone {
    /// Active recovery, below 55 % of FTP
    Z1,
    /// Endurance, 55-75 %
    Z2,
    /// Tempo, 75-90 %
    Z3,
    /// Threshold, 90-105 %
    Z4,
    /// `VO2max`, 105-120 %
    Z5,
    /// Anaerobic, above 120 %
    Z6,
}

impl PowerZone {
    /// All zones in ascending intensity order
    pub const ALL: [Self; 6] = [Self::Z1, Self::Z2, Self::Z3, Self::Z4, Self::Z5, Self::Z6];

    /// Short zone tag
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Z1 => "Z1",
            Self::Z2 => "Z2",
            Self::Z3 => "Z3",
            Self::Z4 => "Z4",
            Self::Z5 => "Z5",
            Self::Z6 => "Z6",
        }
    }

    /// Conventional training name for the zone
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Z1 => "Recovery",
            Self::Z2 => "Endurance",
            Self::Z3 => "Tempo",
            Self::Z4 => "Threshold",
            Self::Z5 => "VO2max",
            Self::Z6 => "Anaerobic",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PowerZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Share of samples per power zone, in percent
///
/// Non-finite samples are skipped. An empty or all-invalid stream, or a
/// non-positive FTP, yields an empty map; otherwise all six zones are
/// present (zero-filled where unvisited) and the shares sum to 100.
#[must_use]
pub fn zone_distribution(
    watts: &[f64],
    ftp: f64,
    config: &ZonesConfig,
) -> BTreeMap<PowerZone, f64> {
    if !ftp.is_finite() || ftp <= 0.0 {
        return BTreeMap::new();
    }

    let mut counts = [0_usize; 6];
    let mut total = 0_usize;
    for &sample in watts {
        if !sample.is_finite() {
            continue;
        }
        counts[zone_for(sample / ftp, config).index()] += 1;
        total += 1;
    }
    if total == 0 {
        return BTreeMap::new();
    }

    let scale = 100.0 / total as f64;
    PowerZone::ALL
        .iter()
        .map(|&zone| (zone, counts[zone.index()] as f64 * scale))
        .collect()
}

/// Zone for a single sample expressed as a fraction of FTP
fn zone_for(fraction: f64, config: &ZonesConfig) -> PowerZone {
    if fraction <= config.zone1_ceiling {
        PowerZone::Z1
    } else if fraction <= config.zone2_ceiling {
        PowerZone::Z2
    } else if fraction <= config.zone3_ceiling {
        PowerZone::Z3
    } else if fraction <= config.zone4_ceiling {
        PowerZone::Z4
    } else if fraction <= config.zone5_ceiling {
        PowerZone::Z5
    } else {
        PowerZone::Z6
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    const FTP: f64 = 250.0;

    #[test]
    fn shares_close_to_one_hundred() {
        let config = ZonesConfig::default();
        let watts: Vec<f64> = (0..600).map(|i| 100.0 + f64::from(i) * 0.5).collect();
        let zones = zone_distribution(&watts, FTP, &config);

        let total: f64 = zones.values().sum();
        assert!(
            (total - 100.0).abs() < 1e-9,
            "shares must close to 100, got {total}"
        );
        assert_eq!(zones.len(), 6, "all six zones must be present");
    }

    #[test]
    fn constant_stream_lands_in_one_zone() {
        let config = ZonesConfig::default();
        // 65 % of FTP sits squarely in endurance
        let watts = vec![162.5; 300];
        let zones = zone_distribution(&watts, FTP, &config);

        assert!((zones[&PowerZone::Z2] - 100.0).abs() < 1e-9);
        assert!(zones[&PowerZone::Z1].abs() < 1e-9);
        assert!(zones[&PowerZone::Z6].abs() < 1e-9);
    }

    #[test]
    fn band_edges_belong_to_the_lower_zone() {
        let config = ZonesConfig::default();
        let watts = [FTP * 0.55, FTP * 0.55 + 0.001];
        let zones = zone_distribution(&watts, FTP, &config);

        assert!((zones[&PowerZone::Z1] - 50.0).abs() < 1e-9);
        assert!((zones[&PowerZone::Z2] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn sprint_surges_register_as_anaerobic() {
        let config = ZonesConfig::default();
        let watts = [310.0, 320.0, 150.0, 150.0];
        let zones = zone_distribution(&watts, FTP, &config);

        assert!((zones[&PowerZone::Z6] - 50.0).abs() < 1e-9, "both surges are over 120 %");
    }

    #[test]
    fn degenerate_input_yields_an_empty_map() {
        let config = ZonesConfig::default();
        assert!(zone_distribution(&[], FTP, &config).is_empty());
        assert!(zone_distribution(&[200.0], 0.0, &config).is_empty());
        assert!(zone_distribution(&[200.0], -50.0, &config).is_empty());
        assert!(zone_distribution(&[200.0], f64::NAN, &config).is_empty());
        assert!(zone_distribution(&[f64::NAN, f64::INFINITY], FTP, &config).is_empty());
    }

    #[test]
    fn invalid_samples_are_skipped_not_counted() {
        let config = ZonesConfig::default();
        let watts = [162.5, f64::NAN, 162.5];
        let zones = zone_distribution(&watts, FTP, &config);
        assert!(
            (zones[&PowerZone::Z2] - 100.0).abs() < 1e-9,
            "the NaN sample must not dilute the share"
        );
    }
}
