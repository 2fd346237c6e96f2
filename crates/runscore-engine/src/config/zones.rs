// ABOUTME: Power zone cut-off configuration as fractions of functional threshold power
// ABOUTME: Defaults from core constants with environment variable overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

use runscore_core::constants::zones;
use serde::{Deserialize, Serialize};
use std::env;

/// Power zone cut-offs as fractions of FTP
///
/// Samples below `zone1_ceiling * ftp` fall in zone 1, and so on; samples at
/// or above `zone5_ceiling * ftp` fall in zone 6.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZonesConfig {
    /// Zone 1 ceiling (recovery)
    pub zone1_ceiling: f64,
    /// Zone 2 ceiling (endurance)
    pub zone2_ceiling: f64,
    /// Zone 3 ceiling (tempo)
    pub zone3_ceiling: f64,
    /// Zone 4 ceiling (threshold)
    pub zone4_ceiling: f64,
    /// Zone 5 ceiling (VO2max)
    pub zone5_ceiling: f64,
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self {
            zone1_ceiling: zones::ZONE1_CEILING,
            zone2_ceiling: zones::ZONE2_CEILING,
            zone3_ceiling: zones::ZONE3_CEILING,
            zone4_ceiling: zones::ZONE4_CEILING,
            zone5_ceiling: zones::ZONE5_CEILING,
        }
    }
}

impl ZonesConfig {
    /// Load zone configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            zone1_ceiling: env::var("ZONES_ZONE1_CEILING")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(zones::ZONE1_CEILING),
            zone2_ceiling: env::var("ZONES_ZONE2_CEILING")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(zones::ZONE2_CEILING),
            zone3_ceiling: env::var("ZONES_ZONE3_CEILING")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(zones::ZONE3_CEILING),
            zone4_ceiling: env::var("ZONES_ZONE4_CEILING")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(zones::ZONE4_CEILING),
            zone5_ceiling: env::var("ZONES_ZONE5_CEILING")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(zones::ZONE5_CEILING),
        }
    }
}
