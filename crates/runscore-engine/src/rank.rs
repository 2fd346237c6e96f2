// ABOUTME: Score-to-rank ladder mapping composite scores onto named tiers
// ABOUTME: Total over all f64 input; NaN and negatives land on the lowest tier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! Rank tiers over the 0-100 score scale

use crate::config::RankConfig;
use runscore_core::RankTier;

/// Map a composite score onto its rank tier
///
/// Thresholds are inclusive at the lower bound of each tier. Any score the
/// ladder cannot place, including NaN, is a [`RankTier::Rookie`].
#[must_use]
pub fn rank_for(score: f64, config: &RankConfig) -> RankTier {
    if score >= config.elite_min {
        RankTier::Elite
    } else if score >= config.pro_min {
        RankTier::Pro
    } else if score >= config.advanced_min {
        RankTier::Advanced
    } else if score >= config.intermediate_min {
        RankTier::Intermediate
    } else {
        RankTier::Rookie
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        let config = RankConfig::default();
        assert_eq!(rank_for(85.0, &config), RankTier::Elite);
        assert_eq!(rank_for(84.999, &config), RankTier::Pro);
        assert_eq!(rank_for(70.0, &config), RankTier::Pro);
        assert_eq!(rank_for(55.0, &config), RankTier::Advanced);
        assert_eq!(rank_for(40.0, &config), RankTier::Intermediate);
        assert_eq!(rank_for(39.999, &config), RankTier::Rookie);
    }

    #[test]
    fn every_float_gets_a_tier() {
        let config = RankConfig::default();
        for score in [f64::NAN, f64::NEG_INFINITY, -5.0, 0.0, 50.0, 100.0, 1e9] {
            // The call itself must not panic; NaN lands on the floor
            let _ = rank_for(score, &config);
        }
        assert_eq!(rank_for(f64::NAN, &config), RankTier::Rookie);
        assert_eq!(rank_for(f64::INFINITY, &config), RankTier::Elite);
        assert_eq!(rank_for(-1.0, &config), RankTier::Rookie);
    }

    #[test]
    fn tier_labels_and_colors_are_stable() {
        assert_eq!(RankTier::Elite.label(), "Elite");
        assert_eq!(RankTier::Elite.color(), "#FFD700");
        assert_eq!(RankTier::Rookie.color(), "#9E9E9E");
    }
}
