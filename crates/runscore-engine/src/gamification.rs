// ABOUTME: Quality labels, achievements, trend and comparison over score history
// ABOUTME: Pure functions over oldest-to-newest score slices; no I/O, no state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! Gamification layer over scored runs
//!
//! Everything here is a pure function over a score history slice ordered
//! oldest to newest, where the last element is the run being celebrated.
//! Achievement rules are independent of each other and append-only: adding a
//! rule can never suppress an existing award. [`feedback`] bundles the whole
//! layer into the shape stored alongside each synced run.

use crate::config::GamificationConfig;
use runscore_core::RunQuality;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Badge awarded for a single scored run in the context of its history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    /// The very first scored run
    FirstRun,
    /// Strictly beat every earlier score
    PersonalBest,
    /// Scored at or above the epic threshold
    BeastMode,
    /// Scored at or above the legend threshold
    Legend,
    /// Three strictly improving runs in a row
    OnFire,
    /// Short-window rolling average held high
    ConsistencyWeek,
    /// Long-window rolling average held high
    MachineMode,
    /// Recovered above the bar after dipping below the floor
    Comeback,
}

impl Achievement {
    /// Display title for the badge
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::FirstRun => "First Run!",
            Self::PersonalBest => "Personal Best!",
            Self::BeastMode => "Beast Mode",
            Self::Legend => "Legend",
            Self::OnFire => "On Fire!",
            Self::ConsistencyWeek => "Consistency Week",
            Self::MachineMode => "Machine Mode",
            Self::Comeback => "Comeback",
        }
    }

    /// One-line explanation shown next to the badge
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::FirstRun => "Logged the first scored run",
            Self::PersonalBest => "Beat every previous score",
            Self::BeastMode => "Crossed the epic-run bar",
            Self::Legend => "Crossed the legend-run bar",
            Self::OnFire => "Improved three runs in a row",
            Self::ConsistencyWeek => "Held a high five-run average",
            Self::MachineMode => "Held a high ten-run average",
            Self::Comeback => "Bounced back from a rough patch",
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Direction of the recent score trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Recent window averages meaningfully higher than the one before
    Improving,
    /// Recent window averages meaningfully lower
    Declining,
    /// Within the flat band either way
    #[default]
    Steady,
}

/// Recent-versus-previous window comparison of score averages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct QualityTrend {
    /// Which way the averages moved
    pub direction: TrendDirection,
    /// Average over the most recent window
    pub recent_avg: f64,
    /// Average over the window before that
    pub previous_avg: f64,
    /// `recent_avg - previous_avg`
    pub delta: f64,
}

/// The latest score measured against the runs before it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunComparison {
    /// Score of the latest run
    pub latest: f64,
    /// Mean of the prior scores in the window
    pub prior_mean: f64,
    /// Best prior score in the window
    pub prior_best: f64,
    /// Worst prior score in the window
    pub prior_worst: f64,
    /// 1-based position of the latest run among the window, best first
    pub rank: usize,
    /// Number of prior runs considered
    pub window: usize,
}

/// Everything the gamification layer says about the latest run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GamingFeedback {
    /// Quality label of the latest score
    pub quality: RunQuality,
    /// Badges earned by the latest run
    pub achievements: Vec<Achievement>,
    /// Recent trend of the score averages
    pub trend: QualityTrend,
    /// Latest run against its predecessors, absent for the first run
    pub comparison: Option<RunComparison>,
}

/// Quality label for a single composite score
///
/// NaN and everything below the lowest bar is [`RunQuality::Wasted`].
#[must_use]
pub fn quality_for(score: f64, config: &GamificationConfig) -> RunQuality {
    if score >= config.legendary_min {
        RunQuality::Legendary
    } else if score >= config.epic_min {
        RunQuality::Epic
    } else if score >= config.great_min {
        RunQuality::Great
    } else if score >= config.solid_min {
        RunQuality::Solid
    } else if score >= config.okay_min {
        RunQuality::Okay
    } else if score >= config.weak_min {
        RunQuality::Weak
    } else {
        RunQuality::Wasted
    }
}

/// Badges earned by the last score in `history`
///
/// Rules fire independently; a single run can stack several badges. An empty
/// history earns nothing.
#[must_use]
pub fn achievements(history: &[f64], config: &GamificationConfig) -> Vec<Achievement> {
    let Some(&latest) = history.last() else {
        return Vec::new();
    };
    let priors = &history[..history.len() - 1];
    let mut earned = Vec::new();

    if priors.is_empty() {
        earned.push(Achievement::FirstRun);
    }

    let prior_best = priors.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !priors.is_empty() && latest > prior_best {
        earned.push(Achievement::PersonalBest);
    }

    if latest >= config.epic_run_min {
        earned.push(Achievement::BeastMode);
    }
    if latest >= config.legend_run_min {
        earned.push(Achievement::Legend);
    }

    if is_improving_streak(history, config.streak_length) {
        earned.push(Achievement::OnFire);
    }

    if window_average_at_least(
        history,
        config.consistency_short_window,
        config.consistency_short_min_avg,
    ) {
        earned.push(Achievement::ConsistencyWeek);
    }
    if window_average_at_least(
        history,
        config.consistency_long_window,
        config.consistency_long_min_avg,
    ) {
        earned.push(Achievement::MachineMode);
    }

    let dip_window = priors.len().saturating_sub(config.comeback_window);
    let dipped = priors[dip_window..]
        .iter()
        .any(|&score| score < config.comeback_floor);
    if dipped && latest >= config.comeback_bar {
        earned.push(Achievement::Comeback);
    }

    earned
}

/// Whether the last `length` scores are strictly increasing
fn is_improving_streak(history: &[f64], length: usize) -> bool {
    if length < 2 || history.len() < length {
        return false;
    }
    history[history.len() - length..]
        .windows(2)
        .all(|pair| pair[1] > pair[0])
}

/// Whether a full window exists and its average clears the bar
fn window_average_at_least(history: &[f64], window: usize, bar: f64) -> bool {
    if window == 0 || history.len() < window {
        return false;
    }
    mean(&history[history.len() - window..]).is_some_and(|avg| avg >= bar)
}

/// Direction and magnitude of the recent score trend
///
/// The most recent `trend_window` scores are averaged against the equal
/// window before them; short histories use whatever is available, and with
/// no previous window at all the trend reads steady.
#[must_use]
pub fn quality_trend(history: &[f64], config: &GamificationConfig) -> QualityTrend {
    let window = config.trend_window.max(1);
    let recent_start = history.len().saturating_sub(window);
    let recent = &history[recent_start..];
    let previous_start = recent_start.saturating_sub(window);
    let previous = &history[previous_start..recent_start];

    let Some(recent_avg) = mean(recent) else {
        return QualityTrend::default();
    };
    let Some(previous_avg) = mean(previous) else {
        return QualityTrend {
            direction: TrendDirection::Steady,
            recent_avg,
            previous_avg: recent_avg,
            delta: 0.0,
        };
    };

    let delta = recent_avg - previous_avg;
    let direction = if delta > config.trend_flat_delta {
        TrendDirection::Improving
    } else if delta < -config.trend_flat_delta {
        TrendDirection::Declining
    } else {
        TrendDirection::Steady
    };

    QualityTrend {
        direction,
        recent_avg,
        previous_avg,
        delta,
    }
}

/// The latest score against up to `comparison_window` predecessors
///
/// `None` until there is at least one prior run to compare against.
#[must_use]
pub fn comparison(history: &[f64], config: &GamificationConfig) -> Option<RunComparison> {
    let (&latest, priors) = history.split_last()?;
    if priors.is_empty() {
        return None;
    }
    let window_start = priors.len().saturating_sub(config.comparison_window.max(1));
    let window = &priors[window_start..];

    let prior_mean = mean(window)?;
    let prior_best = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let prior_worst = window.iter().copied().fold(f64::INFINITY, f64::min);
    let rank = 1 + window.iter().filter(|&&score| score > latest).count();

    Some(RunComparison {
        latest,
        prior_mean,
        prior_best,
        prior_worst,
        rank,
        window: window.len(),
    })
}

/// Full gamification bundle for the last score in `history`
#[must_use]
pub fn feedback(history: &[f64], config: &GamificationConfig) -> GamingFeedback {
    let quality = history
        .last()
        .map_or(RunQuality::Wasted, |&score| quality_for(score, config));
    GamingFeedback {
        quality,
        achievements: achievements(history, config),
        trend: quality_trend(history, config),
        comparison: comparison(history, config),
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
