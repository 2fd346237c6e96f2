// ABOUTME: Aerobic decoupling: first-half vs second-half power-to-heart-rate drift
// ABOUTME: Signed result; positive drift means efficiency decayed across the run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! Aerobic decoupling (Pw:Hr drift)
//!
//! Splits the paired power and heart rate streams at the midpoint, computes
//! the aerobic-efficiency ratio `mean(power) / mean(hr)` of each half, and
//! returns the relative drift `(r1 - r2) / r1`.
//!
//! The result is signed: positive drift means the second half needed more
//! heartbeats per watt (efficiency decayed), negative drift means the athlete
//! warmed into the run. Consumers that only care about decay clamp at zero;
//! the sign itself is real information and is preserved here.

/// Relative aerobic-efficiency drift between the two halves of a run
///
/// Returns exactly `0.0` whenever the streams cannot support the calculation:
/// empty or mismatched streams, fewer than `min_samples` samples, or a zero
/// mean in either half. Degenerate input is "no measurable drift", never an
/// error.
#[must_use]
pub fn aerobic_decoupling(watts: &[f64], heart_rate: &[f64], min_samples: usize) -> f64 {
    if watts.is_empty() || heart_rate.is_empty() || watts.len() != heart_rate.len() {
        return 0.0;
    }
    if watts.len() < min_samples {
        return 0.0;
    }

    let mid = watts.len() / 2;
    let first_ratio = efficiency_ratio(&watts[..mid], &heart_rate[..mid]);
    let second_ratio = efficiency_ratio(&watts[mid..], &heart_rate[mid..]);

    match (first_ratio, second_ratio) {
        (Some(r1), Some(r2)) if r1 != 0.0 => (r1 - r2) / r1,
        _ => 0.0,
    }
}

/// Mean power over mean heart rate for one half of a run
///
/// `None` when the half is empty or either mean is non-positive.
fn efficiency_ratio(watts: &[f64], heart_rate: &[f64]) -> Option<f64> {
    if watts.is_empty() || heart_rate.is_empty() {
        return None;
    }
    let mean_power = watts.iter().sum::<f64>() / watts.len() as f64;
    let mean_hr = heart_rate.iter().sum::<f64>() / heart_rate.len() as f64;
    if mean_power <= 0.0 || mean_hr <= 0.0 {
        return None;
    }
    Some(mean_power / mean_hr)
}
