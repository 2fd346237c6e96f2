// ABOUTME: Internal error types for formula evaluation and configuration validation
// ABOUTME: Formula errors never escape the engine boundary; they are logged and defaulted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project

//! Engine error types
//!
//! [`FormulaError`] exists only inside the engine: `ScoreEngine::compute_score`
//! catches every variant, logs it, and returns the zero-score fallback, so
//! callers see a total function. [`ConfigError`] is returned by
//! `EngineConfig::validate` for callers that want to reject nonsense tunables
//! up front instead of letting the clamps absorb them.

use thiserror::Error;

/// Failure inside the composite score evaluation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormulaError {
    /// A term evaluated to NaN or infinity
    #[error("non-finite value in {term} term")]
    NonFinite {
        /// Name of the offending term
        term: &'static str,
    },

    /// The run metrics cannot support a meaningful score
    #[error("invalid run metrics: {reason}")]
    InvalidMetrics {
        /// What was missing or degenerate
        reason: &'static str,
    },
}

/// Configuration rejected by `EngineConfig::validate`
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A threshold ladder is not strictly ordered
    #[error("{ladder} thresholds must be strictly {order}")]
    UnorderedLadder {
        /// Which ladder failed validation
        ladder: &'static str,
        /// Required ordering, for the message
        order: &'static str,
    },

    /// A tunable is outside its meaningful range
    #[error("{name} must be {requirement} (got {value})")]
    OutOfRange {
        /// Name of the tunable
        name: &'static str,
        /// Required range, for the message
        requirement: &'static str,
        /// Offending value
        value: f64,
    },
}
