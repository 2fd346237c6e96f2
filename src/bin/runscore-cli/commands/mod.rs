// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runscore Project
// ABOUTME: Re-exports command modules for runscore-cli
// ABOUTME: Provides the score, demo, and replay subcommand implementations

pub mod demo;
pub mod replay;
pub mod score;
