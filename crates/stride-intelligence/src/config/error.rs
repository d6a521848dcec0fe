// ABOUTME: Configuration error types for adaptation config validation
// ABOUTME: Defines error variants for invalid ranges, weights, and environment parsing failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types for adaptation config validation.

use stride_core::errors::AppError;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Threshold ordering is inconsistent (e.g., low bound above high bound)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Weights don't sum to required total
    #[error("Invalid weights: {0}")]
    InvalidWeights(&'static str),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),

    /// A numeric field is NaN or infinite
    #[error("Non-finite value: {0} must be a finite number")]
    NonFinite(String),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config(error.to_string())
    }
}
