// ABOUTME: Trigger matching, prioritization and response-profile learning configuration
// ABOUTME: Confidence gate, preference boosts, EMA learning rate and outcome weights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Trigger, Prioritization and Learning Configuration

use serde::{Deserialize, Serialize};

/// Trigger matcher parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Conditions below this confidence never match
    pub min_condition_confidence: u8,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            min_condition_confidence: 70,
        }
    }
}

/// How learned preferences shift the ranking score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrioritizationConfig {
    /// Points added to the confidence of preferred modifications
    pub preference_boost: f64,
    /// Points subtracted from the confidence of avoided modifications
    pub avoidance_penalty: f64,
}

impl Default for PrioritizationConfig {
    fn default() -> Self {
        Self {
            preference_boost: 15.0,
            avoidance_penalty: 15.0,
        }
    }
}

/// Response-profile learning parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningConfig {
    /// EMA smoothing factor for effectiveness trends
    pub learning_rate: f64,
    /// Weight of performance change in the outcome score
    pub performance_weight: f64,
    /// Weight of adherence change in the outcome score
    pub adherence_weight: f64,
    /// Weight of recovery change in the outcome score
    pub recovery_weight: f64,
    /// Weight of satisfaction change in the outcome score
    pub satisfaction_weight: f64,
    /// Outcome score above which a modification becomes preferred
    pub preferred_threshold: f64,
    /// Outcome score below which a modification becomes avoided
    pub avoided_threshold: f64,
    /// Trend value of a freshly created profile
    pub initial_trend: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.3,
            performance_weight: 0.4,
            adherence_weight: 0.3,
            recovery_weight: 0.2,
            satisfaction_weight: 0.1,
            preferred_threshold: 75.0,
            avoided_threshold: 40.0,
            initial_trend: 50.0,
        }
    }
}
