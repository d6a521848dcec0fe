// ABOUTME: Risk assessment and predicted effectiveness configuration
// ABOUTME: Fixed risk rules, overall risk bands, and effectiveness penalties and bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Risk and Effectiveness Configuration

use serde::{Deserialize, Serialize};

/// Risk and Effectiveness Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Rules that produce specific risks
    pub rules: RiskRulesConfig,
    /// Average-probability bands for the overall risk level
    pub levels: RiskLevelConfig,
    /// Predicted effectiveness scoring
    pub effectiveness: EffectivenessConfig,
}

/// Fixed rules producing specific risks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskRulesConfig {
    /// Probability of the injury risk raised by any current injury
    pub injury_probability: f64,
    /// High-priority modification count above which overtraining is flagged
    pub overtraining_modification_limit: usize,
    /// Probability of the overtraining risk
    pub overtraining_probability: f64,
    /// Total modification count above which adherence is flagged
    pub adherence_modification_limit: usize,
    /// Probability of the adherence risk
    pub adherence_probability: f64,
    /// Probability of the environmental risk
    pub environmental_probability: f64,
}

/// Average-probability bands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskLevelConfig {
    /// Average probability above which (with high severity) risk is critical
    pub critical_probability: f64,
    /// Average probability above which risk is high
    pub high_probability: f64,
    /// Average probability above which risk is moderate
    pub moderate_probability: f64,
}

/// Predicted effectiveness scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectivenessConfig {
    /// Cost of the first high or critical priority modification
    pub high_priority_penalty: f64,
    /// Cap on the combined high-priority penalty
    pub high_priority_max_penalty: f64,
    /// Cost of the first medium priority modification
    pub medium_priority_penalty: f64,
    /// Cap on the combined medium-priority penalty
    pub medium_priority_max_penalty: f64,
    /// Each further modification in a tier costs this fraction of the previous one
    pub penalty_decay: f64,
    /// Bonus when a modification references a core methodology principle
    pub methodology_alignment_bonus: f64,
    /// Lowest reported effectiveness
    pub floor: f64,
    /// Highest reported effectiveness
    pub ceiling: f64,
}

impl Default for RiskRulesConfig {
    fn default() -> Self {
        Self {
            injury_probability: 70.0,
            overtraining_modification_limit: 3,
            overtraining_probability: 60.0,
            adherence_modification_limit: 8,
            adherence_probability: 80.0,
            environmental_probability: 40.0,
        }
    }
}

impl Default for RiskLevelConfig {
    fn default() -> Self {
        Self {
            critical_probability: 70.0,
            high_probability: 60.0,
            moderate_probability: 40.0,
        }
    }
}

impl Default for EffectivenessConfig {
    fn default() -> Self {
        Self {
            high_priority_penalty: 5.0,
            high_priority_max_penalty: 20.0,
            medium_priority_penalty: 2.0,
            medium_priority_max_penalty: 10.0,
            penalty_decay: 0.8,
            methodology_alignment_bonus: 5.0,
            floor: 50.0,
            ceiling: 100.0,
        }
    }
}
