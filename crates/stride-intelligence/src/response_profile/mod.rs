// ABOUTME: Per-athlete, per-methodology learned response profile
// ABOUTME: Outcome scoring, EMA effectiveness trends and preferred/avoided modification keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Response-Profile Learner
//!
//! A profile remembers how an athlete responded to applied modifications
//! under one methodology. Feedback is folded into an exponential moving
//! average per trend category and reclassifies the `(kind, principle)` key
//! into the preferred or avoided list.

/// Concurrent profile storage
pub mod store;

pub use store::{InMemoryProfileStore, ResponseProfileStore};

use crate::config::LearningConfig;
use serde::{Deserialize, Serialize};
use stride_core::constants::limits::{SCORE_MAX, SCORE_MIN};
use stride_core::errors::{AppError, AppResult};
use stride_core::models::{Methodology, Modification, ModificationKind};

/// Identity of a modification for learning purposes
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModificationKey {
    /// Modification kind
    pub kind: ModificationKind,
    /// Principle the modification served, empty when generic
    pub philosophy_principle: String,
}

impl ModificationKey {
    /// Key of an existing modification
    #[must_use]
    pub fn of(modification: &Modification) -> Self {
        Self {
            kind: modification.kind,
            philosophy_principle: modification.philosophy_principle.clone(),
        }
    }

    /// Whether the key identifies the modification
    #[must_use]
    pub fn matches(&self, modification: &Modification) -> bool {
        self.kind == modification.kind
            && self.philosophy_principle == modification.philosophy_principle
    }
}

/// Trend bucket a modification kind feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendCategory {
    /// Volume and phase length changes
    Volume,
    /// Intensity and pace changes
    Intensity,
    /// Recovery, prevention and protocol changes
    Recovery,
    /// Session substitutions
    WorkoutType,
}

impl TrendCategory {
    /// Category a modification kind belongs to
    #[must_use]
    pub const fn of(kind: ModificationKind) -> Self {
        match kind {
            ModificationKind::ReduceVolume
            | ModificationKind::IncreaseVolume
            | ModificationKind::ExtendPhase
            | ModificationKind::ShortenPhase
            | ModificationKind::DelayProgression
            | ModificationKind::TimeCompression => Self::Volume,
            ModificationKind::ReduceIntensity
            | ModificationKind::IncreaseIntensity
            | ModificationKind::PaceAdjustment
            | ModificationKind::PhaseAdjustment => Self::Intensity,
            ModificationKind::AddRecovery
            | ModificationKind::ExtendWarmup
            | ModificationKind::InjuryPrevention
            | ModificationKind::RiskMitigation
            | ModificationKind::InjuryProtocol => Self::Recovery,
            ModificationKind::SubstituteWorkout | ModificationKind::ActivitySubstitution => {
                Self::WorkoutType
            }
        }
    }
}

/// EMA effectiveness per trend category (0-100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectivenessTrends {
    /// Volume changes
    pub volume: f64,
    /// Intensity changes
    pub intensity: f64,
    /// Recovery changes
    pub recovery: f64,
    /// Workout substitutions
    pub workout_type: f64,
}

impl EffectivenessTrends {
    /// Every trend at the same starting value
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            volume: value,
            intensity: value,
            recovery: value,
            workout_type: value,
        }
    }

    /// Current value of a category
    #[must_use]
    pub const fn get(&self, category: TrendCategory) -> f64 {
        match category {
            TrendCategory::Volume => self.volume,
            TrendCategory::Intensity => self.intensity,
            TrendCategory::Recovery => self.recovery,
            TrendCategory::WorkoutType => self.workout_type,
        }
    }

    fn get_mut(&mut self, category: TrendCategory) -> &mut f64 {
        match category {
            TrendCategory::Volume => &mut self.volume,
            TrendCategory::Intensity => &mut self.intensity,
            TrendCategory::Recovery => &mut self.recovery,
            TrendCategory::WorkoutType => &mut self.workout_type,
        }
    }
}

/// Observed changes after applying a modification (percent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeMetrics {
    /// Performance change
    pub performance_change: f64,
    /// Adherence change
    pub adherence_change: f64,
    /// Recovery change
    pub recovery_change: f64,
    /// Satisfaction change
    pub satisfaction_change: f64,
}

impl OutcomeMetrics {
    /// Reject non-finite measurements
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first non-finite field
    pub fn validate(&self) -> AppResult<()> {
        for (field, value) in [
            ("performance_change", self.performance_change),
            ("adherence_change", self.adherence_change),
            ("recovery_change", self.recovery_change),
            ("satisfaction_change", self.satisfaction_change),
        ] {
            if !value.is_finite() {
                return Err(AppError::invalid_input(format!("{field} must be a finite number"))
                    .with_field(field));
            }
        }
        Ok(())
    }

    /// Weighted outcome score clamped to 0-100
    #[must_use]
    pub fn effectiveness(&self, config: &LearningConfig) -> f64 {
        config
            .satisfaction_weight
            .mul_add(
                self.satisfaction_change,
                config.recovery_weight.mul_add(
                    self.recovery_change,
                    config.adherence_weight.mul_add(
                        self.adherence_change,
                        config.performance_weight * self.performance_change,
                    ),
                ),
            )
            .clamp(SCORE_MIN, SCORE_MAX)
    }
}

/// One feedback entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Which modification was applied
    pub key: ModificationKey,
    /// What was observed
    pub outcome: OutcomeMetrics,
    /// Resulting outcome score
    pub effectiveness: f64,
}

/// Learned responses of one athlete under one methodology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseProfile {
    /// Athlete
    pub athlete_id: String,
    /// Methodology
    pub methodology: Methodology,
    /// Append-only feedback log
    pub response_history: Vec<ResponseRecord>,
    /// EMA effectiveness per category
    pub effectiveness_trends: EffectivenessTrends,
    /// Keys that worked well, in first-qualified order
    pub preferred_modifications: Vec<ModificationKey>,
    /// Keys that worked poorly, in first-qualified order
    pub avoided_modifications: Vec<ModificationKey>,
}

impl ResponseProfile {
    /// Fresh profile with neutral trends
    #[must_use]
    pub fn new(athlete_id: impl Into<String>, methodology: Methodology, config: &LearningConfig) -> Self {
        Self {
            athlete_id: athlete_id.into(),
            methodology,
            response_history: Vec::new(),
            effectiveness_trends: EffectivenessTrends::uniform(config.initial_trend),
            preferred_modifications: Vec::new(),
            avoided_modifications: Vec::new(),
        }
    }

    /// Fold one observed outcome into the profile, returning its score
    pub fn apply_feedback(
        &mut self,
        modification: &Modification,
        outcome: &OutcomeMetrics,
        config: &LearningConfig,
    ) -> f64 {
        let effectiveness = outcome.effectiveness(config);
        let key = ModificationKey::of(modification);

        let trend = self
            .effectiveness_trends
            .get_mut(TrendCategory::of(modification.kind));
        *trend = (*trend).mul_add(1.0 - config.learning_rate, effectiveness * config.learning_rate);

        if effectiveness > config.preferred_threshold {
            self.avoided_modifications.retain(|k| *k != key);
            if !self.preferred_modifications.contains(&key) {
                self.preferred_modifications.push(key.clone());
            }
        } else if effectiveness < config.avoided_threshold {
            self.preferred_modifications.retain(|k| *k != key);
            if !self.avoided_modifications.contains(&key) {
                self.avoided_modifications.push(key.clone());
            }
        }

        self.response_history.push(ResponseRecord {
            key,
            outcome: *outcome,
            effectiveness,
        });
        effectiveness
    }

    /// Whether the modification's key is preferred
    #[must_use]
    pub fn prefers(&self, modification: &Modification) -> bool {
        self.preferred_modifications
            .iter()
            .any(|k| k.matches(modification))
    }

    /// Whether the modification's key is avoided
    #[must_use]
    pub fn avoids(&self, modification: &Modification) -> bool {
        self.avoided_modifications
            .iter()
            .any(|k| k.matches(modification))
    }
}
