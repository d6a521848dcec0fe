// ABOUTME: Plan modification records emitted by the adaptation engine
// ABOUTME: Modification kinds, explicit priority order, opposite-kind conflict pairs and builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan modifications
//!
//! A [`Modification`] is immutable once built: generators construct it with the
//! builder methods below and nothing in the pipeline mutates it afterwards.

use crate::constants::limits::{MAX_CONFIDENCE, RULE_CONFIDENCE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// What a modification changes in the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModificationKind {
    /// Lower session intensity or target paces
    ReduceIntensity,
    /// Raise session intensity or target paces
    IncreaseIntensity,
    /// Lower weekly or session volume
    ReduceVolume,
    /// Raise weekly or session volume
    IncreaseVolume,
    /// Lengthen the current periodization phase
    ExtendPhase,
    /// Shorten the current periodization phase
    ShortenPhase,
    /// Hold the progression at its current step
    DelayProgression,
    /// Restructure phase emphasis without changing its length
    PhaseAdjustment,
    /// Correct training paces (e.g. VDOT adjustment)
    PaceAdjustment,
    /// Swap a planned session for an equivalent one
    SubstituteWorkout,
    /// Insert additional recovery
    AddRecovery,
    /// Lengthen warm-up
    ExtendWarmup,
    /// Fit the plan into less available time
    TimeCompression,
    /// Prehab targeted at a previously injured region
    InjuryPrevention,
    /// Address a known risk factor
    RiskMitigation,
    /// Load-management protocol after an injury-risk alert
    InjuryProtocol,
    /// Replace running with injury-safe activities
    ActivitySubstitution,
}

impl ModificationKind {
    /// The kind that contradicts this one, if it belongs to an opposite pair
    #[must_use]
    pub const fn opposite(self) -> Option<Self> {
        match self {
            Self::ReduceIntensity => Some(Self::IncreaseIntensity),
            Self::IncreaseIntensity => Some(Self::ReduceIntensity),
            Self::ReduceVolume => Some(Self::IncreaseVolume),
            Self::IncreaseVolume => Some(Self::ReduceVolume),
            Self::ExtendPhase => Some(Self::ShortenPhase),
            Self::ShortenPhase => Some(Self::ExtendPhase),
            _ => None,
        }
    }

    /// Whether two kinds are an opposite pair
    #[must_use]
    pub fn conflicts_with(self, other: Self) -> bool {
        self.opposite() == Some(other)
    }

    /// Stable snake-case identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReduceIntensity => "reduce_intensity",
            Self::IncreaseIntensity => "increase_intensity",
            Self::ReduceVolume => "reduce_volume",
            Self::IncreaseVolume => "increase_volume",
            Self::ExtendPhase => "extend_phase",
            Self::ShortenPhase => "shorten_phase",
            Self::DelayProgression => "delay_progression",
            Self::PhaseAdjustment => "phase_adjustment",
            Self::PaceAdjustment => "pace_adjustment",
            Self::SubstituteWorkout => "substitute_workout",
            Self::AddRecovery => "add_recovery",
            Self::ExtendWarmup => "extend_warmup",
            Self::TimeCompression => "time_compression",
            Self::InjuryPrevention => "injury_prevention",
            Self::RiskMitigation => "risk_mitigation",
            Self::InjuryProtocol => "injury_protocol",
            Self::ActivitySubstitution => "activity_substitution",
        }
    }
}

impl fmt::Display for ModificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of a modification; variants are declared in ascending order so the
/// derived `Ord` is the total order `low < medium < high < critical`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Nice to have
    Low,
    /// Should be applied
    #[default]
    Medium,
    /// Important for safety or plan integrity
    High,
    /// Must be applied before the next session
    Critical,
}

/// A single proposed change to the training plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modification {
    /// What is changed
    #[serde(rename = "type")]
    pub kind: ModificationKind,
    /// Human-readable justification
    pub reason: String,
    /// Urgency
    pub priority: Priority,
    /// Structured parameters, e.g. `intensityReduction: 20`
    pub suggested_changes: BTreeMap<String, Value>,
    /// Whether the modification comes from a methodology pattern or rule
    pub methodology_specific: bool,
    /// Methodology principle the modification serves, empty when generic
    pub philosophy_principle: String,
    /// Confidence 0-100
    pub confidence: u8,
}

impl Modification {
    /// Create a generic modification with rule-level confidence
    #[must_use]
    pub fn new(kind: ModificationKind, reason: impl Into<String>, priority: Priority) -> Self {
        Self {
            kind,
            reason: reason.into(),
            priority,
            suggested_changes: BTreeMap::new(),
            methodology_specific: false,
            philosophy_principle: String::new(),
            confidence: RULE_CONFIDENCE,
        }
    }

    /// Add a structured parameter
    #[must_use]
    pub fn with_change(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.suggested_changes.insert(key.into(), value.into());
        self
    }

    /// Set confidence, saturating at 100
    #[must_use]
    pub fn with_confidence(mut self, confidence: u8) -> Self {
        self.confidence = confidence.min(MAX_CONFIDENCE);
        self
    }

    /// Mark the modification as serving a methodology principle
    #[must_use]
    pub fn for_principle(mut self, principle: impl Into<String>) -> Self {
        self.methodology_specific = true;
        self.philosophy_principle = principle.into();
        self
    }

    /// Read a numeric parameter
    #[must_use]
    pub fn change_f64(&self, key: &str) -> Option<f64> {
        self.suggested_changes.get(key).and_then(Value::as_f64)
    }

    /// Case-insensitive check of the reason text
    #[must_use]
    pub fn reason_mentions(&self, needle: &str) -> bool {
        self.reason.to_lowercase().contains(&needle.to_lowercase())
    }
}
