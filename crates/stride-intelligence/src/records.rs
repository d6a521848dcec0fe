// ABOUTME: Descriptive constraint records produced alongside modifications
// ABOUTME: Environmental, equipment, time compression and injury limitation records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use stride_core::models::{BodyRegion, Facility, Modification};

/// An environmental limitation and how the plan works around it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalConstraint {
    /// `altitude`, `heat`, `cold`, `terrain`, `wind`, `precipitation` or `air_quality`
    pub factor: String,
    /// What the condition limits
    pub limitation: String,
    /// How the plan works around it
    pub workaround: String,
    /// Expected impact on training
    pub impact: String,
}

/// A missing facility and its substitute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentConstraint {
    /// Facility that is unavailable
    pub missing: Facility,
    /// What the absence limits
    pub limitation: String,
    /// Substitute approach
    pub workaround: String,
    /// Training value retained by the substitute (0-100)
    pub effectiveness: f64,
    /// Other acceptable substitutes
    pub alternatives: Vec<String>,
}

/// Named approach for fitting training into less time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionApproach {
    /// Keep intensity, trim easy volume
    IntensityFocus,
    /// Shorten sessions across the board
    VolumeReduction,
    /// Merge sessions into fewer, longer ones
    SessionCombination,
    /// Only key workouts survive
    KeyWorkoutOnly,
}

impl CompressionApproach {
    /// Stable snake-case identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IntensityFocus => "intensity_focus",
            Self::VolumeReduction => "volume_reduction",
            Self::SessionCombination => "session_combination",
            Self::KeyWorkoutOnly => "key_workout_only",
        }
    }
}

impl fmt::Display for CompressionApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The selected compression approach and what it keeps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionStrategy {
    /// Approach
    pub approach: CompressionApproach,
    /// Training value retained (0-100)
    pub retained_effectiveness: f64,
    /// Human-readable description
    pub description: String,
    /// What is preserved first
    pub priorities: Vec<String>,
}

/// Weekly time shortfall against the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeConstraint {
    /// Hours the athlete can train per week
    pub available_hours: f64,
    /// Hours the plan asks for per week
    pub required_hours: f64,
    /// Shortfall in hours
    pub deficit_hours: f64,
    /// How the plan is compressed
    pub compression: CompressionStrategy,
}

/// A current injury and the training limits it imposes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryConstraint {
    /// Injury name
    pub injury_type: String,
    /// Affected region
    pub body_region: BodyRegion,
    /// What the injury limits
    pub limitation: String,
    /// Safe training approach
    pub workaround: String,
    /// Whether medical follow-up is required
    pub monitoring_required: bool,
    /// Volume reduction applied (percent)
    pub volume_reduction: f64,
}

/// Any constraint record, tagged by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ConstraintRecord {
    /// Environment
    Environmental(EnvironmentalConstraint),
    /// Equipment
    Equipment(EquipmentConstraint),
    /// Time
    Time(TimeConstraint),
    /// Injury
    Injury(InjuryConstraint),
}

/// Constraint records grouped by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSummary {
    /// Environmental records
    pub environmental: Vec<EnvironmentalConstraint>,
    /// Equipment records
    pub equipment: Vec<EquipmentConstraint>,
    /// Time records
    pub time: Vec<TimeConstraint>,
    /// Injury records
    pub injury: Vec<InjuryConstraint>,
}

impl ConstraintSummary {
    /// File a record under its category
    pub fn push(&mut self, record: ConstraintRecord) {
        match record {
            ConstraintRecord::Environmental(r) => self.environmental.push(r),
            ConstraintRecord::Equipment(r) => self.equipment.push(r),
            ConstraintRecord::Time(r) => self.time.push(r),
            ConstraintRecord::Injury(r) => self.injury.push(r),
        }
    }

    /// Total number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.environmental.len() + self.equipment.len() + self.time.len() + self.injury.len()
    }

    /// Whether no category produced a record
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What a constraint generator produces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorOutput {
    /// Candidate modifications
    pub modifications: Vec<Modification>,
    /// Descriptive records
    pub constraints: Vec<ConstraintRecord>,
}

impl GeneratorOutput {
    /// Append a modification
    pub fn modify(&mut self, modification: Modification) {
        self.modifications.push(modification);
    }

    /// Append a constraint record
    pub fn record(&mut self, record: ConstraintRecord) {
        self.constraints.push(record);
    }
}
