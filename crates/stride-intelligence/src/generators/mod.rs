// ABOUTME: Constraint modification generators for environment, equipment, time and injury
// ABOUTME: Each generator maps one constraint input to candidate modifications and records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constraint Modification Generators
//!
//! The four generators are independent of each other. The engine runs each
//! one separately so a failure in one category surfaces as a warning while
//! the others still contribute.

/// Altitude, heat, cold, terrain and weather extremes
pub mod environmental;
/// Missing facilities and their substitutes
pub mod equipment;
/// Current injuries, injury history, risk factors and dynamic load risk
pub mod injury;
/// Weekly time deficit compression
pub mod time;

pub use environmental::{heat_index_celsius, EnvironmentalGenerator};
pub use equipment::EquipmentGenerator;
pub use injury::{InjuryGenerator, InjuryRiskAssessment};
pub use time::TimeGenerator;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Constraint category handled by one generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintCategory {
    /// Environment
    Environmental,
    /// Equipment
    Equipment,
    /// Time
    Time,
    /// Injury
    Injury,
}

impl ConstraintCategory {
    /// Stable snake-case identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Environmental => "environmental",
            Self::Equipment => "equipment",
            Self::Time => "time",
            Self::Injury => "injury",
        }
    }
}

impl fmt::Display for ConstraintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round to one decimal place for presentation in suggested changes
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
