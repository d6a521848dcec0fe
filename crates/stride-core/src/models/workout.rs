// ABOUTME: Completed workout records used for load and recovery assessment
// ABOUTME: Session-RPE training load with optional externally computed stress score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::plan::WorkoutType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A session the athlete actually completed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedWorkout {
    /// Calendar date of the session
    pub date: NaiveDate,
    /// Session type
    pub workout_type: WorkoutType,
    /// Duration in minutes
    pub duration_minutes: u32,
    /// Rate of perceived exertion, 1-10
    pub perceived_effort: Option<u8>,
    /// Training Stress Score from a power or pace model, when available
    pub training_stress_score: Option<f64>,
    /// Morning recovery score (0-100) reported for the session day
    pub recovery_score: Option<f64>,
    /// Whether the session was completed as prescribed
    pub completed_as_planned: bool,
}

impl CompletedWorkout {
    /// Default RPE when the athlete did not report one
    const DEFAULT_EFFORT: u8 = 5;

    /// Training load of the session
    ///
    /// Uses the stress score when present, otherwise session-RPE
    /// (duration × RPE / 10) so both scales land in a similar range.
    #[must_use]
    pub fn training_load(&self) -> f64 {
        self.training_stress_score.unwrap_or_else(|| {
            let effort = self.perceived_effort.unwrap_or(Self::DEFAULT_EFFORT).min(10);
            f64::from(self.duration_minutes) * f64::from(effort) / 10.0
        })
    }
}
