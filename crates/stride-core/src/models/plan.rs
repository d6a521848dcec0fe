// ABOUTME: Training plan value objects produced by the plan generator
// ABOUTME: Blocks, weekly microcycles, planned workouts and summary statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::methodology::Methodology;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Periodization phase of a training block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPhase {
    /// Aerobic base building
    Base,
    /// Specific strength and threshold development
    Build,
    /// Race-specific sharpening
    Peak,
    /// Pre-race volume reduction
    Taper,
    /// Post-race or mid-cycle regeneration
    Recovery,
}

/// Kind of planned or completed session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Conversational aerobic running
    Easy,
    /// Very easy regeneration running
    Recovery,
    /// Weekly long run
    LongRun,
    /// Sustained comfortably-hard running
    Tempo,
    /// Lactate threshold work
    Threshold,
    /// VO2max intervals
    Intervals,
    /// Short fast repetitions for economy
    Repetition,
    /// Uphill repeats
    HillRepeats,
    /// Unstructured speed play
    Fartlek,
    /// Race or time trial
    Race,
    /// Gym-based strength training
    Strength,
    /// Non-running aerobic work (bike, elliptical)
    CrossTraining,
    /// Pool-based running or swimming
    AquaJogging,
    /// Scheduled day off
    Rest,
}

impl WorkoutType {
    /// Sessions whose primary stimulus is intensity rather than volume
    #[must_use]
    pub const fn is_quality(self) -> bool {
        matches!(
            self,
            Self::Tempo
                | Self::Threshold
                | Self::Intervals
                | Self::Repetition
                | Self::HillRepeats
                | Self::Fartlek
                | Self::Race
        )
    }
}

/// A single session in the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedWorkout {
    /// Day of week the session is scheduled on
    pub day: Weekday,
    /// Session type
    pub workout_type: WorkoutType,
    /// Planned duration in minutes
    pub duration_minutes: u32,
    /// Planned distance, if prescribed by distance
    pub distance_km: Option<f64>,
    /// Whether the session is one the methodology considers non-negotiable
    pub key_workout: bool,
    /// Free-text description from the workout template
    pub description: String,
}

impl PlannedWorkout {
    /// Create a planned workout with no distance prescription
    #[must_use]
    pub fn new(day: Weekday, workout_type: WorkoutType, duration_minutes: u32) -> Self {
        Self {
            day,
            workout_type,
            duration_minutes,
            distance_km: None,
            key_workout: workout_type.is_quality() || workout_type == WorkoutType::LongRun,
            description: String::new(),
        }
    }
}

/// One weekly microcycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingWeek {
    /// 1-based week number within the whole plan
    pub week_number: u32,
    /// Sessions scheduled this week
    pub workouts: Vec<PlannedWorkout>,
}

impl TrainingWeek {
    /// Total planned minutes for the week
    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        self.workouts.iter().map(|w| w.duration_minutes).sum()
    }
}

/// A contiguous run of weeks sharing one periodization phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingBlock {
    /// Periodization phase
    pub phase: TrainingPhase,
    /// Weeks in this block, in order
    pub weeks: Vec<TrainingWeek>,
}

/// Summary statistics computed once from the plan structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Number of weeks across all blocks
    pub total_weeks: usize,
    /// Number of non-rest sessions
    pub total_workouts: usize,
    /// Mean planned minutes per week
    pub average_weekly_minutes: f64,
    /// Largest planned weekly minutes
    pub peak_weekly_minutes: u32,
}

impl PlanSummary {
    /// Compute summary statistics from plan blocks
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Safe: week counts are small
    pub fn from_blocks(blocks: &[TrainingBlock]) -> Self {
        let weeks: Vec<&TrainingWeek> = blocks.iter().flat_map(|b| b.weeks.iter()).collect();
        let total_weeks = weeks.len();
        let total_minutes: u32 = weeks.iter().map(|w| w.total_minutes()).sum();
        Self {
            total_weeks,
            total_workouts: weeks
                .iter()
                .flat_map(|w| w.workouts.iter())
                .filter(|w| w.workout_type != WorkoutType::Rest)
                .count(),
            average_weekly_minutes: if total_weeks == 0 {
                0.0
            } else {
                f64::from(total_minutes) / total_weeks as f64
            },
            peak_weekly_minutes: weeks.iter().map(|w| w.total_minutes()).max().unwrap_or(0),
        }
    }
}

/// Baseline plan produced by the plan generator; read-only to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    /// Plan identifier
    pub id: String,
    /// Athlete the plan belongs to
    pub athlete_id: String,
    /// Methodology the plan was generated with
    pub methodology: Methodology,
    /// Goal race date, if any
    pub race_date: Option<NaiveDate>,
    /// Periodized blocks in order
    pub blocks: Vec<TrainingBlock>,
    /// Derived summary statistics
    pub summary: PlanSummary,
}

impl TrainingPlan {
    /// Build a plan and compute its summary statistics
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        athlete_id: impl Into<String>,
        methodology: Methodology,
        blocks: Vec<TrainingBlock>,
    ) -> Self {
        let summary = PlanSummary::from_blocks(&blocks);
        Self {
            id: id.into(),
            athlete_id: athlete_id.into(),
            methodology,
            race_date: None,
            blocks,
            summary,
        }
    }

    /// Iterate over every week of the plan in order
    pub fn weeks(&self) -> impl Iterator<Item = &TrainingWeek> {
        self.blocks.iter().flat_map(|b| b.weeks.iter())
    }

    /// Iterate over every planned workout in order
    pub fn workouts(&self) -> impl Iterator<Item = &PlannedWorkout> {
        self.weeks().flat_map(|w| w.workouts.iter())
    }

    /// Number of planned sessions of any of the given types
    #[must_use]
    pub fn count_workouts_of(&self, types: &[WorkoutType]) -> usize {
        self.workouts()
            .filter(|w| types.contains(&w.workout_type))
            .count()
    }

    /// Mean planned weekly minutes, `None` when the plan has no weeks
    #[must_use]
    pub fn average_weekly_minutes(&self) -> Option<f64> {
        (self.summary.total_weeks > 0).then_some(self.summary.average_weekly_minutes)
    }

    /// Whether the plan contains a block of the given phase
    #[must_use]
    pub fn has_phase(&self, phase: TrainingPhase) -> bool {
        self.blocks.iter().any(|b| b.phase == phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week(number: u32, minutes: &[u32]) -> TrainingWeek {
        TrainingWeek {
            week_number: number,
            workouts: minutes
                .iter()
                .map(|m| PlannedWorkout::new(Weekday::Mon, WorkoutType::Easy, *m))
                .collect(),
        }
    }

    #[test]
    fn test_summary_statistics() {
        let blocks = vec![TrainingBlock {
            phase: TrainingPhase::Base,
            weeks: vec![week(1, &[60, 60]), week(2, &[90, 90, 60])],
        }];
        let plan = TrainingPlan::new("p1", "a1", Methodology::Lydiard, blocks);

        assert_eq!(plan.summary.total_weeks, 2);
        assert_eq!(plan.summary.total_workouts, 5);
        assert_eq!(plan.summary.peak_weekly_minutes, 240);
        assert!((plan.summary.average_weekly_minutes - 180.0).abs() < f64::EPSILON);
        assert!(plan.has_phase(TrainingPhase::Base));
        assert!(!plan.has_phase(TrainingPhase::Taper));
    }

    #[test]
    fn test_empty_plan_has_no_weekly_average() {
        let plan = TrainingPlan::new("p1", "a1", Methodology::Daniels, Vec::new());
        assert!(plan.average_weekly_minutes().is_none());
    }

    #[test]
    fn test_key_workout_defaults() {
        assert!(PlannedWorkout::new(Weekday::Tue, WorkoutType::Intervals, 50).key_workout);
        assert!(PlannedWorkout::new(Weekday::Sun, WorkoutType::LongRun, 120).key_workout);
        assert!(!PlannedWorkout::new(Weekday::Wed, WorkoutType::Easy, 40).key_workout);
    }
}
