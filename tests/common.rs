// ABOUTME: Shared plan and workout fixtures for integration tests
// ABOUTME: Builds deterministic baseline plans and completed-workout histories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation
)]
//! Shared test utilities for `stride_planner`

use chrono::{NaiveDate, Weekday};
use stride_planner::models::{
    CompletedWorkout, Methodology, PlannedWorkout, TrainingBlock, TrainingPhase, TrainingPlan,
    TrainingWeek, WorkoutType,
};

/// One week totalling 480 minutes (8 hours)
pub fn eight_hour_week(week_number: u32) -> TrainingWeek {
    let mut long_run = PlannedWorkout::new(Weekday::Sun, WorkoutType::LongRun, 150);
    long_run.key_workout = true;
    let mut intervals = PlannedWorkout::new(Weekday::Tue, WorkoutType::Intervals, 75);
    intervals.key_workout = true;
    TrainingWeek {
        week_number,
        workouts: vec![
            PlannedWorkout::new(Weekday::Mon, WorkoutType::Easy, 60),
            intervals,
            PlannedWorkout::new(Weekday::Wed, WorkoutType::Easy, 60),
            PlannedWorkout::new(Weekday::Thu, WorkoutType::Tempo, 60),
            PlannedWorkout::new(Weekday::Fri, WorkoutType::Recovery, 30),
            PlannedWorkout::new(Weekday::Sat, WorkoutType::Easy, 45),
            long_run,
        ],
    }
}

/// Four-week plan, two base weeks then two build weeks, 8 hours per week
pub fn eight_hour_plan(methodology: Methodology) -> TrainingPlan {
    let blocks = vec![
        TrainingBlock {
            phase: TrainingPhase::Base,
            weeks: vec![eight_hour_week(1), eight_hour_week(2)],
        },
        TrainingBlock {
            phase: TrainingPhase::Build,
            weeks: vec![eight_hour_week(3), eight_hour_week(4)],
        },
    ];
    TrainingPlan::new("plan-8h", "athlete-1", methodology, blocks)
}

/// Plan with a single week of the given session minutes, all easy runs
pub fn plan_with_weekly_minutes(methodology: Methodology, sessions: &[u32]) -> TrainingPlan {
    let days = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    let workouts = sessions
        .iter()
        .zip(days)
        .map(|(&minutes, day)| PlannedWorkout::new(day, WorkoutType::Easy, minutes))
        .collect();
    let block = TrainingBlock {
        phase: TrainingPhase::Base,
        weeks: vec![TrainingWeek {
            week_number: 1,
            workouts,
        }],
    };
    TrainingPlan::new("plan-custom", "athlete-1", methodology, vec![block])
}

pub fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

pub fn completed(
    date: NaiveDate,
    minutes: u32,
    effort: u8,
    recovery: Option<f64>,
) -> CompletedWorkout {
    CompletedWorkout {
        date,
        workout_type: WorkoutType::Easy,
        duration_minutes: minutes,
        perceived_effort: Some(effort),
        training_stress_score: None,
        recovery_score: recovery,
        completed_as_planned: true,
    }
}

/// Three easy weeks followed by a week of much harder training
///
/// Acute:chronic ratio is about 2.7 and the last week's recovery averages 30.
pub fn load_spike_history() -> Vec<CompletedWorkout> {
    (1..=28)
        .map(|day| {
            if day <= 21 {
                completed(march(day), 30, 4, Some(70.0))
            } else {
                completed(march(day), 90, 8, Some(30.0))
            }
        })
        .collect()
}

/// Four even weeks of moderate training with good recovery
pub fn steady_history() -> Vec<CompletedWorkout> {
    (1..=28)
        .map(|day| completed(march(day), 45, 5, Some(80.0)))
        .collect()
}
