// ABOUTME: Time constraint generator compressing the plan into the athlete's available hours
// ABOUTME: Selects a compression strategy by weekly deficit and sizes the volume reduction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::round1;
use crate::config::TimeConfig;
use crate::methodology::MethodologyProfile;
use crate::records::{
    CompressionApproach, CompressionStrategy, ConstraintRecord, GeneratorOutput, TimeConstraint,
};
use std::collections::HashSet;
use stride_core::constants::units::MINUTES_PER_HOUR;
use stride_core::errors::{AppError, AppResult};
use stride_core::models::{
    Modification, ModificationKind, Priority, TimeAvailability, TrainingPlan, WorkoutType,
};
use tracing::debug;

/// Generates compression modifications for limited training time
pub struct TimeGenerator<'a> {
    config: &'a TimeConfig,
}

impl<'a> TimeGenerator<'a> {
    /// Create a generator bound to its configuration
    #[must_use]
    pub const fn new(config: &'a TimeConfig) -> Self {
        Self { config }
    }

    /// Pick the compression strategy for a weekly deficit in hours
    #[must_use]
    pub fn strategy_for(&self, deficit_hours: f64) -> CompressionStrategy {
        let cfg = self.config;
        let (approach, retained, description, priorities): (_, _, _, &[&str]) =
            if deficit_hours < cfg.intensity_focus_max_deficit_hours {
                (
                    CompressionApproach::IntensityFocus,
                    cfg.intensity_focus_retained,
                    "Keep every quality session and trim easy mileage",
                    &["Quality sessions", "Long run", "Easy volume"],
                )
            } else if deficit_hours < cfg.volume_reduction_max_deficit_hours {
                (
                    CompressionApproach::VolumeReduction,
                    cfg.volume_reduction_retained,
                    "Shorten every session proportionally",
                    &["Quality sessions", "Long run"],
                )
            } else if deficit_hours < cfg.session_combination_max_deficit_hours {
                (
                    CompressionApproach::SessionCombination,
                    cfg.session_combination_retained,
                    "Combine easy runs with quality sessions as warm-up and cool-down",
                    &["Key workouts", "Combined aerobic volume"],
                )
            } else {
                (
                    CompressionApproach::KeyWorkoutOnly,
                    cfg.key_workout_only_retained,
                    "Run only the key workouts of each week",
                    &["Key workouts"],
                )
            };

        CompressionStrategy {
            approach,
            retained_effectiveness: retained,
            description: description.to_owned(),
            priorities: priorities.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    /// Generate compression modifications for the available time
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when available hours are given but the plan has no weeks
    pub fn generate(
        &self,
        plan: &TrainingPlan,
        profile: &MethodologyProfile,
        time: &TimeAvailability,
    ) -> AppResult<GeneratorOutput> {
        let mut output = GeneratorOutput::default();

        if let Some(available_hours) = time.weekly_available_hours {
            let required_minutes = plan.average_weekly_minutes().ok_or_else(|| {
                AppError::invalid_input("Plan has no weeks to measure weekly time against")
                    .with_field("plan.blocks")
            })?;
            self.compress(
                profile,
                available_hours,
                required_minutes / MINUTES_PER_HOUR,
                &mut output,
            );
        }
        if let Some(max_minutes) = time.max_session_minutes {
            Self::split_long_sessions(plan, max_minutes, &mut output);
        }
        if let Some(days) = time.available_days {
            Self::fit_training_days(plan, days, &mut output);
        }

        debug!(
            modifications = output.modifications.len(),
            "Time constraints generated"
        );
        Ok(output)
    }

    fn compress(
        &self,
        profile: &MethodologyProfile,
        available_hours: f64,
        required_hours: f64,
        output: &mut GeneratorOutput,
    ) {
        let deficit_hours = required_hours - available_hours;
        if deficit_hours <= 0.0 {
            return;
        }
        let strategy = self.strategy_for(deficit_hours);
        let volume_reduction =
            (deficit_hours / required_hours * 100.0).min(self.config.max_volume_reduction);
        let priority = if strategy.approach == CompressionApproach::KeyWorkoutOnly {
            Priority::High
        } else {
            Priority::Medium
        };

        output.modify(
            Modification::new(
                ModificationKind::TimeCompression,
                format!(
                    "{available_hours:.1}h available against {required_hours:.1}h planned, apply {}",
                    strategy.approach
                ),
                priority,
            )
            .with_change("approach", strategy.approach.as_str())
            .with_change("retainedEffectiveness", strategy.retained_effectiveness)
            .with_change("deficitHours", round1(deficit_hours))
            .with_change(
                "protectedWorkouts",
                protected_workouts(profile)
                    .iter()
                    .map(|t| serde_json::json!(t))
                    .collect::<Vec<_>>(),
            ),
        );
        output.modify(
            Modification::new(
                ModificationKind::ReduceVolume,
                format!("Weekly time deficit of {deficit_hours:.1}h"),
                Priority::Medium,
            )
            .with_change("volumeReduction", round1(volume_reduction)),
        );
        output.record(ConstraintRecord::Time(TimeConstraint {
            available_hours,
            required_hours: round1(required_hours),
            deficit_hours: round1(deficit_hours),
            compression: strategy,
        }));
    }

    fn split_long_sessions(plan: &TrainingPlan, max_minutes: u32, output: &mut GeneratorOutput) {
        let too_long = plan
            .workouts()
            .filter(|w| w.duration_minutes > max_minutes)
            .count();
        if too_long == 0 {
            return;
        }
        output.modify(
            Modification::new(
                ModificationKind::SubstituteWorkout,
                format!("Split {too_long} sessions longer than {max_minutes} minutes into doubles"),
                Priority::Low,
            )
            .with_change("maxSessionMinutes", max_minutes)
            .with_change("affectedWorkouts", too_long),
        );
    }

    fn fit_training_days(plan: &TrainingPlan, days: u8, output: &mut GeneratorOutput) {
        let busiest = plan
            .weeks()
            .map(|w| {
                w.workouts
                    .iter()
                    .filter(|s| s.workout_type != WorkoutType::Rest)
                    .map(|s| s.day)
                    .collect::<HashSet<_>>()
                    .len()
            })
            .max()
            .unwrap_or(0);
        let available = usize::from(days);
        if busiest <= available {
            return;
        }
        output.modify(
            Modification::new(
                ModificationKind::SubstituteWorkout,
                format!("Plan uses {busiest} training days but only {days} are available"),
                Priority::Medium,
            )
            .with_change("availableDays", days)
            .with_change("daysToMerge", busiest - available),
        );
    }
}

/// Workout types the methodology protects first when time is short
fn protected_workouts(profile: &MethodologyProfile) -> Vec<WorkoutType> {
    let mut ranked: Vec<(WorkoutType, f64)> = profile
        .workout_type_emphasis
        .iter()
        .filter(|(t, _)| **t != WorkoutType::Easy)
        .map(|(t, e)| (*t, *e))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().take(2).map(|(t, _)| t).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methodology::MethodologyRegistry;
    use chrono::Weekday;
    use stride_core::models::{
        Methodology, PlannedWorkout, TrainingBlock, TrainingPhase, TrainingWeek,
    };

    fn weekly_plan(minutes_per_day: &[u32]) -> TrainingPlan {
        let days = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        let workouts: Vec<_> = minutes_per_day
            .iter()
            .zip(days)
            .map(|(m, d)| PlannedWorkout::new(d, WorkoutType::Easy, *m))
            .collect();
        TrainingPlan::new(
            "plan",
            "athlete",
            Methodology::Pfitzinger,
            vec![TrainingBlock {
                phase: TrainingPhase::Base,
                weeks: vec![TrainingWeek {
                    week_number: 1,
                    workouts,
                }],
            }],
        )
    }

    #[test]
    fn test_strategy_bands() {
        let config = TimeConfig::default();
        let generator = TimeGenerator::new(&config);
        let small = generator.strategy_for(1.0);
        assert_eq!(small.approach, CompressionApproach::IntensityFocus);
        assert!(small.retained_effectiveness > 85.0);
        assert_eq!(
            generator.strategy_for(2.0).approach,
            CompressionApproach::VolumeReduction
        );
        assert_eq!(
            generator.strategy_for(3.0).approach,
            CompressionApproach::SessionCombination
        );
        let large = generator.strategy_for(6.0);
        assert_eq!(large.approach, CompressionApproach::KeyWorkoutOnly);
        assert!(large.retained_effectiveness < 70.0);
    }

    #[test]
    fn test_volume_reduction_is_capped_at_fifty_percent() {
        let config = TimeConfig::default();
        let registry = MethodologyRegistry::builtin();
        let plan = weekly_plan(&[80, 80, 80, 80, 80, 80]);
        let time = TimeAvailability {
            weekly_available_hours: Some(2.0),
            ..TimeAvailability::default()
        };
        let output = TimeGenerator::new(&config)
            .generate(&plan, registry.get(Methodology::Pfitzinger).unwrap(), &time)
            .unwrap();
        let volume = output
            .modifications
            .iter()
            .find(|m| m.kind == ModificationKind::ReduceVolume)
            .unwrap();
        assert_eq!(volume.change_f64("volumeReduction"), Some(50.0));
    }

    #[test]
    fn test_surplus_time_produces_nothing() {
        let config = TimeConfig::default();
        let registry = MethodologyRegistry::builtin();
        let time = TimeAvailability {
            weekly_available_hours: Some(10.0),
            ..TimeAvailability::default()
        };
        let output = TimeGenerator::new(&config)
            .generate(
                &weekly_plan(&[60, 60]),
                registry.get(Methodology::Pfitzinger).unwrap(),
                &time,
            )
            .unwrap();
        assert!(output.modifications.is_empty());
    }

    #[test]
    fn test_plan_without_weeks_is_an_error() {
        let config = TimeConfig::default();
        let registry = MethodologyRegistry::builtin();
        let plan = TrainingPlan::new("plan", "athlete", Methodology::Hudson, Vec::new());
        let time = TimeAvailability {
            weekly_available_hours: Some(5.0),
            ..TimeAvailability::default()
        };
        assert!(TimeGenerator::new(&config)
            .generate(&plan, registry.get(Methodology::Hudson).unwrap(), &time)
            .is_err());
    }

    #[test]
    fn test_long_sessions_and_busy_weeks_are_flagged() {
        let config = TimeConfig::default();
        let registry = MethodologyRegistry::builtin();
        let time = TimeAvailability {
            max_session_minutes: Some(90),
            available_days: Some(3),
            ..TimeAvailability::default()
        };
        let output = TimeGenerator::new(&config)
            .generate(
                &weekly_plan(&[45, 45, 45, 120, 45]),
                registry.get(Methodology::Pfitzinger).unwrap(),
                &time,
            )
            .unwrap();
        assert_eq!(output.modifications.len(), 2);
        assert!(output
            .modifications
            .iter()
            .all(|m| m.kind == ModificationKind::SubstituteWorkout));
    }
}
