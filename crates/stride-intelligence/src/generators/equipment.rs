// ABOUTME: Equipment constraint generator substituting sessions that need a missing facility
// ABOUTME: Emits substitution modifications with fixed retained-effectiveness records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::EquipmentConfig;
use crate::methodology::MethodologyProfile;
use crate::records::{ConstraintRecord, EquipmentConstraint, GeneratorOutput};
use stride_core::errors::AppResult;
use stride_core::models::{
    EquipmentAvailability, Facility, Modification, ModificationKind, PlannedWorkout, Priority,
    TrainingPlan, WorkoutType,
};
use tracing::debug;

/// Emphasis at which a dependent workout type is central to the methodology
const CENTRAL_EMPHASIS: f64 = 0.9;

struct Substitute {
    limitation: &'static str,
    workaround: &'static str,
    alternatives: &'static [&'static str],
    priority: Priority,
}

const fn substitute_for(facility: Facility) -> Substitute {
    match facility {
        Facility::Track => Substitute {
            limitation: "No measured track for pace-controlled intervals",
            workaround: "Run intervals by time on a flat road loop with GPS pacing",
            alternatives: &["Time-based fartlek", "Treadmill intervals"],
            priority: Priority::Medium,
        },
        Facility::Gym => Substitute {
            limitation: "No gym for strength sessions",
            workaround: "Bodyweight strength circuit with lunges, step-ups and planks",
            alternatives: &["Resistance band routine", "Hill sprints for power"],
            priority: Priority::Low,
        },
        Facility::Pool => Substitute {
            limitation: "No pool for aqua jogging",
            workaround: "Cycling or elliptical at matched effort",
            alternatives: &["Brisk walking", "Rowing ergometer"],
            priority: Priority::Low,
        },
        Facility::Treadmill => Substitute {
            limitation: "No treadmill for controlled indoor sessions",
            workaround: "Outdoor loop close to home at planned effort",
            alternatives: &["Cross-training indoors"],
            priority: Priority::Low,
        },
        Facility::HeartRateMonitor => Substitute {
            limitation: "No heart rate monitor for zone-based sessions",
            workaround: "Use perceived effort and the talk test for zones",
            alternatives: &["Pace-based zones"],
            priority: Priority::Low,
        },
    }
}

fn depends_on(facility: Facility, workout: &PlannedWorkout) -> bool {
    match facility {
        Facility::Track => matches!(
            workout.workout_type,
            WorkoutType::Intervals | WorkoutType::Repetition
        ),
        Facility::Gym => workout.workout_type == WorkoutType::Strength,
        Facility::Pool => workout.workout_type == WorkoutType::AquaJogging,
        Facility::Treadmill => workout.description.to_lowercase().contains("treadmill"),
        Facility::HeartRateMonitor => !matches!(
            workout.workout_type,
            WorkoutType::Rest | WorkoutType::Strength
        ),
    }
}

/// Generates substitutions for missing equipment
pub struct EquipmentGenerator<'a> {
    config: &'a EquipmentConfig,
}

impl<'a> EquipmentGenerator<'a> {
    /// Create a generator bound to its configuration
    #[must_use]
    pub const fn new(config: &'a EquipmentConfig) -> Self {
        Self { config }
    }

    /// Generate a substitution and a record per missing facility
    ///
    /// Dependent workouts only scale the priority: none keeps it low,
    /// methodology-central ones escalate it to high.
    ///
    /// # Errors
    ///
    /// Never fails for valid availability; the signature matches the other generators
    pub fn generate(
        &self,
        plan: &TrainingPlan,
        profile: &MethodologyProfile,
        equipment: &EquipmentAvailability,
    ) -> AppResult<GeneratorOutput> {
        let mut output = GeneratorOutput::default();

        for facility in equipment.missing() {
            let dependent: Vec<&PlannedWorkout> = plan
                .workouts()
                .filter(|w| depends_on(facility, w))
                .collect();

            let substitute = substitute_for(facility);
            let effectiveness = self.config.effectiveness_for(facility);
            let central = dependent
                .iter()
                .any(|w| profile.emphasis(w.workout_type) >= CENTRAL_EMPHASIS);
            let priority = if dependent.is_empty() {
                Priority::Low
            } else if central {
                substitute.priority.max(Priority::High)
            } else {
                substitute.priority
            };

            output.modify(
                Modification::new(
                    ModificationKind::SubstituteWorkout,
                    format!("No {facility} available: {}", substitute.workaround),
                    priority,
                )
                .with_change("facility", facility.to_string())
                .with_change("affectedWorkouts", dependent.len())
                .with_change("retainedEffectiveness", effectiveness),
            );
            output.record(ConstraintRecord::Equipment(EquipmentConstraint {
                missing: facility,
                limitation: substitute.limitation.to_owned(),
                workaround: substitute.workaround.to_owned(),
                effectiveness,
                alternatives: substitute
                    .alternatives
                    .iter()
                    .map(|s| (*s).to_owned())
                    .collect(),
            }));
        }

        debug!(
            substitutions = output.modifications.len(),
            "Equipment constraints generated"
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methodology::MethodologyRegistry;
    use chrono::Weekday;
    use stride_core::models::{Methodology, TrainingBlock, TrainingPhase, TrainingWeek};

    fn plan_with(types: &[WorkoutType]) -> TrainingPlan {
        let workouts = types
            .iter()
            .map(|t| PlannedWorkout::new(Weekday::Tue, *t, 60))
            .collect();
        TrainingPlan::new(
            "plan",
            "athlete",
            Methodology::Daniels,
            vec![TrainingBlock {
                phase: TrainingPhase::Build,
                weeks: vec![TrainingWeek {
                    week_number: 1,
                    workouts,
                }],
            }],
        )
    }

    #[test]
    fn test_missing_track_substitutes_intervals() {
        let config = EquipmentConfig::default();
        let registry = MethodologyRegistry::builtin();
        let equipment = EquipmentAvailability {
            track: Some(false),
            ..EquipmentAvailability::default()
        };
        let output = EquipmentGenerator::new(&config)
            .generate(
                &plan_with(&[WorkoutType::Intervals, WorkoutType::Easy]),
                registry.get(Methodology::Daniels).unwrap(),
                &equipment,
            )
            .unwrap();
        assert_eq!(output.modifications.len(), 1);
        // Intervals are central to Daniels, so the substitution is escalated
        assert_eq!(output.modifications[0].priority, Priority::High);
        let ConstraintRecord::Equipment(record) = &output.constraints[0] else {
            panic!("expected equipment record");
        };
        assert!((record.effectiveness - 85.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_facility_without_dependent_workouts_is_still_recorded() {
        let config = EquipmentConfig::default();
        let registry = MethodologyRegistry::builtin();
        let equipment = EquipmentAvailability {
            gym: Some(false),
            pool: Some(false),
            ..EquipmentAvailability::default()
        };
        let output = EquipmentGenerator::new(&config)
            .generate(
                &plan_with(&[WorkoutType::Easy]),
                registry.get(Methodology::Daniels).unwrap(),
                &equipment,
            )
            .unwrap();
        assert_eq!(output.modifications.len(), 2);
        assert_eq!(output.constraints.len(), 2);
        for modification in &output.modifications {
            assert_eq!(modification.priority, Priority::Low);
            assert_eq!(modification.change_f64("affectedWorkouts"), Some(0.0));
        }
        let effectiveness: Vec<f64> = output
            .constraints
            .iter()
            .filter_map(|c| match c {
                ConstraintRecord::Equipment(record) => Some(record.effectiveness),
                _ => None,
            })
            .collect();
        assert_eq!(effectiveness, vec![70.0, 75.0]);
    }

    #[test]
    fn test_missing_gym_keeps_seventy_percent() {
        let config = EquipmentConfig::default();
        let registry = MethodologyRegistry::builtin();
        let equipment = EquipmentAvailability {
            gym: Some(false),
            ..EquipmentAvailability::default()
        };
        let output = EquipmentGenerator::new(&config)
            .generate(
                &plan_with(&[WorkoutType::Strength]),
                registry.get(Methodology::Lydiard).unwrap(),
                &equipment,
            )
            .unwrap();
        assert_eq!(output.modifications[0].priority, Priority::Low);
        assert_eq!(
            output.modifications[0].change_f64("retainedEffectiveness"),
            Some(70.0)
        );
    }
}
