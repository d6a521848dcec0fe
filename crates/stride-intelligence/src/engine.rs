// ABOUTME: Adaptation pipeline turning a baseline plan and constraints into ranked modifications
// ABOUTME: Runs generators in isolation, matches patterns, resolves conflicts, ranks and assesses risk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Adaptation Engine
//!
//! The pipeline is pure: no I/O, no clock, no shared mutable state. The same
//! request and response profile always produce the same result, so one
//! engine can serve any number of concurrent callers.
//!
//! Steps:
//! 1. Validate every input, failing fast on malformed values
//! 2. Run the four constraint generators, isolating failures per category
//! 3. Match the methodology's trigger patterns against athlete metrics
//! 4. Resolve conflicting modifications
//! 5. Rank the survivors with the athlete's learned preferences
//! 6. Assess risk and predicted effectiveness

use crate::config::AdaptationConfig;
use crate::conflicts::{ConflictGroup, ConflictResolver};
use crate::generators::{
    ConstraintCategory, EnvironmentalGenerator, EquipmentGenerator, InjuryGenerator,
    InjuryRiskAssessment, TimeGenerator,
};
use crate::methodology::MethodologyRegistry;
use crate::metrics::AthleteMetrics;
use crate::prioritizer::Prioritizer;
use crate::recommendations::{build_recommendations, GeneratorWarning, Recommendation};
use crate::records::{ConstraintSummary, GeneratorOutput};
use crate::response_profile::ResponseProfile;
use crate::risk::{RiskAssessment, RiskAssessor};
use crate::triggers::PatternMatcher;
use serde::{Deserialize, Serialize};
use stride_core::constants::limits::{SCORE_MAX, SCORE_MIN};
use stride_core::errors::{AppError, AppResult};
use stride_core::models::{
    CompletedWorkout, EnvironmentalConditions, EquipmentAvailability, InjuryStatus, Methodology,
    Modification, TimeAvailability, TrainingPlan,
};
use tracing::{debug, info, warn};

/// Everything one adaptation run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationRequest {
    /// Baseline plan, never mutated
    pub plan: TrainingPlan,
    /// Methodology whose profile drives the adaptation
    pub methodology: Methodology,
    /// Environment at the training location
    pub environmental: EnvironmentalConditions,
    /// Facility access
    pub equipment: EquipmentAvailability,
    /// Time budget
    pub time: TimeAvailability,
    /// Injury picture
    pub injury: InjuryStatus,
    /// Recent completed sessions for load and recovery assessment
    pub recent_workouts: Vec<CompletedWorkout>,
    /// Pre-aggregated metrics; derived from `recent_workouts` when absent
    pub metrics: Option<AthleteMetrics>,
}

impl AdaptationRequest {
    /// Unconstrained request using the plan's own methodology
    #[must_use]
    pub fn new(plan: TrainingPlan) -> Self {
        Self {
            methodology: plan.methodology,
            plan,
            environmental: EnvironmentalConditions::default(),
            equipment: EquipmentAvailability::default(),
            time: TimeAvailability::default(),
            injury: InjuryStatus::default(),
            recent_workouts: Vec::new(),
            metrics: None,
        }
    }

    /// Adapt under a methodology given by name
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the name is not a known methodology
    pub fn with_methodology_name(mut self, name: &str) -> AppResult<Self> {
        self.methodology = name.parse()?;
        Ok(self)
    }

    /// Set environmental conditions
    #[must_use]
    pub fn with_environment(mut self, environmental: EnvironmentalConditions) -> Self {
        self.environmental = environmental;
        self
    }

    /// Set facility access
    #[must_use]
    pub fn with_equipment(mut self, equipment: EquipmentAvailability) -> Self {
        self.equipment = equipment;
        self
    }

    /// Set the time budget
    #[must_use]
    pub fn with_time(mut self, time: TimeAvailability) -> Self {
        self.time = time;
        self
    }

    /// Set the injury picture
    #[must_use]
    pub fn with_injury(mut self, injury: InjuryStatus) -> Self {
        self.injury = injury;
        self
    }

    /// Set recent completed workouts
    #[must_use]
    pub fn with_recent_workouts(mut self, workouts: Vec<CompletedWorkout>) -> Self {
        self.recent_workouts = workouts;
        self
    }

    /// Supply pre-aggregated athlete metrics
    #[must_use]
    pub fn with_metrics(mut self, metrics: AthleteMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    fn validate(&self) -> AppResult<()> {
        if self.plan.athlete_id.trim().is_empty() {
            return Err(AppError::missing_field("plan.athlete_id"));
        }
        self.environmental.validate()?;
        self.time.validate()?;
        self.injury.validate()?;
        for workout in &self.recent_workouts {
            validate_workout(workout)?;
        }
        Ok(())
    }
}

fn validate_workout(workout: &CompletedWorkout) -> AppResult<()> {
    if let Some(effort) = workout.perceived_effort {
        if !(1..=10).contains(&effort) {
            return Err(AppError::out_of_range(
                "perceived_effort",
                format!("perceived_effort must be between 1 and 10, got {effort}"),
            ));
        }
    }
    if let Some(recovery) = workout.recovery_score {
        if !recovery.is_finite() || !(SCORE_MIN..=SCORE_MAX).contains(&recovery) {
            return Err(AppError::out_of_range(
                "recovery_score",
                format!("recovery_score must be between 0 and 100, got {recovery}"),
            ));
        }
    }
    if let Some(stress) = workout.training_stress_score {
        if !stress.is_finite() || stress < 0.0 {
            return Err(AppError::out_of_range(
                "training_stress_score",
                format!("training_stress_score must be non-negative, got {stress}"),
            ));
        }
    }
    Ok(())
}

/// Outcome of one adaptation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationResult {
    /// Conflict-free modifications in application order
    pub modifications: Vec<Modification>,
    /// Constraint records per category
    pub constraints: ConstraintSummary,
    /// Human-facing recommendations, most urgent first
    pub recommendations: Vec<Recommendation>,
    /// Risk summary
    pub risk_assessment: RiskAssessment,
    /// Predicted effectiveness of the adapted plan
    pub effectiveness: f64,
    /// Names of the methodology patterns that fired
    pub triggered_patterns: Vec<String>,
    /// Dynamic load risk, present when recent workouts were supplied
    pub injury_risk: Option<InjuryRiskAssessment>,
    /// Conflict groups collapsed during resolution
    pub conflicts: Vec<ConflictGroup>,
    /// Generators that failed and were skipped
    pub warnings: Vec<GeneratorWarning>,
}

/// Constraint-driven plan adaptation engine
#[derive(Debug, Clone)]
pub struct AdaptationEngine {
    config: AdaptationConfig,
    registry: MethodologyRegistry,
}

impl Default for AdaptationEngine {
    fn default() -> Self {
        Self::new(AdaptationConfig::default())
    }
}

impl AdaptationEngine {
    /// Engine with the built-in methodology profiles
    #[must_use]
    pub fn new(config: AdaptationConfig) -> Self {
        Self {
            config,
            registry: MethodologyRegistry::builtin(),
        }
    }

    /// Replace the methodology registry
    #[must_use]
    pub fn with_registry(mut self, registry: MethodologyRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &AdaptationConfig {
        &self.config
    }

    /// Methodology profiles in use
    #[must_use]
    pub const fn registry(&self) -> &MethodologyRegistry {
        &self.registry
    }

    /// Adapt a plan to the request's constraints
    ///
    /// `profile` is the athlete's learned response profile for the request's
    /// methodology, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if any input is malformed or the methodology has no
    /// profile. A failing generator does not fail the run; it is reported in
    /// `warnings` and as a recommendation.
    pub fn adapt_plan(
        &self,
        request: &AdaptationRequest,
        profile: Option<&ResponseProfile>,
    ) -> AppResult<AdaptationResult> {
        request
            .validate()
            .map_err(|e| e.with_athlete(request.plan.athlete_id.clone()))?;
        let methodology = self.registry.get(request.methodology)?;

        let injury_generator = InjuryGenerator::new(&self.config.injury);
        let injury_risk = (!request.recent_workouts.is_empty())
            .then(|| injury_generator.assess_risk(&request.recent_workouts));
        let risk_for_generator = injury_risk.clone().unwrap_or_default();

        let outcomes = [
            (
                ConstraintCategory::Environmental,
                EnvironmentalGenerator::new(&self.config.environmental).generate(
                    &request.plan,
                    methodology,
                    &request.environmental,
                ),
            ),
            (
                ConstraintCategory::Equipment,
                EquipmentGenerator::new(&self.config.equipment).generate(
                    &request.plan,
                    methodology,
                    &request.equipment,
                ),
            ),
            (
                ConstraintCategory::Time,
                TimeGenerator::new(&self.config.time).generate(
                    &request.plan,
                    methodology,
                    &request.time,
                ),
            ),
            (
                ConstraintCategory::Injury,
                injury_generator.generate(&request.injury, &risk_for_generator),
            ),
        ];

        let mut candidates = Vec::new();
        let mut constraints = ConstraintSummary::default();
        let mut warnings = Vec::new();
        for (category, outcome) in outcomes {
            match outcome {
                Ok(GeneratorOutput {
                    modifications,
                    constraints: records,
                }) => {
                    candidates.extend(modifications);
                    for record in records {
                        constraints.push(record);
                    }
                }
                Err(e) => {
                    warn!(
                        athlete_id = %request.plan.athlete_id,
                        category = %category,
                        error = %e,
                        "Constraint generator failed, continuing without it"
                    );
                    warnings.push(GeneratorWarning {
                        category,
                        message: e.to_string(),
                    });
                }
            }
        }

        let metrics = request.metrics.clone().unwrap_or_else(|| {
            AthleteMetrics::from_workouts(
                &request.recent_workouts,
                self.config.injury.acute_window_days,
                self.config.injury.chronic_window_days,
            )
        });
        let matches =
            PatternMatcher::new(&self.config.triggers).evaluate(&methodology.patterns, &metrics);
        for fired in &matches {
            candidates.extend(fired.modifications.iter().cloned());
        }
        let candidate_count = candidates.len();

        let resolution = ConflictResolver::resolve(candidates);
        let modifications = Prioritizer::new(&self.config.prioritization)
            .prioritize(resolution.modifications, profile);

        let assessor = RiskAssessor::new(&self.config.risk);
        let elevated_load = injury_risk
            .as_ref()
            .filter(|r| r.score > self.config.injury.dynamic_risk_threshold);
        let risk_assessment = assessor.assess(&modifications, &request.injury, elevated_load);
        let effectiveness = assessor.effectiveness(&modifications, &constraints, methodology);
        let recommendations = build_recommendations(&constraints, &matches, &warnings);

        debug!(
            candidates = candidate_count,
            conflict_groups = resolution.conflict_groups.len(),
            "Adaptation candidates resolved"
        );
        info!(
            athlete_id = %request.plan.athlete_id,
            plan_id = %request.plan.id,
            methodology = %request.methodology,
            modifications = modifications.len(),
            constraints = constraints.len(),
            patterns = matches.len(),
            warnings = warnings.len(),
            overall_risk = ?risk_assessment.overall_risk,
            effectiveness,
            "Plan adapted"
        );

        Ok(AdaptationResult {
            modifications,
            constraints,
            recommendations,
            risk_assessment,
            effectiveness,
            triggered_patterns: matches.into_iter().map(|m| m.pattern_name).collect(),
            injury_risk,
            conflicts: resolution.conflict_groups,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};
    use stride_core::errors::ErrorCode;
    use stride_core::models::{
        ModificationKind, PlannedWorkout, TrainingBlock, TrainingPhase, TrainingWeek, WorkoutType,
    };

    fn plan(methodology: Methodology) -> TrainingPlan {
        let week = TrainingWeek {
            week_number: 1,
            workouts: vec![
                PlannedWorkout::new(Weekday::Tue, WorkoutType::Intervals, 60),
                PlannedWorkout::new(Weekday::Thu, WorkoutType::Tempo, 50),
                PlannedWorkout::new(Weekday::Sun, WorkoutType::LongRun, 120),
            ],
        };
        let block = TrainingBlock {
            phase: TrainingPhase::Base,
            weeks: vec![week],
        };
        TrainingPlan::new("plan-1", "athlete-1", methodology, vec![block])
    }

    #[test]
    fn test_unconstrained_request_changes_nothing() {
        let engine = AdaptationEngine::default();
        let result = engine
            .adapt_plan(&AdaptationRequest::new(plan(Methodology::Daniels)), None)
            .unwrap();
        assert!(result.modifications.is_empty());
        assert!(result.constraints.is_empty());
        assert!((result.effectiveness - 100.0).abs() < 1e-9);
        assert!(result.injury_risk.is_none());
    }

    #[test]
    fn test_empty_plan_time_failure_is_isolated() {
        let engine = AdaptationEngine::default();
        let empty = TrainingPlan::new("p", "athlete-1", Methodology::Custom, Vec::new());
        let request = AdaptationRequest::new(empty)
            .with_time(TimeAvailability {
                weekly_available_hours: Some(3.0),
                ..TimeAvailability::default()
            })
            .with_environment(EnvironmentalConditions {
                temperature_celsius: Some(36.0),
                humidity_percent: Some(60.0),
                ..EnvironmentalConditions::default()
            });
        let result = engine.adapt_plan(&request, None).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].category, ConstraintCategory::Time);
        assert!(!result.modifications.is_empty());
    }

    #[test]
    fn test_malformed_input_fails_fast() {
        let engine = AdaptationEngine::default();
        let request = AdaptationRequest::new(plan(Methodology::Daniels)).with_environment(
            EnvironmentalConditions {
                humidity_percent: Some(150.0),
                ..EnvironmentalConditions::default()
            },
        );
        let err = engine.adapt_plan(&request, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_effort_above_ten_is_rejected() {
        let engine = AdaptationEngine::default();
        let request =
            AdaptationRequest::new(plan(Methodology::Daniels)).with_recent_workouts(vec![
                CompletedWorkout {
                    date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                    workout_type: WorkoutType::Easy,
                    duration_minutes: 40,
                    perceived_effort: Some(11),
                    training_stress_score: None,
                    recovery_score: None,
                    completed_as_planned: true,
                },
            ]);
        assert!(engine.adapt_plan(&request, None).is_err());
    }

    #[test]
    fn test_unknown_methodology_name_is_invalid_input() {
        let err = AdaptationRequest::new(plan(Methodology::Daniels))
            .with_methodology_name("maffetone")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_low_completion_fires_adherence_pattern() {
        use crate::metrics::{Metric, MetricSnapshot};
        let engine = AdaptationEngine::default();
        let request = AdaptationRequest::new(plan(Methodology::Custom)).with_metrics(
            AthleteMetrics::from_snapshot(MetricSnapshot::new().with(Metric::CompletionRate, 55.0)),
        );
        let result = engine.adapt_plan(&request, None).unwrap();
        assert_eq!(result.triggered_patterns, vec!["adherence_drop".to_owned()]);
        assert_eq!(result.modifications[0].kind, ModificationKind::ReduceVolume);
        assert!(result.modifications[0].methodology_specific);
    }
}
