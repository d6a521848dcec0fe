// ABOUTME: Injury constraint generator for current injuries, history, risk factors and load spikes
// ABOUTME: Severity and stage scaled volume cuts, region-based substitutes and dynamic injury risk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::round1;
use crate::config::InjuryConfig;
use crate::metrics::acute_chronic_ratio;
use crate::records::{ConstraintRecord, GeneratorOutput, InjuryConstraint};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use stride_core::constants::limits::{SCORE_MAX, SCORE_MIN};
use stride_core::errors::AppResult;
use stride_core::models::{
    BodyRegion, CompletedWorkout, CurrentInjury, HealingStage, HistoricalInjury, InjurySeverity,
    InjuryStatus, Modification, ModificationKind, Priority, RiskFactor,
};
use tracing::debug;

/// Load-based injury risk computed from recent completed workouts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InjuryRiskAssessment {
    /// Risk score 0-100
    pub score: f64,
    /// Acute:chronic workload ratio, when chronic load exists
    pub acute_chronic_ratio: Option<f64>,
    /// Mean recovery score over the acute window
    pub average_recovery: Option<f64>,
    /// What drove the score
    pub factors: Vec<String>,
}

/// Non-impact activities that keep fitness while a region heals
const fn substitutes_for(region: BodyRegion) -> &'static [&'static str] {
    match region {
        BodyRegion::Foot | BodyRegion::LowerLeg => &["aqua_jogging", "swimming", "cycling"],
        BodyRegion::Ankle | BodyRegion::Knee | BodyRegion::Hip => {
            &["aqua_jogging", "swimming", "upper_body_ergometer"]
        }
        BodyRegion::Thigh => &["cycling", "swimming", "elliptical"],
        BodyRegion::LowerBack => &["aqua_jogging", "walking", "cycling"],
        BodyRegion::UpperBody => &["cycling", "elliptical", "walking"],
        BodyRegion::General => &["cycling", "aqua_jogging", "swimming"],
    }
}

/// Prehab focus for a previously injured region
const fn prehab_for(region: BodyRegion) -> &'static [&'static str] {
    match region {
        BodyRegion::Foot => &["foot strengthening", "calf raises"],
        BodyRegion::Ankle => &["eccentric heel drops", "single-leg balance"],
        BodyRegion::LowerLeg => &["progressive bone loading", "calf raises"],
        BodyRegion::Knee => &["hip abductor strengthening", "single-leg squats"],
        BodyRegion::Thigh => &["nordic curls", "foam rolling"],
        BodyRegion::Hip => &["glute activation", "clamshells"],
        BodyRegion::LowerBack => &["core stability", "dead bugs"],
        BodyRegion::UpperBody => &["mobility work"],
        BodyRegion::General => &["twice weekly strength training"],
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

/// Generates injury management modifications
pub struct InjuryGenerator<'a> {
    config: &'a InjuryConfig,
}

impl<'a> InjuryGenerator<'a> {
    /// Create a generator bound to its configuration
    #[must_use]
    pub const fn new(config: &'a InjuryConfig) -> Self {
        Self { config }
    }

    /// Volume reduction for a current injury (percent, capped)
    #[must_use]
    pub fn volume_reduction(&self, injury: &CurrentInjury) -> f64 {
        (self.config.severity_factor(injury.severity) * self.config.stage_factor(injury.stage)
            * 100.0)
            .min(self.config.max_volume_reduction)
    }

    /// Dynamic injury risk from recent completed workouts
    ///
    /// Windows are measured back from the latest workout so the score only
    /// depends on its inputs. Empty history is zero risk.
    #[must_use]
    pub fn assess_risk(&self, workouts: &[CompletedWorkout]) -> InjuryRiskAssessment {
        let Some(latest) = workouts.iter().map(|w| w.date).max() else {
            return InjuryRiskAssessment::default();
        };
        let cfg = self.config;
        let bands = &cfg.load_ratio;
        let mut factors = Vec::new();

        let ratio = acute_chronic_ratio(
            workouts,
            latest,
            cfg.acute_window_days,
            cfg.chronic_window_days,
        );
        let load_risk = match ratio {
            Some(r) if r > bands.danger_ratio => {
                factors.push(format!("Acute:chronic load ratio {r:.2} is in the danger zone"));
                bands.danger_risk
            }
            Some(r) if r > bands.caution_ratio => {
                factors.push(format!("Acute:chronic load ratio {r:.2} is elevated"));
                bands.caution_risk
            }
            Some(r) if r < bands.underload_ratio => {
                factors.push(format!("Acute:chronic load ratio {r:.2} indicates detraining"));
                bands.underload_risk
            }
            _ => bands.baseline_risk,
        };

        let acute_start = latest - Duration::days(cfg.acute_window_days);
        let recovery: Vec<f64> = workouts
            .iter()
            .filter(|w| w.date > acute_start)
            .filter_map(|w| w.recovery_score)
            .collect();
        #[allow(clippy::cast_precision_loss)] // Safe: sample counts are small
        let average_recovery =
            (!recovery.is_empty()).then(|| recovery.iter().sum::<f64>() / recovery.len() as f64);
        let recovery_risk = average_recovery.map_or(0.0, |r| {
            (SCORE_MAX - r.clamp(SCORE_MIN, SCORE_MAX)) * cfg.recovery_deficit_weight
        });
        if let Some(r) = average_recovery.filter(|r| *r < 50.0) {
            factors.push(format!("Average recovery score {r:.0} is low"));
        }

        InjuryRiskAssessment {
            score: (load_risk + recovery_risk).clamp(SCORE_MIN, SCORE_MAX),
            acute_chronic_ratio: ratio,
            average_recovery,
            factors,
        }
    }

    /// Generate injury modifications and records
    ///
    /// # Errors
    ///
    /// Never fails for validated status; the signature matches the other generators
    pub fn generate(
        &self,
        status: &InjuryStatus,
        risk: &InjuryRiskAssessment,
    ) -> AppResult<GeneratorOutput> {
        let mut output = GeneratorOutput::default();

        for injury in &status.current_injuries {
            self.current_injury(injury, &mut output);
        }
        for past in &status.injury_history {
            Self::prevention(past, &mut output);
        }
        for factor in &status.risk_factors {
            Self::mitigation(factor, &mut output);
        }
        if risk.score > self.config.dynamic_risk_threshold {
            output.modify(
                Modification::new(
                    ModificationKind::InjuryProtocol,
                    format!(
                        "Dynamic injury risk score {:.0} exceeds {:.0}",
                        risk.score, self.config.dynamic_risk_threshold
                    ),
                    Priority::High,
                )
                .with_change("riskScore", round1(risk.score))
                .with_change("riskFactors", risk.factors.clone()),
            );
        }

        debug!(
            modifications = output.modifications.len(),
            risk_score = risk.score,
            "Injury constraints generated"
        );
        Ok(output)
    }

    fn current_injury(&self, injury: &CurrentInjury, output: &mut GeneratorOutput) {
        let region = injury.region();
        let reduction = round1(self.volume_reduction(injury));
        let acute = injury.stage == HealingStage::Acute;
        let priority = match injury.severity {
            InjurySeverity::Severe if acute => Priority::Critical,
            InjurySeverity::Severe => Priority::High,
            InjurySeverity::Moderate if acute => Priority::High,
            InjurySeverity::Moderate => Priority::Medium,
            InjurySeverity::Minor => Priority::Low,
        };
        let substitutes = substitutes_for(region);
        let label = format!(
            "{} ({:?}, {:?}) affecting the {region}",
            injury.injury_type, injury.severity, injury.stage
        )
        .to_lowercase();

        output.modify(
            Modification::new(
                ModificationKind::ReduceVolume,
                format!("Current injury: {label}"),
                priority,
            )
            .with_change("volumeReduction", reduction)
            .with_change("injuryType", injury.injury_type.clone())
            .with_change("bodyRegion", region.to_string()),
        );
        output.modify(
            Modification::new(
                ModificationKind::ActivitySubstitution,
                format!("Replace running load while the {region} heals"),
                priority.min(Priority::High),
            )
            .with_change("substitutes", strings(substitutes)),
        );
        if injury.severity == InjurySeverity::Severe {
            output.modify(
                Modification::new(
                    ModificationKind::ReduceIntensity,
                    format!("Suspend quality sessions until the {} is cleared", injury.injury_type),
                    Priority::High,
                )
                .with_change("suspendQualitySessions", true),
            );
        }

        output.record(ConstraintRecord::Injury(InjuryConstraint {
            injury_type: injury.injury_type.clone(),
            body_region: region,
            limitation: format!("Running load must drop {reduction:.0}% for the {region}"),
            workaround: format!("Cross-train with {}", substitutes.join(", ")),
            monitoring_required: injury.severity != InjurySeverity::Minor || acute,
            volume_reduction: reduction,
        }));
    }

    fn prevention(past: &HistoricalInjury, output: &mut GeneratorOutput) {
        let region = past.region();
        let priority = if past.recurrences >= 2 {
            Priority::High
        } else if past.months_since.is_some_and(|m| m < 6) {
            Priority::Medium
        } else {
            Priority::Low
        };
        output.modify(
            Modification::new(
                ModificationKind::InjuryPrevention,
                format!("Previous {} in the {region}", past.injury_type),
                priority,
            )
            .with_change("bodyRegion", region.to_string())
            .with_change("prehab", strings(prehab_for(region))),
        );
    }

    fn mitigation(factor: &RiskFactor, output: &mut GeneratorOutput) {
        output.modify(
            Modification::new(
                ModificationKind::RiskMitigation,
                format!("Risk factor: {}", factor.factor),
                Priority::Medium,
            )
            .with_change("strategies", factor.mitigation_strategies.clone()),
        );
    }
}
