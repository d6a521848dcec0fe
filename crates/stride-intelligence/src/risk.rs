// ABOUTME: Risk assessment and predicted effectiveness for an adaptation result
// ABOUTME: Fixed rules produce specific risks, which roll up into a monotonic overall risk level
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Risk & Effectiveness Assessor

use crate::config::{EffectivenessConfig, RiskConfig};
use crate::generators::InjuryRiskAssessment;
use crate::methodology::MethodologyProfile;
use crate::records::ConstraintSummary;
use serde::{Deserialize, Serialize};
use stride_core::models::{InjuryStatus, Modification, Priority};

/// Overall risk of the adapted plan
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// No notable risk
    #[default]
    Low,
    /// Watch closely
    Moderate,
    /// Mitigation required
    High,
    /// Mitigation required before training continues
    Critical,
}

/// Severity of one specific risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSeverity {
    /// Minor consequences
    Low,
    /// Setback of days to weeks
    Moderate,
    /// Setback of weeks or worse
    High,
}

/// A single identified risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificRisk {
    /// `injury`, `overtraining`, `adherence`, `environmental` or `training_load`
    pub risk_type: String,
    /// Probability 0-100
    pub probability: f64,
    /// Severity
    pub severity: RiskSeverity,
    /// What raised the risk
    pub factors: Vec<String>,
}

/// Risk summary of an adaptation result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Overall level
    pub overall_risk: RiskLevel,
    /// Individual risks
    pub specific_risks: Vec<SpecificRisk>,
    /// Whether the overall level is high or critical
    pub mitigation_required: bool,
    /// What to monitor
    pub monitoring_points: Vec<String>,
}

/// Computes risk and predicted effectiveness
pub struct RiskAssessor<'a> {
    config: &'a RiskConfig,
}

impl<'a> RiskAssessor<'a> {
    /// Create an assessor using the configured rules
    #[must_use]
    pub const fn new(config: &'a RiskConfig) -> Self {
        Self { config }
    }

    /// Assess the final modification set
    ///
    /// `injury_risk` is only passed when it exceeded the dynamic risk threshold.
    #[must_use]
    pub fn assess(
        &self,
        modifications: &[Modification],
        injury: &InjuryStatus,
        injury_risk: Option<&InjuryRiskAssessment>,
    ) -> RiskAssessment {
        let rules = &self.config.rules;
        let mut risks = Vec::new();

        if injury.has_current_injury() {
            risks.push(SpecificRisk {
                risk_type: "injury".into(),
                probability: rules.injury_probability,
                severity: RiskSeverity::High,
                factors: injury
                    .current_injuries
                    .iter()
                    .map(|i| format!("Current {}", i.injury_type))
                    .collect(),
            });
        }

        let high_priority = modifications
            .iter()
            .filter(|m| m.priority >= Priority::High)
            .count();
        if high_priority > rules.overtraining_modification_limit {
            risks.push(SpecificRisk {
                risk_type: "overtraining".into(),
                probability: rules.overtraining_probability,
                severity: RiskSeverity::Moderate,
                factors: vec![format!("{high_priority} high-priority modifications")],
            });
        }

        if modifications.len() > rules.adherence_modification_limit {
            risks.push(SpecificRisk {
                risk_type: "adherence".into(),
                probability: rules.adherence_probability,
                severity: RiskSeverity::Moderate,
                factors: vec![format!(
                    "{} simultaneous plan changes",
                    modifications.len()
                )],
            });
        }

        let environmental: Vec<String> = modifications
            .iter()
            .filter(|m| m.reason_mentions("altitude") || m.reason_mentions("heat"))
            .map(|m| m.reason.clone())
            .collect();
        if !environmental.is_empty() {
            risks.push(SpecificRisk {
                risk_type: "environmental".into(),
                probability: rules.environmental_probability,
                severity: RiskSeverity::Moderate,
                factors: environmental,
            });
        }

        if let Some(load) = injury_risk {
            risks.push(SpecificRisk {
                risk_type: "training_load".into(),
                probability: load.score,
                severity: RiskSeverity::High,
                factors: load.factors.clone(),
            });
        }

        let overall_risk = self.overall(&risks);
        RiskAssessment {
            overall_risk,
            mitigation_required: overall_risk >= RiskLevel::High,
            monitoring_points: monitoring_points(&risks),
            specific_risks: risks,
        }
    }

    /// Roll specific risks up into one level
    ///
    /// Monotonic in the average probability and the maximum severity.
    #[must_use]
    pub fn overall(&self, risks: &[SpecificRisk]) -> RiskLevel {
        if risks.is_empty() {
            return RiskLevel::Low;
        }
        let levels = &self.config.levels;
        #[allow(clippy::cast_precision_loss)] // Safe: a handful of risks
        let average = risks.iter().map(|r| r.probability).sum::<f64>() / risks.len() as f64;
        let max_severity = risks
            .iter()
            .map(|r| r.severity)
            .max()
            .unwrap_or(RiskSeverity::Low);

        if average > levels.critical_probability && max_severity == RiskSeverity::High {
            RiskLevel::Critical
        } else if average > levels.high_probability || max_severity == RiskSeverity::High {
            RiskLevel::High
        } else if average > levels.moderate_probability || max_severity == RiskSeverity::Moderate
        {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    /// Predicted effectiveness of the adapted plan, clamped to the configured bounds
    #[must_use]
    pub fn effectiveness(
        &self,
        modifications: &[Modification],
        constraints: &ConstraintSummary,
        profile: &MethodologyProfile,
    ) -> f64 {
        let cfg = &self.config.effectiveness;
        let high = modifications
            .iter()
            .filter(|m| m.priority >= Priority::High)
            .count();
        let medium = modifications
            .iter()
            .filter(|m| m.priority == Priority::Medium)
            .count();

        let mut score = 100.0
            - tier_penalty(cfg, high, cfg.high_priority_penalty, cfg.high_priority_max_penalty)
            - tier_penalty(
                cfg,
                medium,
                cfg.medium_priority_penalty,
                cfg.medium_priority_max_penalty,
            );

        if let Some(loss) = mean(constraints.equipment.iter().map(|e| 100.0 - e.effectiveness)) {
            score -= loss;
        }
        if let Some(loss) = mean(
            constraints
                .time
                .iter()
                .map(|t| 100.0 - t.compression.retained_effectiveness),
        ) {
            score -= loss;
        }
        if modifications.iter().any(|m| profile.is_aligned(m)) {
            score += cfg.methodology_alignment_bonus;
        }
        score.clamp(cfg.floor, cfg.ceiling)
    }
}

/// Diminishing-returns penalty: each item costs `decay` times the previous one
fn tier_penalty(cfg: &EffectivenessConfig, count: usize, first: f64, cap: f64) -> f64 {
    let mut penalty = 0.0;
    let mut cost = first;
    for _ in 0..count {
        penalty += cost;
        cost *= cfg.penalty_decay;
        if penalty >= cap {
            return cap;
        }
    }
    penalty
}

#[allow(clippy::cast_precision_loss)] // Safe: record counts are small
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0_usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

fn monitoring_points(risks: &[SpecificRisk]) -> Vec<String> {
    let mut points: Vec<String> = Vec::new();
    for risk in risks {
        let items: &[&str] = match risk.risk_type.as_str() {
            "injury" => &["Pain during and after runs", "Gait changes"],
            "overtraining" => &["Resting heart rate", "Sleep quality"],
            "adherence" => &["Weekly completion rate"],
            "environmental" => &["Heart rate response to conditions", "Hydration status"],
            "training_load" => &["Acute:chronic load ratio", "Morning recovery score"],
            _ => &[],
        };
        for item in items {
            if !points.iter().any(|p| p == item) {
                points.push((*item).to_owned());
            }
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methodology::MethodologyRegistry;
    use crate::records::{CompressionApproach, CompressionStrategy, TimeConstraint};
    use stride_core::models::{
        CurrentInjury, HealingStage, InjurySeverity, Methodology, ModificationKind,
    };

    fn risk(probability: f64, severity: RiskSeverity) -> SpecificRisk {
        SpecificRisk {
            risk_type: "test".into(),
            probability,
            severity,
            factors: Vec::new(),
        }
    }

    #[test]
    fn test_current_injury_requires_mitigation() {
        let config = RiskConfig::default();
        let injury = InjuryStatus {
            current_injuries: vec![CurrentInjury::new(
                "stress_fracture",
                InjurySeverity::Severe,
                HealingStage::Acute,
            )],
            ..InjuryStatus::default()
        };
        let assessment = RiskAssessor::new(&config).assess(&[], &injury, None);
        assert!(assessment.overall_risk >= RiskLevel::High);
        assert!(assessment.mitigation_required);
        assert!(!assessment.monitoring_points.is_empty());
    }

    #[test]
    fn test_overall_level_bands() {
        let config = RiskConfig::default();
        let assessor = RiskAssessor::new(&config);
        assert_eq!(assessor.overall(&[]), RiskLevel::Low);
        assert_eq!(
            assessor.overall(&[risk(30.0, RiskSeverity::Low)]),
            RiskLevel::Low
        );
        assert_eq!(
            assessor.overall(&[risk(30.0, RiskSeverity::Moderate)]),
            RiskLevel::Moderate
        );
        assert_eq!(
            assessor.overall(&[risk(65.0, RiskSeverity::Moderate)]),
            RiskLevel::High
        );
        assert_eq!(
            assessor.overall(&[risk(80.0, RiskSeverity::High)]),
            RiskLevel::Critical
        );
    }

    #[test]
    fn test_overall_is_monotonic_in_probability() {
        let config = RiskConfig::default();
        let assessor = RiskAssessor::new(&config);
        let mut previous = RiskLevel::Low;
        for p in 0..=100 {
            let level = assessor.overall(&[risk(f64::from(p), RiskSeverity::Moderate)]);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn test_altitude_and_heat_reasons_raise_environmental_risk() {
        let config = RiskConfig::default();
        let mods = vec![Modification::new(
            ModificationKind::ReduceIntensity,
            "Heat index of 35.0°C raises cardiovascular strain",
            Priority::Medium,
        )];
        let assessment = RiskAssessor::new(&config).assess(&mods, &InjuryStatus::default(), None);
        assert_eq!(assessment.specific_risks[0].risk_type, "environmental");
        assert_eq!(assessment.overall_risk, RiskLevel::Moderate);
    }

    #[test]
    fn test_tier_penalty_decays_and_caps() {
        let cfg = EffectivenessConfig::default();
        assert!((tier_penalty(&cfg, 1, 5.0, 20.0) - 5.0).abs() < 1e-9);
        assert!((tier_penalty(&cfg, 2, 5.0, 20.0) - 9.0).abs() < 1e-9);
        assert!((tier_penalty(&cfg, 50, 5.0, 20.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_effectiveness_is_clamped() {
        let config = RiskConfig::default();
        let registry = MethodologyRegistry::builtin();
        let profile = registry.get(Methodology::Custom).unwrap();
        let many: Vec<_> = (0..40)
            .map(|_| Modification::new(ModificationKind::ReduceVolume, "x", Priority::Critical))
            .collect();
        let mut constraints = ConstraintSummary::default();
        constraints.time.push(TimeConstraint {
            available_hours: 1.0,
            required_hours: 10.0,
            deficit_hours: 9.0,
            compression: CompressionStrategy {
                approach: CompressionApproach::KeyWorkoutOnly,
                retained_effectiveness: 50.0,
                description: String::new(),
                priorities: Vec::new(),
            },
        });
        let assessor = RiskAssessor::new(&config);
        assert!((assessor.effectiveness(&many, &constraints, profile) - 50.0).abs() < 1e-9);
        assert!(
            (assessor.effectiveness(&[], &ConstraintSummary::default(), profile) - 100.0).abs()
                < 1e-9
        );
    }
}
