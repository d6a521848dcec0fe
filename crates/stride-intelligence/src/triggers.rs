// ABOUTME: Methodology adaptation triggers and the pattern matcher that evaluates them
// ABOUTME: OR-semantics condition matching gated by confidence and optional metric persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Trigger/Pattern Matcher
//!
//! Each methodology declares a fixed table of [`AdaptationPattern`]s. A pattern
//! fires when any of its conditions holds with sufficient confidence. When the
//! caller supplies dated history for a metric, the condition must also have
//! held for the trigger's `minimum_duration_days`; without history the
//! pre-aggregated current value is trusted.

use crate::config::TriggerConfig;
use crate::metrics::{AthleteMetrics, Metric};
use serde::{Deserialize, Serialize};
use stride_core::models::Modification;
use tracing::debug;

/// Situation a trigger detects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Accumulated strain exceeds recovery capacity
    Overreaching,
    /// Fitness has stopped improving
    Plateau,
    /// Fitness is improving faster than the plan assumes
    RapidProgress,
    /// Sessions are being skipped or cut short
    AdherenceDrop,
    /// Recovery markers are suppressed
    RecoveryDeficit,
    /// Aerobic foundation is not yet established
    AerobicBaseDeficit,
    /// Perceived fatigue is building up
    FatigueAccumulation,
    /// A step change in performance
    Breakthrough,
}

/// Comparison applied to a metric value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operator", content = "value", rename_all = "snake_case")]
pub enum Threshold {
    /// Strictly greater than
    Above(f64),
    /// Strictly less than
    Below(f64),
    /// Equal within floating point tolerance
    Equals(f64),
    /// Inclusive range
    Between(f64, f64),
}

impl Threshold {
    const EQUALS_TOLERANCE: f64 = 1e-6;

    /// Whether `value` satisfies the comparison
    #[must_use]
    pub fn holds(self, value: f64) -> bool {
        match self {
            Self::Above(limit) => value > limit,
            Self::Below(limit) => value < limit,
            Self::Equals(target) => (value - target).abs() < Self::EQUALS_TOLERANCE,
            Self::Between(low, high) => (low..=high).contains(&value),
        }
    }
}

/// A single comparison over one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerCondition {
    /// Metric evaluated
    pub metric: Metric,
    /// Comparison
    pub threshold: Threshold,
    /// How much the signal is trusted, 0-100
    pub confidence: u8,
}

impl TriggerCondition {
    /// Build a condition
    #[must_use]
    pub const fn new(metric: Metric, threshold: Threshold, confidence: u8) -> Self {
        Self {
            metric,
            threshold,
            confidence,
        }
    }
}

/// Conditions that, when met, fire a pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationTrigger {
    /// What the trigger detects
    pub kind: TriggerKind,
    /// Alternative conditions, any one suffices
    pub conditions: Vec<TriggerCondition>,
    /// How long a condition must persist before acting
    pub minimum_duration_days: u32,
    /// Methodology principle that motivates the trigger
    pub philosophy_context: String,
}

/// The prescribed reaction to a fired trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationResponse {
    /// Modifications to apply
    pub modifications: Vec<Modification>,
    /// Why this response fits the methodology
    pub rationale: String,
    /// What to watch after applying the response
    pub monitoring_criteria: Vec<String>,
    /// When to revert the response
    pub rollback_criteria: Vec<String>,
}

/// A trigger bound to its response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationPattern {
    /// Stable pattern name
    pub name: String,
    /// When the pattern fires
    pub trigger: AdaptationTrigger,
    /// What it prescribes
    pub response: AdaptationResponse,
}

/// A fired pattern with its tagged modifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    /// Name of the fired pattern
    pub pattern_name: String,
    /// What the trigger detected
    pub trigger_kind: TriggerKind,
    /// Metrics whose conditions matched
    pub matched_metrics: Vec<Metric>,
    /// Prescribed modifications, marked methodology-specific
    pub modifications: Vec<Modification>,
    /// Pattern rationale
    pub rationale: String,
    /// Monitoring criteria
    pub monitoring_criteria: Vec<String>,
}

/// Evaluates pattern tables against athlete metrics
pub struct PatternMatcher<'a> {
    config: &'a TriggerConfig,
}

impl<'a> PatternMatcher<'a> {
    /// Create a matcher using the configured confidence gate
    #[must_use]
    pub const fn new(config: &'a TriggerConfig) -> Self {
        Self { config }
    }

    /// Evaluate every pattern, returning the ones that fire in table order
    #[must_use]
    pub fn evaluate(
        &self,
        patterns: &[AdaptationPattern],
        metrics: &AthleteMetrics,
    ) -> Vec<PatternMatch> {
        if metrics.current.is_empty() {
            return Vec::new();
        }
        patterns
            .iter()
            .filter_map(|pattern| self.match_pattern(pattern, metrics))
            .collect()
    }

    fn match_pattern(
        &self,
        pattern: &AdaptationPattern,
        metrics: &AthleteMetrics,
    ) -> Option<PatternMatch> {
        let trigger = &pattern.trigger;
        let matched_metrics: Vec<Metric> = trigger
            .conditions
            .iter()
            .filter(|c| self.condition_matches(c, trigger.minimum_duration_days, metrics))
            .map(|c| c.metric)
            .collect();

        if matched_metrics.is_empty() {
            return None;
        }
        debug!(
            pattern = %pattern.name,
            matched = matched_metrics.len(),
            "Adaptation pattern fired"
        );

        let modifications = pattern
            .response
            .modifications
            .iter()
            .map(|m| {
                let principle = if m.philosophy_principle.is_empty() {
                    trigger.philosophy_context.clone()
                } else {
                    m.philosophy_principle.clone()
                };
                m.clone().for_principle(principle)
            })
            .collect();

        Some(PatternMatch {
            pattern_name: pattern.name.clone(),
            trigger_kind: trigger.kind,
            matched_metrics,
            modifications,
            rationale: pattern.response.rationale.clone(),
            monitoring_criteria: pattern.response.monitoring_criteria.clone(),
        })
    }

    fn condition_matches(
        &self,
        condition: &TriggerCondition,
        minimum_duration_days: u32,
        metrics: &AthleteMetrics,
    ) -> bool {
        if condition.confidence < self.config.min_condition_confidence {
            return false;
        }
        let Some(value) = metrics.current.get(condition.metric) else {
            return false;
        };
        if !condition.threshold.holds(value) {
            return false;
        }
        if minimum_duration_days == 0 {
            return true;
        }
        // Without history the caller's pre-aggregated value stands on its own
        metrics
            .history_window(condition.metric, minimum_duration_days)
            .into_iter()
            .all(|v| condition.threshold.holds(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricSnapshot;
    use chrono::NaiveDate;
    use stride_core::models::{ModificationKind, Priority};

    fn pattern(conditions: Vec<TriggerCondition>, days: u32) -> AdaptationPattern {
        AdaptationPattern {
            name: "recovery_deficit".into(),
            trigger: AdaptationTrigger {
                kind: TriggerKind::RecoveryDeficit,
                conditions,
                minimum_duration_days: days,
                philosophy_context: "recovery".into(),
            },
            response: AdaptationResponse {
                modifications: vec![Modification::new(
                    ModificationKind::AddRecovery,
                    "Recovery markers suppressed",
                    Priority::High,
                )],
                rationale: "Absorb training before adding more".into(),
                monitoring_criteria: vec!["Morning recovery score".into()],
                rollback_criteria: vec![],
            },
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
    }

    #[test]
    fn test_any_condition_fires_pattern() {
        let config = TriggerConfig::default();
        let patterns = vec![pattern(
            vec![
                TriggerCondition::new(Metric::RecoveryScore, Threshold::Below(50.0), 80),
                TriggerCondition::new(Metric::HrvDeviation, Threshold::Below(-10.0), 80),
            ],
            0,
        )];
        let metrics =
            AthleteMetrics::from_snapshot(MetricSnapshot::new().with(Metric::RecoveryScore, 42.0));
        let matches = PatternMatcher::new(&config).evaluate(&patterns, &metrics);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_metrics, vec![Metric::RecoveryScore]);
        assert!(matches[0].modifications[0].methodology_specific);
        assert_eq!(matches[0].modifications[0].philosophy_principle, "recovery");
    }

    #[test]
    fn test_low_confidence_condition_never_matches() {
        let config = TriggerConfig::default();
        let patterns = vec![pattern(
            vec![TriggerCondition::new(
                Metric::RecoveryScore,
                Threshold::Below(50.0),
                69,
            )],
            0,
        )];
        let metrics =
            AthleteMetrics::from_snapshot(MetricSnapshot::new().with(Metric::RecoveryScore, 10.0));
        assert!(PatternMatcher::new(&config)
            .evaluate(&patterns, &metrics)
            .is_empty());
    }

    #[test]
    fn test_persistence_requires_history_to_agree() {
        let config = TriggerConfig::default();
        let patterns = vec![pattern(
            vec![TriggerCondition::new(
                Metric::RecoveryScore,
                Threshold::Below(50.0),
                80,
            )],
            3,
        )];
        let current = MetricSnapshot::new().with(Metric::RecoveryScore, 40.0);
        let transient = AthleteMetrics::from_snapshot(current.clone())
            .with_history(day(8), MetricSnapshot::new().with(Metric::RecoveryScore, 75.0))
            .with_history(day(10), MetricSnapshot::new().with(Metric::RecoveryScore, 40.0));
        let persistent = AthleteMetrics::from_snapshot(current)
            .with_history(day(8), MetricSnapshot::new().with(Metric::RecoveryScore, 45.0))
            .with_history(day(10), MetricSnapshot::new().with(Metric::RecoveryScore, 40.0));

        let matcher = PatternMatcher::new(&config);
        assert!(matcher.evaluate(&patterns, &transient).is_empty());
        assert_eq!(matcher.evaluate(&patterns, &persistent).len(), 1);
    }

    #[test]
    fn test_threshold_comparisons() {
        assert!(Threshold::Above(1.0).holds(1.5));
        assert!(!Threshold::Above(1.0).holds(1.0));
        assert!(Threshold::Between(-0.5, 0.5).holds(0.5));
        assert!(Threshold::Equals(3.0).holds(3.0));
    }
}
