// ABOUTME: Orders conflict-free modifications by methodology relevance and learned preference
// ABOUTME: Methodology-specific first, then confidence adjusted by preferred and avoided keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::PrioritizationConfig;
use crate::response_profile::ResponseProfile;
use std::cmp::Ordering;
use stride_core::models::Modification;

/// Sorts modifications for presentation and application order
pub struct Prioritizer<'a> {
    config: &'a PrioritizationConfig,
}

impl<'a> Prioritizer<'a> {
    /// Create a prioritizer using the configured boosts
    #[must_use]
    pub const fn new(config: &'a PrioritizationConfig) -> Self {
        Self { config }
    }

    /// Ranking score of one modification
    ///
    /// Confidence shifted up for preferred keys and down for avoided keys.
    /// Avoided modifications keep their place in the list, only lower.
    #[must_use]
    pub fn score(&self, modification: &Modification, profile: Option<&ResponseProfile>) -> f64 {
        let base = f64::from(modification.confidence);
        match profile {
            Some(p) if p.prefers(modification) => base + self.config.preference_boost,
            Some(p) if p.avoids(modification) => base - self.config.avoidance_penalty,
            _ => base,
        }
    }

    /// Stable sort: methodology-specific before generic, then score descending
    #[must_use]
    pub fn prioritize(
        &self,
        modifications: Vec<Modification>,
        profile: Option<&ResponseProfile>,
    ) -> Vec<Modification> {
        let mut scored: Vec<(f64, Modification)> = modifications
            .into_iter()
            .map(|m| (self.score(&m, profile), m))
            .collect();
        scored.sort_by(|(sa, a), (sb, b)| {
            match (a.methodology_specific, b.methodology_specific) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => sb.total_cmp(sa),
            }
        });
        scored.into_iter().map(|(_, m)| m).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LearningConfig;
    use crate::response_profile::OutcomeMetrics;
    use stride_core::models::{Methodology, ModificationKind, Priority};

    fn m(kind: ModificationKind, confidence: u8) -> Modification {
        Modification::new(kind, kind.as_str(), Priority::Medium).with_confidence(confidence)
    }

    #[test]
    fn test_methodology_specific_first_then_confidence() {
        let config = PrioritizationConfig::default();
        let ordered = Prioritizer::new(&config).prioritize(
            vec![
                m(ModificationKind::ReduceVolume, 95),
                m(ModificationKind::ExtendPhase, 60).for_principle("aerobic base"),
                m(ModificationKind::ExtendWarmup, 70),
                m(ModificationKind::DelayProgression, 80).for_principle("aerobic base"),
            ],
            None,
        );
        let kinds: Vec<_> = ordered.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ModificationKind::DelayProgression,
                ModificationKind::ExtendPhase,
                ModificationKind::ReduceVolume,
                ModificationKind::ExtendWarmup,
            ]
        );
    }

    #[test]
    fn test_profile_boosts_preferred_and_demotes_avoided() {
        let config = PrioritizationConfig::default();
        let learning = LearningConfig::default();
        let mut profile = ResponseProfile::new("athlete", Methodology::Custom, &learning);
        let great = OutcomeMetrics {
            performance_change: 95.0,
            adherence_change: 95.0,
            recovery_change: 95.0,
            satisfaction_change: 95.0,
        };
        let poor = OutcomeMetrics {
            performance_change: 10.0,
            adherence_change: 10.0,
            recovery_change: 10.0,
            satisfaction_change: 10.0,
        };
        profile.apply_feedback(&m(ModificationKind::ExtendWarmup, 70), &great, &learning);
        profile.apply_feedback(&m(ModificationKind::ReduceVolume, 90), &poor, &learning);

        let ordered = Prioritizer::new(&config).prioritize(
            vec![
                m(ModificationKind::ReduceVolume, 90),
                m(ModificationKind::SubstituteWorkout, 80),
                m(ModificationKind::ExtendWarmup, 70),
            ],
            Some(&profile),
        );
        let kinds: Vec<_> = ordered.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ModificationKind::ExtendWarmup,
                ModificationKind::SubstituteWorkout,
                ModificationKind::ReduceVolume,
            ]
        );
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let config = PrioritizationConfig::default();
        let ordered = Prioritizer::new(&config).prioritize(
            vec![
                m(ModificationKind::ReduceVolume, 90),
                m(ModificationKind::ExtendWarmup, 90),
            ],
            None,
        );
        assert_eq!(ordered[0].kind, ModificationKind::ReduceVolume);
    }
}
