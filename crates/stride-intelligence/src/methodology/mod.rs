// ABOUTME: Read-only methodology profiles consumed by the adaptation engine
// ABOUTME: Intensity distribution, workout emphasis, core principles and pattern tables per methodology
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Methodology profiles
//!
//! Profiles are static parameter records keyed by the closed [`Methodology`]
//! enum. The registry is built once at startup and handed to the engine by
//! value; nothing mutates it afterwards.

/// Built-in adaptation pattern tables
pub mod patterns;

use crate::triggers::AdaptationPattern;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stride_core::errors::{AppError, AppResult};
use stride_core::models::{Methodology, Modification, WorkoutType};

/// Share of training time per effort band (percent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensityDistribution {
    /// Easy aerobic running
    pub easy: f64,
    /// Marathon pace to threshold
    pub moderate: f64,
    /// Intervals and repetitions
    pub hard: f64,
}

/// Static description of a methodology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodologyProfile {
    /// Which methodology this profile describes
    pub methodology: Methodology,
    /// Display name
    pub name: String,
    /// Target intensity split
    pub intensity_distribution: IntensityDistribution,
    /// Relative weight of workout types (0.0-1.0)
    pub workout_type_emphasis: BTreeMap<WorkoutType, f64>,
    /// Principles modifications can reference
    pub core_principles: Vec<String>,
    /// Adaptation pattern table
    pub patterns: Vec<AdaptationPattern>,
}

impl MethodologyProfile {
    /// Whether a modification explicitly serves one of the core principles
    #[must_use]
    pub fn is_aligned(&self, modification: &Modification) -> bool {
        let principle = modification.philosophy_principle.to_lowercase();
        self.core_principles.iter().any(|core| {
            let core = core.to_lowercase();
            (!principle.is_empty() && (principle.contains(&core) || core.contains(&principle)))
                || modification.reason_mentions(&core)
        })
    }

    /// Emphasis on a workout type, 0.0 when unlisted
    #[must_use]
    pub fn emphasis(&self, workout_type: WorkoutType) -> f64 {
        self.workout_type_emphasis
            .get(&workout_type)
            .copied()
            .unwrap_or(0.0)
    }
}

/// Lookup table of methodology profiles
#[derive(Debug, Clone, Default)]
pub struct MethodologyRegistry {
    profiles: BTreeMap<Methodology, MethodologyProfile>,
}

impl MethodologyRegistry {
    /// Registry with the five built-in profiles
    #[must_use]
    pub fn builtin() -> Self {
        Self::default()
            .with_profile(daniels())
            .with_profile(lydiard())
            .with_profile(pfitzinger())
            .with_profile(hudson())
            .with_profile(custom())
    }

    /// Register or replace a profile
    #[must_use]
    pub fn with_profile(mut self, profile: MethodologyProfile) -> Self {
        self.profiles.insert(profile.methodology, profile);
        self
    }

    /// Profile for a methodology
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when no profile is registered
    pub fn get(&self, methodology: Methodology) -> AppResult<&MethodologyProfile> {
        self.profiles.get(&methodology).ok_or_else(|| {
            AppError::invalid_input(format!("No profile registered for methodology {methodology}"))
                .with_field("methodology")
        })
    }

    /// Registered methodologies in stable order
    pub fn methodologies(&self) -> impl Iterator<Item = Methodology> + '_ {
        self.profiles.keys().copied()
    }
}

fn emphasis(pairs: &[(WorkoutType, f64)]) -> BTreeMap<WorkoutType, f64> {
    pairs.iter().copied().collect()
}

fn principles(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn daniels() -> MethodologyProfile {
    MethodologyProfile {
        methodology: Methodology::Daniels,
        name: "Daniels Running Formula".into(),
        intensity_distribution: IntensityDistribution {
            easy: 80.0,
            moderate: 10.0,
            hard: 10.0,
        },
        workout_type_emphasis: emphasis(&[
            (WorkoutType::Easy, 0.8),
            (WorkoutType::Threshold, 0.9),
            (WorkoutType::Intervals, 1.0),
            (WorkoutType::Repetition, 0.8),
            (WorkoutType::LongRun, 0.6),
        ]),
        core_principles: principles(&["VDOT", "training paces", "quality sessions"]),
        patterns: patterns::daniels(),
    }
}

fn lydiard() -> MethodologyProfile {
    MethodologyProfile {
        methodology: Methodology::Lydiard,
        name: "Lydiard Periodization".into(),
        intensity_distribution: IntensityDistribution {
            easy: 85.0,
            moderate: 10.0,
            hard: 5.0,
        },
        workout_type_emphasis: emphasis(&[
            (WorkoutType::Easy, 1.0),
            (WorkoutType::LongRun, 1.0),
            (WorkoutType::HillRepeats, 0.8),
            (WorkoutType::Fartlek, 0.5),
            (WorkoutType::Intervals, 0.4),
        ]),
        core_principles: principles(&["aerobic base", "periodization", "hill training"]),
        patterns: patterns::lydiard(),
    }
}

fn pfitzinger() -> MethodologyProfile {
    MethodologyProfile {
        methodology: Methodology::Pfitzinger,
        name: "Pfitzinger Advanced Marathoning".into(),
        intensity_distribution: IntensityDistribution {
            easy: 75.0,
            moderate: 15.0,
            hard: 10.0,
        },
        workout_type_emphasis: emphasis(&[
            (WorkoutType::Easy, 0.7),
            (WorkoutType::Threshold, 1.0),
            (WorkoutType::Tempo, 0.9),
            (WorkoutType::LongRun, 0.9),
            (WorkoutType::Intervals, 0.6),
        ]),
        core_principles: principles(&["lactate threshold", "medium-long runs", "progression"]),
        patterns: patterns::pfitzinger(),
    }
}

fn hudson() -> MethodologyProfile {
    MethodologyProfile {
        methodology: Methodology::Hudson,
        name: "Hudson Adaptive Running".into(),
        intensity_distribution: IntensityDistribution {
            easy: 75.0,
            moderate: 15.0,
            hard: 10.0,
        },
        workout_type_emphasis: emphasis(&[
            (WorkoutType::Easy, 0.8),
            (WorkoutType::Fartlek, 0.8),
            (WorkoutType::HillRepeats, 0.7),
            (WorkoutType::Tempo, 0.8),
            (WorkoutType::LongRun, 0.8),
        ]),
        core_principles: principles(&["adaptive training", "effort-based", "specificity"]),
        patterns: patterns::hudson(),
    }
}

fn custom() -> MethodologyProfile {
    MethodologyProfile {
        methodology: Methodology::Custom,
        name: "Custom".into(),
        intensity_distribution: IntensityDistribution {
            easy: 80.0,
            moderate: 12.0,
            hard: 8.0,
        },
        workout_type_emphasis: emphasis(&[
            (WorkoutType::Easy, 0.8),
            (WorkoutType::LongRun, 0.8),
            (WorkoutType::Tempo, 0.6),
        ]),
        core_principles: principles(&["progressive overload", "consistency"]),
        patterns: patterns::custom(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_core::errors::ErrorCode;
    use stride_core::models::{ModificationKind, Priority};

    #[test]
    fn test_builtin_registry_covers_every_methodology() {
        let registry = MethodologyRegistry::builtin();
        for methodology in Methodology::ALL {
            let profile = registry.get(methodology).unwrap();
            let d = profile.intensity_distribution;
            assert!((d.easy + d.moderate + d.hard - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_missing_profile_is_invalid_input() {
        let err = MethodologyRegistry::default()
            .get(Methodology::Hudson)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_alignment_matches_principle_or_reason() {
        let registry = MethodologyRegistry::builtin();
        let lydiard = registry.get(Methodology::Lydiard).unwrap();
        let by_principle =
            Modification::new(ModificationKind::ExtendPhase, "Altitude", Priority::Medium)
                .for_principle("Aerobic base");
        let by_reason = Modification::new(
            ModificationKind::SubstituteWorkout,
            "Keep hill training on the treadmill",
            Priority::Low,
        );
        let generic = Modification::new(ModificationKind::ReduceVolume, "Time", Priority::Low);
        assert!(lydiard.is_aligned(&by_principle));
        assert!(lydiard.is_aligned(&by_reason));
        assert!(!lydiard.is_aligned(&generic));
    }
}
