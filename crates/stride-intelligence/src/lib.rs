// ABOUTME: Constraint-driven adaptation engine for endurance training plans
// ABOUTME: Generators, trigger matching, conflict resolution, learning and risk assessment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stride Intelligence
//!
//! Adapts a baseline training plan to what the athlete's life actually allows.
//! Every constraint category produces candidate modifications; methodology
//! patterns add their own when athlete metrics cross a trigger. Conflicting
//! candidates are collapsed, survivors are ranked with the athlete's learned
//! preferences, and the result is scored for risk and predicted effectiveness.
//!
//! ## Modules
//!
//! - **config**: `AdaptationConfig` with every tunable constant
//! - **generators**: environmental, equipment, time and injury generators
//! - **methodology**: methodology profiles and their trigger pattern tables
//! - **triggers** / **metrics**: pattern matching against athlete metrics
//! - **conflicts** / **prioritizer**: conflict resolution and ranking
//! - **`response_profile`**: per-athlete learning and its async store
//! - **risk** / **recommendations**: result assessment
//! - **engine**: the `AdaptationEngine` pipeline

/// Adaptation engine configuration
pub mod config;
/// Conflict resolution between opposite modifications
pub mod conflicts;
/// Adaptation pipeline
pub mod engine;
/// Constraint modification generators
pub mod generators;
/// Methodology profiles and pattern tables
pub mod methodology;
/// Athlete metrics derived from completed workouts
pub mod metrics;
/// Physiological thresholds shared by generators and defaults
pub mod physiological_constants;
/// Preference-aware ordering
pub mod prioritizer;
/// Recommendations built from an adaptation run
pub mod recommendations;
/// Constraint records reported alongside modifications
pub mod records;
/// Learned per-athlete response profiles
pub mod response_profile;
/// Risk and effectiveness assessment
pub mod risk;
/// Trigger conditions and pattern matching
pub mod triggers;

pub use config::{AdaptationConfig, ConfigError};
pub use conflicts::{ConflictGroup, ConflictResolver, Resolution};
pub use engine::{AdaptationEngine, AdaptationRequest, AdaptationResult};
pub use generators::{ConstraintCategory, InjuryRiskAssessment};
pub use methodology::{MethodologyProfile, MethodologyRegistry};
pub use metrics::{AthleteMetrics, Metric, MetricSnapshot};
pub use prioritizer::Prioritizer;
pub use recommendations::{GeneratorWarning, Recommendation, RecommendationCategory};
pub use records::ConstraintSummary;
pub use response_profile::{
    InMemoryProfileStore, ModificationKey, OutcomeMetrics, ResponseProfile, ResponseProfileStore,
};
pub use risk::{RiskAssessment, RiskLevel, RiskSeverity, SpecificRisk};
pub use triggers::{AdaptationPattern, PatternMatch, PatternMatcher};
