// ABOUTME: Core data models shared by the plan generator, adaptation engine and callers
// ABOUTME: Re-exports plan, workout, methodology, constraint and modification types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain models
//!
//! All models are plain, already-normalized value objects. They are produced by
//! collaborators outside the adaptation engine (plan generator, athlete data
//! ingestion) and consumed read-only.

/// Constraint inputs (environment, equipment, time, injury)
pub mod constraints;
/// Training methodologies
pub mod methodology;
/// Plan modifications produced by the adaptation engine
pub mod modification;
/// Training plan structure produced by the plan generator
pub mod plan;
/// Completed workout records
pub mod workout;

pub use constraints::{
    BodyRegion, CurrentInjury, EnvironmentalConditions, EquipmentAvailability, Facility,
    HealingStage, HistoricalInjury, InjurySeverity, InjuryStatus, RiskFactor, Terrain,
    TimeAvailability,
};
pub use methodology::Methodology;
pub use modification::{Modification, ModificationKind, Priority};
pub use plan::{
    PlanSummary, PlannedWorkout, TrainingBlock, TrainingPhase, TrainingPlan, TrainingWeek,
    WorkoutType,
};
pub use workout::CompletedWorkout;
