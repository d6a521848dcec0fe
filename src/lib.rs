// ABOUTME: Main library entry point for the Stride training plan adaptation platform
// ABOUTME: Wires the adaptation engine to response-profile storage and logging setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stride Planner
//!
//! Adapts baseline endurance-training plans to the athlete's real constraints:
//! altitude and weather, missing facilities, limited weekly time, and current
//! or past injuries. Methodology-specific patterns react to athlete metrics,
//! and every applied modification can be fed back so later adaptations favour
//! what worked for that athlete.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stride_planner::{AdaptationRequest, AdaptationService};
//! use stride_planner::intelligence::AdaptationConfig;
//! # use stride_planner::models::{Methodology, TrainingPlan};
//!
//! # async fn run() -> stride_planner::errors::AppResult<()> {
//! let service = AdaptationService::in_memory(AdaptationConfig::load()?);
//! # let plan = TrainingPlan::new("plan", "athlete", Methodology::Lydiard, Vec::new());
//! let result = service.adapt_plan(&AdaptationRequest::new(plan)).await?;
//! println!("{} modifications, {:.0}% effective", result.modifications.len(), result.effectiveness);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`stride-core`**: errors, constants and domain models
//! - **`stride-intelligence`**: the pure adaptation pipeline and learning model
//! - **service**: async facade pairing the engine with a profile store
//! - **logging**: tracing subscriber configuration

/// Structured logging setup
pub mod logging;

/// Adaptation service wiring engine and profile store
pub mod service;

/// Error types shared across the workspace
pub use stride_core::errors;

/// Domain models: plans, workouts, constraints, modifications
pub use stride_core::models;

/// Application constants
pub use stride_core::constants;

/// Adaptation engine and its building blocks
pub use stride_intelligence as intelligence;

pub use service::AdaptationService;
pub use stride_intelligence::{AdaptationEngine, AdaptationRequest, AdaptationResult};
