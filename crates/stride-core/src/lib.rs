// ABOUTME: Core types and constants for the Stride endurance-training planner
// ABOUTME: Foundation crate with error handling, constants, and plan/constraint domain models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stride Core
//!
//! Foundation crate providing shared types and constants for the Stride
//! training adaptation platform. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Training plans, completed workouts, methodologies, constraint
//!   inputs, and the `Modification` records produced by the adaptation engine

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (plans, workouts, constraints, modifications)
pub mod models;
