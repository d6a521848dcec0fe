// ABOUTME: Application constants organized by domain for the training planner
// ABOUTME: Service names, score bounds, and unit conversions shared across crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Application-wide constants organized by domain

/// Service identification for structured logging
pub mod service_names {
    /// Primary service name
    pub const STRIDE_PLANNER: &str = "stride-planner";
}

/// Bounds for the 0-100 scores used across the engine
pub mod limits {
    /// Lowest value of any percentage-style score
    pub const SCORE_MIN: f64 = 0.0;
    /// Highest value of any percentage-style score
    pub const SCORE_MAX: f64 = 100.0;
    /// Lowest predicted effectiveness an adaptation result may report
    pub const EFFECTIVENESS_FLOOR: f64 = 50.0;
    /// Longest acute or chronic training-load window, days
    pub const MAX_LOAD_WINDOW_DAYS: i64 = 365;
    /// Highest confidence a modification or trigger condition may carry
    pub const MAX_CONFIDENCE: u8 = 100;
    /// Confidence assigned to modifications produced from deterministic rules
    pub const RULE_CONFIDENCE: u8 = 90;
}

/// Input validation ranges for constraint records
pub mod validation {
    /// Lowest plausible training altitude (Dead Sea shore), meters
    pub const MIN_ALTITUDE_METERS: f64 = -500.0;
    /// Highest plausible training altitude, meters
    pub const MAX_ALTITUDE_METERS: f64 = 9000.0;
    /// Lowest accepted air temperature, Celsius
    pub const MIN_TEMPERATURE_CELSIUS: f64 = -90.0;
    /// Highest accepted air temperature, Celsius
    pub const MAX_TEMPERATURE_CELSIUS: f64 = 60.0;
    /// Hours in a week, upper bound for available training time
    pub const HOURS_PER_WEEK: f64 = 168.0;
}

/// Unit conversions
pub mod units {
    /// Minutes per hour
    pub const MINUTES_PER_HOUR: f64 = 60.0;
    /// Days per week
    pub const DAYS_PER_WEEK: i64 = 7;
}
