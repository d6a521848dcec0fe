// ABOUTME: Sports-science constants backing the default adaptation configuration
// ABOUTME: Altitude, heat index, cold, air quality, load ratio and injury scaling constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Physiological constants based on sports science research
//!
//! These values seed the `Default` implementations of the adaptation
//! configuration. Deployments override them through `AdaptationConfig`.

/// Altitude adaptation
///
/// References:
/// - Chapman, R.F. et al. (2014). Defining the "dose" of altitude training
/// - Daniels, J. (2014). Daniels' Running Formula, 3rd Edition, altitude chapter
pub mod altitude {
    /// Altitude above which aerobic performance measurably declines (meters)
    pub const PERFORMANCE_THRESHOLD_METERS: f64 = 1500.0;

    /// Intensity reduction applied at the threshold altitude (percent)
    pub const BASE_INTENSITY_REDUCTION: f64 = 10.0;

    /// Additional reduction per full altitude step above the threshold (percent)
    pub const REDUCTION_PER_STEP: f64 = 5.0;

    /// Altitude step size for the stepped reduction (meters)
    pub const STEP_METERS: f64 = 500.0;

    /// Upper bound on the altitude intensity reduction (percent)
    pub const MAX_INTENSITY_REDUCTION: f64 = 40.0;

    /// Altitude per week of acclimatization (meters)
    pub const METERS_PER_ACCLIMATIZATION_WEEK: f64 = 1000.0;

    /// Longest acclimatization delay (weeks)
    pub const MAX_ACCLIMATIZATION_WEEKS: u32 = 4;

    /// Altitude per VDOT point lost above the threshold (meters)
    pub const METERS_PER_VDOT_POINT: f64 = 300.0;

    /// Largest VDOT correction applied
    pub const MAX_VDOT_CORRECTION: f64 = 6.0;
}

/// Heat stress
///
/// References:
/// - Rothfusz, L.P. (1990). The heat index equation, NWS Technical Attachment SR 90-23
/// - Racinais, S. et al. (2015). Consensus recommendations on training and competing in the heat
pub mod heat {
    /// Heat index regression coefficients (Fahrenheit, relative humidity percent)
    pub const ROTHFUSZ: [f64; 9] = [
        -42.379,
        2.049_015_23,
        10.143_331_27,
        -0.224_755_41,
        -0.006_837_83,
        -0.054_817_17,
        0.001_228_74,
        0.000_852_82,
        -0.000_001_99,
    ];

    /// Below this heat index (Fahrenheit) the simple Steadman formula is used
    pub const REGRESSION_MIN_FAHRENHEIT: f64 = 80.0;

    /// Relative humidity below which the dry-air correction is subtracted
    pub const DRY_AIR_MAX_HUMIDITY: f64 = 13.0;

    /// Temperature range (Fahrenheit) of the dry-air correction
    pub const DRY_AIR_FAHRENHEIT: (f64, f64) = (80.0, 112.0);

    /// Relative humidity above which the humid-air correction is added
    pub const HUMID_AIR_MIN_HUMIDITY: f64 = 85.0;

    /// Temperature range (Fahrenheit) of the humid-air correction
    pub const HUMID_AIR_FAHRENHEIT: (f64, f64) = (80.0, 87.0);

    /// Heat index at which running becomes dangerous (Celsius)
    pub const EXTREME_HEAT_INDEX_CELSIUS: f64 = 40.0;

    /// Heat index requiring substantial pace relief (Celsius)
    pub const HIGH_HEAT_INDEX_CELSIUS: f64 = 32.0;

    /// Heat index at which pace relief begins (Celsius)
    pub const MODERATE_HEAT_INDEX_CELSIUS: f64 = 27.0;
}

/// Cold exposure
pub mod cold {
    /// Temperature below which warm-ups are extended (Celsius)
    pub const WARMUP_THRESHOLD_CELSIUS: f64 = 5.0;

    /// Temperature below which quality work is also moderated (Celsius)
    pub const SEVERE_COLD_CELSIUS: f64 = -15.0;

    /// Baseline warm-up extension (minutes)
    pub const BASE_WARMUP_EXTENSION_MINUTES: f64 = 5.0;

    /// Longest warm-up extension (minutes)
    pub const MAX_WARMUP_EXTENSION_MINUTES: f64 = 20.0;
}

/// Air quality
///
/// Reference: US EPA Air Quality Index technical assistance document (2018)
pub mod air_quality {
    /// AQI above which outdoor exertion is unhealthy for everyone
    pub const POOR_AQI: u32 = 150;

    /// AQI above which outdoor exertion is hazardous
    pub const HAZARDOUS_AQI: u32 = 300;
}

/// Acute:chronic workload ratio
///
/// Reference: Gabbett, T.J. (2016). The training-injury prevention paradox
/// <https://bjsm.bmj.com/content/50/5/273>
pub mod workload {
    /// Acute window (days)
    pub const ACUTE_WINDOW_DAYS: i64 = 7;

    /// Chronic window (days)
    pub const CHRONIC_WINDOW_DAYS: i64 = 28;

    /// Ratio above which injury risk rises sharply
    pub const DANGER_RATIO: f64 = 1.5;

    /// Ratio above which load is accumulating faster than fitness
    pub const CAUTION_RATIO: f64 = 1.3;

    /// Ratio below which the athlete is detraining
    pub const UNDERLOAD_RATIO: f64 = 0.8;
}
