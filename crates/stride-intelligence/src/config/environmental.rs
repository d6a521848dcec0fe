// ABOUTME: Environmental constraint configuration for altitude, heat, cold and weather extremes
// ABOUTME: Configures thresholds and fixed intensity reductions used by the environmental generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environmental Constraint Configuration

use crate::physiological_constants::{air_quality, altitude, cold, heat};
use serde::{Deserialize, Serialize};

/// Environmental Constraint Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentalConfig {
    /// Altitude reduction and acclimatization
    pub altitude: AltitudeConfig,
    /// Heat index bands
    pub heat: HeatConfig,
    /// Cold weather warm-up rules
    pub cold: ColdConfig,
    /// Wind, precipitation, air quality and terrain rules
    pub extremes: WeatherExtremesConfig,
}

/// Altitude reduction and acclimatization parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AltitudeConfig {
    /// Altitude at which adjustments start (meters)
    pub threshold_meters: f64,
    /// Intensity reduction at the threshold (percent)
    pub base_reduction: f64,
    /// Additional reduction per full step above the threshold (percent)
    pub reduction_per_step: f64,
    /// Step size (meters)
    pub step_meters: f64,
    /// Cap on the reduction (percent)
    pub max_reduction: f64,
    /// Altitude per acclimatization week (meters)
    pub meters_per_acclimatization_week: f64,
    /// Cap on acclimatization delay (weeks)
    pub max_acclimatization_weeks: u32,
    /// Altitude per VDOT point of pace correction (meters)
    pub meters_per_vdot_point: f64,
    /// Cap on the VDOT correction
    pub max_vdot_correction: f64,
}

/// Heat index bands and their intensity reductions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatConfig {
    /// Heat index for the extreme band (Celsius)
    pub extreme_heat_index_celsius: f64,
    /// Heat index for the high band (Celsius)
    pub high_heat_index_celsius: f64,
    /// Heat index for the moderate band (Celsius)
    pub moderate_heat_index_celsius: f64,
    /// Reduction in the extreme band (percent)
    pub extreme_reduction: f64,
    /// Reduction in the high band (percent)
    pub high_reduction: f64,
    /// Reduction in the moderate band (percent)
    pub moderate_reduction: f64,
}

/// Cold weather rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColdConfig {
    /// Temperature below which warm-ups are extended (Celsius)
    pub warmup_threshold_celsius: f64,
    /// Temperature below which intensity is also reduced (Celsius)
    pub severe_cold_celsius: f64,
    /// Baseline warm-up extension (minutes)
    pub base_warmup_extension_minutes: f64,
    /// Cap on warm-up extension (minutes)
    pub max_warmup_extension_minutes: f64,
    /// Intensity reduction in severe cold (percent)
    pub severe_cold_reduction: f64,
}

/// Weather extreme and terrain rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherExtremesConfig {
    /// Sustained wind speed that moves quality work indoors (km/h)
    pub strong_wind_kmh: f64,
    /// Reduction applied in strong wind (percent)
    pub wind_reduction: f64,
    /// Precipitation rate that triggers substitution (mm/h)
    pub heavy_precipitation_mm_per_hour: f64,
    /// Reduction applied in heavy precipitation (percent)
    pub precipitation_reduction: f64,
    /// AQI above which air quality is poor
    pub poor_air_quality_index: u32,
    /// Reduction for poor air quality (percent)
    pub poor_air_reduction: f64,
    /// AQI above which air quality is hazardous
    pub hazardous_air_quality_index: u32,
    /// Reduction for hazardous air quality (percent)
    pub hazardous_air_reduction: f64,
    /// Pace reduction on technical trails (percent)
    pub trail_pace_reduction: f64,
}

impl Default for AltitudeConfig {
    fn default() -> Self {
        Self {
            threshold_meters: altitude::PERFORMANCE_THRESHOLD_METERS,
            base_reduction: altitude::BASE_INTENSITY_REDUCTION,
            reduction_per_step: altitude::REDUCTION_PER_STEP,
            step_meters: altitude::STEP_METERS,
            max_reduction: altitude::MAX_INTENSITY_REDUCTION,
            meters_per_acclimatization_week: altitude::METERS_PER_ACCLIMATIZATION_WEEK,
            max_acclimatization_weeks: altitude::MAX_ACCLIMATIZATION_WEEKS,
            meters_per_vdot_point: altitude::METERS_PER_VDOT_POINT,
            max_vdot_correction: altitude::MAX_VDOT_CORRECTION,
        }
    }
}

impl Default for HeatConfig {
    fn default() -> Self {
        Self {
            extreme_heat_index_celsius: heat::EXTREME_HEAT_INDEX_CELSIUS,
            high_heat_index_celsius: heat::HIGH_HEAT_INDEX_CELSIUS,
            moderate_heat_index_celsius: heat::MODERATE_HEAT_INDEX_CELSIUS,
            extreme_reduction: 30.0,
            high_reduction: 20.0,
            moderate_reduction: 10.0,
        }
    }
}

impl Default for ColdConfig {
    fn default() -> Self {
        Self {
            warmup_threshold_celsius: cold::WARMUP_THRESHOLD_CELSIUS,
            severe_cold_celsius: cold::SEVERE_COLD_CELSIUS,
            base_warmup_extension_minutes: cold::BASE_WARMUP_EXTENSION_MINUTES,
            max_warmup_extension_minutes: cold::MAX_WARMUP_EXTENSION_MINUTES,
            severe_cold_reduction: 10.0,
        }
    }
}

impl Default for WeatherExtremesConfig {
    fn default() -> Self {
        Self {
            strong_wind_kmh: 40.0,
            wind_reduction: 15.0,
            heavy_precipitation_mm_per_hour: 10.0,
            precipitation_reduction: 10.0,
            poor_air_quality_index: air_quality::POOR_AQI,
            poor_air_reduction: 25.0,
            hazardous_air_quality_index: air_quality::HAZARDOUS_AQI,
            hazardous_air_reduction: 50.0,
            trail_pace_reduction: 10.0,
        }
    }
}
