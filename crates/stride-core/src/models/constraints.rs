// ABOUTME: Constraint inputs describing the athlete's environment, equipment, time and injuries
// ABOUTME: Normalized records with validation; absent fields mean no constraint in that dimension
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constraint inputs consumed by the adaptation engine
//!
//! Every field that describes a limitation is optional: `None` (or an empty
//! list) means "no constraint in that dimension" and the matching generator
//! skips that branch. `validate` rejects values that are malformed rather than
//! merely extreme; extreme values are clamped inside the scoring formulas.

use crate::constants::validation::{
    HOURS_PER_WEEK, MAX_ALTITUDE_METERS, MAX_TEMPERATURE_CELSIUS, MIN_ALTITUDE_METERS,
    MIN_TEMPERATURE_CELSIUS,
};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Check that an optional reading is finite and within `[min, max]`
fn check_range(field: &str, value: Option<f64>, min: f64, max: f64) -> AppResult<()> {
    match value {
        Some(v) if !v.is_finite() => Err(AppError::invalid_input(format!(
            "{field} must be a finite number"
        ))
        .with_field(field)),
        Some(v) if v < min || v > max => Err(AppError::out_of_range(
            field,
            format!("{field} must be between {min} and {max}, got {v}"),
        )),
        _ => Ok(()),
    }
}

/// Running surface the athlete trains on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    /// Flat roads or paths
    Flat,
    /// Paved roads with mixed gradients
    Road,
    /// Rolling hills
    Hilly,
    /// Sustained climbs and descents
    Mountainous,
    /// Technical off-road trails
    Trail,
    /// Mixed surfaces
    Mixed,
}

/// Environmental conditions at the athlete's training location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalConditions {
    /// Training altitude in meters
    pub altitude_meters: Option<f64>,
    /// Typical training-time air temperature in Celsius
    pub temperature_celsius: Option<f64>,
    /// Relative humidity percentage (0-100)
    pub humidity_percent: Option<f64>,
    /// Predominant terrain
    pub terrain: Option<Terrain>,
    /// Sustained wind speed in km/h
    pub wind_speed_kmh: Option<f64>,
    /// Precipitation rate in mm/h
    pub precipitation_mm_per_hour: Option<f64>,
    /// US EPA air quality index
    pub air_quality_index: Option<u32>,
}

impl EnvironmentalConditions {
    /// Reject malformed readings
    ///
    /// # Errors
    ///
    /// Returns an error if any reading is non-finite or physically implausible
    pub fn validate(&self) -> AppResult<()> {
        check_range(
            "altitude_meters",
            self.altitude_meters,
            MIN_ALTITUDE_METERS,
            MAX_ALTITUDE_METERS,
        )?;
        check_range(
            "temperature_celsius",
            self.temperature_celsius,
            MIN_TEMPERATURE_CELSIUS,
            MAX_TEMPERATURE_CELSIUS,
        )?;
        check_range("humidity_percent", self.humidity_percent, 0.0, 100.0)?;
        check_range("wind_speed_kmh", self.wind_speed_kmh, 0.0, f64::MAX)?;
        check_range(
            "precipitation_mm_per_hour",
            self.precipitation_mm_per_hour,
            0.0,
            f64::MAX,
        )
    }

    /// Whether no environmental dimension is constrained
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.altitude_meters.is_none()
            && self.temperature_celsius.is_none()
            && self.terrain.is_none()
            && self.wind_speed_kmh.is_none()
            && self.precipitation_mm_per_hour.is_none()
            && self.air_quality_index.is_none()
    }
}

/// Facility or device a plan may depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facility {
    /// 400m running track
    Track,
    /// Strength training gym
    Gym,
    /// Swimming pool
    Pool,
    /// Treadmill
    Treadmill,
    /// Heart-rate monitor for zone-based sessions
    HeartRateMonitor,
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Track => "track",
            Self::Gym => "gym",
            Self::Pool => "pool",
            Self::Treadmill => "treadmill",
            Self::HeartRateMonitor => "heart rate monitor",
        };
        f.write_str(name)
    }
}

/// Which facilities the athlete can access; `None` means unknown (no constraint)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentAvailability {
    /// Access to a running track
    pub track: Option<bool>,
    /// Access to a gym
    pub gym: Option<bool>,
    /// Access to a pool
    pub pool: Option<bool>,
    /// Access to a treadmill
    pub treadmill: Option<bool>,
    /// Owns a heart-rate monitor
    pub heart_rate_monitor: Option<bool>,
}

impl EquipmentAvailability {
    /// Availability of a single facility
    #[must_use]
    pub const fn availability(&self, facility: Facility) -> Option<bool> {
        match facility {
            Facility::Track => self.track,
            Facility::Gym => self.gym,
            Facility::Pool => self.pool,
            Facility::Treadmill => self.treadmill,
            Facility::HeartRateMonitor => self.heart_rate_monitor,
        }
    }

    /// Facilities explicitly reported as unavailable, in a stable order
    #[must_use]
    pub fn missing(&self) -> Vec<Facility> {
        [
            Facility::Track,
            Facility::Gym,
            Facility::Pool,
            Facility::Treadmill,
            Facility::HeartRateMonitor,
        ]
        .into_iter()
        .filter(|f| self.availability(*f) == Some(false))
        .collect()
    }
}

/// Weekly time budget the athlete can commit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeAvailability {
    /// Hours per week available for training
    pub weekly_available_hours: Option<f64>,
    /// Longest single session the athlete can fit, in minutes
    pub max_session_minutes: Option<u32>,
    /// Number of days per week the athlete can train
    pub available_days: Option<u8>,
}

impl TimeAvailability {
    /// Reject malformed time budgets
    ///
    /// # Errors
    ///
    /// Returns an error if hours are negative, non-finite or exceed a week,
    /// or if available days are outside 1-7
    pub fn validate(&self) -> AppResult<()> {
        check_range(
            "weekly_available_hours",
            self.weekly_available_hours,
            0.0,
            HOURS_PER_WEEK,
        )?;
        if let Some(days) = self.available_days {
            if !(1..=7).contains(&days) {
                return Err(AppError::out_of_range(
                    "available_days",
                    format!("available_days must be between 1 and 7, got {days}"),
                ));
            }
        }
        if self.max_session_minutes == Some(0) {
            return Err(AppError::out_of_range(
                "max_session_minutes",
                "max_session_minutes must be positive",
            ));
        }
        Ok(())
    }
}

/// Injury severity grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjurySeverity {
    /// Training possible with minor adjustments
    Minor,
    /// Training substantially limited
    Moderate,
    /// Running not possible
    Severe,
}

/// Tissue healing stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealingStage {
    /// Inflammatory phase, first days after onset
    Acute,
    /// Proliferation and remodeling
    Healing,
    /// Long-standing, recurring complaint
    Chronic,
}

/// Anatomical region used to select substitute activities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyRegion {
    /// Foot and plantar fascia
    Foot,
    /// Ankle and Achilles tendon
    Ankle,
    /// Shin, calf and tibia
    LowerLeg,
    /// Knee and patellar tendon
    Knee,
    /// Hamstrings, quadriceps and IT band
    Thigh,
    /// Hip and glutes
    Hip,
    /// Lumbar spine
    LowerBack,
    /// Shoulders, arms and upper torso
    UpperBody,
    /// Non-specific or systemic
    General,
}

impl BodyRegion {
    /// Infer the affected region from a free-text injury type
    #[must_use]
    pub fn infer(injury_type: &str) -> Self {
        let name = injury_type.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| name.contains(n));

        if has(&["plantar", "foot", "metatarsal", "toe", "heel"]) {
            Self::Foot
        } else if has(&["achilles", "ankle"]) {
            Self::Ankle
        } else if has(&["shin", "tibia", "calf", "stress_fracture", "stress fracture"]) {
            Self::LowerLeg
        } else if has(&["knee", "patell", "runners_knee", "meniscus"]) {
            Self::Knee
        } else if has(&["hamstring", "quad", "it_band", "itb", "iliotibial", "thigh"]) {
            Self::Thigh
        } else if has(&["hip", "glute", "piriformis", "groin"]) {
            Self::Hip
        } else if has(&["back", "lumbar", "spine"]) {
            Self::LowerBack
        } else if has(&["shoulder", "wrist", "elbow", "arm", "rib"]) {
            Self::UpperBody
        } else {
            Self::General
        }
    }
}

impl fmt::Display for BodyRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Foot => "foot",
            Self::Ankle => "ankle",
            Self::LowerLeg => "lower leg",
            Self::Knee => "knee",
            Self::Thigh => "thigh",
            Self::Hip => "hip",
            Self::LowerBack => "lower back",
            Self::UpperBody => "upper body",
            Self::General => "general",
        };
        f.write_str(name)
    }
}

/// An injury the athlete is currently managing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentInjury {
    /// Injury name, e.g. `stress_fracture`
    pub injury_type: String,
    /// Severity grade
    pub severity: InjurySeverity,
    /// Healing stage
    pub stage: HealingStage,
    /// Affected region; inferred from `injury_type` when absent
    pub body_region: Option<BodyRegion>,
}

impl CurrentInjury {
    /// Create a current injury with an inferred body region
    #[must_use]
    pub fn new(injury_type: impl Into<String>, severity: InjurySeverity, stage: HealingStage) -> Self {
        Self {
            injury_type: injury_type.into(),
            severity,
            stage,
            body_region: None,
        }
    }

    /// Affected region, explicit or inferred
    #[must_use]
    pub fn region(&self) -> BodyRegion {
        self.body_region
            .unwrap_or_else(|| BodyRegion::infer(&self.injury_type))
    }
}

/// A previously healed injury
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalInjury {
    /// Injury name
    pub injury_type: String,
    /// Affected region; inferred from `injury_type` when absent
    pub body_region: Option<BodyRegion>,
    /// Months since the injury resolved
    pub months_since: Option<u32>,
    /// Number of times the injury has recurred
    pub recurrences: u32,
}

impl HistoricalInjury {
    /// Affected region, explicit or inferred
    #[must_use]
    pub fn region(&self) -> BodyRegion {
        self.body_region
            .unwrap_or_else(|| BodyRegion::infer(&self.injury_type))
    }
}

/// Known injury risk factor with mitigation strategies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Factor name, e.g. `low bone density`
    pub factor: String,
    /// Strategies that reduce the risk
    pub mitigation_strategies: Vec<String>,
}

/// Complete injury picture for the athlete
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjuryStatus {
    /// Injuries currently being managed
    pub current_injuries: Vec<CurrentInjury>,
    /// Previously healed injuries
    pub injury_history: Vec<HistoricalInjury>,
    /// Known risk factors
    pub risk_factors: Vec<RiskFactor>,
}

impl InjuryStatus {
    /// Reject injury records without an identifying name
    ///
    /// # Errors
    ///
    /// Returns an error if any injury type or risk factor name is blank
    pub fn validate(&self) -> AppResult<()> {
        let blank_injury = self
            .current_injuries
            .iter()
            .map(|i| i.injury_type.as_str())
            .chain(self.injury_history.iter().map(|i| i.injury_type.as_str()))
            .any(|name| name.trim().is_empty());
        if blank_injury {
            return Err(AppError::invalid_input("injury_type must not be empty")
                .with_field("injury_type"));
        }
        if self.risk_factors.iter().any(|r| r.factor.trim().is_empty()) {
            return Err(
                AppError::invalid_input("risk factor name must not be empty").with_field("factor")
            );
        }
        Ok(())
    }

    /// Whether the athlete is currently injured
    #[must_use]
    pub fn has_current_injury(&self) -> bool {
        !self.current_injuries.is_empty()
    }
}
