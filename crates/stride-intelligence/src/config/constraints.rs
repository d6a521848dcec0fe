// ABOUTME: Equipment, time and injury constraint configuration
// ABOUTME: Retained-effectiveness scores, compression bands and injury scaling factors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Equipment, Time and Injury Constraint Configuration

use crate::physiological_constants::workload;
use serde::{Deserialize, Serialize};
use stride_core::models::{Facility, HealingStage, InjurySeverity};

/// Fraction of training value (0-100) retained by each facility substitute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentConfig {
    /// Road or GPS intervals instead of track sessions
    pub track_substitute_effectiveness: f64,
    /// Bodyweight circuits instead of gym strength work
    pub gym_substitute_effectiveness: f64,
    /// Cycling or elliptical instead of pool sessions
    pub pool_substitute_effectiveness: f64,
    /// Outdoor loop instead of treadmill sessions
    pub treadmill_substitute_effectiveness: f64,
    /// Perceived effort instead of heart-rate zones
    pub heart_rate_monitor_substitute_effectiveness: f64,
}

impl EquipmentConfig {
    /// Retained effectiveness for a missing facility
    #[must_use]
    pub const fn effectiveness_for(&self, facility: Facility) -> f64 {
        match facility {
            Facility::Track => self.track_substitute_effectiveness,
            Facility::Gym => self.gym_substitute_effectiveness,
            Facility::Pool => self.pool_substitute_effectiveness,
            Facility::Treadmill => self.treadmill_substitute_effectiveness,
            Facility::HeartRateMonitor => self.heart_rate_monitor_substitute_effectiveness,
        }
    }
}

impl Default for EquipmentConfig {
    fn default() -> Self {
        Self {
            track_substitute_effectiveness: 85.0,
            gym_substitute_effectiveness: 70.0,
            pool_substitute_effectiveness: 75.0,
            treadmill_substitute_effectiveness: 80.0,
            heart_rate_monitor_substitute_effectiveness: 90.0,
        }
    }
}

/// Compression strategy bands keyed by weekly time deficit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// Deficits below this use `intensity_focus` (hours)
    pub intensity_focus_max_deficit_hours: f64,
    /// Deficits below this use `volume_reduction` (hours)
    pub volume_reduction_max_deficit_hours: f64,
    /// Deficits below this use `session_combination` (hours)
    pub session_combination_max_deficit_hours: f64,
    /// Retained effectiveness of `intensity_focus`
    pub intensity_focus_retained: f64,
    /// Retained effectiveness of `volume_reduction`
    pub volume_reduction_retained: f64,
    /// Retained effectiveness of `session_combination`
    pub session_combination_retained: f64,
    /// Retained effectiveness of `key_workout_only`
    pub key_workout_only_retained: f64,
    /// Cap on the deficit-sized volume reduction (percent)
    pub max_volume_reduction: f64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            intensity_focus_max_deficit_hours: 1.5,
            volume_reduction_max_deficit_hours: 3.0,
            session_combination_max_deficit_hours: 4.5,
            intensity_focus_retained: 87.0,
            volume_reduction_retained: 75.0,
            session_combination_retained: 65.0,
            key_workout_only_retained: 50.0,
            max_volume_reduction: 50.0,
        }
    }
}

/// Injury scaling factors and dynamic risk parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjuryConfig {
    /// Severity factor for minor injuries
    pub minor_factor: f64,
    /// Severity factor for moderate injuries
    pub moderate_factor: f64,
    /// Severity factor for severe injuries
    pub severe_factor: f64,
    /// Stage factor for acute injuries
    pub acute_factor: f64,
    /// Stage factor for healing injuries
    pub healing_factor: f64,
    /// Stage factor for chronic injuries
    pub chronic_factor: f64,
    /// Cap on injury volume reduction (percent)
    pub max_volume_reduction: f64,
    /// Dynamic risk score above which the injury protocol fires
    pub dynamic_risk_threshold: f64,
    /// Acute load window (days)
    pub acute_window_days: i64,
    /// Chronic load window (days)
    pub chronic_window_days: i64,
    /// Load ratio thresholds and their risk contributions
    pub load_ratio: LoadRatioConfig,
    /// Weight of the recovery deficit (100 - recovery score) in the risk score
    pub recovery_deficit_weight: f64,
}

/// Acute:chronic ratio bands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadRatioConfig {
    /// Ratio above which risk is highest
    pub danger_ratio: f64,
    /// Ratio above which risk is elevated
    pub caution_ratio: f64,
    /// Ratio below which the athlete is under-loaded
    pub underload_ratio: f64,
    /// Risk contribution above `danger_ratio`
    pub danger_risk: f64,
    /// Risk contribution above `caution_ratio`
    pub caution_risk: f64,
    /// Risk contribution below `underload_ratio`
    pub underload_risk: f64,
    /// Risk contribution in the sweet spot
    pub baseline_risk: f64,
}

impl InjuryConfig {
    /// Severity scaling factor
    #[must_use]
    pub const fn severity_factor(&self, severity: InjurySeverity) -> f64 {
        match severity {
            InjurySeverity::Minor => self.minor_factor,
            InjurySeverity::Moderate => self.moderate_factor,
            InjurySeverity::Severe => self.severe_factor,
        }
    }

    /// Healing stage scaling factor
    #[must_use]
    pub const fn stage_factor(&self, stage: HealingStage) -> f64 {
        match stage {
            HealingStage::Acute => self.acute_factor,
            HealingStage::Healing => self.healing_factor,
            HealingStage::Chronic => self.chronic_factor,
        }
    }
}

impl Default for InjuryConfig {
    fn default() -> Self {
        Self {
            minor_factor: 0.1,
            moderate_factor: 0.3,
            severe_factor: 0.6,
            acute_factor: 0.8,
            healing_factor: 0.5,
            chronic_factor: 0.3,
            max_volume_reduction: 80.0,
            dynamic_risk_threshold: 70.0,
            acute_window_days: workload::ACUTE_WINDOW_DAYS,
            chronic_window_days: workload::CHRONIC_WINDOW_DAYS,
            load_ratio: LoadRatioConfig::default(),
            recovery_deficit_weight: 0.4,
        }
    }
}

impl Default for LoadRatioConfig {
    fn default() -> Self {
        Self {
            danger_ratio: workload::DANGER_RATIO,
            caution_ratio: workload::CAUTION_RATIO,
            underload_ratio: workload::UNDERLOAD_RATIO,
            danger_risk: 60.0,
            caution_risk: 40.0,
            underload_risk: 20.0,
            baseline_risk: 10.0,
        }
    }
}
