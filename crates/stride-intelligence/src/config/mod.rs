// ABOUTME: Adaptation engine configuration orchestrating domain-specific config sections
// ABOUTME: Provides defaults, environment variable overrides, and cross-field validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Adaptation Configuration Module
//!
//! Configuration is organized into domain-specific modules:
//! - `environmental` - Altitude, heat, cold and weather extreme rules
//! - `constraints` - Equipment substitutes, time compression bands, injury scaling
//! - `learning` - Trigger confidence gate, prioritization boosts, profile learning
//! - `risk` - Specific risk rules, overall risk bands, effectiveness scoring
//!
//! The configuration is an immutable value: load it once at startup and pass
//! it by reference into the engine.

pub mod constraints;
pub mod environmental;
pub mod error;
pub mod learning;
pub mod risk;

pub use constraints::{EquipmentConfig, InjuryConfig, LoadRatioConfig, TimeConfig};
pub use environmental::{
    AltitudeConfig, ColdConfig, EnvironmentalConfig, HeatConfig, WeatherExtremesConfig,
};
pub use error::ConfigError;
pub use learning::{LearningConfig, PrioritizationConfig, TriggerConfig};
pub use risk::{EffectivenessConfig, RiskConfig, RiskLevelConfig, RiskRulesConfig};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use std::str::FromStr;
use stride_core::constants::limits::{EFFECTIVENESS_FLOOR, MAX_LOAD_WINDOW_DAYS, SCORE_MAX};
use tracing::debug;

/// Main adaptation configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdaptationConfig {
    /// Environmental generator rules
    pub environmental: EnvironmentalConfig,
    /// Equipment substitute effectiveness
    pub equipment: EquipmentConfig,
    /// Time compression bands
    pub time: TimeConfig,
    /// Injury scaling and dynamic risk
    pub injury: InjuryConfig,
    /// Trigger matcher gate
    pub triggers: TriggerConfig,
    /// Preference-aware ordering
    pub prioritization: PrioritizationConfig,
    /// Response-profile learning
    pub learning: LearningConfig,
    /// Risk and effectiveness assessment
    pub risk: RiskConfig,
}

impl AdaptationConfig {
    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        debug!(
            learning_rate = config.learning.learning_rate,
            min_condition_confidence = config.triggers.min_condition_confidence,
            "Adaptation configuration loaded"
        );
        Ok(config)
    }

    /// Validate cross-field consistency
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_finite()?;

        let altitude = &self.environmental.altitude;
        if altitude.step_meters <= 0.0 || altitude.meters_per_acclimatization_week <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "altitude step sizes must be positive",
            ));
        }
        if altitude.max_reduction > 100.0 || altitude.base_reduction > altitude.max_reduction {
            return Err(ConfigError::InvalidRange(
                "altitude base_reduction must be <= max_reduction <= 100",
            ));
        }

        let heat = &self.environmental.heat;
        if heat.moderate_heat_index_celsius >= heat.high_heat_index_celsius
            || heat.high_heat_index_celsius >= heat.extreme_heat_index_celsius
        {
            return Err(ConfigError::InvalidRange(
                "heat index bands must be in ascending order",
            ));
        }

        let extremes = &self.environmental.extremes;
        if extremes.poor_air_quality_index >= extremes.hazardous_air_quality_index {
            return Err(ConfigError::InvalidRange(
                "poor_air_quality_index must be < hazardous_air_quality_index",
            ));
        }

        let time = &self.time;
        if time.intensity_focus_max_deficit_hours >= time.volume_reduction_max_deficit_hours
            || time.volume_reduction_max_deficit_hours
                >= time.session_combination_max_deficit_hours
        {
            return Err(ConfigError::InvalidRange(
                "compression deficit bands must be in ascending order",
            ));
        }

        let injury = &self.injury;
        if injury.acute_window_days <= 0 || injury.acute_window_days >= injury.chronic_window_days
        {
            return Err(ConfigError::InvalidRange(
                "acute_window_days must be positive and < chronic_window_days",
            ));
        }
        if injury.chronic_window_days > MAX_LOAD_WINDOW_DAYS {
            return Err(ConfigError::ValueOutOfRange(
                "chronic_window_days must be <= 365",
            ));
        }
        if injury.max_volume_reduction > 100.0 {
            return Err(ConfigError::ValueOutOfRange(
                "injury max_volume_reduction must be <= 100",
            ));
        }

        if self.triggers.min_condition_confidence > 100 {
            return Err(ConfigError::ValueOutOfRange(
                "min_condition_confidence must be <= 100",
            ));
        }

        self.validate_learning()?;

        let effectiveness = &self.risk.effectiveness;
        if effectiveness.floor > effectiveness.ceiling {
            return Err(ConfigError::InvalidRange(
                "effectiveness floor must be <= ceiling",
            ));
        }
        if effectiveness.floor < EFFECTIVENESS_FLOOR || effectiveness.ceiling > SCORE_MAX {
            return Err(ConfigError::ValueOutOfRange(
                "effectiveness bounds must stay within 50-100",
            ));
        }
        if !(0.0..=1.0).contains(&effectiveness.penalty_decay) {
            return Err(ConfigError::ValueOutOfRange(
                "penalty_decay must be between 0.0 and 1.0",
            ));
        }

        Ok(())
    }

    /// NaN and infinities serialize to null, and no field is optional
    fn validate_finite(&self) -> Result<(), ConfigError> {
        let value =
            serde_json::to_value(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        first_non_finite(&value, "").map_or(Ok(()), |path| Err(ConfigError::NonFinite(path)))
    }

    fn validate_learning(&self) -> Result<(), ConfigError> {
        let learning = &self.learning;
        if learning.learning_rate <= 0.0 || learning.learning_rate > 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "learning_rate must be in (0.0, 1.0]",
            ));
        }
        let weight_sum = learning.performance_weight
            + learning.adherence_weight
            + learning.recovery_weight
            + learning.satisfaction_weight;
        if (weight_sum - 1.0).abs() > 0.01 {
            return Err(ConfigError::InvalidWeights(
                "Outcome weights must sum to 1.0",
            ));
        }
        if learning.avoided_threshold >= learning.preferred_threshold {
            return Err(ConfigError::InvalidRange(
                "avoided_threshold must be < preferred_threshold",
            ));
        }
        if !(0.0..=100.0).contains(&learning.initial_trend) {
            return Err(ConfigError::ValueOutOfRange(
                "initial_trend must be between 0 and 100",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var(
            "STRIDE_ALTITUDE_THRESHOLD_METERS",
            &mut self.environmental.altitude.threshold_meters,
        )?;
        Self::apply_env_var(
            "STRIDE_ALTITUDE_MAX_REDUCTION",
            &mut self.environmental.altitude.max_reduction,
        )?;
        Self::apply_env_var(
            "STRIDE_TRIGGER_MIN_CONFIDENCE",
            &mut self.triggers.min_condition_confidence,
        )?;
        Self::apply_env_var(
            "STRIDE_PREFERENCE_BOOST",
            &mut self.prioritization.preference_boost,
        )?;
        Self::apply_env_var(
            "STRIDE_LEARNING_RATE",
            &mut self.learning.learning_rate,
        )?;
        Self::apply_env_var(
            "STRIDE_PREFERRED_THRESHOLD",
            &mut self.learning.preferred_threshold,
        )?;
        Self::apply_env_var(
            "STRIDE_AVOIDED_THRESHOLD",
            &mut self.learning.avoided_threshold,
        )?;
        Self::apply_env_var(
            "STRIDE_INJURY_RISK_THRESHOLD",
            &mut self.injury.dynamic_risk_threshold,
        )?;
        Self::apply_env_var(
            "STRIDE_EFFECTIVENESS_FLOOR",
            &mut self.risk.effectiveness.floor,
        )?;
        Ok(self)
    }
}

/// Dotted path of the first null leaf
fn first_non_finite(value: &Value, path: &str) -> Option<String> {
    match value {
        Value::Null => Some(path.to_owned()),
        Value::Object(fields) => fields.iter().find_map(|(key, field)| {
            let nested = if path.is_empty() {
                key.clone()
            } else {
                format!("{path}.{key}")
            };
            first_non_finite(field, &nested)
        }),
        Value::Array(items) => items.iter().find_map(|item| first_non_finite(item, path)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AdaptationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_learning_rate_outside_unit_interval() {
        let mut config = AdaptationConfig::default();
        config.learning.learning_rate = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_rejects_inverted_preference_thresholds() {
        let mut config = AdaptationConfig::default();
        config.learning.avoided_threshold = 80.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));
    }

    #[test]
    fn test_rejects_unbalanced_outcome_weights() {
        let mut config = AdaptationConfig::default();
        config.learning.performance_weight = 0.9;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_rejects_effectiveness_bounds_outside_fifty_to_hundred() {
        let mut config = AdaptationConfig::default();
        config.risk.effectiveness.floor = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));

        let mut config = AdaptationConfig::default();
        config.risk.effectiveness.ceiling = 120.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_rejects_non_finite_values_by_path() {
        let mut config = AdaptationConfig::default();
        config.environmental.altitude.threshold_meters = f64::NAN;
        match config.validate() {
            Err(ConfigError::NonFinite(path)) => {
                assert_eq!(path, "environmental.altitude.threshold_meters");
            }
            other => panic!("expected non-finite error, got {other:?}"),
        }

        let mut config = AdaptationConfig::default();
        config.learning.learning_rate = f64::INFINITY;
        assert!(matches!(config.validate(), Err(ConfigError::NonFinite(_))));
    }

    #[test]
    fn test_rejects_oversized_load_windows() {
        let mut config = AdaptationConfig::default();
        config.injury.chronic_window_days = i64::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_rejects_unordered_compression_bands() {
        let mut config = AdaptationConfig::default();
        config.time.volume_reduction_max_deficit_hours = 1.0;
        assert!(config.validate().is_err());
    }
}
