// ABOUTME: Environmental constraint generator for altitude, heat, cold, terrain and weather extremes
// ABOUTME: Stepped altitude reduction, heat-index bands, warm-up extension and safety substitutions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::round1;
use crate::config::EnvironmentalConfig;
use crate::methodology::MethodologyProfile;
use crate::physiological_constants::heat::{
    DRY_AIR_FAHRENHEIT, DRY_AIR_MAX_HUMIDITY, HUMID_AIR_FAHRENHEIT, HUMID_AIR_MIN_HUMIDITY,
    REGRESSION_MIN_FAHRENHEIT, ROTHFUSZ,
};
use crate::records::{ConstraintRecord, EnvironmentalConstraint, GeneratorOutput};
use stride_core::errors::AppResult;
use stride_core::models::{
    EnvironmentalConditions, Methodology, Modification, ModificationKind, Priority, Terrain,
    TrainingPhase, TrainingPlan,
};
use tracing::debug;

/// Humidity assumed when only temperature is known
const DEFAULT_HUMIDITY_PERCENT: f64 = 50.0;

/// Temperature range the heat index formulas are evaluated over (Celsius)
const HEAT_INDEX_MIN_CELSIUS: f64 = -60.0;
const HEAT_INDEX_MAX_CELSIUS: f64 = 60.0;

/// Heat index (Celsius) from air temperature and relative humidity
///
/// Uses the Steadman approximation below 80°F and the full Rothfusz
/// regression above, with the NOAA dry-air and humid-air corrections.
/// Inputs are clamped so extreme values never produce a non-finite result.
#[must_use]
pub fn heat_index_celsius(temperature_celsius: f64, humidity_percent: f64) -> f64 {
    let t = temperature_celsius
        .clamp(HEAT_INDEX_MIN_CELSIUS, HEAT_INDEX_MAX_CELSIUS)
        .mul_add(9.0 / 5.0, 32.0);
    let rh = humidity_percent.clamp(0.0, 100.0);
    (heat_index_fahrenheit(t, rh) - 32.0) * 5.0 / 9.0
}

fn heat_index_fahrenheit(t: f64, rh: f64) -> f64 {
    let simple = 0.5 * (t + 61.0 + (t - 68.0) * 1.2 + rh * 0.094);
    if (simple + t) / 2.0 < REGRESSION_MIN_FAHRENHEIT {
        return simple;
    }

    let mut index = rothfusz(t, rh);
    let (dry_min, dry_max) = DRY_AIR_FAHRENHEIT;
    let (humid_min, humid_max) = HUMID_AIR_FAHRENHEIT;
    if rh < DRY_AIR_MAX_HUMIDITY && (dry_min..=dry_max).contains(&t) {
        index -= (DRY_AIR_MAX_HUMIDITY - rh) / 4.0 * ((17.0 - (t - 95.0).abs()) / 17.0).sqrt();
    } else if rh > HUMID_AIR_MIN_HUMIDITY && (humid_min..=humid_max).contains(&t) {
        index += (rh - HUMID_AIR_MIN_HUMIDITY) / 10.0 * ((humid_max - t) / 5.0);
    }
    index
}

fn rothfusz(t: f64, rh: f64) -> f64 {
    let [c1, c2, c3, c4, c5, c6, c7, c8, c9] = ROTHFUSZ;
    c9.mul_add(
        t * t * rh * rh,
        c8.mul_add(
            t * rh * rh,
            c7.mul_add(
                t * t * rh,
                c6.mul_add(
                    rh * rh,
                    c5.mul_add(t * t, c4.mul_add(t * rh, c3.mul_add(rh, c2.mul_add(t, c1)))),
                ),
            ),
        ),
    )
}

/// Generates modifications for environmental conditions
pub struct EnvironmentalGenerator<'a> {
    config: &'a EnvironmentalConfig,
}

impl<'a> EnvironmentalGenerator<'a> {
    /// Create a generator bound to its configuration
    #[must_use]
    pub const fn new(config: &'a EnvironmentalConfig) -> Self {
        Self { config }
    }

    /// Stepped intensity reduction for an altitude, 0 below the threshold
    #[must_use]
    pub fn altitude_reduction(&self, altitude_meters: f64) -> f64 {
        let cfg = &self.config.altitude;
        if altitude_meters < cfg.threshold_meters {
            return 0.0;
        }
        let steps = ((altitude_meters - cfg.threshold_meters) / cfg.step_meters).floor();
        cfg.reduction_per_step
            .mul_add(steps, cfg.base_reduction)
            .min(cfg.max_reduction)
    }

    /// Acclimatization delay in weeks
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Safe: clamped to max weeks
    pub fn acclimatization_weeks(&self, altitude_meters: f64) -> u32 {
        let cfg = &self.config.altitude;
        let weeks = (altitude_meters / cfg.meters_per_acclimatization_week)
            .ceil()
            .clamp(0.0, f64::from(cfg.max_acclimatization_weeks));
        weeks as u32
    }

    /// Generate modifications and records for the given conditions
    ///
    /// # Errors
    ///
    /// Never fails for valid conditions; the signature matches the other generators
    pub fn generate(
        &self,
        plan: &TrainingPlan,
        profile: &MethodologyProfile,
        conditions: &EnvironmentalConditions,
    ) -> AppResult<GeneratorOutput> {
        let mut output = GeneratorOutput::default();
        if let Some(altitude) = conditions.altitude_meters {
            self.altitude(plan, profile, altitude, &mut output);
        }
        if let Some(temperature) = conditions.temperature_celsius {
            let humidity = conditions
                .humidity_percent
                .unwrap_or(DEFAULT_HUMIDITY_PERCENT);
            self.heat(temperature, humidity, &mut output);
            self.cold(temperature, &mut output);
        }
        if let Some(terrain) = conditions.terrain {
            self.terrain(terrain, &mut output);
        }
        self.weather_extremes(conditions, &mut output);

        debug!(
            modifications = output.modifications.len(),
            records = output.constraints.len(),
            "Environmental constraints generated"
        );
        Ok(output)
    }

    fn altitude(
        &self,
        plan: &TrainingPlan,
        profile: &MethodologyProfile,
        altitude: f64,
        output: &mut GeneratorOutput,
    ) {
        let cfg = &self.config.altitude;
        if altitude < cfg.threshold_meters {
            return;
        }
        let reduction = self.altitude_reduction(altitude);
        let weeks = self.acclimatization_weeks(altitude);
        let priority = if reduction >= 25.0 {
            Priority::High
        } else {
            Priority::Medium
        };

        output.modify(
            Modification::new(
                ModificationKind::ReduceIntensity,
                format!("Altitude of {altitude:.0}m reduces oxygen availability"),
                priority,
            )
            .with_change("intensityReduction", reduction)
            .with_change("altitudeMeters", altitude),
        );
        output.modify(
            Modification::new(
                ModificationKind::DelayProgression,
                format!("Altitude acclimatization needs {weeks} weeks before progressing"),
                Priority::Medium,
            )
            .with_change("acclimatizationWeeks", weeks),
        );

        let above = altitude - cfg.threshold_meters;
        match profile.methodology {
            Methodology::Daniels => {
                let correction = (above / cfg.meters_per_vdot_point)
                    .floor()
                    .min(cfg.max_vdot_correction);
                if correction > 0.0 {
                    output.modify(
                        Modification::new(
                            ModificationKind::PaceAdjustment,
                            format!("Altitude VDOT correction of -{correction:.0} points"),
                            Priority::Medium,
                        )
                        .with_change("vdotAdjustment", -correction)
                        .for_principle("VDOT"),
                    );
                }
            }
            Methodology::Lydiard => {
                let phase = if plan.has_phase(TrainingPhase::Base) || plan.blocks.is_empty() {
                    "base"
                } else {
                    "current"
                };
                output.modify(
                    Modification::new(
                        ModificationKind::ExtendPhase,
                        "Extend aerobic base work while acclimatizing to altitude",
                        Priority::Medium,
                    )
                    .with_change("phase", phase)
                    .with_change("extensionWeeks", weeks)
                    .for_principle("aerobic base"),
                );
            }
            Methodology::Pfitzinger => {
                output.modify(
                    Modification::new(
                        ModificationKind::PaceAdjustment,
                        "Slow lactate threshold pace at altitude",
                        Priority::Medium,
                    )
                    .with_change("thresholdPaceSlowdown", round1(reduction / 2.0))
                    .for_principle("lactate threshold"),
                );
            }
            Methodology::Hudson => {
                output.modify(
                    Modification::new(
                        ModificationKind::PhaseAdjustment,
                        "Run altitude quality sessions by effort instead of pace",
                        Priority::Medium,
                    )
                    .with_change("effortBased", true)
                    .for_principle("effort-based"),
                );
            }
            Methodology::Custom => {}
        }

        output.record(ConstraintRecord::Environmental(EnvironmentalConstraint {
            factor: "altitude".into(),
            limitation: format!("Reduced oxygen availability at {altitude:.0}m"),
            workaround: format!(
                "Train by effort, reduce intensity {reduction:.0}% and hold progression for {weeks} weeks"
            ),
            impact: format!("{reduction:.0}% intensity reduction"),
        }));
    }

    fn heat(&self, temperature: f64, humidity: f64, output: &mut GeneratorOutput) {
        let cfg = &self.config.heat;
        let index = heat_index_celsius(temperature, humidity);
        let (reduction, priority) = if index >= cfg.extreme_heat_index_celsius {
            (cfg.extreme_reduction, Priority::High)
        } else if index >= cfg.high_heat_index_celsius {
            (cfg.high_reduction, Priority::Medium)
        } else if index >= cfg.moderate_heat_index_celsius {
            (cfg.moderate_reduction, Priority::Low)
        } else {
            return;
        };

        output.modify(
            Modification::new(
                ModificationKind::ReduceIntensity,
                format!("Heat index of {index:.1}°C raises cardiovascular strain"),
                priority,
            )
            .with_change("intensityReduction", reduction)
            .with_change("heatIndexCelsius", round1(index)),
        );
        output.record(ConstraintRecord::Environmental(EnvironmentalConstraint {
            factor: "heat".into(),
            limitation: format!("Heat index {index:.1}°C limits sustainable pace"),
            workaround: "Train early or late, slow paces and increase fluid intake".into(),
            impact: format!("{reduction:.0}% intensity reduction"),
        }));
    }

    fn cold(&self, temperature: f64, output: &mut GeneratorOutput) {
        let cfg = &self.config.cold;
        if temperature >= cfg.warmup_threshold_celsius {
            return;
        }
        let steps = ((cfg.warmup_threshold_celsius - temperature) / 5.0).floor();
        let extension = 5.0_f64
            .mul_add(steps, cfg.base_warmup_extension_minutes)
            .min(cfg.max_warmup_extension_minutes);

        output.modify(
            Modification::new(
                ModificationKind::ExtendWarmup,
                format!("Cold temperature of {temperature:.0}°C needs a longer warm-up"),
                Priority::Low,
            )
            .with_change("warmupExtensionMinutes", extension),
        );

        let severe = temperature < cfg.severe_cold_celsius;
        if severe {
            output.modify(
                Modification::new(
                    ModificationKind::ReduceIntensity,
                    format!("Severe cold of {temperature:.0}°C, moderate quality sessions"),
                    Priority::Medium,
                )
                .with_change("intensityReduction", cfg.severe_cold_reduction),
            );
        }
        output.record(ConstraintRecord::Environmental(EnvironmentalConstraint {
            factor: "cold".into(),
            limitation: format!("Cold muscles at {temperature:.0}°C are prone to strain"),
            workaround: format!("Extend warm-up by {extension:.0} minutes and layer clothing"),
            impact: if severe {
                format!("{:.0}% intensity reduction", cfg.severe_cold_reduction)
            } else {
                "Longer sessions, unchanged intensity".into()
            },
        }));
    }

    fn terrain(&self, terrain: Terrain, output: &mut GeneratorOutput) {
        match terrain {
            Terrain::Hilly | Terrain::Mountainous => {
                output.modify(
                    Modification::new(
                        ModificationKind::SubstituteWorkout,
                        "Hilly terrain: replace flat interval sessions with hill repeats",
                        Priority::Low,
                    )
                    .with_change("substitute", "hill_repeats"),
                );
                output.record(ConstraintRecord::Environmental(EnvironmentalConstraint {
                    factor: "terrain".into(),
                    limitation: "Few flat routes for pace-controlled intervals".into(),
                    workaround: "Use hill repeats for quality work".into(),
                    impact: "Quality sessions shift to strength-endurance".into(),
                }));
            }
            Terrain::Trail => {
                let reduction = self.config.extremes.trail_pace_reduction;
                output.modify(
                    Modification::new(
                        ModificationKind::ReduceIntensity,
                        "Technical trail terrain slows pace at equal effort",
                        Priority::Low,
                    )
                    .with_change("intensityReduction", reduction)
                    .with_change("paceReduction", reduction),
                );
                output.record(ConstraintRecord::Environmental(EnvironmentalConstraint {
                    factor: "terrain".into(),
                    limitation: "Uneven footing prevents target paces".into(),
                    workaround: "Train by effort or heart rate on trails".into(),
                    impact: format!("{reduction:.0}% pace reduction"),
                }));
            }
            Terrain::Flat | Terrain::Road | Terrain::Mixed => {}
        }
    }

    fn weather_extremes(&self, conditions: &EnvironmentalConditions, output: &mut GeneratorOutput) {
        let cfg = &self.config.extremes;

        if let Some(wind) = conditions.wind_speed_kmh.filter(|w| *w > cfg.strong_wind_kmh) {
            Self::safety_substitution(
                output,
                "wind",
                format!("Strong wind of {wind:.0} km/h"),
                "Move quality sessions indoors or to sheltered loops",
                cfg.wind_reduction,
                Priority::Medium,
            );
        }
        if let Some(rain) = conditions
            .precipitation_mm_per_hour
            .filter(|p| *p > cfg.heavy_precipitation_mm_per_hour)
        {
            Self::safety_substitution(
                output,
                "precipitation",
                format!("Heavy precipitation of {rain:.0} mm/h"),
                "Use a treadmill or cross-train for quality work",
                cfg.precipitation_reduction,
                Priority::Low,
            );
        }
        if let Some(aqi) = conditions.air_quality_index {
            if aqi > cfg.hazardous_air_quality_index {
                Self::safety_substitution(
                    output,
                    "air_quality",
                    format!("Hazardous air quality (AQI {aqi})"),
                    "Train indoors only",
                    cfg.hazardous_air_reduction,
                    Priority::Critical,
                );
            } else if aqi > cfg.poor_air_quality_index {
                Self::safety_substitution(
                    output,
                    "air_quality",
                    format!("Poor air quality (AQI {aqi})"),
                    "Move hard sessions indoors and shorten outdoor runs",
                    cfg.poor_air_reduction,
                    Priority::High,
                );
            }
        }
    }

    fn safety_substitution(
        output: &mut GeneratorOutput,
        factor: &str,
        condition: String,
        workaround: &str,
        reduction: f64,
        priority: Priority,
    ) {
        output.modify(
            Modification::new(
                ModificationKind::SubstituteWorkout,
                format!("{condition}: {}", workaround.to_lowercase()),
                priority,
            )
            .with_change("factor", factor),
        );
        output.modify(
            Modification::new(
                ModificationKind::ReduceIntensity,
                format!("{condition} requires a {reduction:.0}% intensity cut"),
                priority,
            )
            .with_change("intensityReduction", reduction),
        );
        output.record(ConstraintRecord::Environmental(EnvironmentalConstraint {
            factor: factor.to_owned(),
            limitation: condition,
            workaround: workaround.to_owned(),
            impact: format!("{reduction:.0}% intensity reduction"),
        }));
    }
}
