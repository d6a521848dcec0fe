// ABOUTME: Built-in adaptation pattern tables for each training methodology
// ABOUTME: Overreaching, plateau, rapid progress, base deficit, recovery deficit and adherence patterns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::metrics::Metric;
use crate::triggers::{
    AdaptationPattern, AdaptationResponse, AdaptationTrigger, Threshold, TriggerCondition,
    TriggerKind,
};
use stride_core::models::{Modification, ModificationKind, Priority};

#[allow(clippy::too_many_arguments)] // Table rows read best as one call
fn pattern(
    name: &str,
    kind: TriggerKind,
    philosophy_context: &str,
    minimum_duration_days: u32,
    conditions: Vec<TriggerCondition>,
    modifications: Vec<Modification>,
    rationale: &str,
    monitoring: &[&str],
    rollback: &[&str],
) -> AdaptationPattern {
    AdaptationPattern {
        name: name.to_owned(),
        trigger: AdaptationTrigger {
            kind,
            conditions,
            minimum_duration_days,
            philosophy_context: philosophy_context.to_owned(),
        },
        response: AdaptationResponse {
            modifications,
            rationale: rationale.to_owned(),
            monitoring_criteria: monitoring.iter().map(|s| (*s).to_owned()).collect(),
            rollback_criteria: rollback.iter().map(|s| (*s).to_owned()).collect(),
        },
    }
}

/// Patterns every methodology reacts to
fn shared(principle: &str) -> Vec<AdaptationPattern> {
    vec![
        pattern(
            "adherence_drop",
            TriggerKind::AdherenceDrop,
            principle,
            7,
            vec![TriggerCondition::new(
                Metric::CompletionRate,
                Threshold::Below(70.0),
                85,
            )],
            vec![Modification::new(
                ModificationKind::ReduceVolume,
                "Completion rate dropped below 70%, reduce volume to a sustainable load",
                Priority::Medium,
            )
            .with_change("volumeReduction", 15.0)
            .with_confidence(80)],
            "A plan the athlete completes beats a plan the athlete abandons",
            &["Weekly completion rate"],
            &["Completion rate above 90% for two weeks"],
        ),
        pattern(
            "load_spike",
            TriggerKind::Overreaching,
            principle,
            0,
            vec![TriggerCondition::new(
                Metric::AcuteChronicRatio,
                Threshold::Above(1.5),
                85,
            )],
            vec![Modification::new(
                ModificationKind::ReduceVolume,
                "Acute training load exceeds 1.5x chronic load",
                Priority::High,
            )
            .with_change("volumeReduction", 20.0)
            .with_confidence(85)],
            "Load spikes are the strongest modifiable predictor of running injury",
            &["Acute:chronic ratio", "Muscle soreness"],
            &["Acute:chronic ratio back between 0.8 and 1.3"],
        ),
    ]
}

/// Daniels: VDOT-driven pace progression
pub fn daniels() -> Vec<AdaptationPattern> {
    let mut patterns = vec![
        pattern(
            "vdot_progression",
            TriggerKind::RapidProgress,
            "VDOT",
            14,
            vec![TriggerCondition::new(
                Metric::PaceImprovement,
                Threshold::Above(3.0),
                80,
            )],
            vec![Modification::new(
                ModificationKind::IncreaseIntensity,
                "Race-equivalent pace improved, raise VDOT by one point",
                Priority::Medium,
            )
            .with_change("vdotIncrease", 1)
            .with_confidence(80)],
            "Training paces follow current fitness, not goal fitness",
            &["Interval pace at target effort", "Recovery between sessions"],
            &["Quality sessions missed or failed twice in a row"],
        ),
        pattern(
            "overreaching",
            TriggerKind::Overreaching,
            "quality sessions",
            3,
            vec![
                TriggerCondition::new(Metric::RestingHrElevation, Threshold::Above(5.0), 85),
                TriggerCondition::new(Metric::PerceivedFatigue, Threshold::Above(7.0), 75),
            ],
            vec![
                Modification::new(
                    ModificationKind::ReduceIntensity,
                    "Signs of overreaching, ease quality session paces",
                    Priority::High,
                )
                .with_change("intensityReduction", 15.0)
                .with_confidence(85),
                Modification::new(
                    ModificationKind::AddRecovery,
                    "Insert recovery days before the next quality session",
                    Priority::High,
                )
                .with_change("recoveryDays", 2)
                .with_confidence(85),
            ],
            "Quality sessions only work when the athlete arrives recovered",
            &["Resting heart rate", "Perceived exertion at easy pace"],
            &["Resting heart rate within 3 bpm of baseline"],
        ),
        pattern(
            "vdot_plateau",
            TriggerKind::Plateau,
            "VDOT",
            21,
            vec![TriggerCondition::new(
                Metric::PaceImprovement,
                Threshold::Between(-0.5, 0.5),
                70,
            )],
            vec![Modification::new(
                ModificationKind::PaceAdjustment,
                "No pace change for three weeks, retest VDOT with a time trial",
                Priority::Low,
            )
            .with_change("timeTrial", true)
            .with_confidence(70)],
            "A fresh race result resets paces to the athlete's real fitness",
            &["Time trial result"],
            &["Time trial slower than current VDOT predicts"],
        ),
    ];
    patterns.extend(shared("training paces"));
    patterns
}

/// Lydiard: aerobic base first, phases advance when the base is ready
pub fn lydiard() -> Vec<AdaptationPattern> {
    let mut patterns = vec![
        pattern(
            "aerobic_base_deficit",
            TriggerKind::AerobicBaseDeficit,
            "aerobic base",
            7,
            vec![TriggerCondition::new(
                Metric::HeartRateDrift,
                Threshold::Above(5.0),
                80,
            )],
            vec![Modification::new(
                ModificationKind::ExtendPhase,
                "Aerobic decoupling above 5%, extend the base phase",
                Priority::High,
            )
            .with_change("phase", "base")
            .with_change("extensionWeeks", 2)
            .with_confidence(85)],
            "Anaerobic work on an incomplete aerobic base limits the final peak",
            &["Heart rate drift on long runs"],
            &["Drift below 5% on two consecutive long runs"],
        ),
        pattern(
            "fatigue_accumulation",
            TriggerKind::FatigueAccumulation,
            "aerobic base",
            3,
            vec![
                TriggerCondition::new(Metric::PerceivedFatigue, Threshold::Above(7.0), 80),
                TriggerCondition::new(Metric::RecoveryScore, Threshold::Below(50.0), 75),
            ],
            vec![Modification::new(
                ModificationKind::ReduceVolume,
                "Fatigue is accumulating, trim weekly mileage",
                Priority::High,
            )
            .with_change("volumeReduction", 20.0)
            .with_confidence(80)],
            "Base mileage must stay conversational to build capillaries and mitochondria",
            &["Perceived exertion", "Morning recovery score"],
            &["Recovery score above 65 for a week"],
        ),
        pattern(
            "rapid_aerobic_development",
            TriggerKind::RapidProgress,
            "periodization",
            14,
            vec![
                TriggerCondition::new(Metric::HeartRateDrift, Threshold::Below(2.0), 70),
                TriggerCondition::new(Metric::PaceImprovement, Threshold::Above(4.0), 75),
            ],
            vec![Modification::new(
                ModificationKind::ShortenPhase,
                "Aerobic markers ahead of schedule, move to hill phase sooner",
                Priority::Low,
            )
            .with_change("phase", "base")
            .with_change("shortenWeeks", 1)
            .with_confidence(70)],
            "Phases advance when the athlete is ready, not when the calendar says so",
            &["Heart rate drift on long runs"],
            &["Drift returns above 5%"],
        ),
    ];
    patterns.extend(shared("aerobic base"));
    patterns
}

/// Pfitzinger: lactate threshold development with disciplined recovery
pub fn pfitzinger() -> Vec<AdaptationPattern> {
    let mut patterns = vec![
        pattern(
            "lactate_threshold_progression",
            TriggerKind::RapidProgress,
            "lactate threshold",
            14,
            vec![TriggerCondition::new(
                Metric::PaceImprovement,
                Threshold::Above(2.0),
                80,
            )],
            vec![Modification::new(
                ModificationKind::IncreaseVolume,
                "Threshold pace improving, extend lactate threshold segments",
                Priority::Medium,
            )
            .with_change("volumeIncrease", 10.0)
            .with_confidence(80)],
            "Threshold volume is the main driver of marathon performance",
            &["Lactate threshold pace", "Medium-long run recovery"],
            &["Threshold sessions run slower than target for two weeks"],
        ),
        pattern(
            "recovery_deficit",
            TriggerKind::RecoveryDeficit,
            "progression",
            3,
            vec![
                TriggerCondition::new(Metric::RecoveryScore, Threshold::Below(60.0), 80),
                TriggerCondition::new(Metric::HrvDeviation, Threshold::Below(-10.0), 75),
            ],
            vec![
                Modification::new(
                    ModificationKind::AddRecovery,
                    "Recovery markers suppressed, add a recovery day",
                    Priority::High,
                )
                .with_change("recoveryDays", 1)
                .with_confidence(85),
                Modification::new(
                    ModificationKind::ReduceIntensity,
                    "Run general aerobic sessions as recovery runs",
                    Priority::Medium,
                )
                .with_change("intensityReduction", 10.0)
                .with_confidence(75),
            ],
            "Progression only holds when recovery keeps pace with load",
            &["HRV", "Morning recovery score"],
            &["HRV back within 5% of baseline"],
        ),
    ];
    patterns.extend(shared("progression"));
    patterns
}

/// Hudson: day-to-day adaptation to how the athlete responds
pub fn hudson() -> Vec<AdaptationPattern> {
    let mut patterns = vec![
        pattern(
            "adaptive_fatigue",
            TriggerKind::FatigueAccumulation,
            "adaptive training",
            2,
            vec![
                TriggerCondition::new(Metric::PerceivedFatigue, Threshold::Above(6.0), 80),
                TriggerCondition::new(Metric::RecoveryScore, Threshold::Below(55.0), 75),
            ],
            vec![Modification::new(
                ModificationKind::ReduceIntensity,
                "Athlete is not absorbing the work, swap hard days for effort-based runs",
                Priority::High,
            )
            .with_change("intensityReduction", 20.0)
            .with_confidence(80)],
            "Adjust to the athlete's response rather than following the schedule rigidly",
            &["Perceived exertion", "Session quality"],
            &["Two good quality sessions in a row"],
        ),
        pattern(
            "breakthrough",
            TriggerKind::Breakthrough,
            "adaptive training",
            7,
            vec![TriggerCondition::new(
                Metric::PaceImprovement,
                Threshold::Above(3.0),
                75,
            )],
            vec![Modification::new(
                ModificationKind::IncreaseIntensity,
                "Breakthrough session, progress race-specific workouts",
                Priority::Medium,
            )
            .with_change("intensityIncrease", 5.0)
            .with_confidence(75)],
            "Capitalize on breakthroughs with race-specific work",
            &["Recovery after the next quality session"],
            &["Perceived exertion rises at the new pace"],
        ),
    ];
    patterns.extend(shared("adaptive training"));
    patterns
}

/// Custom methodologies only get the shared safety patterns
pub fn custom() -> Vec<AdaptationPattern> {
    shared("progressive overload")
}
