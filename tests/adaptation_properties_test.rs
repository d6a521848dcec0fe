// ABOUTME: Property-style checks over many constraint combinations
// ABOUTME: Determinism, effectiveness bounds, conflict freedom and generator monotonicity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{eight_hour_plan, load_spike_history, plan_with_weekly_minutes, steady_history};
use stride_planner::intelligence::generators::EnvironmentalGenerator;
use stride_planner::intelligence::records::CompressionApproach;
use stride_planner::intelligence::{AdaptationConfig, AthleteMetrics, Metric, MetricSnapshot};
use stride_planner::models::{
    CurrentInjury, EnvironmentalConditions, EquipmentAvailability, HealingStage,
    HistoricalInjury, InjurySeverity, InjuryStatus, Methodology, ModificationKind, Priority,
    Terrain, TimeAvailability,
};
use stride_planner::{AdaptationEngine, AdaptationRequest};

fn condition_grid() -> Vec<EnvironmentalConditions> {
    vec![
        EnvironmentalConditions::default(),
        EnvironmentalConditions {
            altitude_meters: Some(2200.0),
            temperature_celsius: Some(33.0),
            humidity_percent: Some(70.0),
            ..EnvironmentalConditions::default()
        },
        EnvironmentalConditions {
            altitude_meters: Some(5200.0),
            terrain: Some(Terrain::Trail),
            wind_speed_kmh: Some(60.0),
            ..EnvironmentalConditions::default()
        },
        EnvironmentalConditions {
            temperature_celsius: Some(-25.0),
            precipitation_mm_per_hour: Some(15.0),
            air_quality_index: Some(400),
            ..EnvironmentalConditions::default()
        },
    ]
}

fn heavy_injury() -> InjuryStatus {
    InjuryStatus {
        current_injuries: vec![
            CurrentInjury::new(
                "achilles_tendinopathy",
                InjurySeverity::Moderate,
                HealingStage::Healing,
            ),
            CurrentInjury::new("stress_fracture", InjurySeverity::Severe, HealingStage::Acute),
        ],
        ..InjuryStatus::default()
    }
}

#[test]
fn test_identical_requests_produce_identical_results() {
    let engine = AdaptationEngine::default();
    let request = AdaptationRequest::new(eight_hour_plan(Methodology::Pfitzinger))
        .with_environment(condition_grid()[1].clone())
        .with_time(TimeAvailability {
            weekly_available_hours: Some(5.0),
            ..TimeAvailability::default()
        })
        .with_injury(heavy_injury())
        .with_recent_workouts(load_spike_history());

    let first = engine.adapt_plan(&request, None).unwrap();
    let second = engine.adapt_plan(&request, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_effectiveness_stays_within_floor_and_ceiling() {
    let engine = AdaptationEngine::default();
    for methodology in Methodology::ALL {
        for conditions in condition_grid() {
            for hours in [None, Some(1.0), Some(6.0)] {
                let request = AdaptationRequest::new(eight_hour_plan(methodology))
                    .with_environment(conditions.clone())
                    .with_equipment(EquipmentAvailability {
                        track: Some(false),
                        pool: Some(false),
                        ..EquipmentAvailability::default()
                    })
                    .with_time(TimeAvailability {
                        weekly_available_hours: hours,
                        ..TimeAvailability::default()
                    })
                    .with_injury(heavy_injury())
                    .with_recent_workouts(steady_history());
                let result = engine.adapt_plan(&request, None).unwrap();
                assert!(
                    (50.0..=100.0).contains(&result.effectiveness),
                    "{methodology} produced {}",
                    result.effectiveness
                );
            }
        }
    }
}

#[test]
fn test_output_never_contains_opposing_modifications() {
    let engine = AdaptationEngine::default();
    for methodology in Methodology::ALL {
        for conditions in condition_grid() {
            let request = AdaptationRequest::new(eight_hour_plan(methodology))
                .with_environment(conditions)
                .with_injury(heavy_injury())
                .with_metrics(AthleteMetrics::from_snapshot(
                    MetricSnapshot::new()
                        .with(Metric::PaceImprovement, 5.0)
                        .with(Metric::HeartRateDrift, 1.0),
                ));
            let result = engine.adapt_plan(&request, None).unwrap();
            for (i, a) in result.modifications.iter().enumerate() {
                for b in &result.modifications[i + 1..] {
                    assert!(
                        !a.kind.conflicts_with(b.kind),
                        "{methodology}: {} and {} both kept",
                        a.kind,
                        b.kind
                    );
                }
            }
        }
    }
}

#[test]
fn test_altitude_beats_pace_progression() {
    let request = AdaptationRequest::new(eight_hour_plan(Methodology::Daniels))
        .with_environment(EnvironmentalConditions {
            altitude_meters: Some(3000.0),
            ..EnvironmentalConditions::default()
        })
        .with_metrics(AthleteMetrics::from_snapshot(
            MetricSnapshot::new().with(Metric::PaceImprovement, 5.0),
        ));
    let result = AdaptationEngine::default().adapt_plan(&request, None).unwrap();

    assert!(result
        .triggered_patterns
        .contains(&"vdot_progression".to_owned()));
    let kinds: Vec<_> = result.modifications.iter().map(|m| m.kind).collect();
    assert!(kinds.contains(&ModificationKind::ReduceIntensity));
    assert!(!kinds.contains(&ModificationKind::IncreaseIntensity));

    assert_eq!(result.conflicts.len(), 1);
    let group = &result.conflicts[0];
    assert_eq!(group.kept, ModificationKind::ReduceIntensity);
    assert_eq!(group.kept_priority, Priority::High);
    assert!(group
        .member_kinds
        .contains(&ModificationKind::IncreaseIntensity));
}

#[test]
fn test_altitude_reduction_is_monotonic_and_capped() {
    let config = AdaptationConfig::default();
    let generator = EnvironmentalGenerator::new(&config.environmental);
    let mut previous = 0.0;
    for altitude in (0..=9000).step_by(100) {
        let reduction = generator.altitude_reduction(f64::from(altitude));
        assert!(reduction >= previous, "dropped at {altitude}m");
        assert!(reduction <= 40.0);
        previous = reduction;
    }
    assert!(generator.altitude_reduction(1499.0).abs() < f64::EPSILON);
    assert!((generator.altitude_reduction(1500.0) - 10.0).abs() < f64::EPSILON);
    assert!((previous - 40.0).abs() < f64::EPSILON);
}

#[test]
fn test_each_past_injury_gets_prevention() {
    let engine = AdaptationEngine::default();
    for count in 0..4_u32 {
        let history = (0..count)
            .map(|i| HistoricalInjury {
                injury_type: format!("injury_{i}"),
                body_region: None,
                months_since: Some(6 + i),
                recurrences: i,
            })
            .collect();
        let request = AdaptationRequest::new(eight_hour_plan(Methodology::Hudson)).with_injury(
            InjuryStatus {
                injury_history: history,
                ..InjuryStatus::default()
            },
        );
        let result = engine.adapt_plan(&request, None).unwrap();
        let prevention = result
            .modifications
            .iter()
            .filter(|m| m.kind == ModificationKind::InjuryPrevention)
            .count();
        assert_eq!(prevention, count as usize);
    }
}

#[test]
fn test_compression_approach_tracks_deficit() {
    let engine = AdaptationEngine::default();

    let starved = AdaptationRequest::new(plan_with_weekly_minutes(Methodology::Custom, &[60; 6]))
        .with_time(TimeAvailability {
            weekly_available_hours: Some(1.0),
            ..TimeAvailability::default()
        });
    let result = engine.adapt_plan(&starved, None).unwrap();
    assert_eq!(
        result.constraints.time[0].compression.approach,
        CompressionApproach::KeyWorkoutOnly
    );
    let volume = result
        .modifications
        .iter()
        .find(|m| m.kind == ModificationKind::ReduceVolume)
        .unwrap();
    assert_eq!(volume.change_f64("volumeReduction"), Some(50.0));

    let close = AdaptationRequest::new(plan_with_weekly_minutes(Methodology::Custom, &[60; 7]))
        .with_time(TimeAvailability {
            weekly_available_hours: Some(6.0),
            ..TimeAvailability::default()
        });
    let result = engine.adapt_plan(&close, None).unwrap();
    let record = &result.constraints.time[0];
    assert_eq!(record.compression.approach, CompressionApproach::IntensityFocus);
    assert!((record.compression.retained_effectiveness - 87.0).abs() < 1e-9);
    assert!((record.deficit_hours - 1.0).abs() < 1e-9);
}
