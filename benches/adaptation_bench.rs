// ABOUTME: Criterion benchmarks for the plan adaptation pipeline
// ABOUTME: Measures full adaptation, injury risk scoring and async service throughput
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the plan adaptation pipeline.
//!
//! Measures adaptation of a multi-block plan under stacked constraints,
//! dynamic injury risk over growing workout histories, and the async
//! service path including response-profile lookups.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use chrono::{Duration, NaiveDate, Weekday};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stride_planner::intelligence::generators::InjuryGenerator;
use stride_planner::intelligence::{AdaptationConfig, AthleteMetrics, Metric, MetricSnapshot};
use stride_planner::models::{
    CompletedWorkout, CurrentInjury, EnvironmentalConditions, EquipmentAvailability, HealingStage,
    HistoricalInjury, InjurySeverity, InjuryStatus, Methodology, PlannedWorkout, TrainingBlock,
    TrainingPhase, TrainingPlan, TrainingWeek, WorkoutType,
};
use stride_planner::{AdaptationEngine, AdaptationRequest, AdaptationService};
use tokio::runtime::Runtime;

const HISTORY_SIZES: [usize; 3] = [28, 90, 365];

fn week(week_number: u32) -> TrainingWeek {
    let mut intervals = PlannedWorkout::new(Weekday::Tue, WorkoutType::Intervals, 75);
    intervals.key_workout = true;
    let mut long_run = PlannedWorkout::new(Weekday::Sun, WorkoutType::LongRun, 150);
    long_run.key_workout = true;
    TrainingWeek {
        week_number,
        workouts: vec![
            PlannedWorkout::new(Weekday::Mon, WorkoutType::Easy, 60),
            intervals,
            PlannedWorkout::new(Weekday::Wed, WorkoutType::Strength, 45),
            PlannedWorkout::new(Weekday::Thu, WorkoutType::Tempo, 60),
            PlannedWorkout::new(Weekday::Sat, WorkoutType::Easy, 45),
            long_run,
        ],
    }
}

fn sixteen_week_plan(methodology: Methodology) -> TrainingPlan {
    let phases = [
        TrainingPhase::Base,
        TrainingPhase::Build,
        TrainingPhase::Peak,
        TrainingPhase::Taper,
    ];
    let blocks = phases
        .into_iter()
        .zip(0_u32..)
        .map(|(phase, block)| TrainingBlock {
            phase,
            weeks: (1..=4).map(|w| week(block * 4 + w)).collect(),
        })
        .collect();
    TrainingPlan::new("bench-plan", "bench-athlete", methodology, blocks)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss
)]
fn history(count: usize) -> Vec<CompletedWorkout> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default();
    (0..count)
        .map(|index| CompletedWorkout {
            date: start + Duration::days(index as i64),
            workout_type: WorkoutType::Easy,
            duration_minutes: 30 + ((index * 37) % 90) as u32,
            perceived_effort: Some(3 + (index % 6) as u8),
            training_stress_score: None,
            recovery_score: Some(40.0 + ((index * 13) % 50) as f64),
            completed_as_planned: index % 9 != 0,
        })
        .collect()
}

fn stacked_request(methodology: Methodology) -> AdaptationRequest {
    AdaptationRequest::new(sixteen_week_plan(methodology))
        .with_environment(EnvironmentalConditions {
            altitude_meters: Some(2800.0),
            temperature_celsius: Some(31.0),
            humidity_percent: Some(65.0),
            air_quality_index: Some(180),
            ..EnvironmentalConditions::default()
        })
        .with_equipment(EquipmentAvailability {
            track: Some(false),
            gym: Some(false),
            ..EquipmentAvailability::default()
        })
        .with_injury(InjuryStatus {
            current_injuries: vec![CurrentInjury::new(
                "plantar_fasciitis",
                InjurySeverity::Moderate,
                HealingStage::Healing,
            )],
            injury_history: vec![HistoricalInjury {
                injury_type: "it_band_syndrome".into(),
                body_region: None,
                months_since: Some(8),
                recurrences: 2,
            }],
            ..InjuryStatus::default()
        })
        .with_recent_workouts(history(42))
        .with_metrics(AthleteMetrics::from_snapshot(
            MetricSnapshot::new()
                .with(Metric::PaceImprovement, 4.0)
                .with(Metric::CompletionRate, 65.0),
        ))
}

fn bench_adaptation(c: &mut Criterion) {
    let mut group = c.benchmark_group("adaptation");
    let engine = AdaptationEngine::default();

    group.bench_function("unconstrained_plan", |b| {
        let request = AdaptationRequest::new(sixteen_week_plan(Methodology::Daniels));
        b.iter(|| engine.adapt_plan(black_box(&request), None));
    });

    for methodology in Methodology::ALL {
        let request = stacked_request(methodology);
        group.bench_with_input(
            BenchmarkId::new("stacked_constraints", methodology),
            &request,
            |b, request| {
                b.iter(|| engine.adapt_plan(black_box(request), None));
            },
        );
    }

    group.finish();
}

fn bench_injury_risk(c: &mut Criterion) {
    let mut group = c.benchmark_group("injury_risk");
    let config = AdaptationConfig::default();
    let generator = InjuryGenerator::new(&config.injury);

    for size in HISTORY_SIZES {
        let workouts = history(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("assess_risk", size), &workouts, |b, w| {
            b.iter(|| generator.assess_risk(black_box(w)));
        });
    }

    group.finish();
}

fn bench_service(c: &mut Criterion) {
    let mut group = c.benchmark_group("service");
    group.sample_size(50);

    let Ok(runtime) = Runtime::new() else {
        return;
    };
    let service = AdaptationService::in_memory(AdaptationConfig::default());
    let request = stacked_request(Methodology::Pfitzinger);

    group.bench_function("adapt_with_profile_lookup", |b| {
        b.to_async(&runtime)
            .iter(|| async { service.adapt_plan(black_box(&request)).await });
    });

    group.finish();
}

criterion_group!(benches, bench_adaptation, bench_injury_risk, bench_service);
criterion_main!(benches);
