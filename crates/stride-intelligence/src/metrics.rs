// ABOUTME: Athlete progress and recovery metrics consumed by the trigger matcher
// ABOUTME: Metric snapshots, dated history and derivation from completed workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use stride_core::models::CompletedWorkout;

/// A progress or recovery signal the trigger conditions are evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Pace improvement over the evaluation window (percent, positive is faster)
    PaceImprovement,
    /// Share of planned sessions completed as prescribed (percent)
    CompletionRate,
    /// Mean morning recovery score (0-100)
    RecoveryScore,
    /// Resting heart rate above baseline (bpm)
    RestingHrElevation,
    /// HRV deviation from baseline (percent, negative is suppressed)
    HrvDeviation,
    /// Mean perceived exertion (1-10)
    PerceivedFatigue,
    /// Aerobic decoupling over long runs (percent)
    HeartRateDrift,
    /// Acute to chronic training load ratio
    AcuteChronicRatio,
}

impl Metric {
    /// Stable snake-case identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PaceImprovement => "pace_improvement",
            Self::CompletionRate => "completion_rate",
            Self::RecoveryScore => "recovery_score",
            Self::RestingHrElevation => "resting_hr_elevation",
            Self::HrvDeviation => "hrv_deviation",
            Self::PerceivedFatigue => "perceived_fatigue",
            Self::HeartRateDrift => "heart_rate_drift",
            Self::AcuteChronicRatio => "acute_chronic_ratio",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metric values observed at one point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    values: BTreeMap<Metric, f64>,
}

impl MetricSnapshot {
    /// Empty snapshot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, value);
        self
    }

    /// Record a value, ignoring non-finite input
    pub fn set(&mut self, metric: Metric, value: f64) {
        if value.is_finite() {
            self.values.insert(metric, value);
        }
    }

    /// Current value of a metric
    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied()
    }

    /// Whether no metric has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate recorded metrics in stable order
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.values.iter().map(|(m, v)| (*m, *v))
    }
}

/// A snapshot tied to the day it was observed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedSnapshot {
    /// Observation day
    pub date: NaiveDate,
    /// Values observed that day
    pub values: MetricSnapshot,
}

/// Current metrics plus optional history used for persistence checks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AthleteMetrics {
    /// Pre-aggregated current values
    pub current: MetricSnapshot,
    /// Past observations in any order
    pub history: Vec<DatedSnapshot>,
}

impl AthleteMetrics {
    /// Metrics with current values only
    #[must_use]
    pub fn from_snapshot(current: MetricSnapshot) -> Self {
        Self {
            current,
            history: Vec::new(),
        }
    }

    /// Builder-style history entry
    #[must_use]
    pub fn with_history(mut self, date: NaiveDate, values: MetricSnapshot) -> Self {
        self.history.push(DatedSnapshot { date, values });
        self
    }

    /// Whether neither current values nor history are present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.history.is_empty()
    }

    /// Most recent observation day in the history
    #[must_use]
    pub fn latest_history_date(&self) -> Option<NaiveDate> {
        self.history.iter().map(|s| s.date).max()
    }

    /// Historical values of `metric` within `days` of the latest observation
    #[must_use]
    pub fn history_window(&self, metric: Metric, days: u32) -> Vec<f64> {
        let Some(latest) = self.latest_history_date() else {
            return Vec::new();
        };
        let start = latest - Duration::days(i64::from(days));
        self.history
            .iter()
            .filter(|s| s.date > start)
            .filter_map(|s| s.values.get(metric))
            .collect()
    }

    /// Derive metrics from completed workouts
    ///
    /// Completion rate, recovery score and perceived fatigue come from the
    /// acute window; the load ratio compares acute and chronic windows
    /// measured back from the latest workout. Per-day recovery and effort
    /// values become history so persistence checks have something to read.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Safe: workout counts are small
    pub fn from_workouts(
        workouts: &[CompletedWorkout],
        acute_window_days: i64,
        chronic_window_days: i64,
    ) -> Self {
        let Some(latest) = workouts.iter().map(|w| w.date).max() else {
            return Self::default();
        };
        let acute_start = latest - Duration::days(acute_window_days);
        let acute: Vec<&CompletedWorkout> =
            workouts.iter().filter(|w| w.date > acute_start).collect();

        let mut current = MetricSnapshot::new();
        if !acute.is_empty() {
            let completed = acute.iter().filter(|w| w.completed_as_planned).count();
            current.set(
                Metric::CompletionRate,
                completed as f64 / acute.len() as f64 * 100.0,
            );
        }
        if let Some(recovery) = mean(acute.iter().filter_map(|w| w.recovery_score)) {
            current.set(Metric::RecoveryScore, recovery);
        }
        if let Some(effort) = mean(
            acute
                .iter()
                .filter_map(|w| w.perceived_effort.map(f64::from)),
        ) {
            current.set(Metric::PerceivedFatigue, effort);
        }
        if let Some(ratio) =
            acute_chronic_ratio(workouts, latest, acute_window_days, chronic_window_days)
        {
            current.set(Metric::AcuteChronicRatio, ratio);
        }

        let mut by_day: BTreeMap<NaiveDate, MetricSnapshot> = BTreeMap::new();
        for workout in workouts {
            let day = by_day.entry(workout.date).or_default();
            if let Some(recovery) = workout.recovery_score {
                day.set(Metric::RecoveryScore, recovery);
            }
            if let Some(effort) = workout.perceived_effort {
                day.set(Metric::PerceivedFatigue, f64::from(effort));
            }
        }
        let history = by_day
            .into_iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(date, values)| DatedSnapshot { date, values })
            .collect();

        Self { current, history }
    }
}

/// Acute:chronic workload ratio measured back from `reference`
///
/// The chronic load is expressed per acute window so the ratio is 1.0 when
/// the athlete trains evenly. Returns `None` without chronic load.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Safe: window lengths are small day counts
pub fn acute_chronic_ratio(
    workouts: &[CompletedWorkout],
    reference: NaiveDate,
    acute_window_days: i64,
    chronic_window_days: i64,
) -> Option<f64> {
    if acute_window_days <= 0 || chronic_window_days <= 0 {
        return None;
    }
    let window_load = |days: i64| -> f64 {
        let start = reference - Duration::days(days);
        workouts
            .iter()
            .filter(|w| w.date > start && w.date <= reference)
            .map(CompletedWorkout::training_load)
            .sum()
    };
    let acute = window_load(acute_window_days);
    let chronic_per_window = window_load(chronic_window_days) * acute_window_days as f64
        / chronic_window_days as f64;
    (chronic_per_window > 0.0).then(|| acute / chronic_per_window)
}

#[allow(clippy::cast_precision_loss)] // Safe: sample counts are small
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0_usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_core::models::WorkoutType;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn workout(date: NaiveDate, minutes: u32, recovery: Option<f64>) -> CompletedWorkout {
        CompletedWorkout {
            date,
            workout_type: WorkoutType::Easy,
            duration_minutes: minutes,
            perceived_effort: Some(5),
            training_stress_score: None,
            recovery_score: recovery,
            completed_as_planned: true,
        }
    }

    #[test]
    fn test_even_training_has_unit_ratio() {
        let workouts: Vec<_> = (1..=28).map(|d| workout(day(d), 60, None)).collect();
        let ratio = acute_chronic_ratio(&workouts, day(28), 7, 28).unwrap();
        assert!((ratio - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_spikes_when_recent_load_jumps() {
        let mut workouts: Vec<_> = (1..=21).map(|d| workout(day(d), 30, None)).collect();
        workouts.extend((22..=28).map(|d| workout(day(d), 120, None)));
        let ratio = acute_chronic_ratio(&workouts, day(28), 7, 28).unwrap();
        assert!(ratio > 1.5, "ratio was {ratio}");
    }

    #[test]
    fn test_empty_history_derives_nothing() {
        let metrics = AthleteMetrics::from_workouts(&[], 7, 28);
        assert!(metrics.is_empty());
    }

    #[test]
    fn test_derives_recovery_and_completion() {
        let mut missed = workout(day(10), 45, Some(40.0));
        missed.completed_as_planned = false;
        let workouts = vec![workout(day(9), 45, Some(60.0)), missed];
        let metrics = AthleteMetrics::from_workouts(&workouts, 7, 28);
        assert_eq!(metrics.current.get(Metric::CompletionRate), Some(50.0));
        assert_eq!(metrics.current.get(Metric::RecoveryScore), Some(50.0));
        assert_eq!(metrics.history.len(), 2);
    }

    #[test]
    fn test_history_window_is_relative_to_latest_entry() {
        let metrics = AthleteMetrics::default()
            .with_history(day(1), MetricSnapshot::new().with(Metric::RecoveryScore, 80.0))
            .with_history(day(9), MetricSnapshot::new().with(Metric::RecoveryScore, 40.0))
            .with_history(day(10), MetricSnapshot::new().with(Metric::RecoveryScore, 45.0));
        assert_eq!(metrics.history_window(Metric::RecoveryScore, 3), vec![40.0, 45.0]);
    }
}
