// ABOUTME: Response profile storage keyed by athlete and methodology
// ABOUTME: Async store trait with a sharded in-memory implementation for per-key atomic updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{OutcomeMetrics, ResponseProfile};
use crate::config::LearningConfig;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use stride_core::errors::{AppError, AppResult};
use stride_core::models::{Methodology, Modification};
use tracing::debug;

/// Storage for response profiles
///
/// Implementations must apply feedback for one `(athlete, methodology)` key
/// atomically; different keys may be updated in parallel.
#[async_trait]
pub trait ResponseProfileStore: Send + Sync {
    /// Current profile, `None` before the first feedback
    async fn get(
        &self,
        athlete_id: &str,
        methodology: Methodology,
    ) -> AppResult<Option<ResponseProfile>>;

    /// Create the profile if needed and fold in one outcome
    async fn apply_feedback(
        &self,
        athlete_id: &str,
        methodology: Methodology,
        modification: &Modification,
        outcome: &OutcomeMetrics,
        config: &LearningConfig,
    ) -> AppResult<ResponseProfile>;

    /// Drop a profile, returning whether it existed
    async fn remove(&self, athlete_id: &str, methodology: Methodology) -> AppResult<bool>;
}

type ProfileKey = (String, Methodology);

/// In-process store backed by a sharded concurrent map
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    /// `DashMap` entry guards serialize updates per key without a global lock
    profiles: Arc<DashMap<ProfileKey, ResponseProfile>>,
}

impl InMemoryProfileStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the store holds no profiles
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[async_trait]
impl ResponseProfileStore for InMemoryProfileStore {
    async fn get(
        &self,
        athlete_id: &str,
        methodology: Methodology,
    ) -> AppResult<Option<ResponseProfile>> {
        Ok(self
            .profiles
            .get(&(athlete_id.to_owned(), methodology))
            .map(|entry| entry.value().clone()))
    }

    async fn apply_feedback(
        &self,
        athlete_id: &str,
        methodology: Methodology,
        modification: &Modification,
        outcome: &OutcomeMetrics,
        config: &LearningConfig,
    ) -> AppResult<ResponseProfile> {
        if athlete_id.trim().is_empty() {
            return Err(AppError::missing_field("athlete_id"));
        }
        outcome.validate()?;

        // Entry guard holds the shard lock for the whole read-modify-write
        let mut entry = self
            .profiles
            .entry((athlete_id.to_owned(), methodology))
            .or_insert_with(|| ResponseProfile::new(athlete_id, methodology, config));
        let effectiveness = entry.value_mut().apply_feedback(modification, outcome, config);
        let snapshot = entry.value().clone();
        drop(entry);

        debug!(
            athlete_id,
            methodology = %methodology,
            modification = %modification.kind,
            effectiveness,
            "Response profile updated"
        );
        Ok(snapshot)
    }

    async fn remove(&self, athlete_id: &str, methodology: Methodology) -> AppResult<bool> {
        Ok(self
            .profiles
            .remove(&(athlete_id.to_owned(), methodology))
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_core::models::{ModificationKind, Priority};

    fn good() -> OutcomeMetrics {
        OutcomeMetrics {
            performance_change: 90.0,
            adherence_change: 90.0,
            recovery_change: 80.0,
            satisfaction_change: 80.0,
        }
    }

    #[tokio::test]
    async fn test_profile_created_lazily() {
        let store = InMemoryProfileStore::new();
        let config = LearningConfig::default();
        assert!(store
            .get("athlete", Methodology::Daniels)
            .await
            .unwrap()
            .is_none());

        let modification =
            Modification::new(ModificationKind::AddRecovery, "fatigue", Priority::High);
        store
            .apply_feedback("athlete", Methodology::Daniels, &modification, &good(), &config)
            .await
            .unwrap();

        let profile = store
            .get("athlete", Methodology::Daniels)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.response_history.len(), 1);
        assert!(store
            .get("athlete", Methodology::Hudson)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_remove_reports_existence() {
        let store = InMemoryProfileStore::new();
        let config = LearningConfig::default();
        let modification =
            Modification::new(ModificationKind::ReduceVolume, "time", Priority::Medium);
        store
            .apply_feedback("a", Methodology::Custom, &modification, &good(), &config)
            .await
            .unwrap();
        assert!(store.remove("a", Methodology::Custom).await.unwrap());
        assert!(!store.remove("a", Methodology::Custom).await.unwrap());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_blank_athlete_is_rejected() {
        let store = InMemoryProfileStore::new();
        let modification =
            Modification::new(ModificationKind::ReduceVolume, "time", Priority::Medium);
        let result = store
            .apply_feedback(
                " ",
                Methodology::Custom,
                &modification,
                &good(),
                &LearningConfig::default(),
            )
            .await;
        assert!(result.is_err());
    }
}
