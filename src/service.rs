// ABOUTME: Async adaptation service pairing the pure engine with response-profile storage
// ABOUTME: Loads the athlete's learned profile before adapting and records applied outcomes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use stride_core::errors::AppResult;
use stride_core::models::{Methodology, Modification};
use stride_intelligence::config::AdaptationConfig;
use stride_intelligence::response_profile::{
    InMemoryProfileStore, OutcomeMetrics, ResponseProfile, ResponseProfileStore,
};
use stride_intelligence::{AdaptationEngine, AdaptationRequest, AdaptationResult};
use tracing::info;

/// Entry point used by the scheduling layer
///
/// Cloning is cheap; clones share the engine and the store.
#[derive(Clone)]
pub struct AdaptationService {
    engine: Arc<AdaptationEngine>,
    store: Arc<dyn ResponseProfileStore>,
}

impl AdaptationService {
    /// Service over an existing engine and store
    #[must_use]
    pub fn new(engine: AdaptationEngine, store: Arc<dyn ResponseProfileStore>) -> Self {
        Self {
            engine: Arc::new(engine),
            store,
        }
    }

    /// Service with built-in methodologies and an in-process profile store
    #[must_use]
    pub fn in_memory(config: AdaptationConfig) -> Self {
        Self::new(
            AdaptationEngine::new(config),
            Arc::new(InMemoryProfileStore::new()),
        )
    }

    /// The underlying engine
    #[must_use]
    pub fn engine(&self) -> &AdaptationEngine {
        &self.engine
    }

    /// Adapt a plan using the athlete's learned profile for the methodology
    ///
    /// # Errors
    ///
    /// Returns an error if the profile store fails or the request is invalid
    pub async fn adapt_plan(&self, request: &AdaptationRequest) -> AppResult<AdaptationResult> {
        let profile = self
            .store
            .get(&request.plan.athlete_id, request.methodology)
            .await?;
        self.engine.adapt_plan(request, profile.as_ref())
    }

    /// Record how an applied modification worked out
    ///
    /// # Errors
    ///
    /// Returns an error if the athlete id is blank, the outcome is not finite,
    /// or the store fails
    pub async fn update_response_profile(
        &self,
        athlete_id: &str,
        methodology: Methodology,
        modification: &Modification,
        outcome: &OutcomeMetrics,
    ) -> AppResult<ResponseProfile> {
        let profile = self
            .store
            .apply_feedback(
                athlete_id,
                methodology,
                modification,
                outcome,
                &self.engine.config().learning,
            )
            .await?;
        info!(
            athlete_id,
            methodology = %methodology,
            modification = %modification.kind,
            responses = profile.response_history.len(),
            preferred = profile.preferred_modifications.len(),
            avoided = profile.avoided_modifications.len(),
            "Response profile updated"
        );
        Ok(profile)
    }

    /// Current learned profile, if any feedback was recorded
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn response_profile(
        &self,
        athlete_id: &str,
        methodology: Methodology,
    ) -> AppResult<Option<ResponseProfile>> {
        self.store.get(athlete_id, methodology).await
    }
}
