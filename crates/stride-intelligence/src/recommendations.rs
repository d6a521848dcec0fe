// ABOUTME: Human-facing recommendations assembled from an adaptation run
// ABOUTME: Constraint workarounds, fired pattern rationales and skipped-generator warnings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::generators::ConstraintCategory;
use crate::records::{CompressionApproach, ConstraintSummary};
use crate::triggers::PatternMatch;
use serde::{Deserialize, Serialize};
use std::fmt;
use stride_core::models::Priority;

/// What a recommendation is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    /// Environment workaround
    Environmental,
    /// Missing facility workaround
    Equipment,
    /// Time compression
    Time,
    /// Injury management
    Injury,
    /// Methodology-specific adaptation pattern
    Methodology,
    /// A generator could not run
    Warning,
}

impl From<ConstraintCategory> for RecommendationCategory {
    fn from(category: ConstraintCategory) -> Self {
        match category {
            ConstraintCategory::Environmental => Self::Environmental,
            ConstraintCategory::Equipment => Self::Equipment,
            ConstraintCategory::Time => Self::Time,
            ConstraintCategory::Injury => Self::Injury,
        }
    }
}

/// One actionable recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Category
    pub category: RecommendationCategory,
    /// How urgent
    pub priority: Priority,
    /// Short title
    pub title: String,
    /// Explanation
    pub description: String,
    /// Concrete steps
    pub actions: Vec<String>,
}

/// A generator failure that was isolated instead of aborting the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorWarning {
    /// Category whose generator failed
    pub category: ConstraintCategory,
    /// Error message
    pub message: String,
}

impl fmt::Display for GeneratorWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} constraints skipped: {}", self.category, self.message)
    }
}

/// Build recommendations, most urgent first
///
/// Ties keep construction order: warnings, constraint categories, then patterns.
#[must_use]
pub fn build_recommendations(
    constraints: &ConstraintSummary,
    matches: &[PatternMatch],
    warnings: &[GeneratorWarning],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    for warning in warnings {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Warning,
            priority: Priority::High,
            title: format!("{} constraints not applied", warning.category),
            description: warning.message.clone(),
            actions: vec![format!(
                "Review the {} inputs and adapt again",
                warning.category
            )],
        });
    }

    for record in &constraints.environmental {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Environmental,
            priority: Priority::Medium,
            title: format!("Adjust for {}", record.factor),
            description: format!("{}. {}", record.limitation, record.impact),
            actions: vec![record.workaround.clone()],
        });
    }

    for record in &constraints.equipment {
        let mut actions = vec![record.workaround.clone()];
        actions.extend(record.alternatives.iter().cloned());
        recommendations.push(Recommendation {
            category: RecommendationCategory::Equipment,
            priority: Priority::Low,
            title: format!("Replace {} sessions", record.missing),
            description: format!(
                "{} (substitutes retain about {:.0}% of the training effect)",
                record.limitation, record.effectiveness
            ),
            actions,
        });
    }

    for record in &constraints.time {
        let priority = if record.compression.approach == CompressionApproach::KeyWorkoutOnly {
            Priority::High
        } else {
            Priority::Medium
        };
        recommendations.push(Recommendation {
            category: RecommendationCategory::Time,
            priority,
            title: format!("Compress training: {}", record.compression.approach),
            description: format!(
                "{:.1}h available against {:.1}h planned. {}",
                record.available_hours, record.required_hours, record.compression.description
            ),
            actions: record.compression.priorities.clone(),
        });
    }

    for record in &constraints.injury {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Injury,
            priority: if record.monitoring_required {
                Priority::High
            } else {
                Priority::Medium
            },
            title: format!("Manage {}", record.injury_type),
            description: record.limitation.clone(),
            actions: vec![record.workaround.clone()],
        });
    }

    for fired in matches {
        recommendations.push(Recommendation {
            category: RecommendationCategory::Methodology,
            priority: Priority::Medium,
            title: fired.pattern_name.replace('_', " "),
            description: fired.rationale.clone(),
            actions: fired.monitoring_criteria.clone(),
        });
    }

    recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
    recommendations
}
