// ABOUTME: Closed set of supported endurance-training methodologies
// ABOUTME: Parses methodology names and exposes stable identifiers for profile keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Training methodology a plan follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Methodology {
    /// Jack Daniels' VDOT-based training
    Daniels,
    /// Arthur Lydiard's aerobic-base periodization
    Lydiard,
    /// Pete Pfitzinger's lactate-threshold centric plans
    Pfitzinger,
    /// Brad Hudson's adaptive running
    Hudson,
    /// Coach- or athlete-defined methodology
    Custom,
}

impl Methodology {
    /// All methodologies in declaration order
    pub const ALL: [Self; 5] = [
        Self::Daniels,
        Self::Lydiard,
        Self::Pfitzinger,
        Self::Hudson,
        Self::Custom,
    ];

    /// Stable lowercase identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daniels => "daniels",
            Self::Lydiard => "lydiard",
            Self::Pfitzinger => "pfitzinger",
            Self::Hudson => "hudson",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for Methodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Methodology {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daniels" => Ok(Self::Daniels),
            "lydiard" => Ok(Self::Lydiard),
            "pfitzinger" => Ok(Self::Pfitzinger),
            "hudson" => Ok(Self::Hudson),
            "custom" => Ok(Self::Custom),
            _ => Err(AppError::unknown_methodology(s)),
        }
    }
}
