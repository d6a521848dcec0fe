// ABOUTME: Unified error handling for the adaptation engine and its collaborators
// ABOUTME: Defines ErrorCode taxonomy, AppError with context, and the AppResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the workspace returns [`AppResult`]. Errors carry
//! a stable [`ErrorCode`], a human-readable message, and optional structured
//! context so that the outer scheduling layer can render them consistently.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use thiserror::Error;

/// Standard error codes used throughout the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Malformed constraint object or other invalid input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A field required for the requested operation is absent
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,
    /// Numeric value outside its physically meaningful range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // Resource Management (4000-4999)
    /// Requested record does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // Configuration (6000-6999)
    /// Configuration failed validation
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Response-profile storage backend failure
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Storage operation failed",
        }
    }

    /// Whether the caller can fix this error by changing its input
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput
                | Self::MissingRequiredField
                | Self::ValueOutOfRange
                | Self::ResourceNotFound
        )
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Athlete the failing operation was performed for
    pub athlete_id: Option<String>,
    /// Name of the offending field, when the error is tied to one
    pub field: Option<String>,
    /// Additional key-value context
    pub details: Option<serde_json::Value>,
}

/// Unified error type for the workspace
#[derive(Debug, Error)]
#[error("{}: {}", .code.description(), .message)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Malformed input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Numeric input outside its accepted range
    #[must_use]
    pub fn out_of_range(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message).with_field(field)
    }

    /// A field needed by the operation is absent
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field '{field}'"),
        )
        .with_field(field)
    }

    /// Methodology not known to the registry
    #[must_use]
    pub fn unknown_methodology(name: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InvalidInput,
            format!("Unknown methodology '{}'", name.into()),
        )
        .with_field("methodology")
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Storage backend error
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Attach the athlete identifier to the error context
    #[must_use]
    pub fn with_athlete(mut self, athlete_id: impl Into<String>) -> Self {
        self.context.athlete_id = Some(athlete_id.into());
        self
    }

    /// Attach the offending field name to the error context
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.context.field = Some(field.into());
        self
    }

    /// Attach structured details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = Some(details);
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_description_and_message() {
        let error = AppError::invalid_input("humidity must be between 0 and 100");
        let rendered = error.to_string();
        assert!(rendered.starts_with("The provided input is invalid"));
        assert!(rendered.contains("humidity"));
    }

    #[test]
    fn test_context_builders() {
        let error = AppError::out_of_range("altitude_meters", "altitude below sea floor")
            .with_athlete("athlete-7");
        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
        assert_eq!(error.context.field.as_deref(), Some("altitude_meters"));
        assert_eq!(error.context.athlete_id.as_deref(), Some("athlete-7"));
        assert!(error.code.is_client_error());
        assert!(!ErrorCode::StorageError.is_client_error());
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::MissingRequiredField).unwrap();
        assert_eq!(json, "\"MISSING_REQUIRED_FIELD\"");
    }
}
