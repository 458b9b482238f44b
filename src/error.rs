// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent user-facing messages.

use crate::config::ConfigError;
use crate::services::persistence::PersistenceError;

/// Rejected user input. Nothing is created and no state changes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    /// Name of the offending input field (`distance`, `cadence`, ...)
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Application error type surfaced to the UI layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Workout not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Message to show the user. Persistence and config failures are logged
    /// here since the user only sees a generic notice for them.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(err) => match err.field {
                "coords" => "Click on the map to choose a location first".to_string(),
                _ => format!("Inputs have to be positive numbers ({})", err.field),
            },
            AppError::NotFound(_) => "That workout no longer exists".to_string(),
            AppError::Persistence(err) => {
                tracing::error!(error = %err, "Persistence error");
                "Your workouts could not be saved; they are kept for this session".to_string()
            }
            AppError::Config(err) => {
                tracing::error!(error = %err, "Configuration error");
                "The app is misconfigured".to_string()
            }
        }
    }
}

/// Result type alias for app operations
pub type Result<T> = std::result::Result<T, AppError>;
