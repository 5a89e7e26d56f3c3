// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use courtbook_domain::{DomainError, ValidationIssue};
use courtbook_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The booking request violated one or more validation rules.
    ValidationFailed {
        /// Every violation found, never just the first.
        issues: Vec<ValidationIssue>,
    },
    /// The requested interval is already held by another reservation.
    /// Retryable: the caller may pick another slot.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The operation is not allowed in the current state.
    ConstraintViolation {
        /// A human-readable description of the constraint.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed { issues } => {
                let rendered: Vec<String> = issues.iter().map(ToString::to_string).collect();
                write!(f, "Validation failed: {}", rendered.join("; "))
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::ConstraintViolation { message } => {
                write!(f, "Constraint violation: {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidTime(msg) => ApiError::InvalidInput {
            field: String::from("time"),
            message: msg,
        },
        DomainError::InvalidDate { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::InvalidCourtKind(value) => ApiError::InvalidInput {
            field: String::from("kind"),
            message: format!("Unknown court kind '{value}'"),
        },
        DomainError::InvalidStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown reservation status '{value}'"),
        },
        DomainError::InvalidOrigin(value) => ApiError::InvalidInput {
            field: String::from("origin"),
            message: format!("Unknown reservation origin '{value}'"),
        },
        DomainError::InvalidStatusTransition { from, to } => ApiError::ConstraintViolation {
            message: format!("Cannot move reservation status from {from} to {to}"),
        },
        DomainError::InvalidSlotDuration { minutes } => ApiError::InvalidInput {
            field: String::from("slot_duration_minutes"),
            message: format!("Invalid slot duration: {minutes} minutes"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Not-found stays distinguishable, a commit-time booking conflict surfaces
/// as a retryable conflict, and everything else collapses into an internal
/// error so storage details never leak through the API.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message,
        },
        PersistenceError::BookingConflict {
            reservation_id,
            range,
        } => ApiError::Conflict {
            message: format!("Time conflicts with existing reservation {reservation_id} ({range})"),
        },
        PersistenceError::CourtHasReservations { court_id } => ApiError::ConstraintViolation {
            message: format!("Court {court_id} still has upcoming reservations"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
