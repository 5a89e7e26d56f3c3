// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur in domain operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A wall-clock time string could not be parsed or is out of range.
    InvalidTime(String),
    /// A calendar date string could not be parsed.
    InvalidDate {
        /// The string that failed to parse.
        date_string: String,
        /// The underlying parse error.
        error: String,
    },
    /// An unknown court kind string was supplied.
    InvalidCourtKind(String),
    /// An unknown reservation status string was supplied.
    InvalidStatus(String),
    /// An unknown reservation origin string was supplied.
    InvalidOrigin(String),
    /// A disallowed reservation status transition was requested.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// The configured slot duration is unusable.
    InvalidSlotDuration {
        /// The offending duration in minutes.
        minutes: u16,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTime(msg) => write!(f, "Invalid time: {msg}"),
            Self::InvalidDate { date_string, error } => {
                write!(f, "Invalid date '{date_string}': {error}")
            }
            Self::InvalidCourtKind(value) => write!(f, "Invalid court kind: '{value}'"),
            Self::InvalidStatus(value) => write!(f, "Invalid reservation status: '{value}'"),
            Self::InvalidOrigin(value) => write!(f, "Invalid reservation origin: '{value}'"),
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Cannot transition reservation from '{from}' to '{to}'")
            }
            Self::InvalidSlotDuration { minutes } => {
                write!(f, "Invalid slot duration: {minutes} minutes")
            }
        }
    }
}

impl std::error::Error for DomainError {}
