// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The booking validator and conflict detector.
//!
//! Validation never fails on the first problem: every rule runs and every
//! violation is collected, so the caller can present all of them at once.
//! Conflict detection uses half-open interval overlap against the
//! non-cancelled reservations of the same court and date.

use crate::config::{Configuration, DEFAULT_PHONE_PATTERN};
use crate::reservation::{Reservation, ReservationDraft};
use crate::timeslot::{TimeOfDay, TimeRange};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// A required field was not supplied.
    MissingField {
        /// The field name, in API form.
        field: String,
    },
    /// The customer phone does not match the configured regional pattern.
    InvalidPhone {
        /// The offending phone value.
        phone: String,
    },
    /// The booking date is before today.
    PastDate {
        /// The offending date.
        date: NaiveDate,
    },
    /// The start time is before opening.
    BeforeOpening {
        /// The requested start.
        start: TimeOfDay,
        /// The configured opening time.
        opening: TimeOfDay,
    },
    /// The end time is after closing.
    AfterClosing {
        /// The requested end.
        end: TimeOfDay,
        /// The configured closing time.
        closing: TimeOfDay,
    },
    /// The start time is not strictly before the end time.
    EmptyInterval {
        /// The requested start.
        start: TimeOfDay,
        /// The requested end.
        end: TimeOfDay,
    },
    /// The date is in the configured blocked-dates list.
    BlockedDate {
        /// The blocked date.
        date: NaiveDate,
    },
    /// The interval overlaps an existing reservation.
    Conflict {
        /// Id of the conflicting reservation.
        reservation_id: String,
        /// The conflicting reservation's interval.
        range: TimeRange,
    },
}

impl ValidationIssue {
    /// Whether this issue is the retryable kind: a time-overlap conflict,
    /// most likely a race with another booking.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "Required field '{field}' is missing"),
            Self::InvalidPhone { phone } => {
                write!(f, "Phone number '{phone}' is not a valid phone number")
            }
            Self::PastDate { date } => write!(f, "Date {date} is in the past"),
            Self::BeforeOpening { start, opening } => {
                write!(f, "Start time {start} is before opening time {opening}")
            }
            Self::AfterClosing { end, closing } => {
                write!(f, "End time {end} is after closing time {closing}")
            }
            Self::EmptyInterval { start, end } => {
                write!(f, "Start time {start} must be before end time {end}")
            }
            Self::BlockedDate { date } => {
                write!(f, "Date {date} is blocked for bookings")
            }
            Self::Conflict {
                reservation_id,
                range,
            } => {
                write!(
                    f,
                    "Time conflicts with existing reservation {reservation_id} ({range})"
                )
            }
        }
    }
}

/// Finds the first non-cancelled reservation on the same court and date
/// whose interval overlaps `range`, excluding `exclude_id` (used when
/// re-validating an update against the reservation being updated).
#[must_use]
pub fn find_conflict<'a>(
    reservations: &'a [Reservation],
    court_id: i64,
    date: NaiveDate,
    range: TimeRange,
    exclude_id: Option<&str>,
) -> Option<&'a Reservation> {
    reservations.iter().find(|r| {
        r.court_id == court_id
            && r.date == date
            && r.occupies()
            && exclude_id != Some(r.id.as_str())
            && r.time_range().overlaps(range)
    })
}

/// Validates a reservation draft against the configuration and the existing
/// reservation set.
///
/// # Arguments
///
/// * `config` - The facility configuration
/// * `draft` - The prospective reservation
/// * `existing` - Reservations to check conflicts against
/// * `exclude_id` - Reservation id to skip during conflict detection
/// * `today` - The facility-local current date, injected for testability
///
/// # Returns
///
/// Every violation found; an empty list means the draft is bookable.
/// Read-only: persisting the reservation is the caller's next step.
#[must_use]
pub fn validate_draft(
    config: &Configuration,
    draft: &ReservationDraft,
    existing: &[Reservation],
    exclude_id: Option<&str>,
    today: NaiveDate,
) -> Vec<ValidationIssue> {
    let mut issues: Vec<ValidationIssue> = Vec::new();

    if draft.court_id.is_none() {
        issues.push(missing("court_id"));
    }
    if draft.date.is_none() {
        issues.push(missing("date"));
    }
    if draft.start_time.is_none() {
        issues.push(missing("start_time"));
    }
    if draft.end_time.is_none() {
        issues.push(missing("end_time"));
    }
    if draft.customer_name.trim().is_empty() {
        issues.push(missing("customer.name"));
    }
    if draft.customer_phone.trim().is_empty() {
        issues.push(missing("customer.phone"));
    } else if !phone_matches(&config.phone_pattern, &draft.customer_phone) {
        issues.push(ValidationIssue::InvalidPhone {
            phone: draft.customer_phone.clone(),
        });
    }

    if let Some(date) = draft.date {
        if date < today {
            issues.push(ValidationIssue::PastDate { date });
        }
        if config.is_blocked(date) {
            issues.push(ValidationIssue::BlockedDate { date });
        }
    }

    if let Some(start) = draft.start_time
        && start < config.opening
    {
        issues.push(ValidationIssue::BeforeOpening {
            start,
            opening: config.opening,
        });
    }
    if let Some(end) = draft.end_time
        && end > config.closing
    {
        issues.push(ValidationIssue::AfterClosing {
            end,
            closing: config.closing,
        });
    }
    if let (Some(start), Some(end)) = (draft.start_time, draft.end_time)
        && start >= end
    {
        issues.push(ValidationIssue::EmptyInterval { start, end });
    }

    if let (Some(court_id), Some(date), Some(range)) =
        (draft.court_id, draft.date, draft.time_range())
        && range.start < range.end
        && let Some(conflicting) = find_conflict(existing, court_id, date, range, exclude_id)
    {
        issues.push(ValidationIssue::Conflict {
            reservation_id: conflicting.id.clone(),
            range: conflicting.time_range(),
        });
    }

    issues
}

fn missing(field: &str) -> ValidationIssue {
    ValidationIssue::MissingField {
        field: field.to_string(),
    }
}

/// Checks a phone number against the configured pattern. A pattern that
/// fails to compile falls back to the documented default, matching the
/// corrupt-configuration policy.
fn phone_matches(pattern: &str, phone: &str) -> bool {
    let compiled: Result<Regex, regex::Error> =
        Regex::new(pattern).or_else(|_| Regex::new(DEFAULT_PHONE_PATTERN));
    compiled.is_ok_and(|re| re.is_match(phone.trim()))
}
