// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservations and their lifecycle.
//!
//! A reservation is a booked `[start_time, end_time)` interval on one court
//! and one calendar date. Cancellation is soft: the record is never deleted,
//! only its status moves to `Cancelled`, which is terminal.

use crate::error::DomainError;
use crate::timeslot::{TimeOfDay, TimeRange};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The booking customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Full name (required for a valid booking).
    pub name: String,
    /// Contact phone (required for a valid booking).
    pub phone: String,
    /// Optional email address.
    pub email: Option<String>,
    /// Optional national document id.
    pub document_id: Option<String>,
}

/// Lifecycle status of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Created but not yet confirmed by the facility.
    Pending,
    /// Confirmed by the facility.
    Confirmed,
    /// Paid in full.
    Paid,
    /// Soft-cancelled; terminal.
    Cancelled,
}

impl ReservationStatus {
    /// The canonical string form, used in storage and API payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses the canonical string form.
    ///
    /// # Errors
    ///
    /// Returns an error for an unrecognized status string.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "paid" => Ok(Self::Paid),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(value.to_string())),
        }
    }

    /// Whether a transition from `self` to `target` is allowed.
    ///
    /// Any status may move to any other, except that `Cancelled` is
    /// terminal: once cancelled, a reservation cannot be revived.
    /// Self-transitions are allowed (and are no-ops for the caller).
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Cancelled, Self::Cancelled)
                | (Self::Pending | Self::Confirmed | Self::Paid, _)
        )
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Provenance of a reservation. Does not affect scheduling logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationOrigin {
    /// Booked through the public web flow.
    Web,
    /// Entered by facility staff.
    Admin,
    /// Taken over WhatsApp and entered manually.
    Whatsapp,
}

impl ReservationOrigin {
    /// The canonical string form, used in storage and API payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Admin => "admin",
            Self::Whatsapp => "whatsapp",
        }
    }

    /// Parses the canonical string form.
    ///
    /// # Errors
    ///
    /// Returns an error for an unrecognized origin string.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "web" => Ok(Self::Web),
            "admin" => Ok(Self::Admin),
            "whatsapp" => Ok(Self::Whatsapp),
            _ => Err(DomainError::InvalidOrigin(value.to_string())),
        }
    }
}

impl std::fmt::Display for ReservationOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A booked interval on one court.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Opaque identifier, generated at creation.
    pub id: String,
    /// The booked court.
    pub court_id: i64,
    /// Facility-local calendar date.
    pub date: NaiveDate,
    /// Inclusive start of the booked interval.
    pub start_time: TimeOfDay,
    /// Exclusive end of the booked interval.
    pub end_time: TimeOfDay,
    /// The booking customer.
    pub customer: Customer,
    /// Price snapshotted at creation, in whole currency units.
    pub price: i64,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// Provenance tag.
    pub origin: ReservationOrigin,
    /// Optional free-text notes.
    pub notes: Option<String>,
    /// Creation timestamp (RFC 3339 UTC), server-assigned.
    pub created_at: String,
    /// Last-update timestamp (RFC 3339 UTC), server-assigned.
    pub updated_at: String,
}

impl Reservation {
    /// The booked interval as a `TimeRange`.
    #[must_use]
    pub const fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    /// Whether this reservation occupies the court: any status other than
    /// `Cancelled` blocks the interval.
    #[must_use]
    pub const fn occupies(&self) -> bool {
        !matches!(self.status, ReservationStatus::Cancelled)
    }
}

/// Partial update for a `Reservation`.
///
/// `None` leaves a field unchanged. When a patch touches the court, date,
/// time, or customer, the caller must re-run validation before applying it;
/// the repository does not re-validate. Status changes go through the
/// dedicated status-transition operation, not this patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationPatch {
    /// New court, if changing.
    pub court_id: Option<i64>,
    /// New date, if changing.
    pub date: Option<NaiveDate>,
    /// New interval start, if changing.
    pub start_time: Option<TimeOfDay>,
    /// New interval end, if changing.
    pub end_time: Option<TimeOfDay>,
    /// New customer name, if changing.
    pub customer_name: Option<String>,
    /// New customer phone, if changing.
    pub customer_phone: Option<String>,
    /// New customer email, if changing (`Some(None)` clears it).
    pub customer_email: Option<Option<String>>,
    /// New customer document id, if changing (`Some(None)` clears it).
    pub customer_document_id: Option<Option<String>>,
    /// New price, if changing.
    pub price: Option<i64>,
    /// New notes, if changing (`Some(None)` clears them).
    pub notes: Option<Option<String>>,
}

impl Reservation {
    /// Merges a patch into this reservation. The caller re-stamps
    /// `updated_at` and is responsible for prior validation.
    pub fn apply(&mut self, patch: ReservationPatch) {
        if let Some(court_id) = patch.court_id {
            self.court_id = court_id;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(start_time) = patch.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            self.end_time = end_time;
        }
        if let Some(name) = patch.customer_name {
            self.customer.name = name;
        }
        if let Some(phone) = patch.customer_phone {
            self.customer.phone = phone;
        }
        if let Some(email) = patch.customer_email {
            self.customer.email = email;
        }
        if let Some(document_id) = patch.customer_document_id {
            self.customer.document_id = document_id;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }
}

/// A prospective reservation, prior to validation.
///
/// Required fields are optional here so the validator can report every
/// missing field at once instead of failing on the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationDraft {
    /// The court to book.
    pub court_id: Option<i64>,
    /// The facility-local calendar date.
    pub date: Option<NaiveDate>,
    /// Start of the requested interval.
    pub start_time: Option<TimeOfDay>,
    /// End of the requested interval.
    pub end_time: Option<TimeOfDay>,
    /// Customer name.
    pub customer_name: String,
    /// Customer phone.
    pub customer_phone: String,
    /// Optional customer email.
    pub customer_email: Option<String>,
    /// Optional customer document id.
    pub customer_document_id: Option<String>,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

impl ReservationDraft {
    /// The requested interval, when both endpoints are present.
    #[must_use]
    pub fn time_range(&self) -> Option<TimeRange> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(TimeRange::new(start, end)),
            _ => None,
        }
    }
}
