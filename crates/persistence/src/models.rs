// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types mapping the relational schema to domain values.
//!
//! Rows are storage-shaped (strings and integers); conversion to domain
//! types can fail only when a stored record is corrupt, which surfaces as
//! `PersistenceError::CorruptRecord`.

use diesel::prelude::*;

use courtbook_domain::{
    Court, CourtKind, Customer, Reservation, ReservationOrigin, ReservationStatus, TimeOfDay,
};

use crate::error::PersistenceError;
use crate::schema::{courts, reservations};

/// A court as stored in the `courts` table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = courts)]
pub struct CourtRow {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub active: i32,
    pub capacity: i32,
    pub description: Option<String>,
    pub price_normal: Option<i64>,
    pub price_night: Option<i64>,
    pub price_weekend: Option<i64>,
    pub display_order: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl CourtRow {
    /// Converts the stored row into a domain `Court`.
    ///
    /// # Errors
    ///
    /// Returns `CorruptRecord` if the stored kind or capacity cannot be
    /// mapped back to domain values.
    pub fn to_domain(&self) -> Result<Court, PersistenceError> {
        let kind: CourtKind = CourtKind::parse(&self.kind)
            .map_err(|e| PersistenceError::CorruptRecord(format!("court {}: {e}", self.id)))?;
        let capacity: u32 = u32::try_from(self.capacity).map_err(|_| {
            PersistenceError::CorruptRecord(format!(
                "court {}: negative capacity {}",
                self.id, self.capacity
            ))
        })?;

        Ok(Court {
            id: self.id,
            name: self.name.clone(),
            kind,
            active: self.active != 0,
            capacity,
            description: self.description.clone(),
            price_normal: self.price_normal,
            price_night: self.price_night,
            price_weekend: self.price_weekend,
            order: self.display_order,
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        })
    }
}

/// Insertable form of a court; the database assigns the id. Doubles as
/// the full-row changeset for court updates.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = courts, treat_none_as_null = true)]
pub struct NewCourtRow {
    pub name: String,
    pub kind: String,
    pub active: i32,
    pub capacity: i32,
    pub description: Option<String>,
    pub price_normal: Option<i64>,
    pub price_night: Option<i64>,
    pub price_weekend: Option<i64>,
    pub display_order: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl NewCourtRow {
    /// Builds an insertable row from a domain `Court`, ignoring its id.
    #[must_use]
    pub fn from_domain(court: &Court) -> Self {
        Self {
            name: court.name.clone(),
            kind: court.kind.as_str().to_string(),
            active: i32::from(court.active),
            capacity: clamp_capacity(court.capacity),
            description: court.description.clone(),
            price_normal: court.price_normal,
            price_night: court.price_night,
            price_weekend: court.price_weekend,
            display_order: court.order,
            created_at: court.created_at.clone(),
            updated_at: court.updated_at.clone(),
        }
    }
}

/// A reservation as stored in the `reservations` table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable, AsChangeset)]
#[diesel(table_name = reservations, treat_none_as_null = true)]
pub struct ReservationRow {
    pub id: String,
    pub court_id: i64,
    pub date: String,
    pub start_minutes: i32,
    pub end_minutes: i32,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub customer_document_id: Option<String>,
    pub price: i64,
    pub status: String,
    pub origin: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ReservationRow {
    /// Converts the stored row into a domain `Reservation`.
    ///
    /// # Errors
    ///
    /// Returns `CorruptRecord` if the stored date, times, status, or origin
    /// cannot be mapped back to domain values.
    pub fn to_domain(&self) -> Result<Reservation, PersistenceError> {
        let date = chrono::NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|e| {
            PersistenceError::CorruptRecord(format!("reservation {}: bad date: {e}", self.id))
        })?;
        let start_time: TimeOfDay = minutes_to_time(self.start_minutes)
            .ok_or_else(|| bad_minutes(&self.id, "start", self.start_minutes))?;
        let end_time: TimeOfDay = minutes_to_time(self.end_minutes)
            .ok_or_else(|| bad_minutes(&self.id, "end", self.end_minutes))?;
        let status: ReservationStatus = ReservationStatus::parse(&self.status)
            .map_err(|e| PersistenceError::CorruptRecord(format!("reservation {}: {e}", self.id)))?;
        let origin: ReservationOrigin = ReservationOrigin::parse(&self.origin)
            .map_err(|e| PersistenceError::CorruptRecord(format!("reservation {}: {e}", self.id)))?;

        Ok(Reservation {
            id: self.id.clone(),
            court_id: self.court_id,
            date,
            start_time,
            end_time,
            customer: Customer {
                name: self.customer_name.clone(),
                phone: self.customer_phone.clone(),
                email: self.customer_email.clone(),
                document_id: self.customer_document_id.clone(),
            },
            price: self.price,
            status,
            origin,
            notes: self.notes.clone(),
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        })
    }

    /// Builds a storage row from a domain `Reservation`.
    #[must_use]
    pub fn from_domain(reservation: &Reservation) -> Self {
        Self {
            id: reservation.id.clone(),
            court_id: reservation.court_id,
            date: reservation.date.format("%Y-%m-%d").to_string(),
            start_minutes: i32::from(reservation.start_time.minutes()),
            end_minutes: i32::from(reservation.end_time.minutes()),
            customer_name: reservation.customer.name.clone(),
            customer_phone: reservation.customer.phone.clone(),
            customer_email: reservation.customer.email.clone(),
            customer_document_id: reservation.customer.document_id.clone(),
            price: reservation.price,
            status: reservation.status.as_str().to_string(),
            origin: reservation.origin.as_str().to_string(),
            notes: reservation.notes.clone(),
            created_at: reservation.created_at.clone(),
            updated_at: reservation.updated_at.clone(),
        }
    }
}

fn minutes_to_time(minutes: i32) -> Option<TimeOfDay> {
    u16::try_from(minutes).ok().and_then(TimeOfDay::from_minutes)
}

fn bad_minutes(id: &str, which: &str, minutes: i32) -> PersistenceError {
    PersistenceError::CorruptRecord(format!(
        "reservation {id}: {which} minutes {minutes} out of range"
    ))
}

fn clamp_capacity(capacity: u32) -> i32 {
    i32::try_from(capacity).unwrap_or(i32::MAX)
}
