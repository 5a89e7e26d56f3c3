// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side database operations.
//!
//! Reservation writes run inside immediate transactions with a conflict
//! re-check against the stored table, so two bookings validated against
//! the same snapshot cannot both commit for an overlapping interval.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use courtbook_domain::{
    Configuration, Court, CourtKind, Customer, Reservation, ReservationOrigin, ReservationStatus,
    TimeOfDay, TimeRange,
};

use crate::error::PersistenceError;
use crate::models::{CourtRow, NewCourtRow, ReservationRow};
use crate::queries;
use crate::schema::{app_config, courts, reservations};

/// Input for creating a reservation. The id and timestamps are assigned
/// by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
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
    /// Price snapshotted at creation.
    pub price: i64,
    /// Initial lifecycle status.
    pub status: ReservationStatus,
    /// Provenance tag.
    pub origin: ReservationOrigin,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

/// Input for creating a court. The id and timestamps are assigned by the
/// store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourt {
    /// Display name.
    pub name: String,
    /// Surface kind.
    pub kind: CourtKind,
    /// Whether the court is bookable.
    pub active: bool,
    /// Player capacity.
    pub capacity: u32,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Per-court normal-tier price override.
    pub price_normal: Option<i64>,
    /// Per-court night-tier price override.
    pub price_night: Option<i64>,
    /// Per-court weekend-tier price override.
    pub price_weekend: Option<i64>,
    /// Display ordering, ascending.
    pub order: i32,
}

/// Stores the configuration document, replacing any previous one.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `config` - The configuration to store
///
/// # Errors
///
/// Returns an error if serialization or the database write fails.
pub fn put_configuration(
    conn: &mut SqliteConnection,
    config: &Configuration,
) -> Result<(), PersistenceError> {
    let document: String = serde_json::to_string(config)?;

    diesel::replace_into(app_config::table)
        .values((
            app_config::id.eq(1_i64),
            app_config::document.eq(document),
        ))
        .execute(conn)?;

    Ok(())
}

/// Creates a reservation, re-checking for interval conflicts inside the
/// insert transaction.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `new` - The reservation to create
///
/// # Returns
///
/// The stored reservation with its assigned id and timestamps.
///
/// # Errors
///
/// Returns `BookingConflict` if a competing non-cancelled reservation
/// overlaps the requested interval at commit time.
pub fn create_reservation(
    conn: &mut SqliteConnection,
    new: &NewReservation,
) -> Result<Reservation, PersistenceError> {
    let now: String = chrono::Utc::now().to_rfc3339();
    let reservation = Reservation {
        id: uuid::Uuid::new_v4().to_string(),
        court_id: new.court_id,
        date: new.date,
        start_time: new.start_time,
        end_time: new.end_time,
        customer: new.customer.clone(),
        price: new.price,
        status: new.status,
        origin: new.origin,
        notes: new.notes.clone(),
        created_at: now.clone(),
        updated_at: now,
    };

    let row: ReservationRow = ReservationRow::from_domain(&reservation);

    conn.immediate_transaction(|conn| {
        check_interval_free(conn, &row, None)?;

        diesel::insert_into(reservations::table)
            .values(&row)
            .execute(conn)?;

        Ok::<(), PersistenceError>(())
    })?;

    debug!(reservation_id = %reservation.id, "Created reservation");
    Ok(reservation)
}

/// Rewrites an existing reservation, re-checking for interval conflicts
/// inside the update transaction.
///
/// The caller is responsible for prior validation and for stamping
/// `updated_at`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `reservation` - The reservation in its new form
///
/// # Errors
///
/// Returns `NotFound` if the reservation does not exist, or
/// `BookingConflict` if another non-cancelled reservation overlaps the new
/// interval.
pub fn update_reservation(
    conn: &mut SqliteConnection,
    reservation: &Reservation,
) -> Result<(), PersistenceError> {
    let row: ReservationRow = ReservationRow::from_domain(reservation);

    conn.immediate_transaction(|conn| {
        if reservation.occupies() {
            check_interval_free(conn, &row, Some(&row.id))?;
        }

        let affected: usize = diesel::update(reservations::table.find(&row.id))
            .set(&row)
            .execute(conn)?;

        if affected == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Reservation {}",
                row.id
            )));
        }

        Ok(())
    })
}

/// Moves a reservation to a new lifecycle status.
///
/// Cancelling an already-cancelled reservation is a no-op that returns
/// the stored record unchanged, without touching `updated_at`. Transition
/// legality beyond that is the caller's responsibility.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `reservation_id` - The reservation id
/// * `status` - The target status
///
/// # Returns
///
/// The reservation after the change.
///
/// # Errors
///
/// Returns `NotFound` if the reservation does not exist.
pub fn update_reservation_status(
    conn: &mut SqliteConnection,
    reservation_id: &str,
    status: ReservationStatus,
) -> Result<Reservation, PersistenceError> {
    let current: Reservation = queries::get_reservation(conn, reservation_id)?;

    if current.status == ReservationStatus::Cancelled && status == ReservationStatus::Cancelled {
        return Ok(current);
    }

    let now: String = chrono::Utc::now().to_rfc3339();
    diesel::update(reservations::table.find(reservation_id))
        .set((
            reservations::status.eq(status.as_str()),
            reservations::updated_at.eq(&now),
        ))
        .execute(conn)?;

    debug!(
        reservation_id = %reservation_id,
        from = %current.status,
        to = %status,
        "Updated reservation status"
    );

    Ok(Reservation {
        status,
        updated_at: now,
        ..current
    })
}

/// Creates a court.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `new` - The court to create
///
/// # Returns
///
/// The stored court with its assigned id and timestamps.
///
/// # Errors
///
/// Returns an error if the database write fails.
pub fn create_court(conn: &mut SqliteConnection, new: &NewCourt) -> Result<Court, PersistenceError> {
    let now: String = chrono::Utc::now().to_rfc3339();
    let row = NewCourtRow {
        name: new.name.clone(),
        kind: new.kind.as_str().to_string(),
        active: i32::from(new.active),
        capacity: i32::try_from(new.capacity).unwrap_or(i32::MAX),
        description: new.description.clone(),
        price_normal: new.price_normal,
        price_night: new.price_night,
        price_weekend: new.price_weekend,
        display_order: new.order,
        created_at: now.clone(),
        updated_at: now,
    };

    let stored: CourtRow = diesel::insert_into(courts::table)
        .values(&row)
        .get_result::<CourtRow>(conn)?;

    debug!(court_id = stored.id, "Created court");
    stored.to_domain()
}

/// Rewrites an existing court and stamps `updated_at`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `court` - The court in its new form
///
/// # Returns
///
/// The court after the change.
///
/// # Errors
///
/// Returns `NotFound` if the court does not exist.
pub fn update_court(conn: &mut SqliteConnection, court: &Court) -> Result<Court, PersistenceError> {
    let mut updated: Court = court.clone();
    updated.updated_at = chrono::Utc::now().to_rfc3339();

    let row: NewCourtRow = NewCourtRow::from_domain(&updated);
    let affected: usize = diesel::update(courts::table.find(court.id))
        .set(&row)
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!("Court {}", court.id)));
    }

    Ok(updated)
}

/// Deletes a court, refusing while it still has upcoming bookings.
///
/// Cancelled and past reservations do not block deletion; rows for the
/// deleted court are removed by the foreign-key cascade.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `court_id` - The court id
/// * `today` - The facility-local current date
///
/// # Errors
///
/// Returns `NotFound` if the court does not exist, or
/// `CourtHasReservations` if non-cancelled reservations exist on or after
/// `today`.
pub fn delete_court(
    conn: &mut SqliteConnection,
    court_id: i64,
    today: NaiveDate,
) -> Result<(), PersistenceError> {
    conn.immediate_transaction(|conn| {
        if queries::court_has_upcoming_reservations(conn, court_id, today)? {
            return Err(PersistenceError::CourtHasReservations { court_id });
        }

        let affected: usize = diesel::delete(courts::table.find(court_id)).execute(conn)?;

        if affected == 0 {
            return Err(PersistenceError::NotFound(format!("Court {court_id}")));
        }

        Ok(())
    })
}

/// Fails with `BookingConflict` when a non-cancelled reservation overlaps
/// the row's interval on the same court and date.
fn check_interval_free(
    conn: &mut SqliteConnection,
    row: &ReservationRow,
    exclude_id: Option<&str>,
) -> Result<(), PersistenceError> {
    let mut query = reservations::table
        .filter(reservations::court_id.eq(row.court_id))
        .filter(reservations::date.eq(&row.date))
        .filter(reservations::status.ne(ReservationStatus::Cancelled.as_str()))
        .filter(reservations::start_minutes.lt(row.end_minutes))
        .filter(reservations::end_minutes.gt(row.start_minutes))
        .into_boxed();

    if let Some(exclude_id) = exclude_id {
        query = query.filter(reservations::id.ne(exclude_id));
    }

    let conflicting: Option<ReservationRow> = query.first::<ReservationRow>(conn).optional()?;

    match conflicting {
        Some(holder) => {
            let range: String = holder.to_domain().map_or_else(
                |_| format!("minutes {} - {}", holder.start_minutes, holder.end_minutes),
                |r| TimeRange::new(r.start_time, r.end_time).to_string(),
            );
            Err(PersistenceError::BookingConflict {
                reservation_id: holder.id,
                range,
            })
        }
        None => Ok(()),
    }
}
