// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Courtbook booking system.
//!
//! This crate stores courts, reservations, and the configuration document
//! in `SQLite` via Diesel. It exposes a single `Persistence` adapter; all
//! scheduling decisions live in `courtbook-domain`, while this crate owns
//! durability concerns: migrations, foreign keys, and the commit-time
//! conflict re-check that makes double-booking impossible even when two
//! requests validate against the same snapshot.
//!
//! ## Testing
//!
//! `new_in_memory()` hands out an isolated shared-memory database per
//! call, so tests run without touching the filesystem and cannot observe
//! each other's writes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use diesel::SqliteConnection;

use courtbook_domain::{Configuration, Court, Reservation, ReservationStatus};

mod bootstrap;
mod error;
mod models;
mod mutations;
mod queries;
mod schema;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::{NewCourt, NewReservation};
pub use queries::{ReservationFilter, SortOrder};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so
/// tests are isolated without time-based collisions.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the booking store.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database, migrated and seeded with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Unique shared in-memory database name per call so tests are isolated.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = bootstrap::initialize_database(&shared_memory_url)?;
        bootstrap::verify_foreign_key_enforcement(&mut conn)?;
        bootstrap::seed_defaults(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database, migrated and seeded with defaults.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = bootstrap::initialize_database(path_str)?;
        bootstrap::enable_wal_mode(&mut conn)?;
        bootstrap::verify_foreign_key_enforcement(&mut conn)?;
        bootstrap::seed_defaults(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Retrieves the stored configuration, falling back to defaults when
    /// no readable document exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn get_configuration(&mut self) -> Result<Configuration, PersistenceError> {
        queries::get_configuration(&mut self.conn)
    }

    /// Stores the configuration document, replacing any previous one.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration to store
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database write fails.
    pub fn put_configuration(&mut self, config: &Configuration) -> Result<(), PersistenceError> {
        mutations::put_configuration(&mut self.conn, config)
    }

    // ========================================================================
    // Courts
    // ========================================================================

    /// Lists courts ordered by display order.
    ///
    /// # Arguments
    ///
    /// * `active_only` - When true, inactive courts are omitted
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_courts(&mut self, active_only: bool) -> Result<Vec<Court>, PersistenceError> {
        queries::list_courts(&mut self.conn, active_only)
    }

    /// Retrieves a single court by id.
    ///
    /// # Arguments
    ///
    /// * `court_id` - The court id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such court exists.
    pub fn get_court(&mut self, court_id: i64) -> Result<Court, PersistenceError> {
        queries::get_court(&mut self.conn, court_id)
    }

    /// Creates a court.
    ///
    /// # Arguments
    ///
    /// * `new` - The court to create
    ///
    /// # Returns
    ///
    /// The stored court with its assigned id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub fn create_court(&mut self, new: &NewCourt) -> Result<Court, PersistenceError> {
        mutations::create_court(&mut self.conn, new)
    }

    /// Rewrites an existing court and stamps `updated_at`.
    ///
    /// # Arguments
    ///
    /// * `court` - The court in its new form
    ///
    /// # Returns
    ///
    /// The court after the change.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the court does not exist.
    pub fn update_court(&mut self, court: &Court) -> Result<Court, PersistenceError> {
        mutations::update_court(&mut self.conn, court)
    }

    /// Deletes a court, refusing while it still has upcoming bookings.
    ///
    /// # Arguments
    ///
    /// * `court_id` - The court id
    /// * `today` - The facility-local current date
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the court does not exist, or
    /// `CourtHasReservations` if non-cancelled reservations exist on or
    /// after `today`.
    pub fn delete_court(&mut self, court_id: i64, today: NaiveDate) -> Result<(), PersistenceError> {
        mutations::delete_court(&mut self.conn, court_id, today)
    }

    // ========================================================================
    // Reservations
    // ========================================================================

    /// Retrieves a single reservation by id.
    ///
    /// # Arguments
    ///
    /// * `reservation_id` - The reservation id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such reservation exists.
    pub fn get_reservation(&mut self, reservation_id: &str) -> Result<Reservation, PersistenceError> {
        queries::get_reservation(&mut self.conn, reservation_id)
    }

    /// Lists reservations matching the given filter.
    ///
    /// # Arguments
    ///
    /// * `filter` - The filter criteria
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn query_reservations(
        &mut self,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>, PersistenceError> {
        queries::query_reservations(&mut self.conn, filter)
    }

    /// Loads every reservation on a given date, across all courts and
    /// statuses.
    ///
    /// # Arguments
    ///
    /// * `date` - The calendar date
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn reservations_for_day(
        &mut self,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>, PersistenceError> {
        queries::reservations_for_day(&mut self.conn, date)
    }

    /// Creates a reservation, re-checking for interval conflicts inside
    /// the insert transaction.
    ///
    /// # Arguments
    ///
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
        &mut self,
        new: &NewReservation,
    ) -> Result<Reservation, PersistenceError> {
        mutations::create_reservation(&mut self.conn, new)
    }

    /// Rewrites an existing reservation, re-checking for interval
    /// conflicts inside the update transaction.
    ///
    /// # Arguments
    ///
    /// * `reservation` - The reservation in its new form
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the reservation does not exist, or
    /// `BookingConflict` if another non-cancelled reservation overlaps the
    /// new interval.
    pub fn update_reservation(
        &mut self,
        reservation: &Reservation,
    ) -> Result<(), PersistenceError> {
        mutations::update_reservation(&mut self.conn, reservation)
    }

    /// Moves a reservation to a new lifecycle status.
    ///
    /// Cancelling an already-cancelled reservation is a no-op that returns
    /// the stored record unchanged.
    ///
    /// # Arguments
    ///
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
        &mut self,
        reservation_id: &str,
        status: ReservationStatus,
    ) -> Result<Reservation, PersistenceError> {
        mutations::update_reservation_status(&mut self.conn, reservation_id, status)
    }

    /// Whether a court still has non-cancelled reservations on or after a
    /// date.
    ///
    /// # Arguments
    ///
    /// * `court_id` - The court id
    /// * `today` - The facility-local current date
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn court_has_upcoming_reservations(
        &mut self,
        court_id: i64,
        today: NaiveDate,
    ) -> Result<bool, PersistenceError> {
        queries::court_has_upcoming_reservations(&mut self.conn, court_id, today)
    }
}
