// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side database operations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::warn;

use chrono::NaiveDate;
use courtbook_domain::{Configuration, Court, Reservation, ReservationStatus};

use crate::error::PersistenceError;
use crate::models::{CourtRow, ReservationRow};
use crate::schema::{app_config, courts, reservations};

/// Sort direction for reservation listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Earliest first (by date, then start time).
    #[default]
    Ascending,
    /// Latest first.
    Descending,
}

/// Filter criteria for reservation listings.
///
/// All criteria are optional and combine conjunctively. The search term
/// matches customer name, phone, or email as a substring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    /// Restrict to a single calendar date.
    pub date: Option<NaiveDate>,
    /// Restrict to a single court.
    pub court_id: Option<i64>,
    /// Restrict to a single lifecycle status.
    pub status: Option<ReservationStatus>,
    /// Substring match over customer name, phone, and email.
    pub search: Option<String>,
    /// Sort direction.
    pub order: SortOrder,
}

/// Retrieves the stored configuration document.
///
/// A missing or unreadable document yields the built-in defaults rather
/// than an error, so a damaged configuration row never takes the whole
/// system down.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn get_configuration(conn: &mut SqliteConnection) -> Result<Configuration, PersistenceError> {
    let document: Option<String> = app_config::table
        .filter(app_config::id.eq(1_i64))
        .select(app_config::document)
        .first::<String>(conn)
        .optional()?;

    match document {
        Some(document) => match serde_json::from_str::<Configuration>(&document) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(error = %e, "Stored configuration is unreadable, using defaults");
                Ok(Configuration::default())
            }
        },
        None => Ok(Configuration::default()),
    }
}

/// Lists courts ordered by display order, then id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `active_only` - When true, inactive courts are omitted
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a stored row is
/// corrupt.
pub fn list_courts(
    conn: &mut SqliteConnection,
    active_only: bool,
) -> Result<Vec<Court>, PersistenceError> {
    let mut query = courts::table.into_boxed();
    if active_only {
        query = query.filter(courts::active.ne(0));
    }

    let rows: Vec<CourtRow> = query
        .order((courts::display_order.asc(), courts::id.asc()))
        .load::<CourtRow>(conn)?;

    rows.iter().map(CourtRow::to_domain).collect()
}

/// Retrieves a single court by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `court_id` - The court id
///
/// # Errors
///
/// Returns `NotFound` if no such court exists.
pub fn get_court(conn: &mut SqliteConnection, court_id: i64) -> Result<Court, PersistenceError> {
    let row: CourtRow = courts::table
        .filter(courts::id.eq(court_id))
        .first::<CourtRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Court {court_id}")))?;

    row.to_domain()
}

/// Retrieves a single reservation by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `reservation_id` - The reservation id
///
/// # Errors
///
/// Returns `NotFound` if no such reservation exists.
pub fn get_reservation(
    conn: &mut SqliteConnection,
    reservation_id: &str,
) -> Result<Reservation, PersistenceError> {
    let row: ReservationRow = reservations::table
        .filter(reservations::id.eq(reservation_id))
        .first::<ReservationRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Reservation {reservation_id}")))?;

    row.to_domain()
}

/// Lists reservations matching the given filter.
///
/// Results are ordered by date and start time in the filter's direction.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `filter` - The filter criteria
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a stored row is
/// corrupt.
pub fn query_reservations(
    conn: &mut SqliteConnection,
    filter: &ReservationFilter,
) -> Result<Vec<Reservation>, PersistenceError> {
    let mut query = reservations::table.into_boxed();

    if let Some(date) = filter.date {
        query = query.filter(reservations::date.eq(date.format("%Y-%m-%d").to_string()));
    }
    if let Some(court_id) = filter.court_id {
        query = query.filter(reservations::court_id.eq(court_id));
    }
    if let Some(status) = filter.status {
        query = query.filter(reservations::status.eq(status.as_str()));
    }
    if let Some(term) = filter.search.as_deref() {
        let pattern: String = format!("%{}%", term.trim());
        query = query.filter(
            reservations::customer_name
                .like(pattern.clone())
                .or(reservations::customer_phone.like(pattern.clone()))
                .or(reservations::customer_email.like(pattern)),
        );
    }

    query = match filter.order {
        SortOrder::Ascending => {
            query.order((reservations::date.asc(), reservations::start_minutes.asc()))
        }
        SortOrder::Descending => {
            query.order((reservations::date.desc(), reservations::start_minutes.desc()))
        }
    };

    let rows: Vec<ReservationRow> = query.load::<ReservationRow>(conn)?;
    rows.iter().map(ReservationRow::to_domain).collect()
}

/// Loads every reservation on a given date, across all courts and statuses.
///
/// The availability engine decides which of them actually occupy slots.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `date` - The calendar date
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a stored row is
/// corrupt.
pub fn reservations_for_day(
    conn: &mut SqliteConnection,
    date: NaiveDate,
) -> Result<Vec<Reservation>, PersistenceError> {
    let rows: Vec<ReservationRow> = reservations::table
        .filter(reservations::date.eq(date.format("%Y-%m-%d").to_string()))
        .order(reservations::start_minutes.asc())
        .load::<ReservationRow>(conn)?;

    rows.iter().map(ReservationRow::to_domain).collect()
}

/// Whether a court still has non-cancelled reservations on or after a date.
///
/// Used to guard court deletion.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `court_id` - The court id
/// * `today` - The facility-local current date
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn court_has_upcoming_reservations(
    conn: &mut SqliteConnection,
    court_id: i64,
    today: NaiveDate,
) -> Result<bool, PersistenceError> {
    let count: i64 = reservations::table
        .filter(reservations::court_id.eq(court_id))
        .filter(reservations::status.ne(ReservationStatus::Cancelled.as_str()))
        .filter(reservations::date.ge(today.format("%Y-%m-%d").to_string()))
        .count()
        .get_result(conn)?;

    Ok(count > 0)
}
