// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for booking, court, and configuration operations.
//!
//! Handlers are free functions over `&mut Persistence`. The current date
//! and instant are always injected by the caller, never read from the
//! clock here, so every scheduling decision stays reproducible in tests.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use courtbook_domain::{
    Configuration, ConfigurationPatch, Court, CourtPatch, Customer, DomainError, Reservation,
    ReservationDraft, ReservationOrigin, ReservationPatch, ReservationStatus, ValidationIssue,
    day_schedule, quote_price, slot_starts, validate_draft,
};
use courtbook_persistence::{
    NewCourt, NewReservation, Persistence, PersistenceError, ReservationFilter, SortOrder,
};

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AvailabilityResponse, CourtOccupancy, CreateCourtRequest, CreateReservationRequest,
    FacilityResponse, ListReservationsRequest, PopularStartTime, StatsResponse,
    UpdateReservationRequest,
};

/// Computes the availability grid for one date.
///
/// # Arguments
///
/// * `store` - The persistence layer
/// * `date` - The facility-local calendar date
/// * `court_id` - Restrict the grid to one court, when given
/// * `now` - The current instant, used for the past-slot cutoff
///
/// # Errors
///
/// Returns an error if the queried court does not exist or the store
/// cannot be read.
pub fn get_availability(
    store: &mut Persistence,
    date: NaiveDate,
    court_id: Option<i64>,
    now: NaiveDateTime,
) -> Result<AvailabilityResponse, ApiError> {
    let config: Configuration = store
        .get_configuration()
        .map_err(translate_persistence_error)?;

    let courts: Vec<Court> = match court_id {
        Some(id) => vec![
            store
                .get_court(id)
                .map_err(|e| not_found_as(e, "Court"))?,
        ],
        None => store
            .list_courts(true)
            .map_err(translate_persistence_error)?,
    };

    let reservations: Vec<Reservation> = store
        .reservations_for_day(date)
        .map_err(translate_persistence_error)?;

    let slots = day_schedule(&config, &courts, &reservations, date, now)
        .map_err(translate_domain_error)?;

    Ok(AvailabilityResponse { date, slots })
}

/// Creates a reservation after validating the request in full.
///
/// The price is always computed server-side from the configuration and
/// court at booking time; any client-supplied price is ignored.
///
/// # Arguments
///
/// * `store` - The persistence layer
/// * `request` - The booking request
/// * `today` - The facility-local current date, for past-date validation
///
/// # Errors
///
/// Returns `ValidationFailed` carrying every rule violation, `Conflict`
/// when the interval is taken (including a commit-time race), or
/// `ResourceNotFound` for an unknown court.
pub fn create_reservation(
    store: &mut Persistence,
    request: CreateReservationRequest,
    today: NaiveDate,
) -> Result<Reservation, ApiError> {
    let config: Configuration = store
        .get_configuration()
        .map_err(translate_persistence_error)?;

    let draft = ReservationDraft {
        court_id: request.court_id,
        date: request.date,
        start_time: request.start_time,
        end_time: request.end_time,
        customer_name: request.customer_name.clone(),
        customer_phone: request.customer_phone.clone(),
        customer_email: request.customer_email.clone(),
        customer_document_id: request.customer_document_id.clone(),
        notes: request.notes.clone(),
    };

    let existing: Vec<Reservation> = match request.date {
        Some(date) => store
            .reservations_for_day(date)
            .map_err(translate_persistence_error)?,
        None => Vec::new(),
    };

    let issues: Vec<ValidationIssue> = validate_draft(&config, &draft, &existing, None, today);
    if !issues.is_empty() {
        debug!(count = issues.len(), "Booking request failed validation");
        return Err(ApiError::ValidationFailed { issues });
    }

    // All four are present once validation passes.
    let (Some(court_id), Some(date), Some(start_time), Some(end_time)) = (
        request.court_id,
        request.date,
        request.start_time,
        request.end_time,
    ) else {
        return Err(ApiError::Internal {
            message: String::from("Validated booking request is missing required fields"),
        });
    };

    let court: Court = store
        .get_court(court_id)
        .map_err(|e| not_found_as(e, "Court"))?;
    if !court.active {
        return Err(ApiError::ConstraintViolation {
            message: format!("Court '{}' is not open for booking", court.name),
        });
    }

    let price: i64 = quote_price(&config, Some(&court), date, start_time);

    let new = NewReservation {
        court_id,
        date,
        start_time,
        end_time,
        customer: Customer {
            name: request.customer_name,
            phone: request.customer_phone,
            email: request.customer_email,
            document_id: request.customer_document_id,
        },
        price,
        status: request.status.unwrap_or(ReservationStatus::Pending),
        origin: request.origin.unwrap_or(ReservationOrigin::Web),
        notes: request.notes,
    };

    let reservation: Reservation = store
        .create_reservation(&new)
        .map_err(translate_persistence_error)?;

    info!(
        reservation_id = %reservation.id,
        court_id = reservation.court_id,
        date = %reservation.date,
        "Created reservation"
    );

    Ok(reservation)
}

/// Retrieves one reservation.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id.
pub fn get_reservation(
    store: &mut Persistence,
    reservation_id: &str,
) -> Result<Reservation, ApiError> {
    store
        .get_reservation(reservation_id)
        .map_err(|e| not_found_as(e, "Reservation"))
}

/// Lists reservations matching the request's filters.
///
/// # Errors
///
/// Returns `InvalidInput` for an unrecognized sort order.
pub fn list_reservations(
    store: &mut Persistence,
    request: &ListReservationsRequest,
) -> Result<Vec<Reservation>, ApiError> {
    let order: SortOrder = match request.order.as_deref() {
        None | Some("asc") => SortOrder::Ascending,
        Some("desc") => SortOrder::Descending,
        Some(other) => {
            return Err(ApiError::InvalidInput {
                field: String::from("order"),
                message: format!("Unknown sort order '{other}', expected 'asc' or 'desc'"),
            });
        }
    };

    let filter = ReservationFilter {
        date: request.date,
        court_id: request.court_id,
        status: request.status,
        search: request.search.clone(),
        order,
    };

    store
        .query_reservations(&filter)
        .map_err(translate_persistence_error)
}

/// Updates a reservation's fields, re-validating when scheduling-relevant
/// or customer fields change.
///
/// # Arguments
///
/// * `store` - The persistence layer
/// * `reservation_id` - The reservation to update
/// * `request` - The patch
/// * `today` - The facility-local current date, for past-date validation
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id, `ValidationFailed` when
/// the patched reservation breaks a booking rule, or `Conflict` when the
/// new interval is taken.
pub fn update_reservation(
    store: &mut Persistence,
    reservation_id: &str,
    request: UpdateReservationRequest,
    today: NaiveDate,
) -> Result<Reservation, ApiError> {
    let mut reservation: Reservation = store
        .get_reservation(reservation_id)
        .map_err(|e| not_found_as(e, "Reservation"))?;

    let revalidate: bool = request.changes_schedule()
        || request.customer_name.is_some()
        || request.customer_phone.is_some();

    reservation.apply(ReservationPatch {
        court_id: request.court_id,
        date: request.date,
        start_time: request.start_time,
        end_time: request.end_time,
        customer_name: request.customer_name,
        customer_phone: request.customer_phone,
        customer_email: request.customer_email,
        customer_document_id: request.customer_document_id,
        price: None,
        notes: request.notes,
    });

    if revalidate {
        let config: Configuration = store
            .get_configuration()
            .map_err(translate_persistence_error)?;
        let existing: Vec<Reservation> = store
            .reservations_for_day(reservation.date)
            .map_err(translate_persistence_error)?;

        let draft = ReservationDraft {
            court_id: Some(reservation.court_id),
            date: Some(reservation.date),
            start_time: Some(reservation.start_time),
            end_time: Some(reservation.end_time),
            customer_name: reservation.customer.name.clone(),
            customer_phone: reservation.customer.phone.clone(),
            customer_email: reservation.customer.email.clone(),
            customer_document_id: reservation.customer.document_id.clone(),
            notes: reservation.notes.clone(),
        };

        let issues: Vec<ValidationIssue> =
            validate_draft(&config, &draft, &existing, Some(reservation_id), today);
        if !issues.is_empty() {
            return Err(ApiError::ValidationFailed { issues });
        }
    }

    reservation.updated_at = chrono::Utc::now().to_rfc3339();

    store
        .update_reservation(&reservation)
        .map_err(translate_persistence_error)?;

    info!(reservation_id = %reservation.id, "Updated reservation");
    Ok(reservation)
}

/// Moves a reservation to a new lifecycle status.
///
/// Cancelled is terminal: the only transition accepted out of it is the
/// idempotent cancelled-to-cancelled no-op.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id or `ConstraintViolation`
/// for an illegal transition.
pub fn update_reservation_status(
    store: &mut Persistence,
    reservation_id: &str,
    status: ReservationStatus,
) -> Result<Reservation, ApiError> {
    let current: Reservation = store
        .get_reservation(reservation_id)
        .map_err(|e| not_found_as(e, "Reservation"))?;

    if !current.status.can_transition_to(status) {
        return Err(translate_domain_error(
            DomainError::InvalidStatusTransition {
                from: current.status.to_string(),
                to: status.to_string(),
            },
        ));
    }

    let updated: Reservation = store
        .update_reservation_status(reservation_id, status)
        .map_err(translate_persistence_error)?;

    info!(
        reservation_id = %reservation_id,
        from = %current.status,
        to = %status,
        "Changed reservation status"
    );

    Ok(updated)
}

/// Soft-cancels a reservation. Cancelling twice is a no-op.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id.
pub fn cancel_reservation(
    store: &mut Persistence,
    reservation_id: &str,
) -> Result<Reservation, ApiError> {
    update_reservation_status(store, reservation_id, ReservationStatus::Cancelled)
}

/// Retrieves the current configuration.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn get_configuration(store: &mut Persistence) -> Result<Configuration, ApiError> {
    store
        .get_configuration()
        .map_err(translate_persistence_error)
}

/// Merges a patch into the configuration, field by field. Nested tier and
/// facility patches merge per field as well; the blocked-dates list is
/// replaced wholesale when present.
///
/// # Errors
///
/// Returns `InvalidInput` when the merged configuration is unusable
/// (closing not after opening, or a zero slot duration).
pub fn update_configuration(
    store: &mut Persistence,
    patch: ConfigurationPatch,
) -> Result<Configuration, ApiError> {
    let mut config: Configuration = store
        .get_configuration()
        .map_err(translate_persistence_error)?;

    config.apply(patch);

    if config.opening >= config.closing {
        return Err(ApiError::InvalidInput {
            field: String::from("opening"),
            message: format!(
                "Opening time {} must be before closing time {}",
                config.opening, config.closing
            ),
        });
    }
    if config.slot_duration_minutes == 0 {
        return Err(ApiError::InvalidInput {
            field: String::from("slot_duration_minutes"),
            message: String::from("Slot duration must be positive"),
        });
    }

    store
        .put_configuration(&config)
        .map_err(translate_persistence_error)?;

    info!("Updated configuration");
    Ok(config)
}

/// Lists courts.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_courts(store: &mut Persistence, active_only: bool) -> Result<Vec<Court>, ApiError> {
    store
        .list_courts(active_only)
        .map_err(translate_persistence_error)
}

/// Creates a court. A missing display order places it after the current
/// last court.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn create_court(
    store: &mut Persistence,
    request: CreateCourtRequest,
) -> Result<Court, ApiError> {
    let order: i32 = match request.order {
        Some(order) => order,
        None => {
            let courts: Vec<Court> = store
                .list_courts(false)
                .map_err(translate_persistence_error)?;
            courts.iter().map(|c| c.order).max().unwrap_or(0) + 1
        }
    };

    let new = NewCourt {
        name: request.name,
        kind: request.kind,
        active: request.active.unwrap_or(true),
        capacity: request.capacity.unwrap_or(10),
        description: request.description,
        price_normal: request.price_normal,
        price_night: request.price_night,
        price_weekend: request.price_weekend,
        order,
    };

    let court: Court = store
        .create_court(&new)
        .map_err(translate_persistence_error)?;

    info!(court_id = court.id, name = %court.name, "Created court");
    Ok(court)
}

/// Patches a court.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id.
pub fn update_court(
    store: &mut Persistence,
    court_id: i64,
    patch: CourtPatch,
) -> Result<Court, ApiError> {
    let mut court: Court = store
        .get_court(court_id)
        .map_err(|e| not_found_as(e, "Court"))?;

    court.apply(patch);

    let updated: Court = store
        .update_court(&court)
        .map_err(|e| not_found_as(e, "Court"))?;

    info!(court_id = court_id, "Updated court");
    Ok(updated)
}

/// Deletes a court, refusing while non-cancelled reservations exist on or
/// after `today`.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id or `ConstraintViolation`
/// while upcoming bookings remain.
pub fn delete_court(
    store: &mut Persistence,
    court_id: i64,
    today: NaiveDate,
) -> Result<(), ApiError> {
    store
        .delete_court(court_id, today)
        .map_err(|e| not_found_as(e, "Court"))?;

    info!(court_id = court_id, "Deleted court");
    Ok(())
}

/// The public facility summary: contacts, hours, and tier prices.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn get_facility(store: &mut Persistence) -> Result<FacilityResponse, ApiError> {
    let config: Configuration = store
        .get_configuration()
        .map_err(translate_persistence_error)?;

    Ok(FacilityResponse {
        name: config.facility.name,
        address: config.facility.address,
        phone: config.facility.phone,
        whatsapp: config.facility.whatsapp,
        opening: config.opening,
        closing: config.closing,
        slot_duration_minutes: config.slot_duration_minutes,
        prices: config.tiers,
    })
}

/// Booking statistics for one date: totals by status, estimated revenue
/// over confirmed and paid bookings, per-court occupancy, and the most
/// popular start times.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn get_stats(store: &mut Persistence, date: NaiveDate) -> Result<StatsResponse, ApiError> {
    let config: Configuration = store
        .get_configuration()
        .map_err(translate_persistence_error)?;
    let reservations: Vec<Reservation> = store
        .reservations_for_day(date)
        .map_err(translate_persistence_error)?;
    let courts: Vec<Court> = store
        .list_courts(true)
        .map_err(translate_persistence_error)?;

    let count_with =
        |status: ReservationStatus| reservations.iter().filter(|r| r.status == status).count();

    let estimated_revenue: i64 = reservations
        .iter()
        .filter(|r| {
            matches!(
                r.status,
                ReservationStatus::Confirmed | ReservationStatus::Paid
            )
        })
        .map(|r| r.price)
        .sum();

    let slots_per_court: usize =
        slot_starts(config.opening, config.closing, config.slot_duration_minutes)
            .map_err(translate_domain_error)?
            .len();

    let occupancy: Vec<CourtOccupancy> = courts
        .iter()
        .map(|court| {
            let taken: usize = reservations
                .iter()
                .filter(|r| r.court_id == court.id && r.occupies())
                .count();
            let rate: u32 = if slots_per_court == 0 {
                0
            } else {
                percent(taken, slots_per_court)
            };
            CourtOccupancy {
                court_id: court.id,
                court_name: court.name.clone(),
                reservations: taken,
                occupancy_rate: rate,
            }
        })
        .collect();

    let mut start_counts: Vec<PopularStartTime> = Vec::new();
    for reservation in reservations.iter().filter(|r| r.occupies()) {
        match start_counts
            .iter_mut()
            .find(|p| p.start_time == reservation.start_time)
        {
            Some(entry) => entry.count += 1,
            None => start_counts.push(PopularStartTime {
                start_time: reservation.start_time,
                count: 1,
            }),
        }
    }
    start_counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.start_time.cmp(&b.start_time))
    });
    start_counts.truncate(5);

    Ok(StatsResponse {
        date,
        total: reservations.len(),
        pending: count_with(ReservationStatus::Pending),
        confirmed: count_with(ReservationStatus::Confirmed),
        paid: count_with(ReservationStatus::Paid),
        cancelled: count_with(ReservationStatus::Cancelled),
        estimated_revenue,
        occupancy,
        popular_start_times: start_counts,
    })
}

/// Maps a persistence not-found onto a typed API not-found; everything
/// else goes through the standard translation.
fn not_found_as(err: PersistenceError, resource_type: &str) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message,
        },
        other => translate_persistence_error(other),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn percent(part: usize, whole: usize) -> u32 {
    ((part as f64 / whole as f64) * 100.0).round() as u32
}
