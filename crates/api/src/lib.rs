// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Courtbook booking system.
//!
//! This crate sits between the transport layer and the domain: it owns the
//! request/response data transfer objects, translates domain and
//! persistence errors into the API error contract, and orchestrates each
//! operation against the persistence layer. It knows nothing about HTTP;
//! the server crate maps these functions onto routes and status codes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    cancel_reservation, create_court, create_reservation, delete_court, get_availability,
    get_configuration, get_facility, get_reservation, get_stats, list_courts, list_reservations,
    update_configuration, update_court, update_reservation, update_reservation_status,
};
pub use request_response::{
    AvailabilityResponse, CourtOccupancy, CreateCourtRequest, CreateReservationRequest,
    FacilityResponse, ListReservationsRequest, PopularStartTime, StatsResponse,
    UpdateReservationRequest, UpdateStatusRequest,
};
