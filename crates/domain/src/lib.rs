// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and scheduling rules for the Courtbook booking system.
//!
//! This crate is the pure core of the system: time slots, courts,
//! reservations, the pricing engine, the availability engine, and the
//! booking validator. It performs no I/O and holds no mutable state;
//! every computation takes its inputs (configuration, court registry,
//! reservation set, and the current instant where relevant) as explicit
//! arguments.

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

mod availability;
mod config;
mod court;
mod error;
mod pricing;
mod reservation;
mod timeslot;
mod validation;

#[cfg(test)]
mod tests;

pub use availability::{SlotAvailability, day_schedule};
pub use config::{
    Configuration, ConfigurationPatch, FacilityInfo, FacilityInfoPatch, PriceTiers,
    PriceTiersPatch,
};
pub use court::{Court, CourtKind, CourtPatch, default_courts};
pub use error::DomainError;
pub use pricing::quote_price;
pub use reservation::{
    Customer, Reservation, ReservationDraft, ReservationOrigin, ReservationPatch,
    ReservationStatus,
};
pub use timeslot::{TimeOfDay, TimeRange, slot_starts};
pub use validation::{ValidationIssue, find_conflict, validate_draft};
