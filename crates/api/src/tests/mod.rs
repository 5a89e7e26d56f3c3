// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod court_tests;
mod status_tests;

use chrono::{NaiveDate, NaiveDateTime};

use courtbook_domain::{Reservation, TimeOfDay};
use courtbook_persistence::Persistence;

use crate::handlers::create_reservation;
use crate::request_response::CreateReservationRequest;

/// Creates a fresh in-memory store with the seeded defaults (two courts
/// and the default configuration).
fn create_test_store() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory store")
}

/// A Monday.
fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).expect("Failed to create test date")
}

/// The Saturday before `test_date`, for weekend pricing scenarios.
fn saturday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 8).expect("Failed to create test date")
}

/// Early on `test_date`, before opening, so no slot is in the past.
fn test_now() -> NaiveDateTime {
    test_date()
        .and_hms_opt(7, 0, 0)
        .expect("Failed to create test instant")
}

fn time(value: &str) -> TimeOfDay {
    TimeOfDay::parse(value).expect("Failed to parse test time")
}

fn create_test_booking(court_id: i64, start: &str, end: &str) -> CreateReservationRequest {
    CreateReservationRequest {
        court_id: Some(court_id),
        date: Some(test_date()),
        start_time: Some(time(start)),
        end_time: Some(time(end)),
        customer_name: String::from("Ana Pérez"),
        customer_phone: String::from("+598 99 123 456"),
        customer_email: Some(String::from("ana@example.com")),
        customer_document_id: None,
        notes: None,
        status: None,
        origin: None,
    }
}

/// Books a slot on court 1 for `test_date`, panicking on failure.
fn book(store: &mut Persistence, start: &str, end: &str) -> Reservation {
    create_reservation(store, create_test_booking(1, start, end), test_date())
        .expect("Failed to create test reservation")
}
