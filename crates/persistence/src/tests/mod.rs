// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod court_tests;

use chrono::NaiveDate;
use courtbook_domain::{
    Customer, ReservationOrigin, ReservationStatus, TimeOfDay,
};

use crate::{NewCourt, NewReservation, Persistence};

pub fn create_test_store() -> Persistence {
    Persistence::new_in_memory().expect("In-memory store should initialize")
}

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 6, 10).expect("Valid test date")
}

pub fn time(value: &str) -> TimeOfDay {
    value.parse().expect("Valid test time")
}

pub fn create_test_customer() -> Customer {
    Customer {
        name: String::from("Ana Pérez"),
        phone: String::from("+598 99 123 456"),
        email: Some(String::from("ana@example.com")),
        document_id: None,
    }
}

pub fn create_test_reservation_input(court_id: i64, start: &str, end: &str) -> NewReservation {
    NewReservation {
        court_id,
        date: test_date(),
        start_time: time(start),
        end_time: time(end),
        customer: create_test_customer(),
        price: 40,
        status: ReservationStatus::Pending,
        origin: ReservationOrigin::Web,
        notes: None,
    }
}

pub fn create_test_court_input(name: &str) -> NewCourt {
    NewCourt {
        name: String::from(name),
        kind: courtbook_domain::CourtKind::Indoor,
        active: true,
        capacity: 10,
        description: None,
        price_normal: None,
        price_night: None,
        price_weekend: None,
        order: 99,
    }
}
