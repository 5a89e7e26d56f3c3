// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtbook_domain::CourtKind;

use super::{create_test_court_input, create_test_reservation_input, create_test_store, test_date};
use crate::PersistenceError;

#[test]
fn test_create_court_assigns_id() {
    let mut store = create_test_store();
    let input = create_test_court_input("Cancha 3");

    let court = store.create_court(&input).expect("Court should be created");

    assert!(court.id > 2);
    assert_eq!(court.name, "Cancha 3");
    assert_eq!(court.kind, CourtKind::Indoor);
    assert!(!court.created_at.is_empty());
}

#[test]
fn test_list_courts_active_only_excludes_inactive() {
    let mut store = create_test_store();
    let mut input = create_test_court_input("Closed for repairs");
    input.active = false;
    store.create_court(&input).expect("Court should be created");

    let all = store.list_courts(false).expect("Courts should list");
    let active = store.list_courts(true).expect("Courts should list");

    assert_eq!(all.len(), 3);
    assert_eq!(active.len(), 2);
}

#[test]
fn test_list_courts_orders_by_display_order() {
    let mut store = create_test_store();
    let mut input = create_test_court_input("First in line");
    input.order = 0;
    store.create_court(&input).expect("Court should be created");

    let courts = store.list_courts(false).expect("Courts should list");

    assert_eq!(courts[0].name, "First in line");
}

#[test]
fn test_update_court_rewrites_fields() {
    let mut store = create_test_store();
    let mut court = store.get_court(1).expect("Seeded court should exist");

    court.name = String::from("Cancha Principal");
    court.price_night = Some(55);
    let updated = store.update_court(&court).expect("Update should succeed");

    assert_eq!(updated.name, "Cancha Principal");
    assert_ne!(updated.updated_at, court.updated_at);

    let loaded = store.get_court(1).expect("Court should load");
    assert_eq!(loaded.name, "Cancha Principal");
    assert_eq!(loaded.price_night, Some(55));
}

#[test]
fn test_update_court_clears_price_override() {
    let mut store = create_test_store();
    let mut court = store.get_court(1).expect("Seeded court should exist");
    court.price_night = Some(55);
    store.update_court(&court).expect("Update should succeed");

    court.price_night = None;
    store.update_court(&court).expect("Update should succeed");

    let loaded = store.get_court(1).expect("Court should load");
    assert_eq!(loaded.price_night, None);
}

#[test]
fn test_update_unknown_court_is_not_found() {
    let mut store = create_test_store();
    let mut court = store.get_court(1).expect("Seeded court should exist");
    court.id = 999;

    let result = store.update_court(&court);

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_delete_court_without_reservations() {
    let mut store = create_test_store();
    let court = store
        .create_court(&create_test_court_input("Short-lived"))
        .expect("Court should be created");

    store
        .delete_court(court.id, test_date())
        .expect("Deletion should succeed");

    let result = store.get_court(court.id);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_delete_court_blocked_by_upcoming_reservation() {
    let mut store = create_test_store();
    store
        .create_reservation(&create_test_reservation_input(1, "10:00", "11:00"))
        .expect("Reservation should be created");

    let result = store.delete_court(1, test_date());

    assert!(matches!(
        result,
        Err(PersistenceError::CourtHasReservations { court_id: 1 })
    ));
}

#[test]
fn test_delete_court_allowed_when_reservations_are_past() {
    let mut store = create_test_store();
    store
        .create_reservation(&create_test_reservation_input(1, "10:00", "11:00"))
        .expect("Reservation should be created");

    let later = test_date().succ_opt().expect("Valid successor date");
    store
        .delete_court(1, later)
        .expect("Deletion should succeed once bookings are in the past");
}

#[test]
fn test_delete_court_allowed_when_reservations_are_cancelled() {
    let mut store = create_test_store();
    let created = store
        .create_reservation(&create_test_reservation_input(1, "10:00", "11:00"))
        .expect("Reservation should be created");
    store
        .update_reservation_status(&created.id, courtbook_domain::ReservationStatus::Cancelled)
        .expect("Cancellation should succeed");

    store
        .delete_court(1, test_date())
        .expect("Deletion should succeed once bookings are cancelled");
}

#[test]
fn test_delete_unknown_court_is_not_found() {
    let mut store = create_test_store();

    let result = store.delete_court(999, test_date());

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}
