// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtbook_domain::{Court, CourtKind, CourtPatch};
use courtbook_persistence::Persistence;

use crate::error::ApiError;
use crate::handlers::{
    cancel_reservation, create_court, delete_court, list_courts, update_court,
};
use crate::request_response::CreateCourtRequest;
use crate::tests::{book, create_test_store, test_date};

fn create_test_court_request(name: &str) -> CreateCourtRequest {
    CreateCourtRequest {
        name: name.to_string(),
        kind: CourtKind::Indoor,
        active: None,
        capacity: None,
        description: None,
        price_normal: None,
        price_night: None,
        price_weekend: None,
        order: None,
    }
}

#[test]
fn test_create_court_fills_defaults_and_appends_order() {
    let mut store: Persistence = create_test_store();

    let court: Court = create_court(&mut store, create_test_court_request("Cancha 3"))
        .expect("Failed to create court");

    assert!(court.active);
    assert_eq!(court.capacity, 10);
    // The two seeded courts hold orders 1 and 2.
    assert_eq!(court.order, 3);
}

#[test]
fn test_create_court_honors_explicit_order() {
    let mut store: Persistence = create_test_store();

    let mut request: CreateCourtRequest = create_test_court_request("Cancha VIP");
    request.order = Some(1);
    request.price_night = Some(80);

    let court: Court = create_court(&mut store, request).expect("Failed to create court");

    assert_eq!(court.order, 1);
    assert_eq!(court.price_night, Some(80));
}

#[test]
fn test_list_courts_active_only_excludes_deactivated() {
    let mut store: Persistence = create_test_store();
    update_court(
        &mut store,
        2,
        CourtPatch {
            active: Some(false),
            ..Default::default()
        },
    )
    .expect("Failed to deactivate court");

    let all: Vec<Court> = list_courts(&mut store, false).expect("Failed to list courts");
    let active: Vec<Court> = list_courts(&mut store, true).expect("Failed to list courts");

    assert_eq!(all.len(), 2);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, 1);
}

#[test]
fn test_update_court_merges_patch() {
    let mut store: Persistence = create_test_store();

    let patch = CourtPatch {
        name: Some(String::from("Cancha Techada")),
        description: Some(None),
        price_normal: Some(Some(45)),
        ..Default::default()
    };
    let updated: Court = update_court(&mut store, 1, patch).expect("Failed to update court");

    assert_eq!(updated.name, "Cancha Techada");
    assert_eq!(updated.description, None);
    assert_eq!(updated.price_normal, Some(45));
}

#[test]
fn test_update_unknown_court_is_not_found() {
    let mut store: Persistence = create_test_store();

    let result = update_court(&mut store, 999, CourtPatch::default());

    match result {
        Err(ApiError::ResourceNotFound { resource_type, .. }) => {
            assert_eq!(resource_type, "Court");
        }
        other => panic!("Expected ResourceNotFound, got {other:?}"),
    }
}

#[test]
fn test_delete_court_without_bookings_succeeds() {
    let mut store: Persistence = create_test_store();

    delete_court(&mut store, 2, test_date()).expect("Failed to delete court");

    let remaining: Vec<Court> = list_courts(&mut store, false).expect("Failed to list courts");
    assert_eq!(remaining.len(), 1);
}

#[test]
fn test_delete_court_blocked_by_upcoming_booking() {
    let mut store: Persistence = create_test_store();
    let reservation = book(&mut store, "10:00", "11:00");

    let result = delete_court(&mut store, 1, test_date());
    assert!(matches!(result, Err(ApiError::ConstraintViolation { .. })));

    // Cancelling the booking unblocks the deletion.
    cancel_reservation(&mut store, &reservation.id).expect("Failed to cancel reservation");
    delete_court(&mut store, 1, test_date()).expect("Failed to delete court");
}

#[test]
fn test_delete_court_allowed_once_bookings_are_past() {
    let mut store: Persistence = create_test_store();
    book(&mut store, "10:00", "11:00");

    let tomorrow = test_date().succ_opt().expect("Failed to compute tomorrow");
    delete_court(&mut store, 1, tomorrow).expect("Failed to delete court");
}

#[test]
fn test_delete_unknown_court_is_not_found() {
    let mut store: Persistence = create_test_store();

    let result = delete_court(&mut store, 999, test_date());

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
