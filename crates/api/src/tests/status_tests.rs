// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtbook_domain::{Reservation, ReservationStatus};
use courtbook_persistence::Persistence;

use crate::error::ApiError;
use crate::handlers::{
    cancel_reservation, create_reservation, get_availability, update_reservation_status,
};
use crate::tests::{book, create_test_booking, create_test_store, test_date, test_now, time};

#[test]
fn test_status_moves_pending_to_confirmed_to_paid() {
    let mut store: Persistence = create_test_store();
    let reservation: Reservation = book(&mut store, "10:00", "11:00");

    let confirmed: Reservation =
        update_reservation_status(&mut store, &reservation.id, ReservationStatus::Confirmed)
            .expect("Failed to confirm reservation");
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);

    let paid: Reservation =
        update_reservation_status(&mut store, &reservation.id, ReservationStatus::Paid)
            .expect("Failed to mark reservation paid");
    assert_eq!(paid.status, ReservationStatus::Paid);
}

#[test]
fn test_status_cancelled_is_terminal() {
    let mut store: Persistence = create_test_store();
    let reservation: Reservation = book(&mut store, "10:00", "11:00");
    cancel_reservation(&mut store, &reservation.id).expect("Failed to cancel reservation");

    let result =
        update_reservation_status(&mut store, &reservation.id, ReservationStatus::Confirmed);

    match result {
        Err(ApiError::ConstraintViolation { message }) => {
            assert!(message.contains("cancelled"));
        }
        other => panic!("Expected ConstraintViolation, got {other:?}"),
    }
}

#[test]
fn test_cancel_twice_is_a_no_op() {
    let mut store: Persistence = create_test_store();
    let reservation: Reservation = book(&mut store, "10:00", "11:00");

    let first: Reservation =
        cancel_reservation(&mut store, &reservation.id).expect("Failed to cancel reservation");
    let second: Reservation =
        cancel_reservation(&mut store, &reservation.id).expect("Repeat cancel should succeed");

    assert_eq!(first.status, ReservationStatus::Cancelled);
    assert_eq!(second, first);
}

#[test]
fn test_cancel_unknown_is_not_found() {
    let mut store: Persistence = create_test_store();

    let result = cancel_reservation(&mut store, "no-such-id");

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_cancelled_slot_frees_up_and_can_be_rebooked() {
    let mut store: Persistence = create_test_store();
    let reservation: Reservation = book(&mut store, "10:00", "11:00");
    cancel_reservation(&mut store, &reservation.id).expect("Failed to cancel reservation");

    let response = get_availability(&mut store, test_date(), Some(1), test_now())
        .expect("Failed to compute availability");
    let cell = response
        .slots
        .iter()
        .find(|s| s.start_time == time("10:00"))
        .expect("Expected a 10:00 cell");
    assert!(cell.available);

    create_reservation(
        &mut store,
        create_test_booking(1, "10:00", "11:00"),
        test_date(),
    )
    .expect("Rebooking a cancelled slot should be accepted");
}
