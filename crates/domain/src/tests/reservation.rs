// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CourtKind, DomainError, ReservationOrigin, ReservationStatus};

#[test]
fn test_status_round_trips_through_strings() {
    for status in [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Paid,
        ReservationStatus::Cancelled,
    ] {
        assert_eq!(ReservationStatus::parse(status.as_str()).unwrap(), status);
    }
}

#[test]
fn test_unknown_status_is_rejected() {
    assert!(matches!(
        ReservationStatus::parse("archived"),
        Err(DomainError::InvalidStatus(_))
    ));
}

#[test]
fn test_non_cancelled_statuses_may_move_anywhere() {
    let live: [ReservationStatus; 3] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Paid,
    ];
    for from in live {
        for to in [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Paid,
            ReservationStatus::Cancelled,
        ] {
            assert!(from.can_transition_to(to), "{from} -> {to} should be allowed");
        }
    }
}

#[test]
fn test_cancelled_is_terminal() {
    let cancelled: ReservationStatus = ReservationStatus::Cancelled;
    assert!(!cancelled.can_transition_to(ReservationStatus::Pending));
    assert!(!cancelled.can_transition_to(ReservationStatus::Confirmed));
    assert!(!cancelled.can_transition_to(ReservationStatus::Paid));
    // Cancelling again is allowed; callers treat it as a no-op.
    assert!(cancelled.can_transition_to(ReservationStatus::Cancelled));
}

#[test]
fn test_origin_round_trips_through_strings() {
    for origin in [
        ReservationOrigin::Web,
        ReservationOrigin::Admin,
        ReservationOrigin::Whatsapp,
    ] {
        assert_eq!(ReservationOrigin::parse(origin.as_str()).unwrap(), origin);
    }
}

#[test]
fn test_court_kind_round_trips_through_strings() {
    for kind in [CourtKind::Indoor, CourtKind::Grass, CourtKind::Turf] {
        assert_eq!(CourtKind::parse(kind.as_str()).unwrap(), kind);
    }
    assert!(matches!(
        CourtKind::parse("clay"),
        Err(DomainError::InvalidCourtKind(_))
    ));
}
