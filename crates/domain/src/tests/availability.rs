// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Configuration, Court, CourtKind, Customer, Reservation, ReservationOrigin, ReservationStatus,
    SlotAvailability, TimeOfDay, day_schedule,
};
use chrono::{NaiveDate, NaiveDateTime};

fn t(value: &str) -> TimeOfDay {
    TimeOfDay::parse(value).unwrap()
}

fn d(value: &str) -> NaiveDate {
    value.parse().unwrap()
}

fn dt(value: &str) -> NaiveDateTime {
    value.parse().unwrap()
}

fn create_test_court(id: i64, order: i32) -> Court {
    Court {
        id,
        name: format!("Court {id}"),
        kind: CourtKind::Turf,
        active: true,
        capacity: 10,
        description: None,
        price_normal: None,
        price_night: None,
        price_weekend: None,
        order,
        created_at: String::from("2024-01-01T00:00:00Z"),
        updated_at: String::from("2024-01-01T00:00:00Z"),
    }
}

fn create_test_reservation(
    id: &str,
    court_id: i64,
    date: &str,
    start: &str,
    end: &str,
    status: ReservationStatus,
) -> Reservation {
    Reservation {
        id: id.to_string(),
        court_id,
        date: d(date),
        start_time: t(start),
        end_time: t(end),
        customer: Customer {
            name: String::from("Test Customer"),
            phone: String::from("099 123 456"),
            email: None,
            document_id: None,
        },
        price: 40,
        status,
        origin: ReservationOrigin::Web,
        notes: None,
        created_at: String::from("2024-06-01T12:00:00Z"),
        updated_at: String::from("2024-06-01T12:00:00Z"),
    }
}

/// A "now" well before any slot under test, so nothing is past.
fn early_now() -> NaiveDateTime {
    dt("2024-01-01T00:00:00")
}

#[test]
fn test_grid_covers_every_slot_for_every_active_court() {
    let config: Configuration = Configuration::default();
    let courts: Vec<Court> = vec![create_test_court(1, 1), create_test_court(2, 2)];

    let grid: Vec<SlotAvailability> =
        day_schedule(&config, &courts, &[], d("2024-06-10"), early_now()).unwrap();

    // 15 hourly slots (08:00..23:00) times two courts.
    assert_eq!(grid.len(), 30);
    assert!(grid.iter().all(|slot| slot.available));
}

#[test]
fn test_inactive_courts_are_excluded() {
    let config: Configuration = Configuration::default();
    let mut inactive: Court = create_test_court(2, 2);
    inactive.active = false;
    let courts: Vec<Court> = vec![create_test_court(1, 1), inactive];

    let grid: Vec<SlotAvailability> =
        day_schedule(&config, &courts, &[], d("2024-06-10"), early_now()).unwrap();

    assert!(grid.iter().all(|slot| slot.court_id == 1));
}

#[test]
fn test_grid_is_ordered_by_time_then_court_order() {
    let config: Configuration = Configuration::default();
    // Court 2 displays first.
    let courts: Vec<Court> = vec![create_test_court(1, 2), create_test_court(2, 1)];

    let grid: Vec<SlotAvailability> =
        day_schedule(&config, &courts, &[], d("2024-06-10"), early_now()).unwrap();

    assert_eq!(grid[0].start_time, t("08:00"));
    assert_eq!(grid[0].court_id, 2);
    assert_eq!(grid[1].court_id, 1);
    assert_eq!(grid[2].start_time, t("09:00"));
}

#[test]
fn test_overlapping_reservation_occupies_slot() {
    let config: Configuration = Configuration::default();
    let courts: Vec<Court> = vec![create_test_court(1, 1)];
    let reservations: Vec<Reservation> = vec![create_test_reservation(
        "res-1",
        1,
        "2024-06-10",
        "10:00",
        "11:00",
        ReservationStatus::Pending,
    )];

    let grid: Vec<SlotAvailability> =
        day_schedule(&config, &courts, &reservations, d("2024-06-10"), early_now()).unwrap();

    let ten: &SlotAvailability = grid.iter().find(|s| s.start_time == t("10:00")).unwrap();
    assert!(!ten.available);
    assert_eq!(ten.occupying_reservation_id.as_deref(), Some("res-1"));

    let eleven: &SlotAvailability = grid.iter().find(|s| s.start_time == t("11:00")).unwrap();
    assert!(eleven.available);
}

#[test]
fn test_unaligned_reservation_shades_every_touched_slot() {
    // A 10:30-12:30 booking is not on a slot boundary; occupancy is by
    // interval overlap, so 10:00, 11:00 and 12:00 are all occupied.
    let config: Configuration = Configuration::default();
    let courts: Vec<Court> = vec![create_test_court(1, 1)];
    let reservations: Vec<Reservation> = vec![create_test_reservation(
        "res-1",
        1,
        "2024-06-10",
        "10:30",
        "12:30",
        ReservationStatus::Confirmed,
    )];

    let grid: Vec<SlotAvailability> =
        day_schedule(&config, &courts, &reservations, d("2024-06-10"), early_now()).unwrap();

    for start in ["10:00", "11:00", "12:00"] {
        let slot: &SlotAvailability = grid.iter().find(|s| s.start_time == t(start)).unwrap();
        assert!(!slot.available, "slot {start} should be occupied");
    }
    let nine: &SlotAvailability = grid.iter().find(|s| s.start_time == t("09:00")).unwrap();
    assert!(nine.available);
}

#[test]
fn test_cancelled_reservation_does_not_occupy() {
    let config: Configuration = Configuration::default();
    let courts: Vec<Court> = vec![create_test_court(1, 1)];
    let reservations: Vec<Reservation> = vec![create_test_reservation(
        "res-1",
        1,
        "2024-06-10",
        "10:00",
        "11:00",
        ReservationStatus::Cancelled,
    )];

    let grid: Vec<SlotAvailability> =
        day_schedule(&config, &courts, &reservations, d("2024-06-10"), early_now()).unwrap();

    let ten: &SlotAvailability = grid.iter().find(|s| s.start_time == t("10:00")).unwrap();
    assert!(ten.available);
}

#[test]
fn test_reservation_on_other_court_does_not_occupy() {
    let config: Configuration = Configuration::default();
    let courts: Vec<Court> = vec![create_test_court(1, 1), create_test_court(2, 2)];
    let reservations: Vec<Reservation> = vec![create_test_reservation(
        "res-1",
        2,
        "2024-06-10",
        "10:00",
        "11:00",
        ReservationStatus::Pending,
    )];

    let grid: Vec<SlotAvailability> =
        day_schedule(&config, &courts, &reservations, d("2024-06-10"), early_now()).unwrap();

    let court1_ten: &SlotAvailability = grid
        .iter()
        .find(|s| s.court_id == 1 && s.start_time == t("10:00"))
        .unwrap();
    assert!(court1_ten.available);
    let court2_ten: &SlotAvailability = grid
        .iter()
        .find(|s| s.court_id == 2 && s.start_time == t("10:00"))
        .unwrap();
    assert!(!court2_ten.available);
}

#[test]
fn test_blocked_date_marks_every_slot_unavailable() {
    let mut config: Configuration = Configuration::default();
    config.blocked_dates.push(d("2024-06-10"));
    let courts: Vec<Court> = vec![create_test_court(1, 1)];

    let grid: Vec<SlotAvailability> =
        day_schedule(&config, &courts, &[], d("2024-06-10"), early_now()).unwrap();

    assert!(!grid.is_empty());
    assert!(grid.iter().all(|slot| !slot.available));
}

#[test]
fn test_past_slots_are_unavailable() {
    let config: Configuration = Configuration::default();
    let courts: Vec<Court> = vec![create_test_court(1, 1)];
    let now: NaiveDateTime = dt("2024-06-08T15:30:00");

    let grid: Vec<SlotAvailability> =
        day_schedule(&config, &courts, &[], d("2024-06-08"), now).unwrap();

    for slot in &grid {
        if slot.start_time <= t("15:00") {
            assert!(!slot.available, "slot {} should be past", slot.start_time);
        } else {
            assert!(slot.available, "slot {} should be open", slot.start_time);
        }
    }
}

#[test]
fn test_night_slots_are_night_priced() {
    let config: Configuration = Configuration::default();
    let courts: Vec<Court> = vec![create_test_court(1, 1)];

    let grid: Vec<SlotAvailability> =
        day_schedule(&config, &courts, &[], d("2024-06-10"), early_now()).unwrap();

    let evening: &SlotAvailability = grid.iter().find(|s| s.start_time == t("20:00")).unwrap();
    assert_eq!(evening.price, config.tiers.night);
    let afternoon: &SlotAvailability = grid.iter().find(|s| s.start_time == t("15:00")).unwrap();
    assert_eq!(afternoon.price, config.tiers.normal);
}
