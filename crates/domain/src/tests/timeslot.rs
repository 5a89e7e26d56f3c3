// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, TimeOfDay, TimeRange};
use crate::timeslot::slot_starts;

fn t(value: &str) -> TimeOfDay {
    TimeOfDay::parse(value).unwrap()
}

#[test]
fn test_parse_accepts_valid_times() {
    assert_eq!(t("08:00").minutes(), 8 * 60);
    assert_eq!(t("23:59").minutes(), 23 * 60 + 59);
    assert_eq!(t("00:00").minutes(), 0);
}

#[test]
fn test_parse_rejects_out_of_range_times() {
    assert!(matches!(
        TimeOfDay::parse("24:00"),
        Err(DomainError::InvalidTime(_))
    ));
    assert!(matches!(
        TimeOfDay::parse("12:60"),
        Err(DomainError::InvalidTime(_))
    ));
}

#[test]
fn test_parse_rejects_malformed_strings() {
    assert!(TimeOfDay::parse("12").is_err());
    assert!(TimeOfDay::parse("ab:cd").is_err());
    assert!(TimeOfDay::parse("").is_err());
}

#[test]
fn test_display_round_trips() {
    assert_eq!(t("08:00").to_string(), "08:00");
    assert_eq!(t("21:30").to_string(), "21:30");
}

#[test]
fn test_hour_and_minute_components() {
    let time: TimeOfDay = t("21:45");
    assert_eq!(time.hour(), 21);
    assert_eq!(time.minute(), 45);
}

#[test]
fn test_overlap_detects_partial_overlap() {
    let a: TimeRange = TimeRange::new(t("10:00"), t("11:00"));
    let b: TimeRange = TimeRange::new(t("10:30"), t("11:30"));
    assert!(a.overlaps(b));
}

#[test]
fn test_overlap_detects_containment() {
    let outer: TimeRange = TimeRange::new(t("10:00"), t("13:00"));
    let inner: TimeRange = TimeRange::new(t("11:00"), t("12:00"));
    assert!(outer.overlaps(inner));
    assert!(inner.overlaps(outer));
}

#[test]
fn test_adjacent_intervals_do_not_overlap() {
    // Half-open semantics: [10:00, 11:00) and [11:00, 12:00) share only
    // the boundary point, which belongs to the second interval.
    let a: TimeRange = TimeRange::new(t("10:00"), t("11:00"));
    let b: TimeRange = TimeRange::new(t("11:00"), t("12:00"));
    assert!(!a.overlaps(b));
    assert!(!b.overlaps(a));
}

#[test]
fn test_overlap_is_symmetric() {
    let ranges: Vec<TimeRange> = vec![
        TimeRange::new(t("08:00"), t("09:00")),
        TimeRange::new(t("08:30"), t("10:00")),
        TimeRange::new(t("09:00"), t("09:30")),
        TimeRange::new(t("12:00"), t("13:00")),
    ];
    for a in &ranges {
        for b in &ranges {
            assert_eq!(a.overlaps(*b), b.overlaps(*a));
        }
    }
}

#[test]
fn test_slot_starts_cover_the_open_window() {
    let starts: Vec<TimeOfDay> = slot_starts(t("08:00"), t("23:00"), 60).unwrap();
    assert_eq!(starts.len(), 15);
    assert_eq!(starts[0], t("08:00"));
    assert_eq!(starts[14], t("22:00"));
}

#[test]
fn test_slot_starts_drop_partial_trailing_slot() {
    // 90-minute slots between 08:00 and 11:00 fit twice; 11:00 would run
    // past closing and is not emitted.
    let starts: Vec<TimeOfDay> = slot_starts(t("08:00"), t("11:00"), 90).unwrap();
    assert_eq!(starts, vec![t("08:00"), t("09:30")]);
}

#[test]
fn test_slot_starts_reject_zero_duration() {
    assert!(matches!(
        slot_starts(t("08:00"), t("23:00"), 0),
        Err(DomainError::InvalidSlotDuration { minutes: 0 })
    ));
}
