// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wall-clock times and half-open time intervals.
//!
//! All reservation times are facility-local wall-clock times ("HH:mm").
//! `TimeOfDay` stores minutes since midnight so that comparisons and slot
//! arithmetic are plain integer operations, and `TimeRange` provides the
//! half-open overlap test the whole scheduling core is built on.

use crate::error::DomainError;
use chrono::{NaiveTime, Timelike};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Minutes in a day; `TimeOfDay` values are strictly below this.
const MINUTES_PER_DAY: u16 = 24 * 60;

/// A facility-local wall-clock time, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Midnight, the start of the day.
    pub const MIDNIGHT: Self = Self(0);

    /// Creates a `TimeOfDay` from minutes since midnight.
    ///
    /// Returns `None` if `minutes` is not strictly below 24:00.
    #[must_use]
    pub const fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < MINUTES_PER_DAY {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Parses an "HH:mm" string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid "HH:mm" time.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let (hour_str, minute_str) = value
            .split_once(':')
            .ok_or_else(|| DomainError::InvalidTime(format!("'{value}' is not 'HH:mm'")))?;
        let hour: u16 = hour_str
            .parse()
            .map_err(|_| DomainError::InvalidTime(format!("'{value}' has a non-numeric hour")))?;
        let minute: u16 = minute_str
            .parse()
            .map_err(|_| DomainError::InvalidTime(format!("'{value}' has a non-numeric minute")))?;
        if hour >= 24 || minute >= 60 {
            return Err(DomainError::InvalidTime(format!(
                "'{value}' is out of range"
            )));
        }
        Ok(Self(hour * 60 + minute))
    }

    /// The minutes since midnight.
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    /// The hour-of-day component (0-23).
    #[must_use]
    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    /// The minute-of-hour component (0-59).
    #[must_use]
    pub const fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Adds a number of minutes, saturating at the end of the day.
    ///
    /// Slot generation steps with this; the final boundary is clamped so a
    /// closing time of 23:59 cannot wrap.
    #[must_use]
    pub const fn saturating_add_minutes(self, minutes: u16) -> Self {
        let sum = self.0.saturating_add(minutes);
        if sum >= MINUTES_PER_DAY {
            Self(MINUTES_PER_DAY - 1)
        } else {
            Self(sum)
        }
    }

    /// Adds a number of minutes, returning `None` past the end of the day.
    #[must_use]
    pub const fn checked_add_minutes(self, minutes: u16) -> Option<Self> {
        let sum = self.0.saturating_add(minutes);
        if sum < MINUTES_PER_DAY {
            Some(Self(sum))
        } else {
            None
        }
    }

    /// Converts to a `chrono::NaiveTime` for combining with a date.
    #[must_use]
    pub fn to_naive_time(self) -> NaiveTime {
        // Hour and minute are range-checked at construction, so this is
        // always in range; midnight is the unreachable fallback.
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
            .unwrap_or_default()
    }

    /// Converts from a `chrono::NaiveTime`, discarding seconds.
    #[must_use]
    pub fn from_naive_time(time: NaiveTime) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self((time.hour() * 60 + time.minute()) as u16)
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Serialized as the "HH:mm" wire form, matching the stored configuration
// document and all API payloads.
impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value: String = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(DeError::custom)
    }
}

/// A half-open `[start, end)` interval of wall-clock time on a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Inclusive start of the interval.
    pub start: TimeOfDay,
    /// Exclusive end of the interval.
    pub end: TimeOfDay,
}

impl TimeRange {
    /// Creates a new range. The caller is responsible for `start < end`;
    /// the booking validator reports inverted ranges as a validation issue.
    #[must_use]
    pub const fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Half-open interval overlap: `[a, b)` and `[c, d)` overlap iff
    /// `a < d && c < b`. Symmetric by construction.
    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        self.start.minutes() < other.end.minutes() && other.start.minutes() < self.end.minutes()
    }

    /// The interval length in minutes.
    #[must_use]
    pub const fn duration_minutes(self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Generates slot start times from `opening` (inclusive) up to `closing`,
/// stepped by `slot_minutes`. A slot is emitted only when the whole
/// `[start, start + slot_minutes)` window fits before `closing`.
///
/// # Errors
///
/// Returns an error if `slot_minutes` is zero.
pub fn slot_starts(
    opening: TimeOfDay,
    closing: TimeOfDay,
    slot_minutes: u16,
) -> Result<Vec<TimeOfDay>, DomainError> {
    if slot_minutes == 0 {
        return Err(DomainError::InvalidSlotDuration { minutes: 0 });
    }

    let mut starts: Vec<TimeOfDay> = Vec::new();
    let mut current: TimeOfDay = opening;
    while let Some(end) = current.checked_add_minutes(slot_minutes) {
        if end.minutes() > closing.minutes() {
            break;
        }
        starts.push(current);
        current = end;
    }
    Ok(starts)
}
