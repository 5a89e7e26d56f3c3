// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The availability engine.
//!
//! Computes the full slot grid for one date: every slot boundary between
//! opening and closing time, per active court, with an availability flag,
//! the occupying reservation (when occupied) and the quoted price. The
//! grid is recomputed fresh on every call; the engine holds no state.
//!
//! Occupancy uses half-open interval overlap against every non-cancelled
//! reservation, so a booking not aligned to a slot boundary still shades
//! every slot it touches.

use crate::config::Configuration;
use crate::court::Court;
use crate::error::DomainError;
use crate::pricing::quote_price;
use crate::reservation::Reservation;
use crate::timeslot::{TimeOfDay, TimeRange, slot_starts};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One (slot, court) cell of the availability grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAvailability {
    /// The court this cell describes.
    pub court_id: i64,
    /// Inclusive slot start.
    pub start_time: TimeOfDay,
    /// Exclusive slot end.
    pub end_time: TimeOfDay,
    /// Whether the slot can be booked.
    pub available: bool,
    /// The reservation occupying this slot, when one overlaps it.
    pub occupying_reservation_id: Option<String>,
    /// The quoted hourly price for this slot.
    pub price: i64,
}

/// Computes the availability grid for `date`.
///
/// # Arguments
///
/// * `config` - The facility configuration
/// * `courts` - The courts to include; inactive courts are skipped, and the
///   remainder are ordered by their display order
/// * `reservations` - Every reservation for `date` (any court; filtered here)
/// * `date` - The facility-local calendar date
/// * `now` - The current instant, injected so the past-slot cutoff is pure
///   and testable
///
/// # Returns
///
/// The grid ordered by slot start time, then court display order.
///
/// # Errors
///
/// Returns an error if the configured slot duration is zero.
///
/// # Rules
///
/// - A blocked date marks every slot unavailable, regardless of state.
/// - A slot whose start instant is before `now` is unavailable (past).
/// - A slot overlapped by a non-cancelled reservation for the same court
///   is unavailable and carries that reservation's id.
pub fn day_schedule(
    config: &Configuration,
    courts: &[Court],
    reservations: &[Reservation],
    date: NaiveDate,
    now: NaiveDateTime,
) -> Result<Vec<SlotAvailability>, DomainError> {
    let starts: Vec<TimeOfDay> =
        slot_starts(config.opening, config.closing, config.slot_duration_minutes)?;

    let mut active_courts: Vec<&Court> = courts.iter().filter(|c| c.active).collect();
    active_courts.sort_by_key(|c| c.order);

    let date_blocked: bool = config.is_blocked(date);

    let mut grid: Vec<SlotAvailability> = Vec::with_capacity(starts.len() * active_courts.len());

    for start in starts {
        let end: TimeOfDay = start.saturating_add_minutes(config.slot_duration_minutes);
        let slot_range: TimeRange = TimeRange::new(start, end);
        let is_past: bool = date.and_time(start.to_naive_time()) < now;

        for court in &active_courts {
            let occupying: Option<&Reservation> = reservations.iter().find(|r| {
                r.court_id == court.id
                    && r.date == date
                    && r.occupies()
                    && r.time_range().overlaps(slot_range)
            });

            grid.push(SlotAvailability {
                court_id: court.id,
                start_time: start,
                end_time: end,
                available: !date_blocked && !is_past && occupying.is_none(),
                occupying_reservation_id: occupying.map(|r| r.id.clone()),
                price: quote_price(config, Some(court), date, start),
            });
        }
    }

    Ok(grid)
}
