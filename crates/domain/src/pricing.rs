// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The pricing engine.
//!
//! A pure function from (date, start time, court) to an hourly price.
//! Precedence is fixed and user-visible: night (start at or after 20:00)
//! beats weekend (Saturday/Sunday), which beats the normal tier. At each
//! tier a per-court override wins over the facility-wide tier price.
//! Saturday 21:00 is therefore night-priced, not weekend-priced.

use crate::config::Configuration;
use crate::court::Court;
use crate::timeslot::TimeOfDay;
use chrono::{Datelike, NaiveDate, Weekday};

/// The hour of day (inclusive) at which the night tier starts.
const NIGHT_START_HOUR: u16 = 20;

/// Quotes the hourly price for a slot.
///
/// # Arguments
///
/// * `config` - The facility configuration
/// * `court` - The court being booked, when it resolves; `None` falls back
///   to the facility-wide tier prices
/// * `date` - The facility-local calendar date
/// * `start_time` - The slot start time
///
/// # Returns
///
/// The price in whole currency units. Never fails: the override chain
/// always terminates at a configured tier price.
#[must_use]
pub fn quote_price(
    config: &Configuration,
    court: Option<&Court>,
    date: NaiveDate,
    start_time: TimeOfDay,
) -> i64 {
    if start_time.hour() >= NIGHT_START_HOUR {
        return court
            .and_then(|c| c.price_night)
            .unwrap_or(config.tiers.night);
    }

    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        return court
            .and_then(|c| c.price_weekend)
            .unwrap_or(config.tiers.weekend);
    }

    court
        .and_then(|c| c.price_normal)
        .unwrap_or(config.tiers.normal)
}
