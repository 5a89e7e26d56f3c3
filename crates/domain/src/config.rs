// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The facility configuration singleton.
//!
//! Configuration is read by every scheduling computation and mutated only
//! through an explicit patch operation. Patches merge field by field, and
//! nested structures (price tiers, facility info) merge field by field as
//! well rather than being replaced wholesale. When the stored document is
//! missing or corrupt, callers fall back to `Configuration::default()`.

use crate::timeslot::TimeOfDay;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default regional phone pattern. Accepts an optional national prefix
/// followed by 2-3-3/4 digit groups with optional space or dash separators.
pub const DEFAULT_PHONE_PATTERN: &str =
    r"^(\+?598)?[\s\-]?([0-9]{2})[\s\-]?([0-9]{3})[\s\-]?([0-9]{3,4})$";

/// Tiered hourly prices, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTiers {
    /// Weekday daytime price.
    pub normal: i64,
    /// Price from 20:00 to closing, any day.
    pub night: i64,
    /// Saturday/Sunday daytime price.
    pub weekend: i64,
}

/// Partial update for `PriceTiers`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTiersPatch {
    /// New weekday daytime price, if changing.
    pub normal: Option<i64>,
    /// New night price, if changing.
    pub night: Option<i64>,
    /// New weekend price, if changing.
    pub weekend: Option<i64>,
}

impl PriceTiers {
    /// Merges a patch into these tiers, field by field.
    pub fn apply(&mut self, patch: &PriceTiersPatch) {
        if let Some(normal) = patch.normal {
            self.normal = normal;
        }
        if let Some(night) = patch.night {
            self.night = night;
        }
        if let Some(weekend) = patch.weekend {
            self.weekend = weekend;
        }
    }
}

/// Public-facing facility metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityInfo {
    /// Display name of the facility.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Contact phone number.
    pub phone: String,
    /// WhatsApp contact number (digits only, for link building).
    pub whatsapp: String,
}

/// Partial update for `FacilityInfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityInfoPatch {
    /// New facility name, if changing.
    pub name: Option<String>,
    /// New address, if changing.
    pub address: Option<String>,
    /// New contact phone, if changing.
    pub phone: Option<String>,
    /// New WhatsApp number, if changing.
    pub whatsapp: Option<String>,
}

impl FacilityInfo {
    /// Merges a patch into this info, field by field.
    pub fn apply(&mut self, patch: FacilityInfoPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(whatsapp) = patch.whatsapp {
            self.whatsapp = whatsapp;
        }
    }
}

/// The process-wide facility configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// First bookable time of day.
    pub opening: TimeOfDay,
    /// Close of business; no slot may end after this.
    pub closing: TimeOfDay,
    /// Headline hourly rate, shown publicly alongside the tiers.
    pub base_price: i64,
    /// Tiered prices applied by the pricing engine.
    pub tiers: PriceTiers,
    /// Length of a bookable slot, in minutes.
    pub slot_duration_minutes: u16,
    /// Calendar dates on which no booking is permitted.
    pub blocked_dates: Vec<NaiveDate>,
    /// Public facility metadata.
    pub facility: FacilityInfo,
    /// Regex the customer phone number must match.
    pub phone_pattern: String,
}

/// Partial update for `Configuration`.
///
/// Nested tier and facility patches merge into the existing nested values;
/// `blocked_dates`, when present, replaces the list wholesale (it is a flat
/// set, not a mergeable structure).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationPatch {
    /// New opening time, if changing.
    pub opening: Option<TimeOfDay>,
    /// New closing time, if changing.
    pub closing: Option<TimeOfDay>,
    /// New headline hourly rate, if changing.
    pub base_price: Option<i64>,
    /// Tier changes, merged field by field.
    pub tiers: Option<PriceTiersPatch>,
    /// New slot duration, if changing.
    pub slot_duration_minutes: Option<u16>,
    /// Replacement blocked-dates list, if changing.
    pub blocked_dates: Option<Vec<NaiveDate>>,
    /// Facility info changes, merged field by field.
    pub facility: Option<FacilityInfoPatch>,
    /// New phone pattern, if changing.
    pub phone_pattern: Option<String>,
}

impl Configuration {
    /// Merges a patch into this configuration.
    pub fn apply(&mut self, patch: ConfigurationPatch) {
        if let Some(opening) = patch.opening {
            self.opening = opening;
        }
        if let Some(closing) = patch.closing {
            self.closing = closing;
        }
        if let Some(base_price) = patch.base_price {
            self.base_price = base_price;
        }
        if let Some(tiers) = patch.tiers {
            self.tiers.apply(&tiers);
        }
        if let Some(slot_duration_minutes) = patch.slot_duration_minutes {
            self.slot_duration_minutes = slot_duration_minutes;
        }
        if let Some(blocked_dates) = patch.blocked_dates {
            self.blocked_dates = blocked_dates;
        }
        if let Some(facility) = patch.facility {
            self.facility.apply(facility);
        }
        if let Some(phone_pattern) = patch.phone_pattern {
            self.phone_pattern = phone_pattern;
        }
    }

    /// Whether `date` is in the blocked-dates list.
    #[must_use]
    pub fn is_blocked(&self, date: NaiveDate) -> bool {
        self.blocked_dates.contains(&date)
    }
}

impl Default for Configuration {
    /// The documented defaults, used on first run and whenever the stored
    /// configuration document cannot be read.
    fn default() -> Self {
        Self {
            opening: time_at(8 * 60),
            closing: time_at(23 * 60),
            base_price: 40,
            tiers: PriceTiers {
                normal: 40,
                night: 48,
                weekend: 50,
            },
            slot_duration_minutes: 60,
            blocked_dates: Vec::new(),
            facility: FacilityInfo {
                name: String::from("Invasor Fútbol 5"),
                address: String::from("Madrid, España"),
                phone: String::from("+34 600 111 222"),
                whatsapp: String::from("34600111222"),
            },
            phone_pattern: String::from(DEFAULT_PHONE_PATTERN),
        }
    }
}

/// In-range constant constructor for the defaults above.
const fn time_at(minutes: u16) -> TimeOfDay {
    match TimeOfDay::from_minutes(minutes) {
        Some(time) => time,
        None => TimeOfDay::MIDNIGHT,
    }
}
