// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use courtbook_domain::{
    CourtKind, PriceTiers, ReservationOrigin, ReservationStatus, SlotAvailability, TimeOfDay,
};

/// API response for an availability query: the full slot grid for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// The queried date.
    pub date: NaiveDate,
    /// Grid cells ordered by slot start, then court display order.
    pub slots: Vec<SlotAvailability>,
}

/// API request to create a reservation.
///
/// Required fields are optional here so the validator can report every
/// missing field at once. Any client-supplied price is ignored; the price
/// is always computed server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateReservationRequest {
    /// The court to book.
    pub court_id: Option<i64>,
    /// The facility-local calendar date.
    pub date: Option<NaiveDate>,
    /// Start of the requested interval.
    pub start_time: Option<TimeOfDay>,
    /// End of the requested interval.
    pub end_time: Option<TimeOfDay>,
    /// Customer name.
    #[serde(default)]
    pub customer_name: String,
    /// Customer phone.
    #[serde(default)]
    pub customer_phone: String,
    /// Optional customer email.
    pub customer_email: Option<String>,
    /// Optional customer document id.
    pub customer_document_id: Option<String>,
    /// Optional free-text notes.
    pub notes: Option<String>,
    /// Initial lifecycle status; defaults to `pending`.
    pub status: Option<ReservationStatus>,
    /// Provenance tag; defaults to `web`.
    pub origin: Option<ReservationOrigin>,
}

/// API request to update an existing reservation.
///
/// Absent fields are left unchanged; `null` clears clearable fields.
/// Status changes go through the status-transition endpoint instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateReservationRequest {
    /// New court, if changing.
    pub court_id: Option<i64>,
    /// New date, if changing.
    pub date: Option<NaiveDate>,
    /// New interval start, if changing.
    pub start_time: Option<TimeOfDay>,
    /// New interval end, if changing.
    pub end_time: Option<TimeOfDay>,
    /// New customer name, if changing.
    pub customer_name: Option<String>,
    /// New customer phone, if changing.
    pub customer_phone: Option<String>,
    /// New customer email (`null` clears it).
    #[serde(default, with = "double_option")]
    pub customer_email: Option<Option<String>>,
    /// New customer document id (`null` clears it).
    #[serde(default, with = "double_option")]
    pub customer_document_id: Option<Option<String>>,
    /// New notes (`null` clears them).
    #[serde(default, with = "double_option")]
    pub notes: Option<Option<String>>,
}

impl UpdateReservationRequest {
    /// Whether the patch touches scheduling-relevant fields, which forces
    /// re-validation against the existing reservation set.
    #[must_use]
    pub const fn changes_schedule(&self) -> bool {
        self.court_id.is_some()
            || self.date.is_some()
            || self.start_time.is_some()
            || self.end_time.is_some()
    }
}

/// API request to move a reservation to a new lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// The target status.
    pub status: ReservationStatus,
}

/// Filter parameters for a reservation listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListReservationsRequest {
    /// Restrict to a single calendar date.
    pub date: Option<NaiveDate>,
    /// Restrict to a single court.
    pub court_id: Option<i64>,
    /// Restrict to a single lifecycle status.
    pub status: Option<ReservationStatus>,
    /// Substring match over customer name, phone, and email.
    pub search: Option<String>,
    /// Sort direction: `asc` (default) or `desc`.
    pub order: Option<String>,
}

/// API request to create a court.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCourtRequest {
    /// Display name.
    pub name: String,
    /// Surface kind.
    pub kind: CourtKind,
    /// Whether the court is bookable; defaults to true.
    pub active: Option<bool>,
    /// Player capacity; defaults to 10.
    pub capacity: Option<u32>,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Per-court normal-tier price override.
    pub price_normal: Option<i64>,
    /// Per-court night-tier price override.
    pub price_night: Option<i64>,
    /// Per-court weekend-tier price override.
    pub price_weekend: Option<i64>,
    /// Display ordering; defaults to last.
    pub order: Option<i32>,
}

/// Public facility summary: contact data, hours, and tier prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityResponse {
    /// Facility display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Contact phone.
    pub phone: String,
    /// WhatsApp contact.
    pub whatsapp: String,
    /// Opening time.
    pub opening: TimeOfDay,
    /// Closing time.
    pub closing: TimeOfDay,
    /// Slot duration in minutes.
    pub slot_duration_minutes: u16,
    /// Facility-wide tier prices.
    pub prices: PriceTiers,
}

/// Per-court occupancy figures for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtOccupancy {
    /// The court id.
    pub court_id: i64,
    /// The court display name.
    pub court_name: String,
    /// Non-cancelled reservations on the date.
    pub reservations: usize,
    /// Percentage of the date's slots taken, rounded.
    pub occupancy_rate: u32,
}

/// A start time and how often it was booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularStartTime {
    /// The interval start.
    pub start_time: TimeOfDay,
    /// Number of non-cancelled reservations starting then.
    pub count: usize,
}

/// Booking statistics for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    /// The queried date.
    pub date: NaiveDate,
    /// All reservations on the date, cancelled included.
    pub total: usize,
    /// Count of pending reservations.
    pub pending: usize,
    /// Count of confirmed reservations.
    pub confirmed: usize,
    /// Count of paid reservations.
    pub paid: usize,
    /// Count of cancelled reservations.
    pub cancelled: usize,
    /// Summed price of confirmed and paid reservations.
    pub estimated_revenue: i64,
    /// Occupancy per active court.
    pub occupancy: Vec<CourtOccupancy>,
    /// Most-booked start times, most popular first (top five).
    pub popular_start_times: Vec<PopularStartTime>,
}

/// Serde helper distinguishing an absent field from an explicit `null`.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
