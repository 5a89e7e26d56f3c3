// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Courts: the bookable physical resources.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// The surface/construction kind of a court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourtKind {
    /// Covered court.
    Indoor,
    /// Open-air natural grass.
    Grass,
    /// Open-air synthetic turf.
    Turf,
}

impl CourtKind {
    /// The canonical string form, used in storage and API payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Indoor => "indoor",
            Self::Grass => "grass",
            Self::Turf => "turf",
        }
    }

    /// Parses the canonical string form.
    ///
    /// # Errors
    ///
    /// Returns an error for an unrecognized kind string.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "indoor" => Ok(Self::Indoor),
            "grass" => Ok(Self::Grass),
            "turf" => Ok(Self::Turf),
            _ => Err(DomainError::InvalidCourtKind(value.to_string())),
        }
    }
}

impl std::fmt::Display for CourtKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CourtKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A bookable court.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    /// Registry identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Surface/construction kind.
    pub kind: CourtKind,
    /// Whether the court is currently bookable.
    pub active: bool,
    /// Player capacity.
    pub capacity: u32,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Per-court override of the normal tier price.
    pub price_normal: Option<i64>,
    /// Per-court override of the night tier price.
    pub price_night: Option<i64>,
    /// Per-court override of the weekend tier price.
    pub price_weekend: Option<i64>,
    /// Display/priority order, ascending.
    pub order: i32,
    /// Creation timestamp (RFC 3339 UTC), server-assigned.
    pub created_at: String,
    /// Last-update timestamp (RFC 3339 UTC), server-assigned.
    pub updated_at: String,
}

/// Partial update for a `Court`.
///
/// `None` leaves a field unchanged. The price overrides use a nested
/// `Option` so a patch can distinguish "leave alone" from "clear override".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtPatch {
    /// New display name, if changing.
    pub name: Option<String>,
    /// New kind, if changing.
    pub kind: Option<CourtKind>,
    /// New active flag, if changing.
    pub active: Option<bool>,
    /// New capacity, if changing.
    pub capacity: Option<u32>,
    /// New description, if changing (`Some(None)` clears it).
    pub description: Option<Option<String>>,
    /// New normal-price override, if changing (`Some(None)` clears it).
    pub price_normal: Option<Option<i64>>,
    /// New night-price override, if changing (`Some(None)` clears it).
    pub price_night: Option<Option<i64>>,
    /// New weekend-price override, if changing (`Some(None)` clears it).
    pub price_weekend: Option<Option<i64>>,
    /// New display order, if changing.
    pub order: Option<i32>,
}

impl Court {
    /// Merges a patch into this court. The caller re-stamps `updated_at`.
    pub fn apply(&mut self, patch: CourtPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        if let Some(capacity) = patch.capacity {
            self.capacity = capacity;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price_normal) = patch.price_normal {
            self.price_normal = price_normal;
        }
        if let Some(price_night) = patch.price_night {
            self.price_night = price_night;
        }
        if let Some(price_weekend) = patch.price_weekend {
            self.price_weekend = price_weekend;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
    }
}

/// The courts seeded on first run, matching the facility's launch setup.
#[must_use]
pub fn default_courts(now: &str) -> Vec<Court> {
    vec![
        Court {
            id: 1,
            name: String::from("Cancha 1"),
            kind: CourtKind::Indoor,
            active: true,
            capacity: 10,
            description: Some(String::from("Covered court with synthetic turf")),
            price_normal: None,
            price_night: None,
            price_weekend: None,
            order: 1,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        },
        Court {
            id: 2,
            name: String::from("Cancha 2"),
            kind: CourtKind::Grass,
            active: true,
            capacity: 10,
            description: Some(String::from("Open-air natural grass court")),
            price_normal: None,
            price_night: None,
            price_weekend: None,
            order: 2,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        },
    ]
}
