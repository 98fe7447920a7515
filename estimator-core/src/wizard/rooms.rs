//! Room counts behind the room selection step.
//!
//! The form stores rooms as a flat list of labels (`"Bedroom 1"`,
//! `"Bedroom 2"`, `"Kitchen"`). [`RoomCounts`] is the editable view of that
//! list: one counter per room kind, clamped by the home type's limits.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{HomeType, RoomLimits};

/// Limits used before a home type is chosen.
const UNSET_LIMITS: RoomLimits = RoomLimits {
    bedrooms: 1,
    bathrooms: 1,
};

/// Ceiling for kinds the home type does not limit, applied to restored counts.
pub const MAX_UNLIMITED_ROOMS: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoomKind {
    LivingRoom,
    Kitchen,
    Bedroom,
    Bathroom,
    Dining,
}

impl RoomKind {
    pub const ALL: [RoomKind; 5] = [
        RoomKind::LivingRoom,
        RoomKind::Kitchen,
        RoomKind::Bedroom,
        RoomKind::Bathroom,
        RoomKind::Dining,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::LivingRoom => "Living Room",
            Self::Kitchen => "Kitchen",
            Self::Bedroom => "Bedroom",
            Self::Bathroom => "Bathroom",
            Self::Dining => "Dining",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == s)
    }

    /// Whether the home type caps this kind's count.
    pub fn is_limited(&self) -> bool {
        matches!(self, Self::Bedroom | Self::Bathroom)
    }

    fn max_for(
        &self,
        limits: RoomLimits,
    ) -> Option<u32> {
        match self {
            Self::Bedroom => Some(limits.bedrooms),
            Self::Bathroom => Some(limits.bathrooms),
            _ => None,
        }
    }
}

impl fmt::Display for RoomKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How many of each room kind the customer wants designed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCounts {
    pub living_room: u32,
    pub kitchen: u32,
    pub bedroom: u32,
    pub bathroom: u32,
    pub dining: u32,
}

impl Default for RoomCounts {
    fn default() -> Self {
        Self {
            living_room: 1,
            kitchen: 1,
            bedroom: 1,
            bathroom: 1,
            dining: 1,
        }
    }
}

impl RoomCounts {
    pub fn limits_for(home_type: Option<HomeType>) -> RoomLimits {
        home_type.map_or(UNSET_LIMITS, |h| h.room_limits())
    }

    /// Rebuilds counts from a label list; unknown labels are ignored.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut counts = Self {
            living_room: 0,
            kitchen: 0,
            bedroom: 0,
            bathroom: 0,
            dining: 0,
        };
        for label in labels {
            if let Some(kind) = kind_of_label(label.as_ref()) {
                *counts.slot(kind) += 1;
            }
        }
        counts
    }

    pub fn get(
        &self,
        kind: RoomKind,
    ) -> u32 {
        match kind {
            RoomKind::LivingRoom => self.living_room,
            RoomKind::Kitchen => self.kitchen,
            RoomKind::Bedroom => self.bedroom,
            RoomKind::Bathroom => self.bathroom,
            RoomKind::Dining => self.dining,
        }
    }

    fn slot(
        &mut self,
        kind: RoomKind,
    ) -> &mut u32 {
        match kind {
            RoomKind::LivingRoom => &mut self.living_room,
            RoomKind::Kitchen => &mut self.kitchen,
            RoomKind::Bedroom => &mut self.bedroom,
            RoomKind::Bathroom => &mut self.bathroom,
            RoomKind::Dining => &mut self.dining,
        }
    }

    /// Sets bedrooms and bathrooms to the home type's maxima.
    pub fn apply_home_type(
        &mut self,
        home_type: HomeType,
    ) {
        let limits = home_type.room_limits();
        self.bedroom = limits.bedrooms;
        self.bathroom = limits.bathrooms;
    }

    /// Brings every count within `limits`, for counts that did not come from
    /// [`increment`](Self::increment), such as a draft file.
    pub fn clamp_to(
        &mut self,
        limits: RoomLimits,
    ) {
        for kind in RoomKind::ALL {
            let max = kind.max_for(limits).unwrap_or(MAX_UNLIMITED_ROOMS);
            let slot = self.slot(kind);
            *slot = (*slot).min(max);
        }
    }

    /// Adds one room of `kind`. Returns `false` when a limited kind is
    /// already at its maximum.
    pub fn increment(
        &mut self,
        kind: RoomKind,
        limits: RoomLimits,
    ) -> bool {
        let current = self.get(kind);
        if kind.max_for(limits).is_some_and(|max| current >= max) {
            return false;
        }
        *self.slot(kind) = current.saturating_add(1);
        true
    }

    /// Removes one room of `kind`. Returns `false` at zero.
    pub fn decrement(
        &mut self,
        kind: RoomKind,
    ) -> bool {
        let slot = self.slot(kind);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Labels in kind order: a single room keeps the bare name, several are
    /// numbered from 1, none are omitted.
    pub fn labels(&self) -> Vec<String> {
        let mut labels = Vec::new();
        for kind in RoomKind::ALL {
            match self.get(kind) {
                0 => {}
                1 => labels.push(kind.name().to_string()),
                n => labels.extend((1..=n).map(|i| format!("{} {i}", kind.name()))),
            }
        }
        labels
    }

    pub fn total(&self) -> u32 {
        RoomKind::ALL.iter().map(|k| self.get(*k)).sum()
    }
}

/// Groups room labels back into `(kind, count)` pairs for display.
pub fn summarize_rooms<S: AsRef<str>>(labels: &[S]) -> Vec<(RoomKind, u32)> {
    let counts = RoomCounts::from_labels(labels);
    RoomKind::ALL
        .into_iter()
        .map(|kind| (kind, counts.get(kind)))
        .filter(|(_, count)| *count > 0)
        .collect()
}

fn kind_of_label(label: &str) -> Option<RoomKind> {
    let label = label.trim();
    if let Some(kind) = RoomKind::parse(label) {
        return Some(kind);
    }
    let (name, number) = label.rsplit_once(' ')?;
    number.parse::<u32>().ok()?;
    RoomKind::parse(name)
}
