use std::fmt;

use serde::{Deserialize, Serialize};

/// One page of the estimator wizard, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    Scope,
    HomeType,
    RoomSelection,
    PackageSelection,
    UserDetails,
    Summary,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Scope,
        Step::HomeType,
        Step::RoomSelection,
        Step::PackageSelection,
        Step::UserDetails,
        Step::Summary,
    ];

    pub const FIRST: Step = Step::Scope;
    pub const LAST: Step = Step::Summary;

    /// One-based position shown on the step indicator.
    pub fn index(self) -> u8 {
        match self {
            Self::Scope => 1,
            Self::HomeType => 2,
            Self::RoomSelection => 3,
            Self::PackageSelection => 4,
            Self::UserDetails => 5,
            Self::Summary => 6,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index).checked_sub(1)?).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        Self::from_index(self.index() - 1)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Scope => "Scope of Work",
            Self::HomeType => "Home Type",
            Self::RoomSelection => "Rooms",
            Self::PackageSelection => "Package",
            Self::UserDetails => "Your Details",
            Self::Summary => "Summary",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}. {}", self.index(), self.title())
    }
}
