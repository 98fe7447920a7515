use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bounds for the two room kinds whose count depends on the home type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomLimits {
    pub bedrooms: u32,
    pub bathrooms: u32,
}

/// Closed set of home types offered by the estimator.
///
/// `Bhk(n)` holds the bedroom-hall-kitchen count (1..=6). The named types
/// carry fixed room limits instead of a number derived from the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HomeType {
    Bhk(u8),
    Villa,
    Duplex,
    Penthouse,
}

impl HomeType {
    /// Types shown as primary choices on the home type step.
    pub const STANDARD: [HomeType; 4] = [
        HomeType::Bhk(1),
        HomeType::Bhk(2),
        HomeType::Bhk(3),
        HomeType::Bhk(4),
    ];

    /// Types listed under "other".
    pub const OTHER: [HomeType; 5] = [
        HomeType::Bhk(5),
        HomeType::Bhk(6),
        HomeType::Villa,
        HomeType::Duplex,
        HomeType::Penthouse,
    ];

    const MAX_BHK: u8 = 6;

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s {
            "Villa" => return Some(Self::Villa),
            "Duplex" => return Some(Self::Duplex),
            "Penthouse" => return Some(Self::Penthouse),
            _ => {}
        }

        let number = s.strip_suffix("BHK")?.trim_end().parse::<u8>().ok()?;
        (1..=Self::MAX_BHK).contains(&number).then_some(Self::Bhk(number))
    }

    /// Maximum bedrooms and bathrooms selectable for this home type.
    pub fn room_limits(&self) -> RoomLimits {
        match *self {
            Self::Bhk(n) => RoomLimits {
                bedrooms: u32::from(n),
                bathrooms: u32::from(n),
            },
            Self::Villa => RoomLimits {
                bedrooms: 4,
                bathrooms: 4,
            },
            Self::Duplex => RoomLimits {
                bedrooms: 4,
                bathrooms: 3,
            },
            Self::Penthouse => RoomLimits {
                bedrooms: 3,
                bathrooms: 3,
            },
        }
    }
}

impl fmt::Display for HomeType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Bhk(n) => write!(f, "{n} BHK"),
            Self::Villa => f.write_str("Villa"),
            Self::Duplex => f.write_str("Duplex"),
            Self::Penthouse => f.write_str("Penthouse"),
        }
    }
}

impl TryFrom<String> for HomeType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("unknown home type '{value}'"))
    }
}

impl From<HomeType> for String {
    fn from(value: HomeType) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bhk_limits_match_the_bhk_number() {
        for n in 1..=4u8 {
            let limits = HomeType::Bhk(n).room_limits();

            assert_eq!(limits.bedrooms, u32::from(n));
            assert_eq!(limits.bathrooms, u32::from(n));
        }
    }

    #[test]
    fn named_types_use_fixed_limits() {
        assert_eq!(
            HomeType::Villa.room_limits(),
            RoomLimits {
                bedrooms: 4,
                bathrooms: 4
            }
        );
        assert_eq!(
            HomeType::Duplex.room_limits(),
            RoomLimits {
                bedrooms: 4,
                bathrooms: 3
            }
        );
        assert_eq!(
            HomeType::Penthouse.room_limits(),
            RoomLimits {
                bedrooms: 3,
                bathrooms: 3
            }
        );
    }

    #[test]
    fn parse_accepts_every_offered_label() {
        for home_type in HomeType::STANDARD.iter().chain(HomeType::OTHER.iter()) {
            assert_eq!(HomeType::parse(&home_type.to_string()), Some(*home_type));
        }
    }

    #[test]
    fn parse_rejects_unknown_labels() {
        assert_eq!(HomeType::parse("0 BHK"), None);
        assert_eq!(HomeType::parse("7 BHK"), None);
        assert_eq!(HomeType::parse("Castle"), None);
        assert_eq!(HomeType::parse(""), None);
    }

    #[test]
    fn serializes_as_display_label() {
        let json = serde_json::to_string(&HomeType::Bhk(3)).unwrap();

        assert_eq!(json, "\"3 BHK\"");
        assert_eq!(
            serde_json::from_str::<HomeType>("\"Duplex\"").unwrap(),
            HomeType::Duplex
        );
    }
}
