use serde::{Deserialize, Serialize};

/// Finish tier a quote is priced at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Package {
    Basic,
    Premium,
    Luxury,
}

impl Package {
    pub const ALL: [Package; 3] = [Package::Basic, Package::Premium, Package::Luxury];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Premium => "Premium",
            Self::Luxury => "Luxury",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Basic" => Some(Self::Basic),
            "Premium" => Some(Self::Premium),
            "Luxury" => Some(Self::Luxury),
            _ => None,
        }
    }

    /// Materials and finishes included in the tier.
    pub fn features(&self) -> &'static [&'static str] {
        match self {
            Self::Basic => &[
                "Core material- HDF-HMR",
                "Finish- Laminate",
                "Functional designs",
                "Necessary furnishings",
                "Premium Emulsion paint",
            ],
            Self::Premium => &[
                "Core material- HDF-HMR/BWR",
                "Finish- PU/Laminate/Acrylic",
                "Functional and stylish designs",
                "Wide range of furnishings",
                "Royale Shyne/Royale Emulsion paint",
            ],
            Self::Luxury => &[
                "Core material- HDF-HMR/BWP/BWR",
                "Finish- Designer PU/Glass/Fabric/Leatherette",
                "High-end designs",
                "Extensive array of furnishings",
                "Royale Glitz/Royale Shyne paint",
            ],
        }
    }
}
