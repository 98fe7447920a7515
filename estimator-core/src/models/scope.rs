use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Renovate,
    #[serde(rename = "New Design")]
    NewDesign,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::Renovate, Scope::NewDesign];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Renovate => "Renovate",
            Self::NewDesign => "New Design",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Renovate" => Some(Self::Renovate),
            "New Design" => Some(Self::NewDesign),
            _ => None,
        }
    }

    /// Label shown on the scope selection step.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Renovate => "Renovate Existing Home",
            Self::NewDesign => "New Home Design",
        }
    }
}
