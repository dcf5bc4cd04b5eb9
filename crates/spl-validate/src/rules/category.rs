//! Rule categories.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Shape,
    Discriminator,
    ConditionalPresence,
    Status,
    Range,
    Terminology,
    Hierarchy,
}

impl Category {
    /// Get all validation categories.
    pub const fn all() -> &'static [Self] {
        &[
            Self::Shape,
            Self::Discriminator,
            Self::ConditionalPresence,
            Self::Status,
            Self::Range,
            Self::Terminology,
            Self::Hierarchy,
        ]
    }

    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "shape" => Some(Self::Shape),
            "discriminator" => Some(Self::Discriminator),
            "conditionalpresence" => Some(Self::ConditionalPresence),
            "status" => Some(Self::Status),
            "range" => Some(Self::Range),
            "terminology" => Some(Self::Terminology),
            "hierarchy" => Some(Self::Hierarchy),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Shape => "Shape",
            Self::Discriminator => "Discriminator",
            Self::ConditionalPresence => "Conditional Presence",
            Self::Status => "Status",
            Self::Range => "Range",
            Self::Terminology => "Terminology",
            Self::Hierarchy => "Hierarchy",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Shape => "Required fields and field formats",
            Self::Discriminator => "Tagged values agree with their declared type",
            Self::ConditionalPresence => "Fields required or forbidden by other fields",
            Self::Status => "Status transitions across related records",
            Self::Range => "Quantity and unit pairing and numeric ranges",
            Self::Terminology => "Codes and units from recognized vocabularies",
            Self::Hierarchy => "Ordering and ownership within assembled hierarchies",
        }
    }
}
