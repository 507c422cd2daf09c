use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Fee bucket a payment settles against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FeeCategory {
    Tuition,
    Hostel,
    Other,
}

impl FeeCategory {
    pub const ALL: [FeeCategory; 3] = [FeeCategory::Tuition, FeeCategory::Hostel, FeeCategory::Other];

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "tuition" => Some(FeeCategory::Tuition),
            "hostel" => Some(FeeCategory::Hostel),
            "other" => Some(FeeCategory::Other),
            _ => None,
        }
    }
}

impl Display for FeeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let category = match self {
            FeeCategory::Tuition => "tuition",
            FeeCategory::Hostel => "hostel",
            FeeCategory::Other => "other",
        };
        write!(f, "{}", category)
    }
}
