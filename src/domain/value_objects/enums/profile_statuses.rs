use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    #[default]
    Active,
    Inactive,
}

impl ProfileStatus {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "active" => Some(ProfileStatus::Active),
            "inactive" => Some(ProfileStatus::Inactive),
            _ => None,
        }
    }
}

impl Display for ProfileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            ProfileStatus::Active => "active",
            ProfileStatus::Inactive => "inactive",
        };
        write!(f, "{}", status)
    }
}
