use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    MobileMoney,
    Bank,
    Card,
}

impl PaymentMethod {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "mobile_money" => Some(PaymentMethod::MobileMoney),
            "bank" => Some(PaymentMethod::Bank),
            "card" => Some(PaymentMethod::Card),
            _ => None,
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let method = match self {
            PaymentMethod::MobileMoney => "mobile_money",
            PaymentMethod::Bank => "bank",
            PaymentMethod::Card => "card",
        };
        write!(f, "{}", method)
    }
}
