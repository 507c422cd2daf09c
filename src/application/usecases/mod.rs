pub mod accounts;
pub mod auth;
pub mod fee_structures;
pub mod payments;
