pub mod fee_catalog;
pub mod fee_structures;
pub mod profiles;
pub mod transactions;
pub mod users;
