pub mod accounts;
pub mod fee_catalog;
pub mod fee_structures;
pub mod transactions;
