pub mod accounts;
pub mod enums;
pub mod fee_structures;
pub mod transactions;
