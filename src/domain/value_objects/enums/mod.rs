pub mod fee_categories;
pub mod payment_methods;
pub mod profile_statuses;
pub mod roles;
pub mod transaction_statuses;
