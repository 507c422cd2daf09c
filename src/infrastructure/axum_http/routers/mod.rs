pub mod accounts;
pub mod auth;
pub mod dashboard;
pub mod fees;
pub mod notifications;
pub mod payments;
