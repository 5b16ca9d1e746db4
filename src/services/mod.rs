//! Business logic services.

pub mod dashboard;
pub mod import;
pub mod store;
