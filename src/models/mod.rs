//! Dataset records and filter selections.

pub mod filter;
pub mod record;
