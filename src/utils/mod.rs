//! Utility modules for Panelist.
//!
//! - [`datetime`] - Parsing and display formatting of backend timestamps

pub mod datetime;
