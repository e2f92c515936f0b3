//! Display formatting for terminal output
//!
//! Currency formatting lives on [`crate::models::Money`]; this module holds
//! the shared helpers the reports use for percentages, bars and rules.

pub mod report;

pub use report::{format_bar, format_percentage, separator};
