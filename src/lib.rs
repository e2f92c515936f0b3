//! fintrack - personal finance aggregation for the terminal
//!
//! Turns a snapshot of transactions, categories and budgets into dashboard
//! figures: overall totals and savings rate, a monthly income/expense series,
//! spending by category, a recent running-balance trend and budget progress.
//!
//! # Architecture
//!
//! - `models`: typed ledger records and the [`models::Money`] type
//! - `reports`: the aggregation engine, pure functions over slices
//! - `storage`: the [`storage::LedgerSource`] seam and file-backed snapshots
//! - `config`: paths and user settings
//! - `display`: terminal formatting helpers
//! - `export`: JSON/YAML export of the full report bundle
//! - `cli`: command handlers used by the `fintrack` binary
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fintrack::models::{Money, Transaction};
//! use fintrack::reports::Totals;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! let ledger = vec![
//!     Transaction::income(Money::from_units(100), day),
//!     Transaction::expense(Money::from_units(40), day),
//! ];
//! let totals = Totals::compute(&ledger);
//! assert_eq!(totals.balance, Money::from_units(60));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{FintrackError, FintrackResult};
