//! Core rate abstractions

pub mod cache;
pub mod config;
pub mod date;
pub mod error;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use cache::Cache;
pub use date::DateKey;
pub use error::RatesError;
pub use rates::{CurrencyId, RateChange, RateRecord, RateSet, RatesSource};
