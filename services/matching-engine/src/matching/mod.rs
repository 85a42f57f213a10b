//! Matching logic module
//!
//! Crossing tests and trade execution used by the price-time priority loop

pub mod crossing;
pub mod executor;

pub use crossing::{can_match, crosses};
pub use executor::TradeExecutor;
