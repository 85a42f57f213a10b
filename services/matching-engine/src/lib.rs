//! Matching Engine Service
//!
//! Back/lay limit order matching for a single betting-exchange market,
//! with price-time priority.
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced
//! - Trades execute at the resting (maker) price
//! - Level volume equals the sum of its orders' remaining stakes
//! - The book never rests crossable liquidity
//! - Failed operations leave the book unchanged

pub mod book;
pub mod matching;
pub mod engine;
pub mod config;
mod clock;

pub use config::EngineConfig;
pub use engine::{BookSnapshot, OrderRequest, Orderbook, SubmitOutcome, SubmitStatus};
