//! Types library for the betting exchange order book
//!
//! Core type definitions shared by the matching engine and its callers,
//! built on deterministic decimal arithmetic.
//!
//! # Modules
//! - `ids`: Unique identifiers (OrderId, TradeId)
//! - `numeric`: Fixed-point decimal types (Price, Stake)
//! - `order`: Order lifecycle types (Side, Order, OrderStatus)
//! - `trade`: Trade execution types
//! - `errors`: Error taxonomy

pub mod ids;
pub mod numeric;
pub mod order;
pub mod trade;
pub mod errors;
