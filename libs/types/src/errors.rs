//! Error types for the matching engine
//!
//! Comprehensive error taxonomy using thiserror. Every variant is local
//! and recoverable: a failed operation leaves the book exactly as it was.

use crate::ids::OrderId;
use crate::numeric::Price;
use rust_decimal::Decimal;
use thiserror::Error;

/// Rejected order input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid price: {0} (must be greater than 1.0)")]
    InvalidPrice(Decimal),

    #[error("Invalid stake: {0} (must be greater than zero)")]
    InvalidStake(Decimal),

    #[error("Malformed {field}: {value:?}")]
    Malformed { field: &'static str, value: String },
}

impl ValidationError {
    /// Name of the offending input field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidPrice(_) => "price",
            ValidationError::InvalidStake(_) => "stake",
            ValidationError::Malformed { field, .. } => *field,
        }
    }
}

/// Order book operation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Order already exists: {order_id}")]
    DuplicateOrder { order_id: OrderId },

    /// A level was addressed with an order of a different price.
    /// Indicates an engine defect; surfaced as an error rather than assumed away.
    #[error("Price mismatch: level {level_price}, order {order_price}")]
    PriceMismatch { level_price: Price, order_price: Price },

    #[error("Order not found: {order_id}")]
    NotFound { order_id: OrderId },

    /// Resting the order would push the level's total volume past the decimal range
    #[error("Volume overflow at price {price}")]
    VolumeOverflow { price: Price },
}

impl BookError {
    /// Short machine-readable kind, for callers mapping errors onto a wire format
    pub fn kind(&self) -> &'static str {
        match self {
            BookError::Validation(_) => "VALIDATION",
            BookError::DuplicateOrder { .. } => "DUPLICATE_ORDER",
            BookError::PriceMismatch { .. } => "PRICE_MISMATCH",
            BookError::NotFound { .. } => "NOT_FOUND",
            BookError::VolumeOverflow { .. } => "VOLUME_OVERFLOW",
        }
    }
}
