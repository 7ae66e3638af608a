//! Authentication of off-chain orders.
//!
//! An order is accepted when its fields are well formed, the claimed order
//! hash matches the hash recomputed from those fields and the signature over
//! the `personal_sign` message of that hash was produced by the maker.
//! Validation stops at the first failing check.

pub mod fields;
pub mod signature;
pub mod types;
pub mod validator;

pub use {
    types::{ValidationError, ValidationResult},
    validator::{OrderValidating, OrderValidator},
};

use model::order::OrderCreation;

/// Validates the order with the default hashing and recovery primitives.
pub fn validate(order: &OrderCreation) -> ValidationResult {
    OrderValidator::default().validate(order)
}
