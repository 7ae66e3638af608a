//! Contains the order model that is shared between the validation pipeline and
//! the HTTP boundary, together with the cryptographic primitives used to
//! authenticate orders.

pub mod decimal_text;
pub mod hashing;
pub mod order;
pub mod signature;

pub use self::{
    hashing::{Hasher, Keccak256},
    order::{OrderCreation, OrderData, OrderField, RawOrderData},
    signature::{EcdsaSignature, RecoveryError, Secp256k1Recovery, SignatureRecovering},
};
