use alloy_primitives::B256;

/// A 256-bit hash primitive.
///
/// Everything that ends up being compared against data produced by an
/// external signer goes through this trait so callers can swap in fixtures.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
pub trait Hasher: Send + Sync {
    fn hash(&self, data: &[u8]) -> B256;
}

/// The Keccak-256 hash used by Ethereum (not the finalized SHA3-256).
#[derive(Clone, Copy, Debug, Default)]
pub struct Keccak256;

impl Hasher for Keccak256 {
    fn hash(&self, data: &[u8]) -> B256 {
        alloy_primitives::keccak256(data)
    }
}
