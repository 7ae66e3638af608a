use {
    crate::hashing::Hasher,
    alloy_primitives::{Address, B256, U256},
    std::{
        fmt::{self, Debug, Formatter},
        str::FromStr,
    },
};

/// The prefix of EIP-191 `personal_sign` messages carrying a 32 byte payload.
///
/// https://eips.ethereum.org/EIPS/eip-191
pub const ETH_SIGN_PREFIX: &[u8; 28] = b"\x19Ethereum Signed Message:\n32";

/// Returns the message that actually gets signed for the specified hash
/// according to the `personal_sign` convention.
pub fn signing_message(hasher: &dyn Hasher, hash: &B256) -> B256 {
    let mut buffer = [0u8; 60];
    buffer[..28].copy_from_slice(ETH_SIGN_PREFIX);
    buffer[28..].copy_from_slice(hash.as_slice());
    hasher.hash(&buffer)
}

#[derive(Debug, thiserror::Error)]
pub enum RecoveryError {
    #[error("signature is not a 0x prefixed hex string")]
    MissingPrefix,
    #[error("signature is not valid hex: {0}")]
    InvalidHex(#[from] const_hex::FromHexError),
    #[error("signature must be 65 bytes long but is {0}")]
    InvalidLength(usize),
    #[error("invalid recovery id {0}")]
    InvalidRecoveryId(u8),
    #[error(transparent)]
    Recovery(#[from] alloy_primitives::SignatureError),
}

/// An ECDSA signature over secp256k1, ordered as r, s, v.
#[derive(Eq, PartialEq, Clone, Copy, Default, Hash)]
pub struct EcdsaSignature {
    pub r: B256,
    pub s: B256,
    pub v: u8,
}

impl EcdsaSignature {
    /// Parses the 65 signature bytes.
    ///
    /// `v` may be given either as 27/28 or as the raw recovery id 0/1; it is
    /// normalized to 27/28.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecoveryError> {
        let bytes: &[u8; 65] = bytes
            .try_into()
            .map_err(|_| RecoveryError::InvalidLength(bytes.len()))?;
        let v = match bytes[64] {
            v @ (27 | 28) => v,
            v @ (0 | 1) => v + 27,
            v => return Err(RecoveryError::InvalidRecoveryId(v)),
        };
        Ok(Self {
            r: B256::from_slice(&bytes[..32]),
            s: B256::from_slice(&bytes[32..64]),
            v,
        })
    }

    /// r + s + v
    pub fn to_bytes(self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(self.r.as_slice());
        bytes[32..64].copy_from_slice(self.s.as_slice());
        bytes[64] = self.v;
        bytes
    }

    pub fn y_parity(&self) -> bool {
        self.v == 28
    }
}

impl FromStr for EcdsaSignature {
    type Err = RecoveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").ok_or(RecoveryError::MissingPrefix)?;
        Self::from_bytes(&const_hex::decode(s)?)
    }
}

impl Debug for EcdsaSignature {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_tuple("EcdsaSignature")
            .field(&const_hex::encode_prefixed(self.to_bytes()))
            .finish()
    }
}

/// Recovers the address of the key that produced a signature.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
pub trait SignatureRecovering: Send + Sync {
    fn recover(
        &self,
        message: &B256,
        signature: &EcdsaSignature,
    ) -> Result<Address, RecoveryError>;
}

/// Public key recovery on the secp256k1 curve.
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1Recovery;

impl SignatureRecovering for Secp256k1Recovery {
    fn recover(
        &self,
        message: &B256,
        signature: &EcdsaSignature,
    ) -> Result<Address, RecoveryError> {
        let signature = alloy_primitives::Signature::new(
            U256::from_be_bytes(signature.r.0),
            U256::from_be_bytes(signature.s.0),
            signature.y_parity(),
        );
        Ok(signature.recover_address_from_prehash(message)?)
    }
}
