use {
    alloy_primitives::{Address, B256},
    model::order::OrderField,
};

/// Outcome of validating a single order.
///
/// Exactly one variant is produced per order, determined by the first check
/// that fails.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(err) => Some(err),
        }
    }

    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid(ValidationError::InvalidField { .. }) => "invalid_field",
            Self::Invalid(ValidationError::HashMismatch { .. }) => "hash_mismatch",
            Self::Invalid(ValidationError::InvalidSignatureEncoding) => {
                "invalid_signature_encoding"
            }
            Self::Invalid(ValidationError::SignerMismatch { .. }) => "signer_mismatch",
        }
    }
}

impl From<Result<(), ValidationError>> for ValidationResult {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(err) => Self::Invalid(err),
        }
    }
}

/// Reasons an order is rejected.
///
/// None of these are failures of the validator itself; the caller is expected
/// to reject the order.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A field does not have the expected syntax.
    #[error("{}: {value:?}", field.invalid_message())]
    InvalidField { field: OrderField, value: String },
    /// The order fields do not reproduce the claimed order hash.
    #[error("incorrect order hash, fields hash to {produced}")]
    HashMismatch { produced: B256 },
    /// The signature could not be decoded or no key could be recovered from it.
    #[error("incorrect signature")]
    InvalidSignatureEncoding,
    /// The signature was produced by a key other than the maker's.
    #[error("incorrect signer {recovered}")]
    SignerMismatch { recovered: Address },
}

/// Why a signature does not authenticate the claimed signer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SignerFailure {
    InvalidSignatureEncoding,
    SignerMismatch,
}

/// Result of checking a signature against a claimed signer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SignerVerification {
    pub matched: bool,
    /// Only known if recovery succeeded.
    pub recovered: Option<Address>,
    pub reason: Option<SignerFailure>,
}

impl SignerVerification {
    pub fn into_result(self) -> Result<Address, ValidationError> {
        match (self.reason, self.recovered) {
            (None, Some(recovered)) => Ok(recovered),
            (Some(SignerFailure::SignerMismatch), Some(recovered)) => {
                Err(ValidationError::SignerMismatch { recovered })
            }
            _ => Err(ValidationError::InvalidSignatureEncoding),
        }
    }
}
