//! Response bodies of the validation route.

use {
    alloy::primitives::B256,
    model::order::FieldKind,
    order_validation::{ValidationError, ValidationResult},
    serde::Serialize,
};

/// Outcome of `POST /validate/order`.
///
/// Invalid orders carry a message and at most one diagnostic describing what
/// was wrong.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub produced_order_hash: Option<B256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovered_address: Option<String>,
}

impl From<&ValidationResult> for ValidationResponse {
    fn from(result: &ValidationResult) -> Self {
        let Some(error) = result.error() else {
            return Self {
                valid: true,
                ..Default::default()
            };
        };
        let invalid = Self {
            valid: false,
            ..Default::default()
        };
        match error {
            ValidationError::InvalidField { field, value } => {
                let message = Some(field.invalid_message());
                match field.kind() {
                    FieldKind::Address => Self {
                        message,
                        address: Some(value.clone()),
                        ..invalid
                    },
                    FieldKind::Amount => Self {
                        message,
                        amount: Some(value.clone()),
                        ..invalid
                    },
                }
            }
            ValidationError::HashMismatch { produced } => Self {
                message: Some("Incorrect order hash"),
                produced_order_hash: Some(*produced),
                ..invalid
            },
            ValidationError::InvalidSignatureEncoding => Self {
                message: Some("Incorrect signature"),
                ..invalid
            },
            ValidationError::SignerMismatch { recovered } => Self {
                message: Some("Incorrect signer"),
                recovered_address: Some(recovered.to_checksum(None)),
                ..invalid
            },
        }
    }
}
