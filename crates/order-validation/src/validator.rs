use {
    crate::{
        fields,
        signature,
        types::{ValidationError, ValidationResult},
    },
    alloy_primitives::{Address, B256},
    model::{
        hashing::{Hasher, Keccak256},
        order::{FieldKind, OrderCreation, OrderData, OrderField, RawOrderData},
        signature::{Secp256k1Recovery, SignatureRecovering},
    },
    std::sync::Arc,
};

/// Authenticates order submissions.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
pub trait OrderValidating: Send + Sync {
    /// Runs all checks on the order and reports the first one that failed.
    fn validate(&self, order: &OrderCreation) -> ValidationResult;
}

/// The order in which fields get checked. Addresses come before amounts.
pub const FIELD_CHECKS: [OrderField; 7] = [
    OrderField::MakerAddress,
    OrderField::MakerSellTokenAddress,
    OrderField::MakerBuyTokenAddress,
    OrderField::ExchangeAddress,
    OrderField::MakerSellTokenAmount,
    OrderField::MakerBuyTokenAmount,
    OrderField::Nonce,
];

/// Validates orders in a fixed sequence of stages:
///
/// 1. field syntax ([`FIELD_CHECKS`])
/// 2. the claimed order hash is reproduced from the fields
/// 3. the signature over that hash was made by the maker
///
/// Stages are pure, so a validator can be shared across any number of
/// concurrent requests.
#[derive(Clone)]
pub struct OrderValidator {
    hasher: Arc<dyn Hasher>,
    recovery: Arc<dyn SignatureRecovering>,
}

impl Default for OrderValidator {
    fn default() -> Self {
        Self::new(Arc::new(Keccak256), Arc::new(Secp256k1Recovery))
    }
}

impl OrderValidator {
    pub fn new(hasher: Arc<dyn Hasher>, recovery: Arc<dyn SignatureRecovering>) -> Self {
        Self { hasher, recovery }
    }

    /// Checks the syntax of every field and converts them to their typed
    /// representation.
    pub fn check_fields(raw: &RawOrderData) -> Result<OrderData, ValidationError> {
        for field in FIELD_CHECKS {
            let value = raw.get(field);
            let well_formed = match field.kind() {
                FieldKind::Address => fields::is_address(value),
                FieldKind::Amount => fields::is_amount(value),
            };
            if !well_formed {
                return Err(ValidationError::InvalidField {
                    field,
                    value: value.to_owned(),
                });
            }
        }

        // Only amounts that don't fit into a uint256 can fail here.
        OrderData::try_from(raw).map_err(|err| ValidationError::InvalidField {
            field: err.field,
            value: err.value,
        })
    }

    /// Recomputes the order hash and compares it with the claimed one.
    ///
    /// Returns the produced hash on success.
    pub fn check_order_hash(
        &self,
        order: &OrderData,
        claimed: &str,
    ) -> Result<B256, ValidationError> {
        let produced = order.hash_with(self.hasher.as_ref());
        let matches = fields::is_order_hash(claimed)
            && claimed
                .parse::<B256>()
                .is_ok_and(|claimed| claimed == produced);
        if !matches {
            return Err(ValidationError::HashMismatch { produced });
        }
        Ok(produced)
    }

    /// Checks that the maker signed the order hash.
    pub fn check_signer(
        &self,
        maker: Address,
        order_hash: &B256,
        signature: &str,
    ) -> Result<(), ValidationError> {
        signature::verify_signer(
            self.hasher.as_ref(),
            self.recovery.as_ref(),
            maker,
            order_hash,
            signature,
        )
        .into_result()
        .map(|_| ())
    }

    fn run_stages(&self, order: &OrderCreation) -> Result<(), ValidationError> {
        let data = Self::check_fields(&order.raw_data)?;
        let order_hash = self.check_order_hash(&data, &order.order_hash)?;
        self.check_signer(data.maker, &order_hash, &order.signature)
    }
}

impl OrderValidating for OrderValidator {
    fn validate(&self, order: &OrderCreation) -> ValidationResult {
        let result = ValidationResult::from(self.run_stages(order));
        match result.error() {
            None => tracing::debug!(order_hash = %order.order_hash, "order is valid"),
            Some(err) => tracing::debug!(order_hash = %order.order_hash, %err, "order is invalid"),
        }
        result
    }
}
