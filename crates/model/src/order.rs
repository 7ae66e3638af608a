//! Contains the order submission as it is received over the wire and the typed
//! order data that the canonical order hash is computed over.

use {
    crate::{
        decimal_text,
        hashing::{Hasher, Keccak256},
    },
    alloy_primitives::{Address, B256, U256},
    alloy_sol_types::SolValue,
    serde::{Deserialize, Serialize},
    std::{
        fmt::{self, Display, Formatter},
        str::FromStr,
    },
};

/// An order as submitted by a client for authentication.
///
/// The fields are kept in their textual form since checking their syntax is
/// part of the validation itself.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreation {
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub order_hash: String,
    pub raw_data: RawOrderData,
}

/// The signed order parameters, exactly as supplied by the client.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrderData {
    #[serde(default)]
    pub maker_address: String,
    #[serde(default)]
    pub maker_sell_token_address: String,
    #[serde(default, with = "decimal_text")]
    pub maker_sell_token_amount: String,
    #[serde(default)]
    pub maker_buy_token_address: String,
    #[serde(default, with = "decimal_text")]
    pub maker_buy_token_amount: String,
    #[serde(default, with = "decimal_text")]
    pub nonce: String,
    #[serde(default)]
    pub exchange_address: String,
}

impl RawOrderData {
    /// Returns the raw value of the specified field.
    pub fn get(&self, field: OrderField) -> &str {
        match field {
            OrderField::MakerAddress => &self.maker_address,
            OrderField::MakerSellTokenAddress => &self.maker_sell_token_address,
            OrderField::MakerSellTokenAmount => &self.maker_sell_token_amount,
            OrderField::MakerBuyTokenAddress => &self.maker_buy_token_address,
            OrderField::MakerBuyTokenAmount => &self.maker_buy_token_amount,
            OrderField::Nonce => &self.nonce,
            OrderField::ExchangeAddress => &self.exchange_address,
        }
    }
}

/// Identifies one of the signed order parameters.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OrderField {
    MakerAddress,
    MakerSellTokenAddress,
    MakerSellTokenAmount,
    MakerBuyTokenAddress,
    MakerBuyTokenAmount,
    Nonce,
    ExchangeAddress,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Address,
    Amount,
}

impl OrderField {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::MakerAddress
            | Self::MakerSellTokenAddress
            | Self::MakerBuyTokenAddress
            | Self::ExchangeAddress => FieldKind::Address,
            Self::MakerSellTokenAmount | Self::MakerBuyTokenAmount | Self::Nonce => {
                FieldKind::Amount
            }
        }
    }

    /// The camel case name used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MakerAddress => "makerAddress",
            Self::MakerSellTokenAddress => "makerSellTokenAddress",
            Self::MakerSellTokenAmount => "makerSellTokenAmount",
            Self::MakerBuyTokenAddress => "makerBuyTokenAddress",
            Self::MakerBuyTokenAmount => "makerBuyTokenAmount",
            Self::Nonce => "nonce",
            Self::ExchangeAddress => "exchangeAddress",
        }
    }

    /// Human readable description of a malformed value for this field.
    pub fn invalid_message(&self) -> &'static str {
        match self {
            Self::MakerAddress => "Invalid maker address",
            Self::MakerSellTokenAddress => "Invalid maker sell token address",
            Self::MakerSellTokenAmount => "Invalid maker sell token amount",
            Self::MakerBuyTokenAddress => "Invalid maker buy token address",
            Self::MakerBuyTokenAmount => "Invalid maker buy token amount",
            Self::Nonce => "Invalid nonce",
            Self::ExchangeAddress => "Invalid exchange address",
        }
    }
}

impl Display for OrderField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The typed order parameters that get hashed and signed.
///
/// Field order matches the order of the packed encoding.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct OrderData {
    pub maker: Address,
    pub sell_token: Address,
    pub sell_amount: U256,
    pub buy_token: Address,
    pub buy_amount: U256,
    pub nonce: U256,
    pub exchange: Address,
}

#[derive(Debug, thiserror::Error)]
#[error("{field} has an unrepresentable value {value:?}")]
pub struct InvalidOrderField {
    pub field: OrderField,
    pub value: String,
}

impl OrderData {
    /// Four addresses and three uint256 values, tightly packed.
    pub const PACKED_LEN: usize = 4 * 20 + 3 * 32;

    /// Returns the tightly packed ABI encoding of
    /// `(address, address, uint256, address, uint256, uint256, address)`.
    pub fn packed(&self) -> Vec<u8> {
        (
            self.maker,
            self.sell_token,
            self.sell_amount,
            self.buy_token,
            self.buy_amount,
            self.nonce,
            self.exchange,
        )
            .abi_encode_packed()
    }

    /// Computes the order hash with the specified hash primitive.
    pub fn hash_with(&self, hasher: &dyn Hasher) -> B256 {
        hasher.hash(&self.packed())
    }

    /// Computes the order hash, i.e. the Keccak-256 of [`Self::packed`].
    pub fn hash(&self) -> B256 {
        self.hash_with(&Keccak256)
    }
}

impl TryFrom<&RawOrderData> for OrderData {
    type Error = InvalidOrderField;

    fn try_from(raw: &RawOrderData) -> Result<Self, Self::Error> {
        let address = |field: OrderField| {
            Address::from_str(raw.get(field)).map_err(|_| invalid(raw, field))
        };
        let amount = |field: OrderField| {
            U256::from_str_radix(raw.get(field), 10).map_err(|_| invalid(raw, field))
        };

        Ok(Self {
            maker: address(OrderField::MakerAddress)?,
            sell_token: address(OrderField::MakerSellTokenAddress)?,
            sell_amount: amount(OrderField::MakerSellTokenAmount)?,
            buy_token: address(OrderField::MakerBuyTokenAddress)?,
            buy_amount: amount(OrderField::MakerBuyTokenAmount)?,
            nonce: amount(OrderField::Nonce)?,
            exchange: address(OrderField::ExchangeAddress)?,
        })
    }
}

fn invalid(raw: &RawOrderData, field: OrderField) -> InvalidOrderField {
    InvalidOrderField {
        field,
        value: raw.get(field).to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::hashing::MockHasher,
        alloy_primitives::address,
        hex_literal::hex,
        serde_json::json,
    };

    fn order() -> OrderData {
        OrderData {
            maker: address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            sell_token: address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
            sell_amount: U256::from(1_000_000_000_000_000_000_u128),
            buy_token: address!("6B175474E89094C44Da98b954EedeAC495271d0F"),
            buy_amount: U256::from(2_500_000_000_000_000_000_000_u128),
            nonce: U256::from(1),
            exchange: address!("9008D19f58AAbD9eD0D60971565AA8510560ab41"),
        }
    }

    #[test]
    fn packed_encoding_layout() {
        let packed = order().packed();
        assert_eq!(packed.len(), OrderData::PACKED_LEN);
        assert_eq!(
            &packed[..20],
            hex!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266")
        );
        assert_eq!(
            &packed[20..40],
            hex!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2")
        );
        assert_eq!(
            &packed[40..72],
            hex!("0000000000000000000000000000000000000000000000000de0b6b3a7640000")
        );
        assert_eq!(
            &packed[72..92],
            hex!("6b175474e89094c44da98b954eedeac495271d0f")
        );
        assert_eq!(
            &packed[92..124],
            hex!("0000000000000000000000000000000000000000000000878678326eac900000")
        );
        assert_eq!(
            &packed[124..156],
            hex!("0000000000000000000000000000000000000000000000000000000000000001")
        );
        assert_eq!(
            &packed[156..],
            hex!("9008d19f58aabd9ed0d60971565aa8510560ab41")
        );
    }

    #[test]
    fn order_hash() {
        assert_eq!(
            order().hash(),
            B256::new(hex!(
                "12ff3e744a77b055a8ffc351e948bdbd89d6f6ecab7f250baaf4e21ddfbd7004"
            )),
        );
    }

    #[test]
    fn order_hash_changes_with_every_field() {
        let original = order().hash();
        let tampered = [
            OrderData {
                sell_amount: order().sell_amount + U256::from(1),
                ..order()
            },
            OrderData {
                buy_amount: order().buy_amount + U256::from(1),
                ..order()
            },
            OrderData {
                nonce: U256::ZERO,
                ..order()
            },
            OrderData {
                sell_token: order().buy_token,
                buy_token: order().sell_token,
                ..order()
            },
            OrderData {
                maker: order().exchange,
                exchange: order().maker,
                ..order()
            },
        ];
        for order in tampered {
            assert_ne!(order.hash(), original, "{order:?}");
        }

        assert_eq!(
            OrderData {
                sell_amount: order().sell_amount + U256::from(1),
                ..order()
            }
            .hash(),
            B256::new(hex!(
                "f0fc8f8e59be56a7a2c2ae6c4217084e20a4ad2ab07d6dc1b5b02e89fef37e6d"
            )),
        );
    }

    #[test]
    fn hashes_packed_encoding_with_supplied_hasher() {
        let mut hasher = MockHasher::new();
        hasher
            .expect_hash()
            .withf(|data| data.len() == OrderData::PACKED_LEN && data == order().packed())
            .times(1)
            .returning(|_| B256::repeat_byte(0x42));

        assert_eq!(order().hash_with(&hasher), B256::repeat_byte(0x42));
    }

    #[test]
    fn deserialize_order_creation() {
        let creation: OrderCreation = serde_json::from_value(json!({
            "signature": "0x01",
            "orderHash": "0x02",
            "rawData": {
                "makerAddress": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
                "makerSellTokenAddress": "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
                "makerSellTokenAmount": 1000000000000000000u64,
                "makerBuyTokenAddress": "0x6B175474E89094C44Da98b954EedeAC495271d0F",
                "makerBuyTokenAmount": "2500000000000000000000",
                "nonce": 1,
                "exchangeAddress": "0x9008D19f58AAbD9eD0D60971565AA8510560ab41",
            },
        }))
        .unwrap();

        assert_eq!(creation.signature, "0x01");
        assert_eq!(creation.order_hash, "0x02");
        assert_eq!(
            creation.raw_data.maker_sell_token_amount,
            "1000000000000000000"
        );
        assert_eq!(
            creation.raw_data.maker_buy_token_amount,
            "2500000000000000000000"
        );
        assert_eq!(creation.raw_data.nonce, "1");
        assert_eq!(OrderData::try_from(&creation.raw_data).unwrap(), order());
    }

    #[test]
    fn missing_fields_decode_as_empty() {
        let creation: OrderCreation = serde_json::from_value(json!({ "rawData": {} })).unwrap();
        assert_eq!(creation, OrderCreation::default());
        assert!(serde_json::from_value::<OrderCreation>(json!({})).is_err());
    }

    #[test]
    fn amounts_above_uint256_are_unrepresentable() {
        let raw = RawOrderData {
            maker_address: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string(),
            maker_sell_token_address: "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2".to_string(),
            maker_sell_token_amount: "1".to_string(),
            maker_buy_token_address: "0x6B175474E89094C44Da98b954EedeAC495271d0F".to_string(),
            maker_buy_token_amount: U256::MAX.to_string(),
            nonce: "115792089237316195423570985008687907853269984665640564039457584007913129639936"
                .to_string(),
            exchange_address: "0x9008D19f58AAbD9eD0D60971565AA8510560ab41".to_string(),
        };

        let err = OrderData::try_from(&raw).unwrap_err();
        assert_eq!(err.field, OrderField::Nonce);
        assert_eq!(err.value, raw.nonce);
    }

    #[test]
    fn field_lookup() {
        let raw = RawOrderData {
            nonce: "7".to_string(),
            exchange_address: "0xabc".to_string(),
            ..Default::default()
        };
        assert_eq!(raw.get(OrderField::Nonce), "7");
        assert_eq!(raw.get(OrderField::ExchangeAddress), "0xabc");
        assert_eq!(raw.get(OrderField::MakerAddress), "");
        assert_eq!(OrderField::MakerBuyTokenAmount.kind(), FieldKind::Amount);
        assert_eq!(OrderField::ExchangeAddress.kind(), FieldKind::Address);
        assert_eq!(OrderField::MakerSellTokenAddress.to_string(), "makerSellTokenAddress");
    }
}
