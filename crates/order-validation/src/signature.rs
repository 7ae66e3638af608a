use {
    crate::types::{SignerFailure, SignerVerification},
    alloy_primitives::{Address, B256},
    model::{
        hashing::Hasher,
        signature::{self, EcdsaSignature, RecoveryError, SignatureRecovering},
    },
};

/// Decodes a hex encoded signature and recovers the address that signed the
/// specified message.
pub fn recover_address(
    recovery: &dyn SignatureRecovering,
    message: &B256,
    signature: &str,
) -> Result<Address, RecoveryError> {
    let signature = signature.parse::<EcdsaSignature>()?;
    recovery.recover(message, &signature)
}

/// Checks that `signature` is a `personal_sign` signature of `order_hash` made
/// by `claimed`.
///
/// Addresses are compared by value so the case of their hex encoding is
/// irrelevant.
pub fn verify_signer(
    hasher: &dyn Hasher,
    recovery: &dyn SignatureRecovering,
    claimed: Address,
    order_hash: &B256,
    signature: &str,
) -> SignerVerification {
    let message = signature::signing_message(hasher, order_hash);
    let recovered = match recover_address(recovery, &message, signature) {
        Ok(recovered) => recovered,
        Err(err) => {
            tracing::debug!(?err, %order_hash, "unable to recover signer");
            return SignerVerification {
                matched: false,
                recovered: None,
                reason: Some(SignerFailure::InvalidSignatureEncoding),
            };
        }
    };

    if recovered == claimed {
        SignerVerification {
            matched: true,
            recovered: Some(recovered),
            reason: None,
        }
    } else {
        tracing::debug!(%claimed, %recovered, %order_hash, "unexpected signer");
        SignerVerification {
            matched: false,
            recovered: Some(recovered),
            reason: Some(SignerFailure::SignerMismatch),
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy_primitives::address,
        hex_literal::hex,
        model::{
            hashing::{Keccak256, MockHasher},
            signature::{MockSignatureRecovering, Secp256k1Recovery},
        },
    };

    const ORDER_HASH: B256 = B256::new(hex!(
        "12ff3e744a77b055a8ffc351e948bdbd89d6f6ecab7f250baaf4e21ddfbd7004"
    ));
    const MAKER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const SIGNATURE: &str = "0xbb50e2d89a4ed70663d080659fe0ad4b9bc3e06c17a227433966cb59ceee020d\
                             6448d4ce0793eff7605e21062dffb308e340689db2a8435904c8d5e90a36986c1b";
    const OTHER_SIGNATURE: &str = "0x97855f402631f09e602e5ccadc219503f07cdd4c73b2215b5418f52a7fdbfcd9\
                                   583977ca93f46ad10ec04e0e9f00359337cabc67361f9967b2fc3237634e9d7b1c";

    #[test]
    fn matching_signer() {
        let verification =
            verify_signer(&Keccak256, &Secp256k1Recovery, MAKER, &ORDER_HASH, SIGNATURE);
        assert_eq!(
            verification,
            SignerVerification {
                matched: true,
                recovered: Some(MAKER),
                reason: None,
            }
        );
    }

    #[test]
    fn signature_from_different_key() {
        let verification = verify_signer(
            &Keccak256,
            &Secp256k1Recovery,
            MAKER,
            &ORDER_HASH,
            OTHER_SIGNATURE,
        );
        assert_eq!(
            verification,
            SignerVerification {
                matched: false,
                recovered: Some(address!("70997970C51812dc3A010C7d01b50e0d17dc79C8")),
                reason: Some(SignerFailure::SignerMismatch),
            }
        );
    }

    #[test]
    fn signature_over_different_hash() {
        let verification = verify_signer(
            &Keccak256,
            &Secp256k1Recovery,
            MAKER,
            &B256::new(hex!(
                "f0fc8f8e59be56a7a2c2ae6c4217084e20a4ad2ab07d6dc1b5b02e89fef37e6d"
            )),
            SIGNATURE,
        );
        assert!(!verification.matched);
        assert_eq!(verification.reason, Some(SignerFailure::SignerMismatch));
        assert_ne!(verification.recovered, Some(MAKER));
    }

    #[test]
    fn malformed_signatures() {
        for signature in [
            "",
            "0x",
            &SIGNATURE[..SIGNATURE.len() - 2],
            &SIGNATURE[2..],
            "0x0000000000000000000000000000000000000000000000000000000000000000\
               00000000000000000000000000000000000000000000000000000000000000001b",
        ] {
            let verification =
                verify_signer(&Keccak256, &Secp256k1Recovery, MAKER, &ORDER_HASH, signature);
            assert_eq!(
                verification,
                SignerVerification {
                    matched: false,
                    recovered: None,
                    reason: Some(SignerFailure::InvalidSignatureEncoding),
                },
                "{signature}"
            );
        }
    }

    #[test]
    fn recovers_from_prefixed_digest() {
        let mut hasher = MockHasher::new();
        hasher
            .expect_hash()
            .withf(|data| {
                data.len() == 60
                    && data.starts_with(b"\x19Ethereum Signed Message:\n32")
                    && data.ends_with(ORDER_HASH.as_slice())
            })
            .times(1)
            .returning(|_| B256::repeat_byte(0x11));

        let mut recovery = MockSignatureRecovering::new();
        recovery
            .expect_recover()
            .withf(|message, signature| {
                *message == B256::repeat_byte(0x11) && signature.v == 27
            })
            .times(1)
            .returning(|_, _| Ok(MAKER));

        let verification = verify_signer(&hasher, &recovery, MAKER, &ORDER_HASH, SIGNATURE);
        assert!(verification.matched);
    }

    #[test]
    fn recovery_failure_is_an_encoding_error() {
        let mut recovery = MockSignatureRecovering::new();
        recovery
            .expect_recover()
            .returning(|_, signature| Err(RecoveryError::InvalidRecoveryId(signature.v)));

        let verification = verify_signer(&Keccak256, &recovery, MAKER, &ORDER_HASH, SIGNATURE);
        assert_eq!(
            verification.reason,
            Some(SignerFailure::InvalidSignatureEncoding)
        );
        assert_eq!(verification.recovered, None);
    }
}
