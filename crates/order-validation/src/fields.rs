//! Syntactic checks on the textual encoding of individual order fields.
//!
//! All checks are total: malformed input yields `false`.

use {regex::Regex, std::sync::LazyLock};

static ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^0x[0-9a-fA-F]{40}$").unwrap());
static ORDER_HASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^0x[0-9a-fA-F]{64}$").unwrap());
// A single digit, or no leading zero. Signs, fractions and exponents are
// rejected.
static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^(?:[1-9][0-9]*|[0-9])$").unwrap());

/// `0x` followed by exactly 40 hex characters of any case.
pub fn is_address(s: &str) -> bool {
    ADDRESS.is_match(s)
}

/// `0x` followed by exactly 64 hex characters of any case.
pub fn is_order_hash(s: &str) -> bool {
    ORDER_HASH.is_match(s)
}

/// A non-negative base 10 integer without a leading zero (except `0` itself).
pub fn is_amount(s: &str) -> bool {
    AMOUNT.is_match(s)
}
