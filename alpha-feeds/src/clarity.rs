//! Decoding of Clarity values returned by Stacks read-only calls
//!
//! Only the pieces the Pyth oracle needs are covered: encoding a 32-byte feed id
//! as a `buff` argument, and pulling the `price` field out of a serialized
//! `(ok (tuple ...))` result.
//!
//! Result layout around the price field:
//!
//! ```text
//! .. | 05 | 70 72 69 63 65 | tt | 16 bytes big-endian | ..
//!      len   "price"         type  price * 10^8
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Length-prefixed `price` key inside a serialized tuple
pub const PRICE_MARKER: [u8; 6] = [0x05, b'p', b'r', b'i', b'c', b'e'];

/// Clarity type id preceding every value (int, uint, ...)
const TYPE_TAG_LEN: usize = 1;

/// Width of a Clarity int/uint
const INT_FIELD_LEN: usize = 16;

/// Oracle prices carry 8 implied decimals
const PRICE_SCALE: u32 = 8;

/// Clarity type id for a buffer
const BUFFER_TYPE_ID: u8 = 0x02;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClarityError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("price field not found in result")]
    MarkerNotFound,

    #[error("price field truncated")]
    Truncated,

    #[error("price {0} out of range")]
    OutOfRange(u128),
}

/// Serialize a hex id (with or without `0x`) as a Clarity buffer argument
pub fn buffer_argument(hex_id: &str) -> Result<String, ClarityError> {
    let stripped = hex_id.trim_start_matches("0x");
    let bytes = hex::decode(stripped).map_err(|e| ClarityError::InvalidHex(e.to_string()))?;

    Ok(format!(
        "0x{:02x}{:08x}{}",
        BUFFER_TYPE_ID,
        bytes.len(),
        hex::encode(bytes)
    ))
}

/// Extract the oracle price from a hex-encoded read-only call result
pub fn decode_price(result_hex: &str) -> Result<Decimal, ClarityError> {
    let bytes = hex::decode(result_hex.trim_start_matches("0x"))
        .map_err(|e| ClarityError::InvalidHex(e.to_string()))?;

    let marker_at = bytes
        .windows(PRICE_MARKER.len())
        .position(|window| window == PRICE_MARKER)
        .ok_or(ClarityError::MarkerNotFound)?;

    let start = marker_at + PRICE_MARKER.len() + TYPE_TAG_LEN;
    let field: [u8; INT_FIELD_LEN] = bytes
        .get(start..start + INT_FIELD_LEN)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(ClarityError::Truncated)?;

    let raw = u128::from_be_bytes(field);
    let signed = i128::try_from(raw).map_err(|_| ClarityError::OutOfRange(raw))?;

    Decimal::try_from_i128_with_scale(signed, PRICE_SCALE).map_err(|_| ClarityError::OutOfRange(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn int_field(name: &str, value: i128) -> String {
        format!(
            "{:02x}{}00{:032x}",
            name.len(),
            hex::encode(name),
            value as u128
        )
    }

    /// `(ok (tuple (ema-price ..) (expo -8) (price ..)))`
    fn pyth_result(price: i128, ema_price: i128) -> String {
        format!(
            "0x070c00000003{}{}{}",
            int_field("ema-price", ema_price),
            int_field("expo", -8),
            int_field("price", price)
        )
    }

    #[test]
    fn test_decode_price() {
        let result = pyth_result(9_712_345_678_901, 9_700_000_000_000);
        assert_eq!(decode_price(&result), Ok(dec!(97123.45678901)));
    }

    #[test]
    fn test_decode_price_ignores_ema_price() {
        let result = pyth_result(65_430_000, 1);
        assert_eq!(decode_price(&result), Ok(dec!(0.6543)));
    }

    #[test]
    fn test_decode_without_prefix() {
        let result = pyth_result(100_000_000, 0);
        assert_eq!(decode_price(result.trim_start_matches("0x")), Ok(dec!(1)));
    }

    #[test]
    fn test_missing_marker() {
        let result = format!("0x070c00000001{}", int_field("conf", 42));
        assert_eq!(decode_price(&result), Err(ClarityError::MarkerNotFound));
    }

    #[test]
    fn test_truncated_field() {
        let full = pyth_result(100_000_000, 0);
        let truncated = &full[..full.len() - 8];
        assert_eq!(decode_price(truncated), Err(ClarityError::Truncated));
    }

    #[test]
    fn test_invalid_hex() {
        assert!(matches!(decode_price("0xzz"), Err(ClarityError::InvalidHex(_))));
    }

    #[test]
    fn test_buffer_argument() {
        let arg = buffer_argument(
            "0xe62df6c8b4a85fe1a67db44dc12de5db330f7ac66b72dc658afedf0f4a415b43",
        )
        .unwrap();
        assert_eq!(
            arg,
            "0x0200000020e62df6c8b4a85fe1a67db44dc12de5db330f7ac66b72dc658afedf0f4a415b43"
        );
    }
}
