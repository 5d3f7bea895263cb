//! Fixed-width `uint256` ABI encoding.
//!
//! A word is 32 bytes, big-endian, as produced by a standard ABI encoder for
//! a single `uint256` argument. Hex renderings carry a `0x` prefix.

use alloy_primitives::U256;

use crate::constants::WORD_BYTES;
use crate::error::AbiError;

/// One ABI word.
pub type Word = [u8; WORD_BYTES];

/// Encode an unsigned 256-bit value as a big-endian word.
pub fn encode_word(value: U256) -> Word {
    value.to_be_bytes::<WORD_BYTES>()
}

/// Encode an arbitrary decimal integer as a `uint256` word.
///
/// Fails with [`AbiError::Overflow`] when the value is negative or at least
/// `2^256`, and with [`AbiError::InvalidDecimal`] when `text` is not an
/// integer.
pub fn encode_as_uint256(text: &str) -> Result<Word, AbiError> {
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AbiError::InvalidDecimal(text.to_string()));
    }
    // "-0" is still zero.
    if negative && digits.bytes().any(|b| b != b'0') {
        return Err(AbiError::Overflow(trimmed.to_string()));
    }

    let value = U256::from_str_radix(digits, 10)
        .map_err(|_| AbiError::Overflow(trimmed.to_string()))?;
    Ok(encode_word(value))
}

/// Decode a big-endian word.
pub fn decode_uint256(bytes: &[u8]) -> Result<U256, AbiError> {
    let word: Word = bytes.try_into().map_err(|_| AbiError::InvalidLength {
        got: bytes.len(),
        expected: WORD_BYTES,
    })?;
    Ok(U256::from_be_bytes(word))
}

/// `0x`-prefixed lowercase hex of a word (66 characters).
pub fn to_hex(word: &Word) -> String {
    format!("0x{}", hex::encode(word))
}

/// Parse a `0x`-prefixed (or bare) 64-hex-character word.
pub fn decode_hex(text: &str) -> Result<U256, AbiError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let bytes = hex::decode(digits).map_err(|e| AbiError::InvalidHex(e.to_string()))?;
    decode_uint256(&bytes)
}
