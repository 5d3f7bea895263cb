//! Conversions between integer wads and real values.
//!
//! Exponentiation is done in `f64`; integer wads only appear at the input
//! and output boundaries. Integer-to-real conversions are correctly rounded
//! (round-half-even) and real-to-integer conversions truncate toward zero,
//! which is how arbitrary-precision integers and doubles interoperate in
//! the off-chain reference scripts.

use alloy_primitives::U256;

use crate::constants::{PRECISION, WAD_DECIMALS};
use crate::error::CurveError;

/// 2^256 as an `f64` (exactly representable).
const TWO_POW_256: f64 = f64::from_bits((1023 + 256) << 52);

/// One whole unit in wad.
pub fn precision() -> U256 {
    U256::from(PRECISION)
}

/// Nearest `f64` to an integer wad.
///
/// Values wider than 64 bits are reduced to their top 64 bits with a sticky
/// bit so the final `u64 -> f64` rounding sees every discarded bit.
pub fn wad_to_f64(value: U256) -> f64 {
    let bits = value.bit_len();
    if bits <= 64 {
        return value.as_limbs()[0] as f64;
    }

    let shift = bits - 64;
    let mut top = (value >> shift).as_limbs()[0];
    if (value.trailing_zeros()) < shift {
        // The low bit of `top` sits below f64 resolution, so it can carry the sticky flag.
        top |= 1;
    }
    top as f64 * 2f64.powi(shift as i32)
}

/// Correctly rounded `value / 10^18` for a wad fraction.
pub fn fraction_to_f64(value: U256) -> Result<f64, CurveError> {
    format!("{value}e-{WAD_DECIMALS}")
        .parse::<f64>()
        .map_err(|e| CurveError::invalid("fraction", e.to_string()))
}

/// Truncate a real wad value to an integer wad.
///
/// Fails with [`CurveError::Overflow`] for negative, non-finite, or
/// `>= 2^256` inputs.
pub fn f64_to_wad(value: f64) -> Result<U256, CurveError> {
    if !value.is_finite() || value < 0.0 || value >= TWO_POW_256 {
        return Err(CurveError::Overflow(format!("{value}")));
    }

    let truncated = value.trunc();
    if truncated < 1.0 {
        return Ok(U256::ZERO);
    }

    let bits = truncated.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i64 - 1075;
    let mantissa = (bits & ((1u64 << 52) - 1)) | (1u64 << 52);

    if exponent >= 0 {
        Ok(U256::from(mantissa) << exponent as usize)
    } else {
        // truncated >= 1.0 keeps the exponent above -53; the dropped bits are zero.
        Ok(U256::from(mantissa >> (-exponent) as u32))
    }
}

/// Whole units to wad, exactly (`units * 10^18`).
pub fn units_to_wad(units: u64) -> U256 {
    U256::from(units) * precision()
}

/// Real-valued units (e.g. a base price of `0.25`) to a truncated wad.
pub fn units_f64_to_wad(units: f64) -> Result<U256, CurveError> {
    f64_to_wad(units * PRECISION as f64)
}

/// Wad-scaled real to display units (`value / 10^18`).
pub fn to_units(value: f64) -> f64 {
    value / PRECISION as f64
}

/// Exact decimal rendering of a wad in whole units.
///
/// Trailing fractional zeros are trimmed: `1_500_000_000_000_000_000` renders
/// as `"1.5"` and `2 * 10^18` as `"2"`.
pub fn format_wad(value: U256) -> String {
    let one = precision();
    let whole = value / one;
    let frac = value % one;
    if frac.is_zero() {
        return whole.to_string();
    }
    let digits = format!("{:0>width$}", frac.to_string(), width = WAD_DECIMALS);
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
