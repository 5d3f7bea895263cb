//! Shared test helpers for integration tests.

use premia_core::U256;
use premia_core::constants::{PRECISION, SECONDS_PER_DAY};
use premia_core::types::{DecayParameters, FloorPolicy};
use premia_core::wad::units_to_wad;

/// One day as `f64` seconds.
pub const DAY: f64 = SECONDS_PER_DAY as f64;

/// A reference value: `(start_premium, elapsed_seconds, expected_premium)`,
/// all decimal, for 50% decay per day.
pub struct ReferenceVector {
    pub start_premium: &'static str,
    pub elapsed_seconds: u64,
    pub expected: &'static str,
}

/// Outputs of the reference formula
/// `int(start * ((PRECISION - d) / PRECISION) ** (elapsed / 86400))`
/// with `d = 5 * 10^17`.
pub const HALF_DAILY_VECTORS: &[ReferenceVector] = &[
    ReferenceVector {
        start_premium: "1000000000000000000000",
        elapsed_seconds: 0,
        expected: "1000000000000000000000",
    },
    ReferenceVector {
        start_premium: "1000000000000000000000",
        elapsed_seconds: 86_400,
        expected: "500000000000000000000",
    },
    ReferenceVector {
        start_premium: "1000000000000000000000",
        elapsed_seconds: 43_200,
        expected: "707106781186547515392",
    },
    ReferenceVector {
        start_premium: "1000000000000000000000",
        elapsed_seconds: 864_000,
        expected: "976562500000000000",
    },
    ReferenceVector {
        start_premium: "1000000000000000000000",
        elapsed_seconds: 3_600,
        expected: "971531941153605812224",
    },
    ReferenceVector {
        start_premium: "1000000000000000000000",
        elapsed_seconds: 1,
        expected: "999991977495368433664",
    },
    ReferenceVector {
        start_premium: "123456789000000000000",
        elapsed_seconds: 12_345,
        expected: "111815813052363702272",
    },
];

/// 50% per day, starting at `start_units` whole units, no floor.
pub fn half_daily(start_units: u64, policy: FloorPolicy) -> DecayParameters {
    DecayParameters::new(
        units_to_wad(start_units),
        DAY,
        U256::from(PRECISION / 2),
        policy,
    )
}

/// Parameters with an arbitrary wad fraction.
pub fn with_fraction(start: U256, fraction_wad: u64) -> DecayParameters {
    DecayParameters::new(start, DAY, U256::from(fraction_wad), FloorPolicy::Clamp)
}

/// `|a - b| <= |b| * rel`.
pub fn approx_eq(a: f64, b: f64, rel: f64) -> bool {
    (a - b).abs() <= b.abs() * rel
}
