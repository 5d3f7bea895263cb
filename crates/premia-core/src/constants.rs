//! Pricing constants. All monetary values are wads (1 unit = 10^18 wad).

/// Fixed-point scale of every wad value.
pub const PRECISION: u64 = 1_000_000_000_000_000_000;

/// Number of decimal digits carried by a wad.
pub const WAD_DECIMALS: usize = 18;

/// One day in seconds. The default decay period.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// One hour in seconds.
pub const SECONDS_PER_HOUR: u64 = 3_600;

/// Default per-period decay, in percent (halve every period).
pub const DEFAULT_DECAY_PERCENT: f64 = 50.0;

/// Default number of samples taken per coarse time unit in a series.
pub const DEFAULT_SAMPLES_PER_UNIT: u32 = 10;

/// Width of an ABI-encoded `uint256` word in bytes.
pub const WORD_BYTES: usize = 32;
