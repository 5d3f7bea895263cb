//! Core pricing types: curve parameters, floor policies and time samples.
//!
//! All wad fields are integers scaled by [`PRECISION`](crate::constants::PRECISION)
//! and serialize as decimal strings, so `"1000000000000000000"` is one unit.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::constants::PRECISION;
use crate::error::CurveError;
use crate::wad;

/// How the optional `end_value` and `base_price` combine with the decayed premium.
///
/// The two compositions converge to different prices, so callers choose one
/// explicitly; there is no default.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FloorPolicy {
    /// `max(premium, end_value) + base_price`; converges to `end_value + base_price`.
    Clamp,
    /// `base_price + max(premium - end_value, 0)`; converges to `base_price`.
    SubtractFloor,
}

impl FloorPolicy {
    /// Stable lowercase name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::SubtractFloor => "subtract-floor",
        }
    }
}

impl fmt::Display for FloorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FloorPolicy {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clamp" => Ok(Self::Clamp),
            "subtract-floor" | "subtract" => Ok(Self::SubtractFloor),
            other => Err(CurveError::invalid(
                "floor_policy",
                format!("unknown policy {other:?} (expected clamp or subtract-floor)"),
            )),
        }
    }
}

/// Parameters of a decaying premium curve.
///
/// Immutable once built; every computation re-derives its terms from these
/// fields. Use [`validate`](Self::validate) before handing values from an
/// untrusted source to a curve (curves validate on every call as well).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DecayParameters {
    /// Premium at elapsed time zero, in wad.
    #[serde(with = "wad_string")]
    pub start_premium: U256,
    /// Length of one decay period in seconds.
    pub period_seconds: f64,
    /// Fraction of the remaining premium lost per full period, in wad.
    #[serde(with = "wad_string")]
    pub decay_fraction_wad: U256,
    /// Optional floor value, in wad.
    #[serde(default, with = "opt_wad_string", skip_serializing_if = "Option::is_none")]
    pub end_value: Option<U256>,
    /// Optional base price added on top of the premium, in wad.
    #[serde(default, with = "opt_wad_string", skip_serializing_if = "Option::is_none")]
    pub base_price: Option<U256>,
    pub floor_policy: FloorPolicy,
    /// Elapsed time at which sampled series report the floor price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon_seconds: Option<f64>,
}

impl DecayParameters {
    /// Parameters with no floor, no base price and no horizon.
    pub fn new(
        start_premium: U256,
        period_seconds: f64,
        decay_fraction_wad: U256,
        floor_policy: FloorPolicy,
    ) -> Self {
        Self {
            start_premium,
            period_seconds,
            decay_fraction_wad,
            end_value: None,
            base_price: None,
            floor_policy,
            horizon_seconds: None,
        }
    }

    pub fn with_end_value(mut self, end_value: U256) -> Self {
        self.end_value = Some(end_value);
        self
    }

    pub fn with_base_price(mut self, base_price: U256) -> Self {
        self.base_price = Some(base_price);
        self
    }

    pub fn with_horizon(mut self, horizon_seconds: f64) -> Self {
        self.horizon_seconds = Some(horizon_seconds);
        self
    }

    /// `end_value`, or zero when unset.
    pub fn end_value_or_zero(&self) -> U256 {
        self.end_value.unwrap_or(U256::ZERO)
    }

    /// `base_price`, or zero when unset.
    pub fn base_price_or_zero(&self) -> U256 {
        self.base_price.unwrap_or(U256::ZERO)
    }

    /// Check the parameter invariants.
    ///
    /// - `period_seconds` is finite and strictly positive
    /// - `decay_fraction_wad <= PRECISION`
    /// - `horizon_seconds`, when set, is finite and non-negative
    ///
    /// `start_premium` is unsigned, so non-negativity holds by construction;
    /// negative inputs are rejected by [`parse_wad`].
    pub fn validate(&self) -> Result<(), CurveError> {
        if !self.period_seconds.is_finite() || self.period_seconds <= 0.0 {
            return Err(CurveError::invalid(
                "period_seconds",
                format!("must be finite and > 0, got {}", self.period_seconds),
            ));
        }
        if self.decay_fraction_wad > wad::precision() {
            return Err(CurveError::invalid(
                "decay_fraction_wad",
                format!("must be <= {PRECISION}, got {}", self.decay_fraction_wad),
            ));
        }
        if let Some(horizon) = self.horizon_seconds {
            if !horizon.is_finite() || horizon < 0.0 {
                return Err(CurveError::invalid(
                    "horizon_seconds",
                    format!("must be finite and >= 0, got {horizon}"),
                ));
            }
        }
        Ok(())
    }
}

/// A single point of a sampled price curve.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct TimeSample {
    pub elapsed_seconds: f64,
    /// Effective price at `elapsed_seconds`, wad-scaled.
    pub price: f64,
}

impl TimeSample {
    /// Elapsed time expressed in `unit_seconds` units (days, hours, ...).
    pub fn elapsed_units(&self, unit_seconds: f64) -> f64 {
        self.elapsed_seconds / unit_seconds
    }

    /// Price in whole units rather than wad.
    pub fn price_units(&self) -> f64 {
        wad::to_units(self.price)
    }
}

/// Parse a non-negative decimal integer wad.
///
/// `name` identifies the parameter in the error. A leading `-` is rejected
/// with [`CurveError::InvalidParameter`] rather than being wrapped.
pub fn parse_wad(name: &'static str, text: &str) -> Result<U256, CurveError> {
    let text = text.trim();
    if text.starts_with('-') {
        return Err(CurveError::invalid(name, format!("must be non-negative, got {text}")));
    }
    let digits = text.strip_prefix('+').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CurveError::invalid(name, format!("not a decimal integer: {text:?}")));
    }
    U256::from_str_radix(digits, 10)
        .map_err(|_| CurveError::Overflow(format!("{name} = {text}")))
}

/// Convert a per-period decay percentage to a wad fraction.
///
/// Matches `int(percent * PRECISION / 100)` in double precision, so `50`
/// yields exactly `5 * 10^17`.
pub fn decay_fraction_from_percent(percent: f64) -> Result<U256, CurveError> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(CurveError::invalid(
            "decay_percent",
            format!("must be within [0, 100], got {percent}"),
        ));
    }
    wad::f64_to_wad(percent * PRECISION as f64 / 100.0)
}

mod wad_string {
    use alloy_primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_wad("wad", &text).map_err(serde::de::Error::custom)
    }
}

mod opt_wad_string {
    use alloy_primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<U256>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<U256>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|text| super::parse_wad("wad", &text).map_err(serde::de::Error::custom))
            .transpose()
    }
}
