//! Decay engine implementing the [`PremiumCurve`] trait.
//!
//! Provides the production continuous-decay computation. Parameters are
//! validated and converted to real terms once per call ([`CurveTerms`]); the
//! exponentiation itself runs in `f64` and results are truncated to integer
//! wads only by the `_wad` entry points.

use premia_core::U256;
use premia_core::error::CurveError;
use premia_core::traits::PremiumCurve;
use premia_core::types::{DecayParameters, FloorPolicy};
use premia_core::wad;

use crate::series::{self, PriceSeries};

/// The production decay curve.
///
/// Implements [`PremiumCurve`] with:
/// - Real-valued exponent `elapsed / period` (no truncation to whole periods)
/// - Correctly rounded wad-to-real conversions at the input boundary
/// - Truncation to integer wad at the output boundary
#[derive(Debug, Clone, Default)]
pub struct DecayCurve;

impl DecayCurve {
    /// Create a new DecayCurve.
    pub fn new() -> Self {
        Self
    }

    /// Floor value reached by evaluating the decay formula at `horizon_seconds`.
    ///
    /// This is the end value a curve should settle on after decaying for the
    /// given time, computed with the same formula as every other sample.
    pub fn end_value_at(
        &self,
        params: &DecayParameters,
        horizon_seconds: f64,
    ) -> Result<U256, CurveError> {
        self.decayed_premium_wad(params, horizon_seconds)
    }

    /// Sample the effective price; see [`series::generate_series`].
    pub fn generate_series(
        &self,
        params: &DecayParameters,
        total_duration_seconds: f64,
        sample_interval_seconds: f64,
    ) -> Result<PriceSeries, CurveError> {
        series::generate_series(params, total_duration_seconds, sample_interval_seconds)
    }
}

/// Real-valued terms of a validated curve.
///
/// Built once from [`DecayParameters`] and reused for every sample of a
/// series, so per-sample evaluation cannot fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveTerms {
    start: f64,
    /// Fraction of the premium retained per full period, in `[0, 1]`.
    retention: f64,
    period: f64,
    end: f64,
    base: f64,
    policy: FloorPolicy,
}

impl CurveTerms {
    /// Validate `params` and derive the real terms.
    pub fn new(params: &DecayParameters) -> Result<Self, CurveError> {
        params.validate()?;

        // validate() guarantees decay_fraction_wad <= PRECISION.
        let remaining = wad::precision() - params.decay_fraction_wad;

        Ok(Self {
            start: wad::wad_to_f64(params.start_premium),
            retention: wad::fraction_to_f64(remaining)?,
            period: params.period_seconds,
            end: wad::wad_to_f64(params.end_value_or_zero()),
            base: wad::wad_to_f64(params.base_price_or_zero()),
            policy: params.floor_policy,
        })
    }

    /// Decayed premium after `elapsed_seconds`, wad-scaled.
    pub fn premium(&self, elapsed_seconds: f64) -> f64 {
        let ratio = elapsed_seconds / self.period;
        // 0^0 == 1, so full decay still returns the start value at t = 0.
        let multiplier = self.retention.powf(ratio);
        (self.start * multiplier).min(self.start)
    }

    /// Effective price after `elapsed_seconds` under the floor policy.
    pub fn price(&self, elapsed_seconds: f64) -> f64 {
        self.compose(self.premium(elapsed_seconds))
    }

    /// The price the curve converges to.
    pub fn floor(&self) -> f64 {
        self.compose(0.0)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn retention(&self) -> f64 {
        self.retention
    }

    fn compose(&self, premium: f64) -> f64 {
        match self.policy {
            FloorPolicy::Clamp => premium.max(self.end) + self.base,
            FloorPolicy::SubtractFloor => self.base + (premium - self.end).max(0.0),
        }
    }
}

/// Reject negative or non-finite elapsed times.
pub(crate) fn check_elapsed(elapsed_seconds: f64) -> Result<(), CurveError> {
    if !elapsed_seconds.is_finite() || elapsed_seconds < 0.0 {
        return Err(CurveError::invalid(
            "elapsed_seconds",
            format!("must be finite and >= 0, got {elapsed_seconds}"),
        ));
    }
    Ok(())
}

impl PremiumCurve for DecayCurve {
    fn decayed_premium(
        &self,
        params: &DecayParameters,
        elapsed_seconds: f64,
    ) -> Result<f64, CurveError> {
        let terms = CurveTerms::new(params)?;
        check_elapsed(elapsed_seconds)?;
        Ok(terms.premium(elapsed_seconds))
    }

    fn decayed_premium_wad(
        &self,
        params: &DecayParameters,
        elapsed_seconds: f64,
    ) -> Result<U256, CurveError> {
        let terms = CurveTerms::new(params)?;
        check_elapsed(elapsed_seconds)?;

        // Exact paths: no time has passed, or nothing decays.
        if elapsed_seconds == 0.0 || params.decay_fraction_wad.is_zero() {
            return Ok(params.start_premium);
        }

        let premium = terms.premium(elapsed_seconds);
        if premium >= terms.start() {
            return Ok(params.start_premium);
        }

        // The start value may round up in f64; the result never exceeds it.
        Ok(wad::f64_to_wad(premium)?.min(params.start_premium))
    }

    fn effective_price(
        &self,
        params: &DecayParameters,
        elapsed_seconds: f64,
    ) -> Result<f64, CurveError> {
        let terms = CurveTerms::new(params)?;
        check_elapsed(elapsed_seconds)?;
        Ok(terms.price(elapsed_seconds))
    }

    /// Composes the exact truncated premium with the integer floor terms, so
    /// the price is `start_premium` at `elapsed == 0` when there is no floor.
    fn effective_price_wad(
        &self,
        params: &DecayParameters,
        elapsed_seconds: f64,
    ) -> Result<U256, CurveError> {
        let premium = self.decayed_premium_wad(params, elapsed_seconds)?;
        let end = params.end_value_or_zero();
        let base = params.base_price_or_zero();

        let price = match params.floor_policy {
            FloorPolicy::Clamp => premium.max(end).checked_add(base),
            FloorPolicy::SubtractFloor => base.checked_add(premium.saturating_sub(end)),
        };
        price.ok_or_else(|| {
            CurveError::Overflow(format!(
                "effective price at {elapsed_seconds}s exceeds uint256 (base {base})"
            ))
        })
    }

    fn floor_price(&self, params: &DecayParameters) -> Result<f64, CurveError> {
        Ok(CurveTerms::new(params)?.floor())
    }
}
