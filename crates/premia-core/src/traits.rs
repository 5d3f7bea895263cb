//! Trait interfaces for Premia.
//!
//! - [`PremiumCurve`]: decayed premium math (premia-decay implements)

use alloy_primitives::U256;

use crate::error::CurveError;
use crate::types::DecayParameters;
use crate::wad;

/// Pure computation of decayed premiums and effective prices.
///
/// Real-valued results are wad-scaled `f64`s; the `_wad` variants truncate
/// to integer wads at the output boundary. Every method validates `params`
/// and fails with [`CurveError::InvalidParameter`] on a violated invariant or
/// a negative/non-finite `elapsed_seconds`.
pub trait PremiumCurve: Send + Sync {
    /// Premium after `elapsed_seconds`: `start * (1 - fraction)^(elapsed / period)`.
    fn decayed_premium(&self, params: &DecayParameters, elapsed_seconds: f64)
    -> Result<f64, CurveError>;

    /// [`decayed_premium`](Self::decayed_premium) truncated to an integer wad.
    ///
    /// Returns `start_premium` exactly at `elapsed_seconds == 0` and when the
    /// decay fraction is zero, and never exceeds `start_premium`.
    fn decayed_premium_wad(
        &self,
        params: &DecayParameters,
        elapsed_seconds: f64,
    ) -> Result<U256, CurveError>;

    /// Premium combined with the floor and base price under `params.floor_policy`.
    fn effective_price(&self, params: &DecayParameters, elapsed_seconds: f64)
    -> Result<f64, CurveError>;

    /// [`effective_price`](Self::effective_price) truncated to an integer wad.
    ///
    /// Default implementation truncates the real value.
    fn effective_price_wad(
        &self,
        params: &DecayParameters,
        elapsed_seconds: f64,
    ) -> Result<U256, CurveError> {
        wad::f64_to_wad(self.effective_price(params, elapsed_seconds)?)
    }

    /// The price [`effective_price`](Self::effective_price) converges to.
    fn floor_price(&self, params: &DecayParameters) -> Result<f64, CurveError>;
}
