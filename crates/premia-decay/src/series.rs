//! Lazy time-sampled price series.
//!
//! A [`PriceSeries`] samples the effective price at `k * interval` for
//! `k = 0 ..= floor(total / interval)`. It holds only the validated curve
//! terms and the sampling grid, so iterating it twice yields identical
//! samples and cloning it is cheap.

use premia_core::error::CurveError;
use premia_core::types::{DecayParameters, TimeSample};
use tracing::debug;

use crate::engine::CurveTerms;

/// Largest sample index whose elapsed time `k * interval` is still strictly
/// increasing in `f64` (2^53).
const MAX_SAMPLES: u64 = 1 << 53;

/// Sample interval for `samples_per_unit` evenly spaced samples per time unit.
///
/// The chart surfaces take ten samples per day (or per hour).
pub fn sample_interval(unit_seconds: f64, samples_per_unit: u32) -> Result<f64, CurveError> {
    if !unit_seconds.is_finite() || unit_seconds <= 0.0 {
        return Err(CurveError::invalid(
            "unit_seconds",
            format!("must be finite and > 0, got {unit_seconds}"),
        ));
    }
    if samples_per_unit == 0 {
        return Err(CurveError::invalid("samples_per_unit", "must be at least 1"));
    }
    Ok(unit_seconds / samples_per_unit as f64)
}

/// Sample the effective price of `params` from `0` through `total_duration_seconds`.
///
/// Produces exactly `floor(total / interval) + 1` samples in strictly
/// ascending elapsed order. Samples at or past `params.horizon_seconds`
/// report the curve's floor price.
pub fn generate_series(
    params: &DecayParameters,
    total_duration_seconds: f64,
    sample_interval_seconds: f64,
) -> Result<PriceSeries, CurveError> {
    let terms = CurveTerms::new(params)?;

    if !total_duration_seconds.is_finite() || total_duration_seconds < 0.0 {
        return Err(CurveError::invalid(
            "total_duration_seconds",
            format!("must be finite and >= 0, got {total_duration_seconds}"),
        ));
    }
    if !sample_interval_seconds.is_finite() || sample_interval_seconds <= 0.0 {
        return Err(CurveError::invalid(
            "sample_interval_seconds",
            format!("must be finite and > 0, got {sample_interval_seconds}"),
        ));
    }

    let steps = (total_duration_seconds / sample_interval_seconds).floor();
    if steps >= MAX_SAMPLES as f64 {
        return Err(CurveError::invalid(
            "sample_interval_seconds",
            format!("{steps} steps exceeds the {MAX_SAMPLES} sample limit"),
        ));
    }
    let count = steps as u64 + 1;

    debug!(
        samples = count,
        interval = sample_interval_seconds,
        horizon = ?params.horizon_seconds,
        policy = %params.floor_policy,
        "generating price series"
    );

    Ok(PriceSeries {
        terms,
        horizon_seconds: params.horizon_seconds,
        interval_seconds: sample_interval_seconds,
        count,
    })
}

/// A finite, restartable, lazily evaluated price series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSeries {
    terms: CurveTerms,
    horizon_seconds: Option<f64>,
    interval_seconds: f64,
    count: u64,
}

impl PriceSeries {
    /// Number of samples.
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Always false: a series contains at least the sample at `t = 0`.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn interval_seconds(&self) -> f64 {
        self.interval_seconds
    }

    /// Price reported at and after the horizon.
    pub fn floor_price(&self) -> f64 {
        self.terms.floor()
    }

    /// The `index`-th sample, or `None` past the end.
    pub fn sample(&self, index: u64) -> Option<TimeSample> {
        if index >= self.count {
            return None;
        }
        let elapsed_seconds = index as f64 * self.interval_seconds;
        let price = match self.horizon_seconds {
            Some(horizon) if elapsed_seconds >= horizon => self.terms.floor(),
            _ => self.terms.price(elapsed_seconds),
        };
        Some(TimeSample { elapsed_seconds, price })
    }

    /// Iterate from the first sample. Each call starts over.
    pub fn iter(&self) -> SeriesIter {
        SeriesIter { series: *self, next: 0 }
    }
}

impl IntoIterator for PriceSeries {
    type Item = TimeSample;
    type IntoIter = SeriesIter;

    fn into_iter(self) -> SeriesIter {
        SeriesIter { series: self, next: 0 }
    }
}

impl IntoIterator for &PriceSeries {
    type Item = TimeSample;
    type IntoIter = SeriesIter;

    fn into_iter(self) -> SeriesIter {
        self.iter()
    }
}

/// Iterator over the samples of a [`PriceSeries`].
#[derive(Debug, Clone)]
pub struct SeriesIter {
    series: PriceSeries,
    next: u64,
}

impl Iterator for SeriesIter {
    type Item = TimeSample;

    fn next(&mut self) -> Option<TimeSample> {
        let sample = self.series.sample(self.next)?;
        self.next += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.series.count - self.next;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }

    fn nth(&mut self, n: usize) -> Option<TimeSample> {
        self.next = self.next.saturating_add(n as u64).min(self.series.count);
        self.next()
    }
}

impl std::iter::FusedIterator for SeriesIter {}
