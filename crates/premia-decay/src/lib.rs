//! # premia-decay: decayed-premium pricing engine.
//!
//! Exponentiation is real-valued (`f64`); integer wads appear only at the
//! input and output boundaries.
//!
//! This crate implements the single decay curve shared by every pricing surface:
//! - **Continuous decay**: the premium after `t` seconds is
//!   `start * (1 - fraction)^(t / period)`, with fractional exponents.
//! - **Floor policies**: the premium is combined with an optional end value
//!   and base price by an explicitly chosen [`FloorPolicy`](premia_core::types::FloorPolicy).
//! - **Series sampling**: [`PriceSeries`] lazily samples the effective price at
//!   fixed intervals, reporting the floor once the decay horizon is reached.

pub mod engine;
pub mod series;

pub use engine::{CurveTerms, DecayCurve};
pub use series::{generate_series, sample_interval, PriceSeries, SeriesIter};
