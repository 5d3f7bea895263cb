//! # premia-core
//! Foundation types, traits and codecs for decayed-premium pricing.

pub mod abi;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
pub mod wad;

pub use alloy_primitives::U256;
