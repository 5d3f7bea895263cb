//! Cross-crate test suite for Premia.
//!
//! Integration tests in `tests/` pin the decay curve against values produced
//! by the off-chain reference formula and check the curve's invariants
//! end-to-end, from parameter construction to the encoded `uint256` word.

pub mod helpers;
