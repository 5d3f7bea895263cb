//! Decay curve outputs pinned against the off-chain reference formula.
//!
//! Whole and half periods involve only exactly rounded operations
//! (`x^1`, `x^0.5`), so they must match bit-for-bit. Other exponents go
//! through `powf` and are held to a couple of ulps.

use premia_core::U256;
use premia_core::abi::{decode_hex, encode_word, to_hex};
use premia_core::constants::PRECISION;
use premia_core::traits::PremiumCurve;
use premia_core::types::{decay_fraction_from_percent, parse_wad};
use premia_core::wad::{units_to_wad, wad_to_f64};
use premia_decay::DecayCurve;
use premia_tests::helpers::*;

#[test]
fn half_daily_vectors_match() {
    let curve = DecayCurve::new();
    for v in HALF_DAILY_VECTORS {
        let start = parse_wad("start_premium", v.start_premium).unwrap();
        let expected = parse_wad("expected", v.expected).unwrap();
        let params = with_fraction(start, PRECISION / 2);
        let got = curve
            .decayed_premium_wad(&params, v.elapsed_seconds as f64)
            .unwrap();

        if v.elapsed_seconds % 43_200 == 0 {
            assert_eq!(got, expected, "elapsed {}", v.elapsed_seconds);
        } else {
            let (g, e) = (wad_to_f64(got), wad_to_f64(expected));
            assert!(
                approx_eq(g, e, 4.0 * f64::EPSILON),
                "elapsed {}: got {got}, expected {expected}",
                v.elapsed_seconds
            );
        }
    }
}

#[test]
fn third_decay_rounds_fraction_once() {
    // d = 333333333333333333: retention = 666666666666666667 / 10^18.
    let curve = DecayCurve::new();
    let params = with_fraction(units_to_wad(1000), 333_333_333_333_333_333);
    assert_eq!(
        curve.decayed_premium_wad(&params, DAY).unwrap(),
        U256::from(666_666_666_666_666_622_976u128)
    );
}

#[test]
fn percent_matches_reference_wad() {
    // int(50 * PRECISION / 100)
    assert_eq!(decay_fraction_from_percent(50.0).unwrap(), U256::from(PRECISION / 2));
}

#[test]
fn encoded_one_day_word() {
    let curve = DecayCurve::new();
    let params = with_fraction(units_to_wad(1000), PRECISION / 2);
    let premium = curve.decayed_premium_wad(&params, DAY).unwrap();
    let hex = to_hex(&encode_word(premium));
    assert_eq!(
        hex,
        "0x00000000000000000000000000000000000000000000001b1ae4d6e2ef500000"
    );
    assert_eq!(decode_hex(&hex).unwrap(), units_to_wad(500));
}

#[test]
fn encoded_half_day_word() {
    let curve = DecayCurve::new();
    let params = with_fraction(units_to_wad(1000), PRECISION / 2);
    let premium = curve.decayed_premium_wad(&params, DAY / 2.0).unwrap();
    assert_eq!(
        to_hex(&encode_word(premium)),
        "0x0000000000000000000000000000000000000000000000265513ef13ae080000"
    );
}
