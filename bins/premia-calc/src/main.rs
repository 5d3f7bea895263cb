//! premia-calc: ABI-encoded decayed premium calculator.
//!
//! Takes exactly two positional arguments, a start premium in wad and the
//! elapsed seconds, applies 50% decay per day, and prints the truncated
//! premium as a `0x`-prefixed 32-byte `uint256` word on stdout. Logs go to
//! stderr so the output can be consumed directly by contract test harnesses.

use anyhow::{Context, Result};
use clap::Parser;
use premia_core::abi::{encode_word, to_hex};
use premia_core::constants::{DEFAULT_DECAY_PERCENT, SECONDS_PER_DAY};
use premia_core::traits::PremiumCurve;
use premia_core::types::{decay_fraction_from_percent, parse_wad, DecayParameters, FloorPolicy};
use premia_decay::DecayCurve;
use tracing::debug;

/// Decayed premium calculator (50% decay per day).
#[derive(Parser, Debug)]
#[command(name = "premia-calc")]
#[command(version, about = "Print the decayed premium as an ABI-encoded uint256")]
struct Args {
    /// Start premium in wad (decimal integer, 10^18 = one unit).
    start_premium: String,

    /// Seconds elapsed since the premium started decaying.
    elapsed_seconds: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    println!("{}", run(&args)?);
    Ok(())
}

/// Compute the encoded word for `args`.
fn run(args: &Args) -> Result<String> {
    let start_premium =
        parse_wad("start_premium", &args.start_premium).context("Invalid start premium")?;
    let params = DecayParameters::new(
        start_premium,
        SECONDS_PER_DAY as f64,
        decay_fraction_from_percent(DEFAULT_DECAY_PERCENT)?,
        FloorPolicy::Clamp,
    );

    let premium = DecayCurve::new()
        .decayed_premium_wad(&params, args.elapsed_seconds as f64)
        .context("Failed to compute decayed premium")?;

    debug!(
        start = %start_premium,
        elapsed = args.elapsed_seconds,
        premium = %premium,
        "decayed premium"
    );

    Ok(to_hex(&encode_word(premium)))
}
