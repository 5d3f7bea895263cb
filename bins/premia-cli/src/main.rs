//! premia-cli: decayed-premium pricing toolkit.
//!
//! Subcommands:
//!   price   Effective price at one elapsed time
//!   chart   Sample the curve and render it as a table, CSV or JSON
//!   dump    Sample the curve and append `elapsed,price` rows to a CSV file
//!
//! Defaults come from `PREMIA_*` environment variables; flags override them.
//! Logs and interactive prompts go to stderr.

mod config;
mod curve;
mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use premia_core::abi::{encode_word, to_hex};
use premia_core::traits::PremiumCurve;
use premia_core::wad::format_wad;
use premia_decay::DecayCurve;
use tracing::info;

use config::CliConfig;
use curve::{CurveArgs, Prompter, SeriesArgs};
use render::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "premia-cli")]
#[command(version, about = "Price, chart and dump decaying premium curves")]
struct Cli {
    /// Log level filter [env: PREMIA_LOG_LEVEL, default: warn]
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format: "text" or "json" [env: PREMIA_LOG_FORMAT]
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the effective price at one elapsed time.
    Price(PriceArgs),
    /// Sample the curve and render it to stdout.
    Chart(ChartArgs),
    /// Sample the curve and append `elapsed,price` rows to a CSV file.
    Dump(DumpArgs),
}

#[derive(Args, Debug)]
struct PriceArgs {
    /// Start premium in wad (decimal integer, 10^18 = one unit)
    #[arg(long, required_unless_present = "params")]
    start_premium: Option<String>,

    /// Seconds elapsed since the premium started decaying
    #[arg(long)]
    elapsed: f64,

    /// Print the truncated price as an ABI-encoded uint256 word
    #[arg(long)]
    hex: bool,

    #[command(flatten)]
    curve: CurveArgs,
}

#[derive(Args, Debug)]
struct ChartArgs {
    #[command(flatten)]
    series: SeriesArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct DumpArgs {
    #[command(flatten)]
    series: SeriesArgs,

    /// CSV file to append to (created if missing)
    #[arg(long, short)]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::from_env().context("Failed to load configuration")?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let format = cli.log_format.as_deref().unwrap_or(&config.log_format);
    init_logging(level, format);

    match cli.command {
        Command::Price(args) => println!("{}", run_price(&args, &config)?),
        Command::Chart(args) => {
            let mut stdout = io::stdout().lock();
            run_chart(&args, &config, &mut Prompter::stdio(), &mut stdout)?;
        }
        Command::Dump(args) => {
            let rows = run_dump(&args, &config, &mut Prompter::stdio())?;
            println!("Appended {rows} rows to {}", args.output.display());
        }
    }
    Ok(())
}

/// Effective price, formatted in units or as a hex word.
fn run_price(args: &PriceArgs, config: &CliConfig) -> Result<String> {
    let params = curve::price_params(args.start_premium.as_deref(), &args.curve, config)?;
    let price = DecayCurve::new()
        .effective_price_wad(&params, args.elapsed)
        .context("Failed to compute effective price")?;

    info!(
        elapsed = args.elapsed,
        price = %price,
        policy = %params.floor_policy,
        "priced"
    );

    if args.hex {
        Ok(to_hex(&encode_word(price)))
    } else {
        Ok(format_wad(price))
    }
}

fn run_chart<R: BufRead, W: Write, O: Write>(
    args: &ChartArgs,
    config: &CliConfig,
    prompter: &mut Prompter<R, W>,
    out: &mut O,
) -> Result<()> {
    let series = curve::sample_series(&args.series, config, prompter)?;
    info!(samples = series.len(), format = ?args.format, "rendering chart");
    render::render(&series, args.series.curve.unit, args.format, out)
}

fn run_dump<R: BufRead, W: Write>(
    args: &DumpArgs,
    config: &CliConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<u64> {
    let series = curve::sample_series(&args.series, config, prompter)?;
    let rows = render::append_csv(&args.output, &series, args.series.curve.unit)?;
    info!(rows, path = %args.output.display(), "dumped series");
    Ok(rows)
}

fn init_logging(level: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("premia-cli").chain(args.iter().copied())).unwrap()
    }

    fn price(args: &[&str]) -> Result<String> {
        let cli = parse(args);
        let Command::Price(price) = cli.command else {
            panic!("expected price command");
        };
        run_price(&price, &CliConfig::default())
    }

    fn chart(args: &[&str], answers: &str) -> Result<String> {
        let cli = parse(args);
        let Command::Chart(chart) = cli.command else {
            panic!("expected chart command");
        };
        let mut prompter = Prompter::new(answers.as_bytes(), Vec::new());
        let mut out = Vec::new();
        run_chart(&chart, &CliConfig::default(), &mut prompter, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    // --- Argument parsing ---

    #[test]
    fn global_log_flags_parse_after_subcommand() {
        let cli = parse(&[
            "price",
            "--start-premium",
            "1",
            "--elapsed",
            "0",
            "--policy",
            "clamp",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn price_requires_policy_without_params() {
        let err = Cli::try_parse_from([
            "premia-cli",
            "price",
            "--start-premium",
            "1",
            "--elapsed",
            "0",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn unknown_policy_rejected() {
        let err = Cli::try_parse_from([
            "premia-cli",
            "chart",
            "--policy",
            "linear",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn dump_requires_output() {
        let err = Cli::try_parse_from(["premia-cli", "dump", "--policy", "clamp"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    // --- price ---

    #[test]
    fn price_one_day_half_decay() {
        let out = price(&[
            "price",
            "--start-premium",
            "1000000000000000000000",
            "--elapsed",
            "86400",
            "--policy",
            "clamp",
        ])
        .unwrap();
        assert_eq!(out, "500");
    }

    #[test]
    fn price_with_base_price() {
        let out = price(&[
            "price",
            "--start-premium",
            "1000000000000000000000",
            "--elapsed",
            "86400",
            "--policy",
            "subtract-floor",
            "--base-price",
            "1",
        ])
        .unwrap();
        assert_eq!(out, "501");
    }

    #[test]
    fn price_hex_word() {
        let out = price(&[
            "price",
            "--start-premium",
            "1000000000000000000000",
            "--elapsed",
            "86400",
            "--policy",
            "clamp",
            "--hex",
        ])
        .unwrap();
        assert_eq!(
            out,
            "0x00000000000000000000000000000000000000000000001b1ae4d6e2ef500000"
        );
    }

    #[test]
    fn price_at_start_is_exact() {
        let out = price(&[
            "price",
            "--start-premium",
            "18014398509481983",
            "--elapsed",
            "0",
            "--policy",
            "clamp",
        ])
        .unwrap();
        assert_eq!(out, "0.018014398509481983");
    }

    #[test]
    fn price_negative_elapsed_fails() {
        let result = price(&[
            "price",
            "--start-premium",
            "1000",
            "--elapsed=-1",
            "--policy",
            "clamp",
        ]);
        assert!(result.is_err());
    }

    // --- chart ---

    #[test]
    fn chart_prompts_and_renders_csv() {
        let csv = chart(&["chart", "--policy", "clamp", "--format", "csv"], "100\n3\n10\n1\n")
            .unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "elapsed,price");
        assert_eq!(lines.len(), 112);
        assert_eq!(lines[1], "0,101");
        assert_eq!(lines[111], "11,13.5");
    }

    #[test]
    fn chart_closed_stdin_fails() {
        assert!(chart(&["chart", "--policy", "clamp"], "").is_err());
    }

    #[test]
    fn chart_json_from_flags() {
        let json = chart(
            &[
                "chart",
                "--policy",
                "subtract-floor",
                "--start",
                "10",
                "--end-after",
                "7",
                "--decay-for",
                "2",
                "--base-price",
                "1",
                "--samples-per-unit",
                "4",
                "--format",
                "json",
            ],
            "",
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let points = value.as_array().unwrap();
        assert_eq!(points.len(), 13);
        assert_eq!(points[12]["price"], 1.0);
    }

    // --- dump ---

    #[test]
    fn dump_appends_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        let path_arg = path.to_str().unwrap();
        let cli = parse(&[
            "dump",
            "--policy",
            "clamp",
            "--start",
            "100",
            "--end-after",
            "3",
            "--decay-for",
            "10",
            "--base-price",
            "1",
            "--output",
            path_arg,
        ]);
        let Command::Dump(dump) = cli.command else {
            panic!("expected dump command");
        };
        let mut prompter = Prompter::new("".as_bytes(), Vec::new());

        assert_eq!(run_dump(&dump, &CliConfig::default(), &mut prompter).unwrap(), 111);
        assert_eq!(run_dump(&dump, &CliConfig::default(), &mut prompter).unwrap(), 111);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 222);
        assert_eq!(contents.lines().next(), Some("0,101"));
    }
}
