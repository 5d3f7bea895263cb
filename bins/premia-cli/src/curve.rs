//! Curve flags shared by every subcommand, and their resolution into
//! validated [`DecayParameters`].
//!
//! `chart` and `dump` prompt on stdin for any value missing from the command
//! line; `price` never prompts.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, ValueEnum};
use premia_core::constants::{SECONDS_PER_DAY, SECONDS_PER_HOUR};
use premia_core::types::{decay_fraction_from_percent, parse_wad, DecayParameters, FloorPolicy};
use premia_core::wad::{units_f64_to_wad, units_to_wad};
use premia_core::U256;
use premia_decay::{sample_interval, DecayCurve, PriceSeries};
use tracing::debug;

use crate::config::CliConfig;

/// Display and sampling unit for charts.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeUnit {
    Day,
    Hour,
}

impl TimeUnit {
    pub fn seconds(self) -> f64 {
        match self {
            Self::Day => SECONDS_PER_DAY as f64,
            Self::Hour => SECONDS_PER_HOUR as f64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CurveArgs {
    /// Load a serialized parameter set; curve flags below are then ignored
    #[arg(long, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Percent of the remaining premium lost per period [env: PREMIA_DECAY_PERCENT]
    #[arg(long)]
    pub decay_percent: Option<f64>,

    /// Length of one decay period in seconds [env: PREMIA_PERIOD_SECS]
    #[arg(long)]
    pub period_secs: Option<f64>,

    /// Unit for --end-after, --decay-for and chart sampling
    #[arg(long, value_enum, default_value_t = TimeUnit::Day)]
    pub unit: TimeUnit,

    /// Samples per unit when charting [env: PREMIA_SAMPLES_PER_UNIT]
    #[arg(long)]
    pub samples_per_unit: Option<u32>,

    /// How end value and base price combine with the premium (clamp, subtract-floor)
    #[arg(long, required_unless_present = "params")]
    pub policy: Option<FloorPolicy>,

    /// Units of decay after which the premium reaches its end value
    #[arg(long, value_name = "UNITS")]
    pub end_after: Option<f64>,

    /// Base price in whole units
    #[arg(long, value_name = "UNITS")]
    pub base_price: Option<f64>,
}

impl CurveArgs {
    pub fn samples_per_unit(&self, config: &CliConfig) -> u32 {
        self.samples_per_unit.unwrap_or(config.samples_per_unit)
    }

    fn load_params(&self) -> Result<Option<DecayParameters>> {
        let Some(path) = &self.params else {
            return Ok(None);
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let params: DecayParameters = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!(path = %path.display(), policy = %params.floor_policy, "loaded parameters");
        Ok(Some(params))
    }

    /// Assemble parameters from flags and already-collected values.
    fn build(
        &self,
        config: &CliConfig,
        start_premium: U256,
        end_after: Option<f64>,
        base_price: Option<f64>,
    ) -> Result<DecayParameters> {
        let policy = self
            .policy
            .context("--policy is required unless --params is given")?;
        let percent = self.decay_percent.unwrap_or(config.decay_percent);
        let fraction = decay_fraction_from_percent(percent).context("Invalid decay percent")?;
        let period = self.period_secs.unwrap_or(config.period_secs);

        let mut params = DecayParameters::new(start_premium, period, fraction, policy);
        params.validate().context("Invalid curve parameters")?;

        if let Some(base) = base_price {
            let base = units_f64_to_wad(base)
                .with_context(|| format!("Invalid base price {base}"))?;
            params = params.with_base_price(base);
        }
        if let Some(units) = end_after {
            let end = DecayCurve::new()
                .end_value_at(&params, units * self.unit.seconds())
                .with_context(|| format!("Invalid end-after {units}"))?;
            params = params.with_end_value(end);
        }
        Ok(params)
    }
}

/// Flags of the sampling subcommands (`chart`, `dump`).
#[derive(Args, Debug, Clone)]
pub struct SeriesArgs {
    /// Start premium in whole units
    #[arg(long, value_name = "UNITS")]
    pub start: Option<u64>,

    /// Units over which the price decays before settling on its floor
    #[arg(long, value_name = "UNITS")]
    pub decay_for: Option<f64>,

    #[command(flatten)]
    pub curve: CurveArgs,
}

/// Line-oriented question/answer channel.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stderr> {
    /// Questions on stderr, answers from stdin; stdout stays free for output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask `question` and parse the answer line.
    pub fn ask<T>(&mut self, question: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("Input closed before an answer to {question:?}");
        }
        let answer = line.trim();
        answer
            .parse()
            .map_err(|e| anyhow!("Invalid answer {answer:?} to {question:?}: {e}"))
    }
}

/// Parameters for a single price query. Never prompts.
pub fn price_params(
    start_premium: Option<&str>,
    curve: &CurveArgs,
    config: &CliConfig,
) -> Result<DecayParameters> {
    if let Some(params) = curve.load_params()? {
        params.validate().context("Invalid curve parameters")?;
        return Ok(params);
    }
    let text = start_premium.context("--start-premium is required unless --params is given")?;
    let start = parse_wad("start_premium", text).context("Invalid start premium")?;
    curve.build(config, start, curve.end_after, curve.base_price)
}

/// Parameters for a sampled series, prompting for anything missing.
///
/// The returned parameters always carry a horizon.
pub fn series_params<R: BufRead, W: Write>(
    args: &SeriesArgs,
    config: &CliConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<DecayParameters> {
    let unit = args.curve.unit;

    let params = match args.curve.load_params()? {
        Some(params) => match (args.decay_for, params.horizon_seconds) {
            (Some(units), _) => params.with_horizon(units * unit.seconds()),
            (None, Some(_)) => params,
            (None, None) => {
                let units: f64 = prompter.ask(&decay_question(unit))?;
                params.with_horizon(units * unit.seconds())
            }
        },
        None => {
            let start: u64 = match args.start {
                Some(v) => v,
                None => prompter.ask("Input a value for the start premium (units): ")?,
            };
            let end_after: f64 = match args.curve.end_after {
                Some(v) => v,
                None => prompter.ask(&format!(
                    "How many {}s would it take for the price to reach its end value: ",
                    unit.name()
                ))?,
            };
            let decay_for: f64 = match args.decay_for {
                Some(v) => v,
                None => prompter.ask(&decay_question(unit))?,
            };
            let base: f64 = match args.curve.base_price {
                Some(v) => v,
                None => prompter.ask("Input the base price (units) of the name: ")?,
            };
            args.curve
                .build(config, units_to_wad(start), Some(end_after), Some(base))?
                .with_horizon(decay_for * unit.seconds())
        }
    };

    params.validate().context("Invalid curve parameters")?;
    Ok(params)
}

fn decay_question(unit: TimeUnit) -> String {
    format!(
        "Input a value for the number of {}s over which the price should decay: ",
        unit.name()
    )
}

/// Resolve parameters and sample from zero through one unit past the horizon.
pub fn sample_series<R: BufRead, W: Write>(
    args: &SeriesArgs,
    config: &CliConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<PriceSeries> {
    let params = series_params(args, config, prompter)?;
    let unit_seconds = args.curve.unit.seconds();
    let horizon = params
        .horizon_seconds
        .context("Sampled curves need a decay horizon")?;
    let interval = sample_interval(unit_seconds, args.curve.samples_per_unit(config))
        .context("Invalid sampling density")?;

    let series = DecayCurve::new()
        .generate_series(&params, horizon + unit_seconds, interval)
        .context("Failed to sample the curve")?;
    Ok(series)
}
