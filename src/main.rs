//! Cash-flow IRR CLI
//!
//! Command-line interface for NPV, IRR and NPV-curve calculations.
//! Solver and curve defaults can be set through IRR_* / NPV_CURVE_* environment
//! variables; flags given on the command line take precedence.

use std::process;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use cashflow_irr::cashflows::{load_series, parse_series};
use cashflow_irr::valuation::{compute_irr_with, compute_npv, CurveConfig, SolverConfig};
use cashflow_irr::{format_rate_pct, CashFlowSeries, IrrReport};

/// NPV, IRR and NPV-curve calculations for periodic cash flows
#[derive(Parser)]
#[command(name = "irr", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve for the internal rate of return
    Irr {
        #[command(flatten)]
        input: SeriesInput,
        #[command(flatten)]
        solver: SolverArgs,
        /// Convert the periodic IRR to an annual rate (e.g., 12 for monthly flows)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        periods_per_year: Option<u32>,
    },
    /// Net present value at a given periodic rate
    Npv {
        #[command(flatten)]
        input: SeriesInput,
        /// Periodic discount rate as a decimal
        #[arg(long, allow_hyphen_values = true)]
        rate: f64,
    },
    /// Sample the NPV curve over a rate range
    ///
    /// With --json, NPVs that are not finite (rates at or below -100%) are
    /// written as null, so infinities and NaN are not distinguished.
    Curve {
        #[command(flatten)]
        input: SeriesInput,
        #[command(flatten)]
        curve: CurveArgs,
    },
    /// IRR, NPV curve and summary in one report
    ///
    /// With --json, non-finite curve NPVs are written as null.
    Report {
        #[command(flatten)]
        input: SeriesInput,
        #[command(flatten)]
        solver: SolverArgs,
        #[command(flatten)]
        curve: CurveArgs,
    },
}

#[derive(Args)]
struct SeriesInput {
    /// Comma-separated cash flows, period 0 first (e.g., "-100,121")
    #[arg(long, allow_hyphen_values = true, conflicts_with = "file")]
    flows: Option<String>,

    /// CSV file with Period,CashFlow columns
    #[arg(long)]
    file: Option<String>,
}

impl SeriesInput {
    fn load(&self) -> Result<CashFlowSeries> {
        match (&self.flows, &self.file) {
            (Some(flows), _) => parse_series(flows).context("Failed to parse --flows"),
            (None, Some(path)) => {
                load_series(path).with_context(|| format!("Failed to load '{}'", path))
            }
            (None, None) => bail!("Provide cash flows with --flows or --file"),
        }
    }
}

#[derive(Args)]
struct SolverArgs {
    #[arg(long)]
    max_iterations: Option<u32>,
    #[arg(long)]
    tolerance: Option<f64>,
    /// First secant seed rate
    #[arg(long, allow_hyphen_values = true)]
    guess_low: Option<f64>,
    /// Second secant seed rate
    #[arg(long, allow_hyphen_values = true)]
    guess_high: Option<f64>,
}

impl SolverArgs {
    fn config(&self) -> SolverConfig {
        let mut config = SolverConfig::from_env();
        if let Some(n) = self.max_iterations {
            config.max_iterations = n;
        }
        if let Some(t) = self.tolerance {
            config.tolerance = t;
        }
        if let Some(g) = self.guess_low {
            config.first_guess = g;
        }
        if let Some(g) = self.guess_high {
            config.second_guess = g;
        }
        config
    }
}

#[derive(Args)]
struct CurveArgs {
    #[arg(long, allow_hyphen_values = true)]
    min_rate: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    max_rate: Option<f64>,
    #[arg(long)]
    steps: Option<usize>,
}

impl CurveArgs {
    fn config(&self) -> CurveConfig {
        let mut config = CurveConfig::from_env();
        if let Some(r) = self.min_rate {
            config.min_rate = r;
        }
        if let Some(r) = self.max_rate {
            config.max_rate = r;
        }
        if let Some(s) = self.steps {
            config.steps = s;
        }
        config
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Irr { input, solver, periods_per_year } => {
            let series = input.load()?;
            let mut outcome = compute_irr_with(series.as_slice(), &solver.config());
            if let Some(periods) = periods_per_year {
                outcome = outcome.annualized(*periods);
            }

            if cli.json {
                println!("{}", serde_json::to_string(&outcome)?);
            } else {
                println!("IRR: {}", format_rate_pct(outcome.as_f64()));
                if !outcome.is_converged() {
                    println!("  ({})", outcome.status().replace('_', " "));
                }
            }
        }
        Commands::Npv { input, rate } => {
            let series = input.load()?;
            let npv = compute_npv(series.as_slice(), *rate);

            if cli.json {
                println!("{}", serde_json::json!({ "rate": rate, "npv": npv }));
            } else {
                println!("NPV @ {}: {:.2}", format_rate_pct(*rate), npv);
            }
        }
        Commands::Curve { input, curve } => {
            let series = input.load()?;
            let points = curve.config().sample(series.as_slice());

            if cli.json {
                println!("{}", serde_json::to_string(&points)?);
            } else {
                println!("{:>10} {:>16}", "Rate %", "NPV");
                println!("{}", "-".repeat(27));
                for point in &points {
                    println!("{:>10.2} {:>16.2}", point.rate, point.npv);
                }
            }
        }
        Commands::Report { input, solver, curve } => {
            let series = input.load()?;
            let report = IrrReport::build(&series, &solver.config(), &curve.config());

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let summary = report.summary();
                println!("Cash-flow analysis");
                println!("==================\n");
                println!("  Periods:        {}", summary.periods);
                println!("  Total inflows:  {:.2}", summary.total_inflows);
                println!("  Total outflows: {:.2}", summary.total_outflows);
                println!("  Net (undisc.):  {:.2}", summary.net_cash_flow);
                println!("  Sign changes:   {}", summary.sign_changes);
                println!("  NPV @ guess:    {:.2}", report.npv_at_guess);
                println!("\n  IRR: {} ({})", summary.irr_display, summary.status);
                if summary.sign_changes > 1 {
                    println!("  Note: more than one sign change, the IRR may not be unique");
                }
            }
        }
    }

    Ok(())
}
