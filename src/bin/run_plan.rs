//! Run one certificate ladder plan
//!
//! Writes the plan's rows to CSV (monthly in target mode, December rows
//! otherwise) and prints a summary.

use anyhow::{bail, Context, Result};
use certificate_ladder::{
    plan::{load_plans, PlanParams},
    report::{write_continuation_csv_path, write_result_csv_path},
    Assumptions, ProjectionConfig, ProjectionEngine, SimulationResult, TargetOutcome,
};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "run_plan")]
#[command(about = "Project a certificate ladder plan month by month")]
struct Args {
    /// JSON file with an array of plans
    #[arg(long)]
    plan_file: Option<PathBuf>,

    /// Plan to run: a name from the plan file, or "A"/"B" for the presets
    #[arg(short, long, default_value = "A")]
    plan: String,

    /// Rate table CSV with `year,annual_rate` columns
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Rate for years after the table (default: rate of the table's last year)
    #[arg(long)]
    floor: Option<f64>,

    #[arg(long)]
    start_year: Option<i32>,

    /// 0-based start month
    #[arg(long)]
    start_month: Option<u32>,

    #[arg(long)]
    deposit: Option<f64>,

    #[arg(long)]
    years: Option<u32>,

    /// Minimum reinvestment once deposits stop
    #[arg(long)]
    threshold: Option<f64>,

    #[arg(long)]
    starting_principal: Option<f64>,

    /// Monthly income target; switches to target-seeking mode
    #[arg(long)]
    target: Option<f64>,

    /// Output CSV
    #[arg(short, long, default_value = "ladder_projection.csv")]
    output: PathBuf,

    /// Also write the full result as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

fn select_plan(args: &Args) -> Result<PlanParams> {
    let base = match &args.plan_file {
        Some(path) => {
            let plans = load_plans(path)
                .with_context(|| format!("failed to load plans from {}", path.display()))?;
            match plans.into_iter().find(|p| p.name == args.plan) {
                Some(plan) => plan,
                None => bail!("no plan named {:?} in {}", args.plan, path.display()),
            }
        }
        None => match args.plan.to_ascii_uppercase().as_str() {
            "A" | "PLAN A" => PlanParams::plan_a(),
            "B" | "PLAN B" => PlanParams::plan_b(),
            other => bail!("unknown preset {:?}; use A, B or --plan-file", other),
        },
    };

    Ok(PlanParams {
        start_year: args.start_year.unwrap_or(base.start_year),
        start_month_index: args.start_month.unwrap_or(base.start_month_index),
        base_monthly_deposit: args.deposit.unwrap_or(base.base_monthly_deposit),
        deposit_years: args.years.unwrap_or(base.deposit_years),
        min_reinvest: args.threshold.unwrap_or(base.min_reinvest),
        starting_principal: args.starting_principal.unwrap_or(base.starting_principal),
        target_monthly_income: args.target.or(base.target_monthly_income),
        ..base
    })
}

fn print_summary(result: &SimulationResult) {
    println!("\n{} Summary:", result.plan_name);
    println!("  Rows:              {}", result.rows.len());
    println!("  Deposited:         ${:.2}", result.totals.deposited);
    println!("  Active principal:  ${:.2}", result.totals.active_principal);
    println!("  Cash:              ${:.2}", result.totals.cash);
    println!("  Net worth:         ${:.2}", result.totals.net_worth);
    if let Some(last) = result.last_row() {
        println!("  Monthly interest:  ${:.2} ({})", last.monthly_interest(), last.year());
    }

    match result.target {
        Some(TargetOutcome::Reached {
            months_elapsed,
            month,
            monthly_interest,
        }) => {
            println!(
                "  Target reached in {} after {} months (${:.2}/month)",
                month, months_elapsed, monthly_interest
            );
        }
        Some(TargetOutcome::Unreached { months_searched }) => {
            println!("  Target not reached within {} months", months_searched);
        }
        None => {}
    }

    if let Some(last) = result.continuation.as_ref().and_then(|rows| rows.last()) {
        println!(
            "  Continuation to {}: net worth ${:.2}, ${:.2}/month",
            last.year, last.net_worth_end, last.monthly_interest_dec
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let assumptions = match &args.rates {
        Some(path) => Assumptions::from_csv_path(path, args.floor)
            .with_context(|| format!("failed to load rate table from {}", path.display()))?,
        None => Assumptions::reference(),
    };
    let plan = select_plan(&args)?;
    let engine = ProjectionEngine::new(assumptions, ProjectionConfig::default());

    let result = plan
        .to_input()
        .and_then(|input| engine.project(&plan.name, &input))
        .with_context(|| format!("invalid plan {:?}", plan.name))?;

    write_result_csv_path(&result, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("Output written to {}", args.output.display());

    if result.continuation.is_some() {
        let path = args.output.with_extension("continuation.csv");
        write_continuation_csv_path(&result, &path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Continuation written to {}", path.display());
    }

    if let Some(path) = &args.json {
        let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &result)?;
        println!("Result written to {}", path.display());
    }

    print_summary(&result);
    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
