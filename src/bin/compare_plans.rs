//! Compare several plans side by side
//!
//! Plans run in parallel; the table lists each plan's net worth and monthly
//! income at every December.

use anyhow::{Context, Result};
use certificate_ladder::{
    plan::{default_plans, load_plans},
    projection::{run_plans, PlanRun, YearEnd},
    Assumptions, ProjectionConfig, ProjectionEngine,
};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "compare_plans")]
#[command(about = "Project several certificate ladder plans and compare them by year")]
struct Args {
    /// JSON file with an array of plans (default: Plan A and Plan B)
    #[arg(long)]
    plan_file: Option<PathBuf>,

    /// Rate table CSV with `year,annual_rate` columns
    #[arg(long)]
    rates: Option<PathBuf>,

    #[arg(long)]
    floor: Option<f64>,
}

/// Net worth and monthly income per year, one column per plan
fn december_table(runs: &[PlanRun]) -> BTreeMap<i32, Vec<Option<YearEnd>>> {
    let mut table: BTreeMap<i32, Vec<Option<YearEnd>>> = BTreeMap::new();

    for (column, run) in runs.iter().enumerate() {
        let Ok(result) = &run.result else { continue };
        for year_end in result.year_ends() {
            let cells = table
                .entry(year_end.year)
                .or_insert_with(|| vec![None; runs.len()]);
            cells[column] = Some(year_end);
        }
    }

    table
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
    let plans = match &args.plan_file {
        Some(path) => load_plans(path)
            .with_context(|| format!("failed to load plans from {}", path.display()))?,
        None => default_plans(),
    };

    let engine = ProjectionEngine::new(assumptions, ProjectionConfig::default());
    println!("Running {} plans...", plans.len());
    let runs = run_plans(&engine, &plans);
    println!("Projections complete in {:?}", start.elapsed());

    for run in &runs {
        if let Err(err) = &run.result {
            eprintln!("  {}: {}", run.name, err);
        }
    }

    print!("\n{:>6}", "Year");
    for run in &runs {
        print!(" | {:>28}", run.name);
    }
    println!();

    for (year, cells) in december_table(&runs) {
        print!("{:>6}", year);
        for cell in cells {
            match cell {
                Some(year_end) => print!(
                    " | {:>15.0} {:>12.2}",
                    year_end.net_worth, year_end.monthly_interest
                ),
                None => print!(" | {:>28}", "-"),
            }
        }
        println!();
    }

    println!("\nColumns: net worth, monthly interest at December");
    Ok(())
}
