//! CSV output of simulation rows
//!
//! Rows carry unrounded values; amounts are rounded to cents and ages to
//! one decimal only here.

use crate::error::Result;
use crate::projection::{MonthRow, SimulationResult, Snapshot, YearRow};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::Path;

fn cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Serialize)]
struct MonthRecord<'a> {
    month: &'a str,
    age: f64,
    deposits: f64,
    reinvested: f64,
    monthly_interest: f64,
    active_principal: f64,
    cash: f64,
    net_worth: f64,
    certificates: usize,
}

impl<'a> From<&'a MonthRow> for MonthRecord<'a> {
    fn from(row: &'a MonthRow) -> Self {
        Self {
            month: &row.month,
            age: (row.age * 10.0).round() / 10.0,
            deposits: cents(row.deposits),
            reinvested: cents(row.reinvested),
            monthly_interest: cents(row.monthly_interest),
            active_principal: cents(row.active_principal),
            cash: cents(row.cash),
            net_worth: cents(row.net_worth),
            certificates: row.certificates,
        }
    }
}

#[derive(Debug, Serialize)]
struct YearRecord {
    year: i32,
    age: i32,
    deposits_ytd: f64,
    reinvested_ytd: f64,
    monthly_interest_dec: f64,
    active_principal_end: f64,
    cash_end: f64,
    net_worth_end: f64,
}

impl From<&YearRow> for YearRecord {
    fn from(row: &YearRow) -> Self {
        Self {
            year: row.year,
            age: row.age,
            deposits_ytd: cents(row.deposits_ytd),
            reinvested_ytd: cents(row.reinvested_ytd),
            monthly_interest_dec: cents(row.monthly_interest_dec),
            active_principal_end: cents(row.active_principal_end),
            cash_end: cents(row.cash_end),
            net_worth_end: cents(row.net_worth_end),
        }
    }
}

pub fn write_monthly_csv<'a, W, I>(rows: I, writer: W) -> Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = &'a MonthRow>,
{
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(MonthRecord::from(row))?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_yearly_csv<'a, W, I>(rows: I, writer: W) -> Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = &'a YearRow>,
{
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(YearRecord::from(row))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the main rows of a result; monthly or yearly depending on the run
pub fn write_result_csv<W: io::Write>(result: &SimulationResult, writer: W) -> Result<()> {
    match result.rows.first() {
        Some(Snapshot::Monthly(_)) => write_monthly_csv(result.monthly_rows(), writer),
        _ => write_yearly_csv(result.yearly_rows(), writer),
    }
}

pub fn write_result_csv_path(result: &SimulationResult, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_result_csv(result, io::BufWriter::new(file))?;
    info!("{}: wrote {} rows to {}", result.plan_name, result.rows.len(), path.display());
    Ok(())
}

/// Continuation rows of a target run, if any
pub fn write_continuation_csv_path(result: &SimulationResult, path: &Path) -> Result<()> {
    let rows = result.continuation.as_deref().unwrap_or_default();
    let file = File::create(path)?;
    write_yearly_csv(rows, io::BufWriter::new(file))
}
