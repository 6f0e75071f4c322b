//! Load rate schedules from CSV
//!
//! Expected columns: `year,annual_rate` with the rate as a decimal
//! (0.17 for 17%).

use super::RateSchedule;
use crate::error::{Result, ValidationError};
use log::debug;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RateRecord {
    year: i32,
    annual_rate: f64,
}

/// Read a rate table from a CSV file.
///
/// When `floor` is `None` the last row's rate is used for every later year.
pub fn load_rate_schedule(path: &Path, floor: Option<f64>) -> Result<RateSchedule> {
    let file = File::open(path)?;
    let schedule = rate_schedule_from_reader(file, floor)?;
    debug!(
        "Loaded {} rate entries from {}",
        schedule.entries().len(),
        path.display()
    );
    Ok(schedule)
}

pub fn rate_schedule_from_reader<R: Read>(reader: R, floor: Option<f64>) -> Result<RateSchedule> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for record in csv_reader.deserialize() {
        let record: RateRecord = record?;
        entries.push((record.year, record.annual_rate));
    }

    let floor = match floor {
        Some(rate) => rate,
        None => entries
            .iter()
            .max_by_key(|&&(year, _)| year)
            .map(|&(_, rate)| rate)
            .ok_or(ValidationError::EmptyRateTable)?,
    };

    Ok(RateSchedule::new(entries, floor)?)
}
