//! Load plan definitions from JSON
//!
//! A plan file is a JSON array of `PlanParams`; omitted fields take the
//! preset defaults.

use super::PlanParams;
use crate::error::Result;
use log::info;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub fn load_plans(path: &Path) -> Result<Vec<PlanParams>> {
    let file = File::open(path)?;
    let plans = load_plans_from_reader(BufReader::new(file))?;
    info!("Loaded {} plans from {}", plans.len(), path.display());
    Ok(plans)
}

pub fn load_plans_from_reader<R: Read>(reader: R) -> Result<Vec<PlanParams>> {
    let plans: Vec<PlanParams> = serde_json::from_reader(reader)?;
    for plan in &plans {
        plan.to_input()?.validate()?;
    }
    Ok(plans)
}

/// Plan A and Plan B
pub fn default_plans() -> Vec<PlanParams> {
    vec![PlanParams::plan_a(), PlanParams::plan_b()]
}
