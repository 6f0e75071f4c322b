//! Run several plans side by side
//!
//! Each plan gets its own state; nothing is shared between runs, so the
//! plans are projected in parallel.

use super::engine::ProjectionEngine;
use super::snapshots::SimulationResult;
use crate::error::ValidationError;
use crate::plan::PlanParams;
use rayon::prelude::*;

/// Outcome of one plan in a batch
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRun {
    pub name: String,
    pub result: Result<SimulationResult, ValidationError>,
}

/// Project every plan; results come back in input order
pub fn run_plans(engine: &ProjectionEngine, plans: &[PlanParams]) -> Vec<PlanRun> {
    plans
        .par_iter()
        .map(|plan| PlanRun {
            name: plan.name.clone(),
            result: plan
                .to_input()
                .and_then(|input| engine.project(&plan.name, &input)),
        })
        .collect()
}
