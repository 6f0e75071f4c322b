//! Named savings plans and their default parameters
//!
//! A plan is the user-facing description of a run: deposits are given in
//! whole years and converted into a `SimulationInput` on demand.

use super::SimulationInput;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Parameters of a named plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanParams {
    pub name: String,

    /// First simulated year (default: 2025)
    #[serde(default = "default_start_year")]
    pub start_year: i32,

    /// First simulated month, 0-based (default: 11, December)
    #[serde(default = "default_start_month_index")]
    pub start_month_index: u32,

    /// Years of monthly base deposits (default: 7)
    #[serde(default = "default_deposit_years")]
    pub deposit_years: u32,

    /// Base deposit added every month of the horizon (default: 25,000)
    #[serde(default = "default_base_monthly_deposit")]
    pub base_monthly_deposit: f64,

    /// Smallest new certificate after deposits stop (default: 1,000)
    #[serde(default = "default_min_reinvest")]
    pub min_reinvest: f64,

    #[serde(default)]
    pub starting_principal: f64,

    /// Monthly income goal; selects target-seeking mode when present
    #[serde(default)]
    pub target_monthly_income: Option<f64>,
}

fn default_start_year() -> i32 { 2025 }
fn default_start_month_index() -> u32 { 11 }
fn default_deposit_years() -> u32 { 7 }
fn default_base_monthly_deposit() -> f64 { 25_000.0 }
fn default_min_reinvest() -> f64 { 1_000.0 }

impl Default for PlanParams {
    fn default() -> Self {
        Self {
            name: "Plan A".to_string(),
            start_year: 2025,
            start_month_index: 11,
            deposit_years: 7,
            base_monthly_deposit: 25_000.0,
            min_reinvest: 1_000.0,
            starting_principal: 0.0,
            target_monthly_income: None,
        }
    }
}

impl PlanParams {
    /// Full monthly deposit
    pub fn plan_a() -> Self {
        Self::default()
    }

    /// A quarter of Plan A's deposit, otherwise identical
    pub fn plan_b() -> Self {
        Self {
            name: "Plan B".to_string(),
            base_monthly_deposit: 25_000.0 / 4.0,
            ..Self::default()
        }
    }

    /// Fails when the deposit years do not fit in a month count
    pub fn to_input(&self) -> Result<SimulationInput, ValidationError> {
        Ok(SimulationInput {
            start_year: self.start_year,
            start_month_index: self.start_month_index,
            deposit_horizon_months: SimulationInput::horizon_months(self.deposit_years)?,
            base_monthly_deposit: self.base_monthly_deposit,
            min_reinvest_threshold: self.min_reinvest,
            starting_principal: self.starting_principal,
            target_monthly_income: self.target_monthly_income,
        })
    }
}
