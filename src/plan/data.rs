use crate::calendar::CalendarMonth;
use crate::error::{ensure_finite, ensure_non_negative, ValidationError};
use crate::projection::ReinvestmentPolicy;
use serde::{Deserialize, Serialize};

/// Plain numeric configuration for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    pub start_year: i32,
    /// 0 for January through 11 for December
    pub start_month_index: u32,
    /// Number of months in which the base deposit is added
    pub deposit_horizon_months: u32,
    pub base_monthly_deposit: f64,
    /// Smallest pot that opens a new certificate once deposits have stopped
    pub min_reinvest_threshold: f64,
    /// Funds already on hand; placed in the pot before the first month
    #[serde(default)]
    pub starting_principal: f64,
    /// Presence selects target-seeking mode
    #[serde(default)]
    pub target_monthly_income: Option<f64>,
}

impl SimulationInput {
    /// Deposit horizon in months for a whole number of years
    pub fn horizon_months(deposit_years: u32) -> Result<u32, ValidationError> {
        deposit_years
            .checked_mul(12)
            .ok_or(ValidationError::DepositYearsOutOfRange(deposit_years))
    }

    /// Input with a deposit horizon counted in whole years; the horizon
    /// saturates at `u32::MAX` months
    pub fn with_deposit_years(
        start: CalendarMonth,
        deposit_years: u32,
        base_monthly_deposit: f64,
        min_reinvest_threshold: f64,
    ) -> Self {
        Self {
            start_year: start.year,
            start_month_index: start.month_index,
            deposit_horizon_months: deposit_years.saturating_mul(12),
            base_monthly_deposit,
            min_reinvest_threshold,
            starting_principal: 0.0,
            target_monthly_income: None,
        }
    }

    /// Reject inputs that would produce a fabricated projection.
    ///
    /// Non-positive thresholds and targets are accepted: they are
    /// degenerate but well defined.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_month_index > CalendarMonth::DECEMBER {
            return Err(ValidationError::MonthIndexOutOfRange(self.start_month_index));
        }
        ensure_non_negative("base monthly deposit", self.base_monthly_deposit)?;
        ensure_non_negative("starting principal", self.starting_principal)?;
        ensure_finite("minimum reinvest threshold", self.min_reinvest_threshold)?;
        if let Some(target) = self.target_monthly_income {
            ensure_finite("target monthly income", target)?;
        }
        Ok(())
    }

    pub fn start(&self) -> CalendarMonth {
        CalendarMonth::new(self.start_year, self.start_month_index)
    }

    pub fn policy(&self) -> ReinvestmentPolicy {
        ReinvestmentPolicy {
            base_monthly_deposit: self.base_monthly_deposit,
            deposit_horizon_months: self.deposit_horizon_months,
            min_reinvest_threshold: self.min_reinvest_threshold,
        }
    }
}
