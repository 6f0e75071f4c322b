//! Output rows and run results

use super::state::SimulationState;
use super::target::TargetOutcome;
use crate::calendar::CalendarMonth;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// State at the end of one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRow {
    pub year: i32,
    pub month_index: u32,
    /// `YYYY-MM`
    pub month: String,
    pub age: f64,
    /// External money added this month
    pub deposits: f64,
    pub reinvested: f64,
    /// Coupon sum after this month's maturities and issuance
    pub monthly_interest: f64,
    pub active_principal: f64,
    pub cash: f64,
    pub net_worth: f64,
    pub certificates: usize,
}

/// State at the end of a calendar year (December)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRow {
    pub year: i32,
    pub age: i32,
    /// External money (base deposits, starting principal) since the
    /// previous December row
    pub deposits_ytd: f64,
    /// Internal funds reinvested since the previous December row
    pub reinvested_ytd: f64,
    pub monthly_interest_dec: f64,
    pub active_principal_end: f64,
    pub cash_end: f64,
    pub net_worth_end: f64,
}

/// One output row; monthly in target mode, yearly otherwise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Snapshot {
    Monthly(MonthRow),
    Yearly(YearRow),
}

impl Snapshot {
    pub fn year(&self) -> i32 {
        match self {
            Snapshot::Monthly(row) => row.year,
            Snapshot::Yearly(row) => row.year,
        }
    }

    pub fn monthly_interest(&self) -> f64 {
        match self {
            Snapshot::Monthly(row) => row.monthly_interest,
            Snapshot::Yearly(row) => row.monthly_interest_dec,
        }
    }

    pub fn active_principal(&self) -> f64 {
        match self {
            Snapshot::Monthly(row) => row.active_principal,
            Snapshot::Yearly(row) => row.active_principal_end,
        }
    }

    pub fn cash(&self) -> f64 {
        match self {
            Snapshot::Monthly(row) => row.cash,
            Snapshot::Yearly(row) => row.cash_end,
        }
    }

    pub fn net_worth(&self) -> f64 {
        match self {
            Snapshot::Monthly(row) => row.net_worth,
            Snapshot::Yearly(row) => row.net_worth_end,
        }
    }

    pub fn as_monthly(&self) -> Option<&MonthRow> {
        match self {
            Snapshot::Monthly(row) => Some(row),
            Snapshot::Yearly(_) => None,
        }
    }

    pub fn as_yearly(&self) -> Option<&YearRow> {
        match self {
            Snapshot::Yearly(row) => Some(row),
            Snapshot::Monthly(_) => None,
        }
    }
}

/// Balances as of the final recorded row
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub deposited: f64,
    pub cash: f64,
    pub active_principal: f64,
    pub net_worth: f64,
}

impl Totals {
    pub fn from_state(state: &SimulationState) -> Self {
        let active_principal = state.active_principal();
        Self {
            deposited: state.total_deposited,
            cash: state.cash,
            active_principal,
            net_worth: active_principal + state.cash,
        }
    }
}

/// Net worth and coupon income at one December
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearEnd {
    pub year: i32,
    pub net_worth: f64,
    pub monthly_interest: f64,
}

/// Complete result of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub plan_name: String,
    pub rows: Vec<Snapshot>,
    pub totals: Totals,
    /// Reinvestment-only trajectory after the target month; target mode
    /// only. Empty when the target was reached after the final month.
    pub continuation: Option<Vec<YearRow>>,
    /// Target search outcome; target mode only
    pub target: Option<TargetOutcome>,
}

impl SimulationResult {
    pub fn monthly_rows(&self) -> impl Iterator<Item = &MonthRow> {
        self.rows.iter().filter_map(Snapshot::as_monthly)
    }

    pub fn yearly_rows(&self) -> impl Iterator<Item = &YearRow> {
        self.rows.iter().filter_map(Snapshot::as_yearly)
    }

    pub fn last_row(&self) -> Option<&Snapshot> {
        self.rows.last()
    }

    pub fn reached_target(&self) -> bool {
        matches!(self.target, Some(TargetOutcome::Reached { .. }))
    }

    /// One entry per December across the main rows and the continuation,
    /// in year order. A continuation row replaces a monthly row for the
    /// same December; it reflects the later state.
    pub fn year_ends(&self) -> Vec<YearEnd> {
        let mut by_year = BTreeMap::new();

        for row in &self.rows {
            let december = match row {
                Snapshot::Monthly(row) => row.month_index == CalendarMonth::DECEMBER,
                Snapshot::Yearly(_) => true,
            };
            if december {
                by_year.insert(
                    row.year(),
                    YearEnd {
                        year: row.year(),
                        net_worth: row.net_worth(),
                        monthly_interest: row.monthly_interest(),
                    },
                );
            }
        }
        for row in self.continuation.iter().flatten() {
            by_year.insert(
                row.year,
                YearEnd {
                    year: row.year,
                    net_worth: row.net_worth_end,
                    monthly_interest: row.monthly_interest_dec,
                },
            );
        }

        by_year.into_values().collect()
    }
}
