//! Turn simulated months into output rows
//!
//! Every derived field (net worth, age, totals) is computed fresh from the
//! state handed in; nothing is carried over from the previous row.

use super::snapshots::{MonthRow, Snapshot, YearRow};
use super::state::{MonthActivity, SimulationState};
use crate::assumptions::AgeClock;

/// Receives the state after every simulated month
pub trait Recorder {
    fn record(&mut self, state: &SimulationState, activity: &MonthActivity);
}

/// One row per month
#[derive(Debug, Clone)]
pub struct MonthlyRecorder {
    ages: AgeClock,
    rows: Vec<MonthRow>,
}

impl MonthlyRecorder {
    pub fn new(ages: AgeClock) -> Self {
        Self {
            ages,
            rows: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[MonthRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<MonthRow> {
        self.rows
    }

    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.rows.into_iter().map(Snapshot::Monthly).collect()
    }
}

impl Recorder for MonthlyRecorder {
    fn record(&mut self, state: &SimulationState, activity: &MonthActivity) {
        let active_principal = state.active_principal();
        self.rows.push(MonthRow {
            year: activity.month.year,
            month_index: activity.month.month_index,
            month: activity.month.label(),
            age: self.ages.age_at_month(activity.month),
            deposits: activity.external(),
            reinvested: activity.reinvested,
            monthly_interest: activity.monthly_interest_after,
            active_principal,
            cash: state.cash,
            net_worth: active_principal + state.cash,
            certificates: state.portfolio.len(),
        });
    }
}

/// One row per December, with deposits accumulated since the last one
#[derive(Debug, Clone)]
pub struct YearlyRecorder {
    ages: AgeClock,
    rows: Vec<YearRow>,
    deposits_ytd: f64,
    reinvested_ytd: f64,
}

impl YearlyRecorder {
    pub fn new(ages: AgeClock) -> Self {
        Self {
            ages,
            rows: Vec::new(),
            deposits_ytd: 0.0,
            reinvested_ytd: 0.0,
        }
    }

    pub fn rows(&self) -> &[YearRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<YearRow> {
        self.rows
    }

    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.rows.into_iter().map(Snapshot::Yearly).collect()
    }
}

impl Recorder for YearlyRecorder {
    fn record(&mut self, state: &SimulationState, activity: &MonthActivity) {
        self.deposits_ytd += activity.external();
        self.reinvested_ytd += activity.reinvested;

        if !activity.month.is_december() {
            return;
        }

        let year = activity.month.year;
        let active_principal = state.active_principal();
        self.rows.push(YearRow {
            year,
            age: self.ages.age_at_year_end(year),
            deposits_ytd: self.deposits_ytd,
            reinvested_ytd: self.reinvested_ytd,
            monthly_interest_dec: activity.monthly_interest_after,
            active_principal_end: active_principal,
            cash_end: state.cash,
            net_worth_end: active_principal + state.cash,
        });
        self.deposits_ytd = 0.0;
        self.reinvested_ytd = 0.0;
    }
}
