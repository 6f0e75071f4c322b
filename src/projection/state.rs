//! Per-run simulation state and the single-month fold step

use super::reinvest::{Decision, ReinvestmentPolicy};
use crate::assumptions::RateSchedule;
use crate::calendar::CalendarMonth;
use crate::portfolio::{Certificate, CertificatePortfolio};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// State of one run between months.
///
/// Each simulated month produces a new state from the previous one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub portfolio: CertificatePortfolio,
    /// Funds not yet committed to a certificate
    pub pot: f64,
    /// Pot left over at the end of the last month
    pub cash: f64,
    /// Months in which a base deposit was added
    pub deposits_completed: u32,
    /// Money contributed from outside the system
    pub total_deposited: f64,
    /// Starting principal not yet credited to a month's activity
    #[serde(default)]
    pub pending_opening: f64,
    /// Part of the pot that came from outside (deposits, starting principal)
    #[serde(default)]
    pub external_pot: f64,
}

/// Money movements of one simulated month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthActivity {
    pub month: CalendarMonth,
    /// Coupons paid by certificates held at the start of the month
    pub coupons: f64,
    /// Principal returned by certificates maturing this month
    pub matured: f64,
    /// Base deposit added this month
    pub deposit: f64,
    /// Starting principal credited this month; only ever the first month
    pub opening: f64,
    /// Principal of the certificate opened this month (0 if none)
    pub issued: f64,
    /// Coupons and matured principal locked into this month's certificate
    pub reinvested: f64,
    /// Coupon sum of the certificates held after maturities and issuance
    pub monthly_interest_after: f64,
}

impl MonthActivity {
    /// A month in which nothing moved besides crediting the starting principal
    pub fn idle(month: CalendarMonth, state: &SimulationState) -> Self {
        Self {
            month,
            coupons: 0.0,
            matured: 0.0,
            deposit: 0.0,
            opening: state.pending_opening,
            issued: 0.0,
            reinvested: 0.0,
            monthly_interest_after: state.portfolio.monthly_interest(),
        }
    }

    /// Money from outside the system credited this month
    pub fn external(&self) -> f64 {
        self.deposit + self.opening
    }
}

impl SimulationState {
    /// State before the first month. Funds already on hand sit in the pot
    /// and count as deposited.
    pub fn opening(starting_principal: f64) -> Self {
        Self {
            pot: starting_principal,
            cash: starting_principal,
            total_deposited: starting_principal,
            pending_opening: starting_principal,
            external_pot: starting_principal,
            ..Self::default()
        }
    }

    /// Same state with the starting principal already credited to a row
    pub fn with_opening_reported(&self) -> Self {
        Self {
            pending_opening: 0.0,
            ..self.clone()
        }
    }

    pub fn active_principal(&self) -> f64 {
        self.portfolio.active_principal()
    }

    pub fn net_worth(&self) -> f64 {
        self.active_principal() + self.cash
    }

    /// Simulate `month`: accrue coupons, mature, then deposit and issue as
    /// the policy decides.
    pub fn step(
        &self,
        month: CalendarMonth,
        policy: &ReinvestmentPolicy,
        rates: &RateSchedule,
        term_months: u32,
    ) -> (SimulationState, MonthActivity) {
        let coupons = self.portfolio.accrue_month();
        let (portfolio, matured) = self.portfolio.mature_and_collect();

        let mut pot = self.pot + coupons + matured;
        let mut external_pot = self.external_pot;
        let mut deposits_completed = self.deposits_completed;
        let mut total_deposited = self.total_deposited;
        let mut deposit = 0.0;

        let issue = match policy.decide(pot, deposits_completed) {
            Decision::DepositAndIssue { deposit: amount } => {
                deposit = amount;
                pot += amount;
                external_pot += amount;
                total_deposited += amount;
                deposits_completed += 1;
                pot > 0.0
            }
            Decision::Reinvest => true,
            Decision::Hold => false,
        };

        let mut issued = 0.0;
        let mut reinvested = 0.0;
        let portfolio = if issue {
            let rate = rates.rate_for_year(month.year);
            debug!(
                "{}: issuing certificate of {:.2} at {:.2}%",
                month,
                pot,
                rate * 100.0
            );
            issued = pot;
            reinvested = (issued - external_pot).max(0.0);
            external_pot = 0.0;
            pot = 0.0;
            portfolio.issue(Certificate::new(issued, rate, term_months, month))
        } else {
            portfolio
        };

        let monthly_interest_after = portfolio.monthly_interest();
        trace!(
            "{}: coupons {:.2}, matured {:.2}, deposit {:.2}, cash {:.2}, live {}",
            month,
            coupons,
            matured,
            deposit,
            pot,
            portfolio.len()
        );

        let next = SimulationState {
            portfolio,
            pot,
            cash: pot,
            deposits_completed,
            total_deposited,
            pending_opening: 0.0,
            external_pot,
        };
        let activity = MonthActivity {
            month,
            coupons,
            matured,
            deposit,
            opening: self.pending_opening,
            issued,
            reinvested,
            monthly_interest_after,
        };

        (next, activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn rates() -> RateSchedule {
        RateSchedule::flat(0.17).unwrap()
    }

    fn policy(horizon: u32) -> ReinvestmentPolicy {
        ReinvestmentPolicy {
            base_monthly_deposit: 25_000.0,
            deposit_horizon_months: horizon,
            min_reinvest_threshold: 1_000.0,
        }
    }

    #[test]
    fn test_horizon_month_issues_deposit() {
        let month = CalendarMonth::december(2025);
        let (state, activity) = SimulationState::default().step(month, &policy(1), &rates(), 36);

        assert_eq!(activity.deposit, 25_000.0);
        assert_eq!(activity.issued, 25_000.0);
        assert_eq!(activity.reinvested, 0.0);
        assert_abs_diff_eq!(activity.monthly_interest_after, 354.1666666, epsilon = 1e-6);
        assert_eq!(state.active_principal(), 25_000.0);
        assert_eq!(state.cash, 0.0);
        assert_eq!(state.deposits_completed, 1);
        assert_eq!(state.total_deposited, 25_000.0);
    }

    #[test]
    fn test_after_horizon_coupon_is_held_as_cash() {
        let rates = rates();
        let policy = policy(1);
        let (first, _) = SimulationState::default().step(CalendarMonth::december(2025), &policy, &rates, 36);
        let (second, activity) = first.step(CalendarMonth::new(2026, 0), &policy, &rates, 36);

        assert_abs_diff_eq!(activity.coupons, 354.1666666, epsilon = 1e-6);
        assert_eq!(activity.issued, 0.0);
        assert_eq!(activity.deposit, 0.0);
        assert_abs_diff_eq!(second.cash, 354.1666666, epsilon = 1e-6);
        assert_eq!(second.active_principal(), 25_000.0);
        assert_eq!(second.total_deposited, 25_000.0);
        // Original state is untouched
        assert_eq!(first.cash, 0.0);
    }

    #[test]
    fn test_opening_principal_is_issued_with_first_deposit() {
        let (state, activity) = SimulationState::opening(10_000.0).step(
            CalendarMonth::december(2025),
            &policy(12),
            &rates(),
            36,
        );

        assert_eq!(activity.issued, 35_000.0);
        assert_eq!(activity.opening, 10_000.0);
        assert_eq!(activity.external(), 35_000.0);
        assert_eq!(activity.reinvested, 0.0);
        assert_eq!(state.total_deposited, 35_000.0);
        assert_eq!(state.net_worth(), 35_000.0);
        assert_eq!(state.pending_opening, 0.0);
        assert_eq!(state.external_pot, 0.0);
    }

    #[test]
    fn test_held_opening_principal_is_not_reinvested_later() {
        // No deposits and a threshold above the starting principal: the
        // principal waits in the pot until coupons lift it over the line
        let policy = ReinvestmentPolicy {
            base_monthly_deposit: 0.0,
            deposit_horizon_months: 0,
            min_reinvest_threshold: 1_000.0,
        };
        let portfolio = CertificatePortfolio::new().issue(Certificate::new(
            12_000.0,
            0.10,
            36,
            CalendarMonth::new(2025, 10),
        ));
        let opening = SimulationState {
            portfolio,
            ..SimulationState::opening(950.0)
        };

        let (state, activity) = opening.step(CalendarMonth::december(2025), &policy, &rates(), 36);

        assert_eq!(activity.opening, 950.0);
        assert_abs_diff_eq!(activity.coupons, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(activity.issued, 1_050.0, epsilon = 1e-9);
        assert_abs_diff_eq!(activity.reinvested, 100.0, epsilon = 1e-9);
        assert_eq!(state.external_pot, 0.0);

        let (_, next) = state.step(CalendarMonth::new(2026, 0), &policy, &rates(), 36);
        assert_eq!(next.opening, 0.0);
    }

    #[test]
    fn test_zero_deposit_in_horizon_issues_nothing() {
        let policy = ReinvestmentPolicy {
            base_monthly_deposit: 0.0,
            ..policy(3)
        };
        let (state, activity) = SimulationState::default().step(CalendarMonth::december(2025), &policy, &rates(), 36);

        assert_eq!(activity.issued, 0.0);
        assert!(state.portfolio.is_empty());
        assert_eq!(state.deposits_completed, 1);
    }

    #[test]
    fn test_rate_locked_at_issuance_year() {
        let rates = RateSchedule::reference();
        let policy = policy(2);
        let (dec, _) = SimulationState::default().step(CalendarMonth::december(2025), &policy, &rates, 36);
        let (jan, _) = dec.step(CalendarMonth::new(2026, 0), &policy, &rates, 36);

        let issued_rates: Vec<f64> = jan.portfolio.iter().map(|c| c.rate).collect();
        assert_eq!(issued_rates, vec![0.17, 0.16]);
    }
}
