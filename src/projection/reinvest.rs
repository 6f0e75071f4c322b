//! Monthly decision on what to do with the pot

use serde::{Deserialize, Serialize};

/// What happens to the pot at the end of a month
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Add the scheduled deposit, then lock the whole pot into a new
    /// certificate regardless of its size
    DepositAndIssue { deposit: f64 },
    /// Lock the whole pot into a new certificate
    Reinvest,
    /// Carry the pot forward; it is reported as cash
    Hold,
}

/// Deposit horizon and reinvestment threshold for one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReinvestmentPolicy {
    pub base_monthly_deposit: f64,
    pub deposit_horizon_months: u32,
    pub min_reinvest_threshold: f64,
}

impl ReinvestmentPolicy {
    pub fn in_deposit_horizon(&self, deposits_completed: u32) -> bool {
        deposits_completed < self.deposit_horizon_months
    }

    /// Inside the horizon every month deposits and issues. Afterwards the
    /// pot is reinvested only once it clears the threshold.
    pub fn decide(&self, pot: f64, deposits_completed: u32) -> Decision {
        if self.in_deposit_horizon(deposits_completed) {
            Decision::DepositAndIssue {
                deposit: self.base_monthly_deposit,
            }
        } else if pot > 0.0 && pot >= self.min_reinvest_threshold {
            Decision::Reinvest
        } else {
            Decision::Hold
        }
    }

    /// Same threshold with base deposits switched off for good
    pub fn reinvest_only(&self) -> Self {
        Self {
            base_monthly_deposit: 0.0,
            deposit_horizon_months: 0,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ReinvestmentPolicy {
        ReinvestmentPolicy {
            base_monthly_deposit: 25_000.0,
            deposit_horizon_months: 84,
            min_reinvest_threshold: 1_000.0,
        }
    }

    #[test]
    fn test_horizon_always_issues() {
        let policy = policy();
        // Tiny pot inside the horizon is still deposited and issued
        assert_eq!(
            policy.decide(3.5, 0),
            Decision::DepositAndIssue { deposit: 25_000.0 }
        );
        assert_eq!(
            policy.decide(0.0, 83),
            Decision::DepositAndIssue { deposit: 25_000.0 }
        );
    }

    #[test]
    fn test_threshold_gates_after_horizon() {
        let policy = policy();
        assert_eq!(policy.decide(999.99, 84), Decision::Hold);
        assert_eq!(policy.decide(1_000.0, 84), Decision::Reinvest);
        assert_eq!(policy.decide(54_321.0, 200), Decision::Reinvest);
    }

    #[test]
    fn test_non_positive_threshold_reinvests_any_pot() {
        let policy = ReinvestmentPolicy {
            min_reinvest_threshold: 0.0,
            ..policy()
        };
        assert_eq!(policy.decide(0.01, 84), Decision::Reinvest);
        // Nothing to lock away
        assert_eq!(policy.decide(0.0, 84), Decision::Hold);
    }

    #[test]
    fn test_reinvest_only() {
        let policy = policy().reinvest_only();
        assert!(!policy.in_deposit_horizon(0));
        assert_eq!(policy.decide(500.0, 0), Decision::Hold);
        assert_eq!(policy.min_reinvest_threshold, 1_000.0);
    }
}
