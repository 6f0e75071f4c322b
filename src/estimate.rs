//! Quick estimates for plan cards that don't need the full ladder model

use crate::error::{ensure_non_negative, ValidationError};
use serde::{Deserialize, Serialize};

/// Principal that pays `monthly_payout` at `annual_rate` (decimal).
///
/// Zero when either input is not positive.
pub fn principal_for_monthly_payout(monthly_payout: f64, annual_rate: f64) -> f64 {
    if monthly_payout <= 0.0 || annual_rate <= 0.0 {
        return 0.0;
    }
    monthly_payout / (annual_rate / 12.0)
}

/// Outcome of a single-pool compounding search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InterestEstimate {
    Reached {
        months: u32,
        principal: f64,
        monthly_interest: f64,
    },
    Unreached {
        months_searched: u32,
        principal: f64,
        monthly_interest: f64,
    },
}

/// One pool earning `annual_rate / 12` a month, topped up by a fixed
/// contribution and a share of its own interest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompoundingEstimate {
    pub start_principal: f64,
    pub monthly_contribution: f64,
    pub annual_rate: f64,
    /// Share of each month's interest added back to the pool, 0..=1
    pub reinvest_fraction: f64,
}

impl CompoundingEstimate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_non_negative("start principal", self.start_principal)?;
        ensure_non_negative("monthly contribution", self.monthly_contribution)?;
        ensure_non_negative("annual rate", self.annual_rate)?;
        ensure_non_negative("reinvest fraction", self.reinvest_fraction)?;
        if self.reinvest_fraction > 1.0 {
            return Err(ValidationError::OutOfRange {
                field: "reinvest fraction",
                value: self.reinvest_fraction,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(())
    }

    /// Months until the pool's monthly interest reaches `target`.
    ///
    /// Month 0 checks the starting pool before any contribution.
    pub fn months_to_monthly_interest(
        &self,
        target: f64,
        max_months: u32,
    ) -> Result<InterestEstimate, ValidationError> {
        self.validate()?;
        ensure_non_negative("target monthly interest", target)?;

        let monthly_rate = self.annual_rate / 12.0;
        let mut principal = self.start_principal;

        for months in 0..=max_months {
            let monthly_interest = principal * monthly_rate;
            if monthly_interest >= target {
                return Ok(InterestEstimate::Reached {
                    months,
                    principal,
                    monthly_interest,
                });
            }
            principal += self.monthly_contribution + monthly_interest * self.reinvest_fraction;
        }

        Ok(InterestEstimate::Unreached {
            months_searched: max_months,
            principal,
            monthly_interest: principal * monthly_rate,
        })
    }
}
