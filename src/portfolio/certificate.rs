use crate::calendar::CalendarMonth;
use serde::{Deserialize, Serialize};

/// A fixed-term, fixed-rate deposit paying a monthly coupon.
///
/// Values are never edited in place: ageing produces a new certificate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    /// Locked amount
    pub principal: f64,
    /// Annual rate as a decimal, fixed at issuance
    pub rate: f64,
    /// Months left until maturity
    pub months_remaining: u32,
    /// Month of issuance
    pub issued: CalendarMonth,
}

impl Certificate {
    pub fn new(principal: f64, rate: f64, term_months: u32, issued: CalendarMonth) -> Self {
        Self {
            principal,
            rate,
            months_remaining: term_months,
            issued,
        }
    }

    /// principal × rate / 12
    pub fn monthly_coupon(&self) -> f64 {
        self.principal * self.rate / 12.0
    }

    /// This certificate one month later
    pub fn aged(self) -> Self {
        Self {
            months_remaining: self.months_remaining.saturating_sub(1),
            ..self
        }
    }

    pub fn has_matured(&self) -> bool {
        self.months_remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_monthly_coupon() {
        let cert = Certificate::new(25_000.0, 0.17, 36, CalendarMonth::december(2025));
        assert_abs_diff_eq!(cert.monthly_coupon(), 354.1666666, epsilon = 1e-6);
    }

    #[test]
    fn test_ageing_keeps_terms() {
        let cert = Certificate::new(1_000.0, 0.12, 2, CalendarMonth::new(2026, 3));
        let once = cert.aged();
        let twice = once.aged();

        assert_eq!(cert.months_remaining, 2);
        assert_eq!(once.months_remaining, 1);
        assert!(twice.has_matured());
        assert_eq!(twice.rate, 0.12);
        assert_eq!(twice.principal, 1_000.0);
        assert_eq!(twice.aged().months_remaining, 0);
    }
}
