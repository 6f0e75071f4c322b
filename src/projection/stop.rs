//! When a run stops

use super::state::MonthActivity;
use crate::calendar::CalendarMonth;

/// Why the stepping loop returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The next month lies past the final month
    EndOfRange,
    /// The clock's safety cap was hit
    IterationCap,
    /// The stop rule's condition held after a month
    ConditionMet,
}

pub trait StopRule {
    /// Checked before `month` is simulated
    fn past_end(&self, _month: CalendarMonth) -> bool {
        false
    }

    /// Checked after a month has been simulated and recorded
    fn satisfied(&self, _activity: &MonthActivity) -> bool {
        false
    }
}

/// Simulate through `last` inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunThrough {
    pub last: CalendarMonth,
}

impl RunThrough {
    pub fn new(last: CalendarMonth) -> Self {
        Self { last }
    }
}

impl StopRule for RunThrough {
    fn past_end(&self, month: CalendarMonth) -> bool {
        month > self.last
    }
}

/// Stop at the first month whose post-issuance coupon sum reaches `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyIncomeTarget {
    pub target: f64,
}

impl MonthlyIncomeTarget {
    pub fn new(target: f64) -> Self {
        Self { target }
    }
}

impl StopRule for MonthlyIncomeTarget {
    fn satisfied(&self, activity: &MonthActivity) -> bool {
        activity.monthly_interest_after >= self.target
    }
}
