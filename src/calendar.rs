//! Calendar month arithmetic used by the projection clock

use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month; `month_index` is 0 for January through 11 for December.
///
/// Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month_index: u32,
}

impl CalendarMonth {
    pub const DECEMBER: u32 = 11;

    pub fn new(year: i32, month_index: u32) -> Self {
        debug_assert!(month_index <= Self::DECEMBER, "month index {month_index} out of range");
        Self { year, month_index }
    }

    pub fn december(year: i32) -> Self {
        Self::new(year, Self::DECEMBER)
    }

    /// The following month, rolling over into January of the next year
    pub fn next(self) -> Self {
        if self.month_index >= Self::DECEMBER {
            Self::new(self.year + 1, 0)
        } else {
            Self::new(self.year, self.month_index + 1)
        }
    }

    pub fn is_december(self) -> bool {
        self.month_index == Self::DECEMBER
    }

    /// `YYYY-MM` label
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month_index + 1)
    }
}
