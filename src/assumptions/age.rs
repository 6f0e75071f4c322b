//! Display age of the plan holder at a projection month

use crate::calendar::CalendarMonth;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Reference birth year and month for the plan holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeClock {
    birth_year: i32,
    /// 0 for January through 11 for December
    birth_month_index: u32,
}

impl AgeClock {
    pub fn new(birth_year: i32, birth_month_index: u32) -> Self {
        debug_assert!(birth_month_index <= CalendarMonth::DECEMBER);
        Self {
            birth_year,
            birth_month_index,
        }
    }

    /// Day of birth is ignored; ages move in whole months
    pub fn from_birth_date(birth: NaiveDate) -> Self {
        Self::new(birth.year(), birth.month0())
    }

    pub fn birth_year(&self) -> i32 {
        self.birth_year
    }

    pub fn birth_month_index(&self) -> u32 {
        self.birth_month_index
    }

    /// Fractional age in years at `month`
    pub fn age_at_month(&self, month: CalendarMonth) -> f64 {
        (month.year - self.birth_year) as f64
            + (month.month_index as f64 - self.birth_month_index as f64) / 12.0
    }

    /// Age reached during calendar `year`
    pub fn age_at_year_end(&self, year: i32) -> i32 {
        year - self.birth_year
    }

    /// December of the year in which `age` is reached
    pub fn december_at_age(&self, age: i32) -> CalendarMonth {
        CalendarMonth::december(self.birth_year + age)
    }
}

impl Default for AgeClock {
    /// August 1991
    fn default() -> Self {
        Self::new(1991, 7)
    }
}
