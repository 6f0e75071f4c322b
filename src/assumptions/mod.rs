//! Static collaborators of the projection: rate table and age clock

mod age;
mod rates;
pub mod loader;

pub use age::AgeClock;
pub use loader::{load_rate_schedule, rate_schedule_from_reader};
pub use rates::RateSchedule;

use crate::error::Result;
use std::path::Path;

/// Container for all projection assumptions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Assumptions {
    pub rates: RateSchedule,
    pub ages: AgeClock,
}

impl Assumptions {
    pub fn new(rates: RateSchedule, ages: AgeClock) -> Self {
        Self { rates, ages }
    }

    /// Reference rate table and birth month
    pub fn reference() -> Self {
        Self::default()
    }

    /// Reference ages with a rate table loaded from CSV
    pub fn from_csv_path(path: &Path, floor: Option<f64>) -> Result<Self> {
        Ok(Self {
            rates: load_rate_schedule(path, floor)?,
            ages: AgeClock::default(),
        })
    }
}
