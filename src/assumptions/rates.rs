//! Annual certificate rates by calendar year of issuance

use crate::error::{ensure_non_negative, ValidationError};
use serde::{Deserialize, Serialize};

/// Year-indexed annual rate table with a floor for years past the last entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RateTable")]
pub struct RateSchedule {
    /// (calendar year, annual rate as a decimal), sorted by year
    entries: Vec<(i32, f64)>,
    /// Rate for every year after the last entry
    floor: f64,
}

/// Unchecked wire form; deserialization goes through `RateSchedule::new`
#[derive(Deserialize)]
struct RateTable {
    entries: Vec<(i32, f64)>,
    floor: f64,
}

impl TryFrom<RateTable> for RateSchedule {
    type Error = ValidationError;

    fn try_from(table: RateTable) -> Result<Self, Self::Error> {
        Self::new(table.entries, table.floor)
    }
}

impl RateSchedule {
    /// Build a schedule from explicit per-year entries and a floor rate.
    ///
    /// Entries may be given in any order. Rates must be finite and not
    /// negative; a rate of zero is a valid, coupon-free year.
    pub fn new(mut entries: Vec<(i32, f64)>, floor: f64) -> Result<Self, ValidationError> {
        ensure_non_negative("floor rate", floor)?;
        for &(_, rate) in &entries {
            ensure_non_negative("annual rate", rate)?;
        }

        entries.sort_by_key(|&(year, _)| year);
        if let Some(pair) = entries.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(ValidationError::DuplicateRateYear(pair[0].0));
        }

        Ok(Self { entries, floor })
    }

    /// Same rate for every year
    pub fn flat(rate: f64) -> Result<Self, ValidationError> {
        Self::new(Vec::new(), rate)
    }

    /// Reference schedule: 17% through 2025, stepping down one point a year
    /// to a 10% floor from 2032 on
    pub fn reference() -> Self {
        Self {
            entries: vec![
                (2025, 0.17),
                (2026, 0.16),
                (2027, 0.15),
                (2028, 0.14),
                (2029, 0.13),
                (2030, 0.12),
                (2031, 0.11),
            ],
            floor: 0.10,
        }
    }

    /// Annual rate for a certificate issued in `year`.
    ///
    /// Years before the first entry use the first entry, years inside the
    /// table use the closest entry at or before them, and years after the
    /// last entry use the floor.
    pub fn rate_for_year(&self, year: i32) -> f64 {
        let (first, last) = match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return self.floor,
        };

        if year > last.0 {
            return self.floor;
        }
        if year <= first.0 {
            return first.1;
        }

        self.entries
            .iter()
            .rev()
            .find(|(y, _)| *y <= year)
            .map(|&(_, rate)| rate)
            .unwrap_or(first.1)
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn entries(&self) -> &[(i32, f64)] {
        &self.entries
    }
}

impl Default for RateSchedule {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_schedule() {
        let rates = RateSchedule::reference();

        assert_eq!(rates.rate_for_year(2020), 0.17);
        assert_eq!(rates.rate_for_year(2025), 0.17);
        assert_eq!(rates.rate_for_year(2026), 0.16);
        assert_eq!(rates.rate_for_year(2029), 0.13);
        assert_eq!(rates.rate_for_year(2031), 0.11);
        assert_eq!(rates.rate_for_year(2032), 0.10);
        assert_eq!(rates.rate_for_year(2051), 0.10);
    }

    #[test]
    fn test_gaps_use_preceding_entry() {
        let rates = RateSchedule::new(vec![(2030, 0.08), (2025, 0.12)], 0.05).unwrap();

        assert_eq!(rates.entries()[0], (2025, 0.12));
        assert_eq!(rates.rate_for_year(2027), 0.12);
        assert_eq!(rates.rate_for_year(2030), 0.08);
        assert_eq!(rates.rate_for_year(2031), 0.05);
    }

    #[test]
    fn test_flat_and_zero_rates() {
        assert_eq!(RateSchedule::flat(0.17).unwrap().rate_for_year(1999), 0.17);
        assert_eq!(RateSchedule::flat(0.0).unwrap().rate_for_year(2040), 0.0);
    }

    #[test]
    fn test_rejects_invalid_tables() {
        assert_eq!(
            RateSchedule::new(vec![(2025, 0.1), (2025, 0.2)], 0.1),
            Err(ValidationError::DuplicateRateYear(2025))
        );
        assert!(RateSchedule::new(vec![(2025, -0.01)], 0.1).is_err());
        assert!(RateSchedule::flat(f64::NAN).is_err());
    }

    #[test]
    fn test_deserialize_validates_and_sorts() {
        let rates: RateSchedule =
            serde_json::from_str(r#"{"entries": [[2030, 0.08], [2025, 0.12]], "floor": 0.05}"#).unwrap();
        assert_eq!(rates.entries(), &[(2025, 0.12), (2030, 0.08)]);
        assert_eq!(rates.rate_for_year(2027), 0.12);

        let duplicate = r#"{"entries": [[2025, 0.1], [2025, 0.2]], "floor": 0.1}"#;
        assert!(serde_json::from_str::<RateSchedule>(duplicate).is_err());
        let negative = r#"{"entries": [[2025, -0.1]], "floor": 0.1}"#;
        assert!(serde_json::from_str::<RateSchedule>(negative).is_err());
    }
}
