//! Error types for input validation and the loading/reporting layers

use thiserror::Error;

/// Rejected input. Raised before any month is simulated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("start month index must be in 0..=11, got {0}")]
    MonthIndexOutOfRange(u32),

    #[error("{0} deposit years do not fit in a month count")]
    DepositYearsOutOfRange(u32),

    #[error("certificate term must be at least one month")]
    ZeroTerm,

    #[error("rate table lists year {0} more than once")]
    DuplicateRateYear(i32),

    #[error("rate table is empty and no floor rate was supplied")]
    EmptyRateTable,
}

/// Errors from loading configuration or writing reports
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { field, value })
    }
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative_checks() {
        assert!(ensure_non_negative("deposit", 0.0).is_ok());
        assert_eq!(
            ensure_non_negative("deposit", -1.0),
            Err(ValidationError::Negative { field: "deposit", value: -1.0 })
        );
        assert!(matches!(
            ensure_non_negative("deposit", f64::NAN),
            Err(ValidationError::NonFinite { field: "deposit", .. })
        ));
        assert!(ensure_finite("threshold", f64::INFINITY).is_err());
    }

    #[test]
    fn test_messages() {
        let err = ValidationError::MonthIndexOutOfRange(12);
        assert_eq!(err.to_string(), "start month index must be in 0..=11, got 12");
    }
}
