//! Certificate Ladder Simulator
//!
//! Month-by-month projection of a ladder of fixed-term certificates fed by
//! base deposits during an accumulation horizon and by reinvested coupons
//! and matured principal afterwards.
//!
//! Runs either through a fixed calendar end (yearly December rows) or until
//! monthly coupon income first reaches a target (monthly rows plus a
//! reinvestment-only continuation).

pub mod assumptions;
pub mod calendar;
pub mod error;
pub mod estimate;
pub mod plan;
pub mod portfolio;
pub mod projection;
pub mod report;

pub use assumptions::{AgeClock, Assumptions, RateSchedule};
pub use calendar::CalendarMonth;
pub use error::{Error, Result, ValidationError};
pub use plan::{PlanParams, SimulationInput};
pub use portfolio::{Certificate, CertificatePortfolio};
pub use projection::{ProjectionConfig, ProjectionEngine, SimulationResult, TargetOutcome};
