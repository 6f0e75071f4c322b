//! Projection engine for certificate ladders

mod batch;
mod clock;
mod engine;
mod recorder;
mod reinvest;
mod snapshots;
mod state;
mod stop;
mod target;

pub use batch::{run_plans, PlanRun};
pub use clock::SimulationClock;
pub use engine::{ProjectionConfig, ProjectionEngine, RunOutcome};
pub use recorder::{MonthlyRecorder, Recorder, YearlyRecorder};
pub use reinvest::{Decision, ReinvestmentPolicy};
pub use snapshots::{MonthRow, SimulationResult, Snapshot, Totals, YearEnd, YearRow};
pub use state::{MonthActivity, SimulationState};
pub use stop::{MonthlyIncomeTarget, RunThrough, StopReason, StopRule};
pub use target::TargetOutcome;

// ============================================================================
// Default Certificate Terms
// ============================================================================
// Every certificate runs for three years at the rate of its issuance year.
// Target searches and continuations share one safety cap of fifty years.

/// Term of every new certificate in months
pub const DEFAULT_TERM_MONTHS: u32 = 36;

/// Safety cap on months simulated by a target search or a continuation
pub const DEFAULT_MAX_SEARCH_MONTHS: u32 = 600;
