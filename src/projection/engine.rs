//! Month-stepping primitive and the plain (yearly) projection

use super::clock::SimulationClock;
use super::recorder::{Recorder, YearlyRecorder};
use super::reinvest::ReinvestmentPolicy;
use super::snapshots::{SimulationResult, Totals};
use super::state::{MonthActivity, SimulationState};
use super::stop::{RunThrough, StopReason, StopRule};
use super::{DEFAULT_MAX_SEARCH_MONTHS, DEFAULT_TERM_MONTHS};
use crate::assumptions::{AgeClock, Assumptions};
use crate::calendar::CalendarMonth;
use crate::error::ValidationError;
use crate::plan::SimulationInput;
use log::info;

/// Run-independent projection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionConfig {
    /// Term of every new certificate
    pub term_months: u32,
    /// Last month of plain runs and continuations
    pub final_month: CalendarMonth,
    /// Safety cap for target searches and continuations
    pub max_search_months: u32,
}

impl Default for ProjectionConfig {
    /// 36-month certificates, projected through the December the
    /// reference holder turns 60
    fn default() -> Self {
        Self::until_age(&AgeClock::default(), 60)
    }
}

impl ProjectionConfig {
    pub fn until_age(ages: &AgeClock, age: i32) -> Self {
        Self {
            term_months: DEFAULT_TERM_MONTHS,
            final_month: ages.december_at_age(age),
            max_search_months: DEFAULT_MAX_SEARCH_MONTHS,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.term_months == 0 {
            return Err(ValidationError::ZeroTerm);
        }
        Ok(())
    }
}

/// Where a call to [`ProjectionEngine::run`] left off
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub state: SimulationState,
    /// Positioned at the first month that was not simulated
    pub clock: SimulationClock,
    pub reason: StopReason,
    pub last_activity: Option<MonthActivity>,
}

/// Projection engine for certificate ladders
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self { assumptions, config }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Fold `state` forward month by month until the stop rule or the
    /// clock's cap ends the run. Every simulated month is handed to
    /// `recorder`.
    pub fn run<S, R>(
        &self,
        state: SimulationState,
        mut clock: SimulationClock,
        policy: &ReinvestmentPolicy,
        stop: &S,
        recorder: &mut R,
    ) -> RunOutcome
    where
        S: StopRule + ?Sized,
        R: Recorder + ?Sized,
    {
        let mut state = state;
        let mut last_activity = None;

        let reason = loop {
            if stop.past_end(clock.current()) {
                break StopReason::EndOfRange;
            }
            if clock.exhausted() {
                break StopReason::IterationCap;
            }

            let (next, activity) = state.step(
                clock.current(),
                policy,
                &self.assumptions.rates,
                self.config.term_months,
            );
            recorder.record(&next, &activity);
            state = next;
            clock.tick();
            last_activity = Some(activity);

            if stop.satisfied(&activity) {
                break StopReason::ConditionMet;
            }
        };

        RunOutcome {
            state,
            clock,
            reason,
            last_activity,
        }
    }

    /// Project through the final month, one row per December
    pub fn simulate(
        &self,
        plan_name: &str,
        input: &SimulationInput,
    ) -> Result<SimulationResult, ValidationError> {
        input.validate()?;
        self.config.validate()?;

        info!(
            "{}: projecting {} through {}",
            plan_name,
            input.start(),
            self.config.final_month
        );

        let mut recorder = YearlyRecorder::new(self.assumptions.ages);
        let outcome = self.run(
            SimulationState::opening(input.starting_principal),
            SimulationClock::new(input.start()),
            &input.policy(),
            &RunThrough::new(self.config.final_month),
            &mut recorder,
        );

        let totals = Totals::from_state(&outcome.state);
        info!(
            "{}: {} months simulated, net worth {:.2}",
            plan_name,
            outcome.clock.elapsed(),
            totals.net_worth
        );

        Ok(SimulationResult {
            plan_name: plan_name.to_string(),
            rows: recorder.into_snapshots(),
            totals,
            continuation: None,
            target: None,
        })
    }

    /// Target-seeking mode when the input carries a target, plain otherwise
    pub fn project(
        &self,
        plan_name: &str,
        input: &SimulationInput,
    ) -> Result<SimulationResult, ValidationError> {
        match input.target_monthly_income {
            Some(target) => self.simulate_until_monthly_target(plan_name, input, target),
            None => self.simulate(plan_name, input),
        }
    }
}

impl Default for ProjectionEngine {
    fn default() -> Self {
        Self::new(Assumptions::default(), ProjectionConfig::default())
    }
}
