//! Search for the first month whose coupon income reaches a target, then
//! project the reinvestment-only trajectory from there

use super::clock::SimulationClock;
use super::engine::ProjectionEngine;
use super::recorder::{MonthlyRecorder, Recorder, YearlyRecorder};
use super::reinvest::ReinvestmentPolicy;
use super::snapshots::{SimulationResult, Totals, YearRow};
use super::state::{MonthActivity, SimulationState};
use super::stop::{MonthlyIncomeTarget, RunThrough, StopReason};
use crate::calendar::CalendarMonth;
use crate::error::{ensure_finite, ValidationError};
use crate::plan::SimulationInput;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Result of a target search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TargetOutcome {
    Reached {
        /// Months simulated before the crossing month (0 = first month)
        months_elapsed: u32,
        month: CalendarMonth,
        monthly_interest: f64,
    },
    /// The safety cap ran out first
    Unreached { months_searched: u32 },
}

impl ProjectionEngine {
    /// Monthly rows until post-issuance coupon income first reaches
    /// `target`, then a yearly continuation with base deposits switched off.
    ///
    /// A target of zero or less is met before anything is simulated. The
    /// search runs up to the safety cap regardless of the final month, so a
    /// target reached after the final month leaves an empty continuation.
    pub fn simulate_until_monthly_target(
        &self,
        plan_name: &str,
        input: &SimulationInput,
        target: f64,
    ) -> Result<SimulationResult, ValidationError> {
        input.validate()?;
        self.config().validate()?;
        ensure_finite("target monthly income", target)?;

        let start = input.start();
        let policy = input.policy();
        let opening = SimulationState::opening(input.starting_principal);
        let mut recorder = MonthlyRecorder::new(self.assumptions().ages);

        if target <= 0.0 {
            info!("{}: target {:.2} met without simulating", plan_name, target);
            let activity = MonthActivity::idle(start, &opening);
            recorder.record(&opening, &activity);
            let continuation =
                self.continue_reinvesting(&opening.with_opening_reported(), start, &policy);

            return Ok(SimulationResult {
                plan_name: plan_name.to_string(),
                rows: recorder.into_snapshots(),
                totals: Totals::from_state(&opening),
                continuation: Some(continuation),
                target: Some(TargetOutcome::Reached {
                    months_elapsed: 0,
                    month: start,
                    monthly_interest: activity.monthly_interest_after,
                }),
            });
        }

        let outcome = self.run(
            opening,
            SimulationClock::capped(start, self.config().max_search_months),
            &policy,
            &MonthlyIncomeTarget::new(target),
            &mut recorder,
        );
        let totals = Totals::from_state(&outcome.state);

        let (continuation, target_outcome) = match (outcome.reason, outcome.last_activity) {
            (StopReason::ConditionMet, Some(crossing)) => {
                info!(
                    "{}: monthly income {:.2} reached {:.2} in {}",
                    plan_name, crossing.monthly_interest_after, target, crossing.month
                );
                let continuation =
                    self.continue_reinvesting(&outcome.state, outcome.clock.current(), &policy);
                let reached = TargetOutcome::Reached {
                    months_elapsed: outcome.clock.elapsed() - 1,
                    month: crossing.month,
                    monthly_interest: crossing.monthly_interest_after,
                };
                (Some(continuation), reached)
            }
            _ => {
                warn!(
                    "{}: monthly income target {:.2} not reached within {} months",
                    plan_name,
                    target,
                    outcome.clock.elapsed()
                );
                let unreached = TargetOutcome::Unreached {
                    months_searched: outcome.clock.elapsed(),
                };
                (None, unreached)
            }
        };

        Ok(SimulationResult {
            plan_name: plan_name.to_string(),
            rows: recorder.into_snapshots(),
            totals,
            continuation,
            target: Some(target_outcome),
        })
    }

    /// Start a new fold from `state` at `resume` with deposits off,
    /// recording Decembers through the final month
    fn continue_reinvesting(
        &self,
        state: &SimulationState,
        resume: CalendarMonth,
        policy: &ReinvestmentPolicy,
    ) -> Vec<YearRow> {
        let mut recorder = YearlyRecorder::new(self.assumptions().ages);
        self.run(
            state.clone(),
            SimulationClock::capped(resume, self.config().max_search_months),
            &policy.reinvest_only(),
            &RunThrough::new(self.config().final_month),
            &mut recorder,
        );
        recorder.into_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{AgeClock, Assumptions, RateSchedule};
    use crate::projection::engine::ProjectionConfig;
    use approx::assert_relative_eq;

    fn income_plan(target: f64) -> SimulationInput {
        SimulationInput {
            target_monthly_income: Some(target),
            ..SimulationInput::with_deposit_years(CalendarMonth::december(2025), 100, 25_000.0, 1_000.0)
        }
    }

    fn seek(target: f64) -> SimulationResult {
        ProjectionEngine::default()
            .simulate_until_monthly_target("Income", &income_plan(target), target)
            .unwrap()
    }

    #[test]
    fn test_crossing_is_first_qualifying_row() {
        let target = 20_000.0;
        let result = seek(target);

        let rows: Vec<_> = result.monthly_rows().collect();
        let last = rows.last().unwrap();
        assert!(last.monthly_interest >= target);
        assert!(rows[..rows.len() - 1].iter().all(|r| r.monthly_interest < target));

        match result.target {
            Some(TargetOutcome::Reached {
                months_elapsed,
                month,
                monthly_interest,
            }) => {
                assert_eq!(months_elapsed as usize, rows.len() - 1);
                assert_eq!(month.label(), last.month);
                assert_eq!(monthly_interest, last.monthly_interest);
            }
            other => panic!("expected target to be reached, got {other:?}"),
        }
    }

    #[test]
    fn test_totals_frozen_at_crossing() {
        let result = seek(20_000.0);
        let last = result.monthly_rows().last().unwrap();

        assert_eq!(result.totals.active_principal, last.active_principal);
        assert_eq!(result.totals.cash, last.cash);
        assert_eq!(result.totals.net_worth, last.net_worth);
        let months = result.rows.len() as f64;
        assert_relative_eq!(result.totals.deposited, months * 25_000.0);
    }

    #[test]
    fn test_continuation_runs_to_final_year_without_deposits() {
        let result = seek(20_000.0);
        let continuation = result.continuation.as_ref().unwrap();

        assert_eq!(continuation.last().unwrap().year, 2051);
        assert!(continuation.iter().all(|r| r.deposits_ytd == 0.0));
        assert!(continuation.iter().all(|r| r.cash_end < 1_000.0));
        for row in continuation {
            assert_eq!(row.net_worth_end, row.active_principal_end + row.cash_end);
        }
        for pair in continuation.windows(2) {
            assert_eq!(pair[1].year, pair[0].year + 1);
        }
    }

    #[test]
    fn test_continuation_continuity() {
        // Crossing in November 2025 hands over to a December-only year
        let input = SimulationInput {
            start_month_index: 10,
            ..income_plan(354.0)
        };
        let engine = ProjectionEngine::new(
            Assumptions::new(RateSchedule::flat(0.17).unwrap(), AgeClock::default()),
            ProjectionConfig::default(),
        );
        let result = engine
            .simulate_until_monthly_target("Handover", &input, 354.0)
            .unwrap();

        assert_eq!(result.rows.len(), 1);
        let crossing = result.monthly_rows().next().unwrap();
        let first = &result.continuation.as_ref().unwrap()[0];

        assert_eq!(first.year, 2025);
        assert_eq!(first.active_principal_end, result.totals.active_principal);
        // Only the December coupon separates the two snapshots
        assert_relative_eq!(
            first.net_worth_end,
            result.totals.net_worth + crossing.monthly_interest,
            max_relative = 1e-12
        );
        assert_relative_eq!(first.cash_end, crossing.monthly_interest, max_relative = 1e-12);
    }

    #[test]
    fn test_small_target_converges_in_first_month() {
        let result = seek(1.0);

        assert_eq!(result.rows.len(), 1);
        assert!(matches!(
            result.target,
            Some(TargetOutcome::Reached { months_elapsed: 0, .. })
        ));
        let continuation = result.continuation.unwrap();
        assert_eq!(continuation[0].year, 2026);
        assert_eq!(continuation.last().unwrap().year, 2051);
    }

    #[test]
    fn test_non_positive_target_is_met_immediately() {
        let engine = ProjectionEngine::default();
        let input = SimulationInput {
            starting_principal: 5_000.0,
            ..income_plan(0.0)
        };
        let result = engine
            .simulate_until_monthly_target("Zero", &input, 0.0)
            .unwrap();

        assert_eq!(result.rows.len(), 1);
        let row = result.monthly_rows().next().unwrap();
        assert_eq!(row.month, "2025-12");
        assert_eq!(row.deposits, 5_000.0);
        assert_eq!(row.certificates, 0);
        assert_eq!(row.cash, 5_000.0);
        assert_eq!(result.totals.net_worth, 5_000.0);
        assert_eq!(
            result.target,
            Some(TargetOutcome::Reached {
                months_elapsed: 0,
                month: CalendarMonth::december(2025),
                monthly_interest: 0.0,
            })
        );

        // Continuation starts from the opening state: the 5,000 clears the
        // threshold and is locked away in the first month
        let continuation = result.continuation.unwrap();
        assert_eq!(continuation[0].year, 2025);
        assert_eq!(continuation[0].deposits_ytd, 0.0);
        assert_eq!(continuation[0].reinvested_ytd, 0.0);
        assert_eq!(continuation[0].active_principal_end, 5_000.0);
    }

    #[test]
    fn test_december_start_year_end_prefers_continuation() {
        let engine = ProjectionEngine::default();
        let input = SimulationInput {
            starting_principal: 5_000.0,
            ..income_plan(0.0)
        };
        let result = engine
            .simulate_until_monthly_target("Zero", &input, 0.0)
            .unwrap();
        let continuation = result.continuation.as_ref().unwrap();

        // Both the idle row and the first continuation row fall on 2025-12
        let year_ends = result.year_ends();
        assert_eq!(year_ends.iter().filter(|y| y.year == 2025).count(), 1);
        assert_eq!(year_ends[0].year, 2025);
        assert_eq!(year_ends[0].monthly_interest, continuation[0].monthly_interest_dec);
        assert!(year_ends[0].monthly_interest > 0.0);
        assert_eq!(year_ends.len(), continuation.len());
        for pair in year_ends.windows(2) {
            assert!(pair[1].year > pair[0].year);
        }
    }

    #[test]
    fn test_crossing_after_final_month_leaves_empty_continuation() {
        let engine = ProjectionEngine::new(
            Assumptions::new(RateSchedule::flat(0.17).unwrap(), AgeClock::default()),
            ProjectionConfig {
                final_month: CalendarMonth::december(2025),
                ..ProjectionConfig::default()
            },
        );
        // One certificate pays 354.17; the second month's pair clears 700
        let result = engine
            .simulate_until_monthly_target("Late", &income_plan(700.0), 700.0)
            .unwrap();

        assert_eq!(result.rows.len(), 2);
        assert!(matches!(
            result.target,
            Some(TargetOutcome::Reached { months_elapsed: 1, .. })
        ));
        assert_eq!(result.continuation, Some(Vec::new()));
    }

    #[test]
    fn test_unreachable_target_stops_at_cap() {
        let engine = ProjectionEngine::default();
        let input = SimulationInput {
            base_monthly_deposit: 0.0,
            min_reinvest_threshold: 1e15,
            ..income_plan(1_000.0)
        };
        let result = engine
            .simulate_until_monthly_target("Never", &input, 1_000.0)
            .unwrap();

        assert_eq!(result.rows.len(), 600);
        assert!(result.continuation.is_none());
        assert!(!result.reached_target());
        assert_eq!(
            result.target,
            Some(TargetOutcome::Unreached { months_searched: 600 })
        );
        assert_eq!(result.totals.net_worth, 0.0);
    }

    #[test]
    fn test_project_dispatches_on_target() {
        let engine = ProjectionEngine::default();
        let with_target = engine.project("Income", &income_plan(20_000.0)).unwrap();
        let without = engine
            .project(
                "Plain",
                &SimulationInput {
                    target_monthly_income: None,
                    ..income_plan(20_000.0)
                },
            )
            .unwrap();

        assert!(with_target.reached_target());
        assert!(with_target.rows.iter().all(|r| r.as_monthly().is_some()));
        assert!(without.target.is_none());
        assert!(without.rows.iter().all(|r| r.as_yearly().is_some()));
    }
}
