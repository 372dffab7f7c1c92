//! Time-budget accounting for an annual goal plan.
//!
//! The crate has two layers:
//!
//! - the [`Planner`] store, holding goals, tasks and the weekly
//!   [`TimeBudget`], with mutators that never fail on unknown ids;
//! - pure cost functions consuming read-only slices of that store:
//!   [`calculate_cost`], [`calculate_domain_time_allocations`],
//!   [`get_budget_status`] and the score ranking in [`rank_tasks_by_score`].
//!
//! The cost functions hold no state and do no I/O, so they can be called on
//! every UI update and memoized freely by callers.

pub use allocations::{
    DomainAllocations, GoalAllocation, calculate_domain_time_allocations,
    calculate_goal_time_allocations,
};
pub use budget::{BudgetStatus, get_budget_status};
pub use commitment::{Commitment, CostInput, Costed};
pub use cost::{DEFAULT_WEEKLY_FREQUENCY, calculate_cost, inclusive_day_count, weekly_cost};
pub use domain::LifeDomain;
pub use error::EngineError;
pub use goals::{Goal, GoalId, GoalPatch, MAX_GOALS_PER_DOMAIN, NewGoal};
pub use planner::Planner;
pub use ranking::{rank_tasks_by_score, suggest_task_to_hide, trim_candidates};
pub use report::{PlanReport, TrimCandidate, build_report, ranked_trim_candidates};
pub use tasks::{Evaluation, NewTask, SCORE_RANGE, Task, TaskId, TaskKind, TaskPatch};
pub use time_budget::{HOURS_PER_WEEK, TimeBudget, TimeBudgetPatch, WEEKS_PER_YEAR};
pub use util::normalize_title;

mod allocations;
mod budget;
mod commitment;
mod cost;
mod domain;
mod error;
mod goals;
mod planner;
mod ranking;
mod report;
mod tasks;
mod time_budget;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
