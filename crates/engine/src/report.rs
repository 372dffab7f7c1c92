//! Data behind the shareable report cards.
//!
//! The report is a pure projection of a [`Planner`] snapshot; rendering it
//! into charts or images happens elsewhere.

use serde::{Deserialize, Serialize};

use crate::{
    BudgetStatus, DomainAllocations, GoalAllocation, GoalId, Planner, Task, TaskId, TaskKind,
    calculate_cost, calculate_domain_time_allocations, calculate_goal_time_allocations,
    get_budget_status, trim_candidates,
};

/// One line of the evaluation list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrimCandidate {
    pub task_id: TaskId,
    pub goal_id: GoalId,
    pub title: String,
    pub kind: TaskKind,
    pub total_score: u32,
    pub annual_hours: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    pub domain_allocations: DomainAllocations,
    pub domain_shares: DomainAllocations,
    pub goal_allocations: Vec<GoalAllocation>,
    pub budget_status: BudgetStatus,
    /// Visible tasks, weakest first.
    pub trim_candidates: Vec<TrimCandidate>,
    /// Set only when the plan is over budget.
    pub suggested_hide: Option<TaskId>,
}

/// Visible tasks, weakest first, with their score total and annual hours.
pub fn ranked_trim_candidates(tasks: &[Task]) -> Vec<TrimCandidate> {
    trim_candidates(tasks)
        .into_iter()
        .map(|task| TrimCandidate {
            task_id: task.id,
            goal_id: task.goal_id,
            title: task.title.clone(),
            kind: task.kind,
            total_score: task.evaluation.total(),
            annual_hours: calculate_cost(task),
        })
        .collect()
}

pub fn build_report(planner: &Planner) -> PlanReport {
    let goals = planner.goals();
    let tasks = planner.tasks();

    let domain_allocations = calculate_domain_time_allocations(goals, tasks);
    let domain_shares = domain_allocations.shares();
    let budget_status = get_budget_status(planner.time_budget(), tasks, goals);

    let trim_candidates = ranked_trim_candidates(tasks);

    let suggested_hide = if budget_status.is_over_budget {
        trim_candidates.first().map(|candidate| candidate.task_id)
    } else {
        None
    };

    PlanReport {
        domain_allocations,
        domain_shares,
        goal_allocations: calculate_goal_time_allocations(goals, tasks),
        budget_status,
        trim_candidates,
        suggested_hide,
    }
}
