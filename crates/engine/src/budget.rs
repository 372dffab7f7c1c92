//! Planned hours against the yearly capacity left by the time budget.

use serde::{Deserialize, Serialize};

use crate::{
    Goal, Task, TimeBudget, WEEKS_PER_YEAR, allocations::goals_without_tasks, calculate_cost,
    util::round_half_up,
};

/// Feasibility of a plan against its [`TimeBudget`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    /// Unrounded hours asked for by visible tasks and task-less goals.
    pub planned_annual_hours: f64,
    /// Annual capacity (`weekly_capacity × 52`). May be negative.
    pub overall_annual_budget: i64,
    pub is_over_budget: bool,
    /// `planned − budget`, rounded half up. Negative when there is slack.
    pub overage: i64,
    pub weekly_capacity: i64,
    pub planned_weekly_hours: f64,
}

/// Compare the planned hours of `tasks` and `goals` to the capacity left by
/// `time_budget`.
///
/// Every visible task counts, whether or not its goal still exists. Goals
/// count their own estimate only while no task references them.
pub fn get_budget_status(time_budget: &TimeBudget, tasks: &[Task], goals: &[Goal]) -> BudgetStatus {
    let weekly_capacity = time_budget.weekly_capacity();
    let overall_annual_budget = time_budget.annual_capacity();

    let task_hours: f64 = tasks
        .iter()
        .filter(|task| task.is_visible())
        .map(calculate_cost)
        .sum();
    let goal_hours: f64 = goals_without_tasks(goals, tasks).map(calculate_cost).sum();
    let planned_annual_hours = task_hours + goal_hours;

    let budget = overall_annual_budget as f64;
    BudgetStatus {
        planned_annual_hours,
        overall_annual_budget,
        is_over_budget: planned_annual_hours > budget,
        overage: round_half_up(planned_annual_hours - budget),
        weekly_capacity,
        planned_weekly_hours: planned_annual_hours / WEEKS_PER_YEAR as f64,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::{Commitment, LifeDomain, NewGoal, NewTask, TaskKind};

    fn year_task(hours_per_week: f64) -> Task {
        Task::new(
            NewTask::new(Uuid::new_v4(), "task", TaskKind::Habit)
                .scheduled("2026-01-01", "2026-12-30")
                .commitment(Commitment::weekly(hours_per_week)),
            Utc::now(),
        )
    }

    #[test]
    fn default_budget_capacity() {
        let status = get_budget_status(&TimeBudget::default(), &[], &[]);
        assert_eq!(status.weekly_capacity, 52);
        assert_eq!(status.overall_annual_budget, 2704);
        assert_eq!(status.planned_annual_hours, 0.0);
        assert!(!status.is_over_budget);
        assert_eq!(status.overage, -2704);
    }

    #[test]
    fn over_budget_has_positive_overage() {
        // 364 days is exactly 52 weeks.
        let status = get_budget_status(&TimeBudget::default(), &[year_task(60.0)], &[]);
        assert_eq!(status.planned_annual_hours, 3120.0);
        assert!(status.is_over_budget);
        assert_eq!(status.overage, 416);
        assert_eq!(status.planned_weekly_hours, 60.0);
    }

    #[test]
    fn hidden_tasks_do_not_count() {
        let mut task = year_task(60.0);
        task.hidden = true;
        let status = get_budget_status(&TimeBudget::default(), &[task], &[]);
        assert_eq!(status.planned_annual_hours, 0.0);
        assert!(!status.is_over_budget);
    }

    #[test]
    fn goal_estimate_counts_until_a_task_exists() {
        let goal = Goal::new(
            NewGoal::new(LifeDomain::Growth, "Learn")
                .scheduled("2026-01-01", "2026-12-30")
                .commitment(Commitment::weekly(10.0)),
            Utc::now(),
        );
        let status = get_budget_status(&TimeBudget::default(), &[], std::slice::from_ref(&goal));
        assert_eq!(status.planned_annual_hours, 520.0);

        let mut hidden = year_task(1.0);
        hidden.goal_id = goal.id;
        hidden.hidden = true;
        let status = get_budget_status(&TimeBudget::default(), &[hidden], &[goal]);
        assert_eq!(status.planned_annual_hours, 0.0);
    }

    #[test]
    fn overcommitted_budget_is_always_over() {
        let budget = TimeBudget {
            work_hours: 100,
            sleep_hours: 70,
            necessary_hours: 0,
        };
        let status = get_budget_status(&budget, &[], &[]);
        assert_eq!(status.weekly_capacity, -2);
        assert_eq!(status.overall_annual_budget, -104);
        assert!(status.is_over_budget);
        assert_eq!(status.overage, 104);
    }
}
