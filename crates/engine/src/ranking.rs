//! Priority ranking of tasks by evaluation score.

use crate::Task;

/// Tasks ordered by ascending evaluation total.
///
/// The sort is stable: tasks with equal totals keep their input order.
pub fn rank_tasks_by_score(tasks: &[Task]) -> Vec<&Task> {
    let mut ranked: Vec<&Task> = tasks.iter().collect();
    ranked.sort_by_key(|task| task.evaluation.total());
    ranked
}

/// Visible tasks, weakest first. These are the candidates to hide when the
/// plan is over budget.
pub fn trim_candidates(tasks: &[Task]) -> Vec<&Task> {
    let mut ranked = rank_tasks_by_score(tasks);
    ranked.retain(|task| task.is_visible());
    ranked
}

/// The single task suggested for hiding: the first trim candidate.
pub fn suggest_task_to_hide(tasks: &[Task]) -> Option<&Task> {
    trim_candidates(tasks).into_iter().next()
}
