//! The `Planner` holds one user's goals, tasks and time budget.
//!
//! It is a plain state container: callers own it (or load it from a plan
//! document), run mutators on it and hand read-only slices to the cost
//! engine. It never computes cost itself.
//!
//! Mutators are total. Unknown ids are ignored and reported through a
//! `false` return value. The only rejected operations are adding or moving a
//! goal into a domain that is already full.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    EngineError, Goal, GoalId, GoalPatch, LifeDomain, MAX_GOALS_PER_DOMAIN, NewGoal, NewTask,
    ResultEngine, Task, TaskId, TaskPatch, TimeBudget, TimeBudgetPatch, suggest_task_to_hide,
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Planner {
    #[serde(default)]
    goals: Vec<Goal>,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    time_budget: TimeBudget,
}

impl Planner {
    pub fn new(time_budget: TimeBudget) -> Self {
        Self {
            goals: Vec::new(),
            tasks: Vec::new(),
            time_budget,
        }
    }

    /// Restore a planner from its JSON document.
    pub fn from_document(document: &str) -> ResultEngine<Self> {
        Ok(serde_json::from_str(document)?)
    }

    /// Serialize the planner into its JSON document.
    pub fn to_document(&self) -> ResultEngine<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn time_budget(&self) -> &TimeBudget {
        &self.time_budget
    }

    pub fn goal(&self, id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn tasks_for_goal(&self, goal_id: GoalId) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |task| task.goal_id == goal_id)
    }

    pub fn goals_in_domain(&self, domain: LifeDomain) -> impl Iterator<Item = &Goal> {
        self.goals.iter().filter(move |goal| goal.domain == domain)
    }

    /// Append a goal, unless its domain already holds
    /// [`MAX_GOALS_PER_DOMAIN`] goals.
    pub fn add_goal(&mut self, new: NewGoal) -> ResultEngine<GoalId> {
        self.add_goal_at(new, Utc::now())
    }

    /// Same as [`Planner::add_goal`] with an explicit creation timestamp.
    pub fn add_goal_at(&mut self, new: NewGoal, created_at: DateTime<Utc>) -> ResultEngine<GoalId> {
        let domain = new.domain;
        if self.goals_in_domain(domain).count() >= MAX_GOALS_PER_DOMAIN {
            tracing::debug!(%domain, "goal rejected: domain full");
            return Err(EngineError::DomainFull(domain));
        }
        let goal = Goal::new(new, created_at);
        let id = goal.id;
        self.goals.push(goal);
        tracing::debug!(%id, %domain, "goal added");
        Ok(id)
    }

    /// Merge `patch` into a goal. Returns `Ok(false)` for an unknown id.
    ///
    /// Moving a goal into another domain that already holds
    /// [`MAX_GOALS_PER_DOMAIN`] goals is rejected and leaves the goal
    /// untouched.
    pub fn update_goal(&mut self, id: GoalId, patch: GoalPatch) -> ResultEngine<bool> {
        let Some(current) = self.goal(id).map(|goal| goal.domain) else {
            return Ok(false);
        };
        if let Some(domain) = patch.domain
            && domain != current
            && self.goals_in_domain(domain).count() >= MAX_GOALS_PER_DOMAIN
        {
            tracing::debug!(%id, %domain, "goal move rejected: domain full");
            return Err(EngineError::DomainFull(domain));
        }

        if let Some(goal) = self.goals.iter_mut().find(|goal| goal.id == id) {
            goal.apply(patch);
            tracing::debug!(%id, "goal updated");
        }
        Ok(true)
    }

    /// Remove a goal together with every task that references it.
    pub fn remove_goal(&mut self, id: GoalId) -> bool {
        let before = self.goals.len();
        self.goals.retain(|goal| goal.id != id);
        if self.goals.len() == before {
            return false;
        }
        let tasks_before = self.tasks.len();
        self.tasks.retain(|task| task.goal_id != id);
        tracing::debug!(%id, tasks = tasks_before - self.tasks.len(), "goal removed");
        true
    }

    /// Append a visible task. The goal reference is not checked.
    pub fn add_task(&mut self, new: NewTask) -> TaskId {
        self.add_task_at(new, Utc::now())
    }

    /// Same as [`Planner::add_task`] with an explicit creation timestamp.
    pub fn add_task_at(&mut self, new: NewTask, created_at: DateTime<Utc>) -> TaskId {
        let task = Task::new(new, created_at);
        let id = task.id;
        tracing::debug!(%id, goal_id = %task.goal_id, "task added");
        self.tasks.push(task);
        id
    }

    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> bool {
        match self.task_mut(id) {
            Some(task) => {
                task.apply(patch);
                tracing::debug!(%id, "task updated");
                true
            }
            None => false,
        }
    }

    pub fn remove_task(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            tracing::debug!(%id, "task removed");
        }
        removed
    }

    /// Exclude a task from budgets and reports without deleting it.
    pub fn hide_task(&mut self, id: TaskId) -> bool {
        self.set_hidden(id, true)
    }

    pub fn unhide_task(&mut self, id: TaskId) -> bool {
        self.set_hidden(id, false)
    }

    /// Hide the visible task with the lowest evaluation total.
    ///
    /// Returns the id of the hidden task, or `None` when every task is
    /// already hidden.
    pub fn hide_lowest_score_task(&mut self) -> Option<TaskId> {
        let id = suggest_task_to_hide(&self.tasks)?.id;
        self.hide_task(id);
        Some(id)
    }

    pub fn update_time_budget(&mut self, patch: TimeBudgetPatch) {
        self.time_budget.apply(patch);
        tracing::debug!(budget = ?self.time_budget, "time budget updated");
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    fn set_hidden(&mut self, id: TaskId, hidden: bool) -> bool {
        match self.task_mut(id) {
            Some(task) => {
                task.hidden = hidden;
                tracing::debug!(%id, hidden, "task visibility changed");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::{Commitment, Evaluation, TaskKind};

    fn planner_with_goal(domain: LifeDomain) -> (Planner, GoalId) {
        let mut planner = Planner::default();
        let goal_id = planner.add_goal(NewGoal::new(domain, "Goal")).unwrap();
        (planner, goal_id)
    }

    #[test]
    fn fourth_goal_in_domain_is_rejected() {
        let mut planner = Planner::default();
        for title in ["a", "b", "c"] {
            planner
                .add_goal(NewGoal::new(LifeDomain::Health, title))
                .unwrap();
        }

        let err = planner
            .add_goal(NewGoal::new(LifeDomain::Health, "d"))
            .unwrap_err();
        assert_eq!(err, EngineError::DomainFull(LifeDomain::Health));
        assert_eq!(planner.goals().len(), 3);

        planner
            .add_goal(NewGoal::new(LifeDomain::Career, "e"))
            .unwrap();
        assert_eq!(planner.goals().len(), 4);
    }

    #[test]
    fn moving_a_goal_into_a_full_domain_is_rejected() {
        let mut planner = Planner::default();
        let moved = planner
            .add_goal(NewGoal::new(LifeDomain::Career, "moved"))
            .unwrap();
        for title in ["a", "b", "c"] {
            planner
                .add_goal(NewGoal::new(LifeDomain::Health, title))
                .unwrap();
        }
        let before = planner.clone();

        let err = planner
            .update_goal(
                moved,
                GoalPatch {
                    domain: Some(LifeDomain::Health),
                    title: Some("renamed".to_string()),
                    ..GoalPatch::default()
                },
            )
            .unwrap_err();
        assert_eq!(err, EngineError::DomainFull(LifeDomain::Health));
        assert_eq!(planner, before);
        assert_eq!(planner.goals_in_domain(LifeDomain::Health).count(), 3);
    }

    #[test]
    fn full_domain_goal_can_keep_its_domain() {
        let mut planner = Planner::default();
        let mut ids = Vec::new();
        for title in ["a", "b", "c"] {
            ids.push(
                planner
                    .add_goal(NewGoal::new(LifeDomain::Health, title))
                    .unwrap(),
            );
        }

        let patch = GoalPatch {
            domain: Some(LifeDomain::Health),
            title: Some("still health".to_string()),
            ..GoalPatch::default()
        };
        assert_eq!(planner.update_goal(ids[0], patch), Ok(true));
        assert_eq!(planner.goal(ids[0]).unwrap().title, "still health");

        let patch = GoalPatch {
            domain: Some(LifeDomain::Growth),
            ..GoalPatch::default()
        };
        assert_eq!(planner.update_goal(ids[1], patch), Ok(true));
        assert_eq!(planner.goals_in_domain(LifeDomain::Health).count(), 2);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let (mut planner, _) = planner_with_goal(LifeDomain::Family);
        let before = planner.clone();
        let unknown = Uuid::new_v4();

        assert_eq!(planner.update_goal(unknown, GoalPatch::default()), Ok(false));
        assert!(!planner.remove_goal(unknown));
        assert!(!planner.update_task(unknown, TaskPatch::default()));
        assert!(!planner.remove_task(unknown));
        assert!(!planner.hide_task(unknown));
        assert!(!planner.unhide_task(unknown));
        assert_eq!(planner, before);
    }

    #[test]
    fn remove_goal_cascades_to_its_tasks_only() {
        let mut planner = Planner::default();
        let kept_goal = planner
            .add_goal(NewGoal::new(LifeDomain::Growth, "Read"))
            .unwrap();
        let removed_goal = planner
            .add_goal(NewGoal::new(LifeDomain::Growth, "Write"))
            .unwrap();
        let kept_task = planner.add_task(NewTask::new(kept_goal, "Book club", TaskKind::Habit));
        planner.add_task(NewTask::new(removed_goal, "Draft", TaskKind::Project));
        let hidden = planner.add_task(NewTask::new(removed_goal, "Edit", TaskKind::Project));
        planner.hide_task(hidden);

        assert!(planner.remove_goal(removed_goal));
        assert!(planner.goal(removed_goal).is_none());
        assert_eq!(planner.tasks().len(), 1);
        assert_eq!(planner.tasks()[0].id, kept_task);
    }

    #[test]
    fn hide_and_unhide_keep_the_record() {
        let (mut planner, goal_id) = planner_with_goal(LifeDomain::Leisure);
        let task_id = planner.add_task(NewTask::new(goal_id, "Guitar", TaskKind::Habit));

        assert!(planner.hide_task(task_id));
        assert!(planner.task(task_id).is_some_and(|task| task.hidden));
        assert!(planner.unhide_task(task_id));
        assert!(planner.task(task_id).is_some_and(Task::is_visible));
        assert_eq!(planner.tasks().len(), 1);
    }

    #[test]
    fn hide_lowest_score_task_picks_weakest_visible() {
        let (mut planner, goal_id) = planner_with_goal(LifeDomain::Career);
        let strong = planner.add_task(
            NewTask::new(goal_id, "Strong", TaskKind::Project).evaluation(Evaluation::new(9, 9, 9)),
        );
        let weak = planner.add_task(
            NewTask::new(goal_id, "Weak", TaskKind::Project).evaluation(Evaluation::new(1, 2, 3)),
        );

        assert_eq!(planner.hide_lowest_score_task(), Some(weak));
        assert_eq!(planner.hide_lowest_score_task(), Some(strong));
        assert_eq!(planner.hide_lowest_score_task(), None);
    }

    #[test]
    fn time_budget_patch_is_merged() {
        let mut planner = Planner::default();
        planner.update_time_budget(TimeBudgetPatch {
            work_hours: Some(32),
            ..TimeBudgetPatch::default()
        });
        assert_eq!(planner.time_budget().work_hours, 32);
        assert_eq!(planner.time_budget().sleep_hours, 56);
    }

    #[test]
    fn document_round_trip_keeps_state() {
        let (mut planner, goal_id) = planner_with_goal(LifeDomain::Health);
        let task_id = planner.add_task(
            NewTask::new(goal_id, "Swim", TaskKind::Habit)
                .scheduled("2026-01-01", "2026-03-31")
                .commitment(Commitment::daily_on(40.0, 2.0)),
        );
        planner.hide_task(task_id);

        let restored = Planner::from_document(&planner.to_document().unwrap()).unwrap();
        assert_eq!(restored, planner);
    }

    #[test]
    fn empty_document_yields_default_budget() {
        let planner = Planner::from_document("{}").unwrap();
        assert!(planner.goals().is_empty());
        assert_eq!(*planner.time_budget(), TimeBudget::default());
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(matches!(
            Planner::from_document("not json"),
            Err(EngineError::Document(_))
        ));
    }
}
