//! Aggregation of planned hours per life domain and per goal.
//!
//! A goal's time is counted in one of two ways:
//!
//! - while **no** task references the goal, its own direct estimate counts;
//! - as soon as any task references it, only the goal's visible tasks count.
//!
//! The switch depends on task *existence*, not visibility: a goal whose only
//! tasks are hidden contributes nothing.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{Goal, GoalId, LifeDomain, Task, calculate_cost};

/// Annual hours per [`LifeDomain`]. Always holds all eight domains.
///
/// Decoding a map that lacks some domains fills them in with `0.0`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<LifeDomain, f64>", into = "BTreeMap<LifeDomain, f64>")]
pub struct DomainAllocations(BTreeMap<LifeDomain, f64>);

impl Default for DomainAllocations {
    fn default() -> Self {
        Self(LifeDomain::ALL.into_iter().map(|domain| (domain, 0.0)).collect())
    }
}

impl From<BTreeMap<LifeDomain, f64>> for DomainAllocations {
    fn from(value: BTreeMap<LifeDomain, f64>) -> Self {
        let mut allocations = Self::default();
        allocations.0.extend(value);
        allocations
    }
}

impl From<DomainAllocations> for BTreeMap<LifeDomain, f64> {
    fn from(value: DomainAllocations) -> Self {
        value.0
    }
}

impl DomainAllocations {
    pub fn get(&self, domain: LifeDomain) -> f64 {
        self.0.get(&domain).copied().unwrap_or_default()
    }

    /// Sum over every domain.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Fraction of the total per domain. All zero when nothing is planned.
    pub fn shares(&self) -> DomainAllocations {
        let total = self.total();
        let mut shares = DomainAllocations::default();
        if total > 0.0 {
            for (domain, hours) in &self.0 {
                shares.add(*domain, hours / total);
            }
        }
        shares
    }

    pub fn iter(&self) -> impl Iterator<Item = (LifeDomain, f64)> + '_ {
        self.0.iter().map(|(domain, hours)| (*domain, *hours))
    }

    fn add(&mut self, domain: LifeDomain, hours: f64) {
        *self.0.entry(domain).or_default() += hours;
    }
}

/// Planned annual hours of one goal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalAllocation {
    pub goal_id: GoalId,
    pub domain: LifeDomain,
    pub title: String,
    pub annual_hours: f64,
    pub visible_tasks: usize,
    pub hidden_tasks: usize,
    /// `true` when the goal has no tasks and its own estimate was used.
    pub uses_goal_estimate: bool,
}

/// Annual hours per domain: visible tasks bucketed by their goal's domain,
/// plus the direct estimate of every goal that has no task at all.
///
/// Tasks whose goal cannot be found are skipped.
pub fn calculate_domain_time_allocations(goals: &[Goal], tasks: &[Task]) -> DomainAllocations {
    let mut allocations = DomainAllocations::default();
    let domain_of: HashMap<GoalId, LifeDomain> =
        goals.iter().map(|goal| (goal.id, goal.domain)).collect();

    for task in tasks.iter().filter(|task| task.is_visible()) {
        if let Some(domain) = domain_of.get(&task.goal_id) {
            allocations.add(*domain, calculate_cost(task));
        }
    }

    for goal in goals_without_tasks(goals, tasks) {
        allocations.add(goal.domain, calculate_cost(goal));
    }

    allocations
}

/// Annual hours per goal, in goal order, following the same fallback rule as
/// [`calculate_domain_time_allocations`].
pub fn calculate_goal_time_allocations(goals: &[Goal], tasks: &[Task]) -> Vec<GoalAllocation> {
    goals
        .iter()
        .map(|goal| {
            let mut allocation = GoalAllocation {
                goal_id: goal.id,
                domain: goal.domain,
                title: goal.title.clone(),
                annual_hours: 0.0,
                visible_tasks: 0,
                hidden_tasks: 0,
                uses_goal_estimate: false,
            };
            for task in tasks.iter().filter(|task| task.goal_id == goal.id) {
                if task.is_visible() {
                    allocation.visible_tasks += 1;
                    allocation.annual_hours += calculate_cost(task);
                } else {
                    allocation.hidden_tasks += 1;
                }
            }
            if allocation.visible_tasks + allocation.hidden_tasks == 0 {
                allocation.uses_goal_estimate = true;
                allocation.annual_hours = calculate_cost(goal);
            }
            allocation
        })
        .collect()
}

/// Goals no task references, hidden tasks included.
pub(crate) fn goals_without_tasks<'a>(
    goals: &'a [Goal],
    tasks: &[Task],
) -> impl Iterator<Item = &'a Goal> {
    let referenced: HashSet<GoalId> = tasks.iter().map(|task| task.goal_id).collect();
    goals
        .iter()
        .filter(move |goal| !referenced.contains(&goal.id))
}
