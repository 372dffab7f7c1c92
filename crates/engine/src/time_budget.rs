//! The weekly time commitments that are not up for planning.

use serde::{Deserialize, Serialize};

/// Hours in a week.
pub const HOURS_PER_WEEK: i64 = 168;

/// Weeks counted in a planning year.
pub const WEEKS_PER_YEAR: i64 = 52;

/// Fixed weekly commitments (work, sleep, other necessities), in hours.
///
/// Nothing caps the sum: a budget above 168 hours yields a negative capacity
/// that downstream calculations surface as over-allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeBudget {
    pub work_hours: u32,
    pub sleep_hours: u32,
    pub necessary_hours: u32,
}

impl Default for TimeBudget {
    fn default() -> Self {
        Self {
            work_hours: 40,
            sleep_hours: 56,
            necessary_hours: 20,
        }
    }
}

impl TimeBudget {
    /// Sum of all fixed commitments.
    #[must_use]
    pub fn committed_hours(&self) -> i64 {
        i64::from(self.work_hours) + i64::from(self.sleep_hours) + i64::from(self.necessary_hours)
    }

    /// Hours per week left for goals and tasks. May be negative.
    #[must_use]
    pub fn weekly_capacity(&self) -> i64 {
        HOURS_PER_WEEK - self.committed_hours()
    }

    /// Hours per year left for goals and tasks. May be negative.
    #[must_use]
    pub fn annual_capacity(&self) -> i64 {
        self.weekly_capacity() * WEEKS_PER_YEAR
    }

    pub(crate) fn apply(&mut self, patch: TimeBudgetPatch) {
        if let Some(work_hours) = patch.work_hours {
            self.work_hours = work_hours;
        }
        if let Some(sleep_hours) = patch.sleep_hours {
            self.sleep_hours = sleep_hours;
        }
        if let Some(necessary_hours) = patch.necessary_hours {
            self.necessary_hours = necessary_hours;
        }
    }
}

/// Partial update for the [`TimeBudget`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBudgetPatch {
    pub work_hours: Option<u32>,
    pub sleep_hours: Option<u32>,
    pub necessary_hours: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budget_leaves_52_hours() {
        let budget = TimeBudget::default();
        assert_eq!(budget.weekly_capacity(), 52);
        assert_eq!(budget.annual_capacity(), 2704);
    }

    #[test]
    fn overcommitted_budget_goes_negative() {
        let budget = TimeBudget {
            work_hours: 80,
            sleep_hours: 70,
            necessary_hours: 30,
        };
        assert_eq!(budget.weekly_capacity(), -12);
        assert_eq!(budget.annual_capacity(), -624);
    }

    #[test]
    fn patch_merges_fields() {
        let mut budget = TimeBudget::default();
        budget.apply(TimeBudgetPatch {
            sleep_hours: Some(49),
            ..TimeBudgetPatch::default()
        });
        assert_eq!(
            budget,
            TimeBudget {
                work_hours: 40,
                sleep_hours: 49,
                necessary_hours: 20,
            }
        );
    }
}
