//! The module contains `Goal`, a life-domain aspiration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Commitment, CostInput, Costed, LifeDomain, util::normalize_optional_date};

/// Maximum number of goals a single domain may hold.
pub const MAX_GOALS_PER_DOMAIN: usize = 3;

pub type GoalId = Uuid;

/// A user-authored aspiration within a [`LifeDomain`].
///
/// A goal may carry its own direct time estimate. That estimate only counts
/// while no task references the goal; see
/// [`calculate_domain_time_allocations`](crate::calculate_domain_time_allocations).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub domain: LifeDomain,
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Goals run on an implicit every-day cadence, so a daily commitment here
    /// never carries a weekly frequency.
    #[serde(default)]
    pub commitment: Option<Commitment>,
}

impl Goal {
    pub fn new(new: NewGoal, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            domain: new.domain,
            title: new.title,
            created_at,
            start_date: normalize_optional_date(new.start_date),
            end_date: normalize_optional_date(new.end_date),
            commitment: new.commitment.map(Commitment::without_frequency),
        }
    }

    pub(crate) fn apply(&mut self, patch: GoalPatch) {
        if let Some(domain) = patch.domain {
            self.domain = domain;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = normalize_optional_date(start_date);
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = normalize_optional_date(end_date);
        }
        if let Some(commitment) = patch.commitment {
            self.commitment = commitment.map(Commitment::without_frequency);
        }
    }
}

impl Costed for Goal {
    fn cost_input(&self) -> CostInput<'_> {
        CostInput::new(
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            self.commitment.as_ref(),
        )
    }
}

/// Fields required to create a [`Goal`].
#[derive(Clone, Debug, PartialEq)]
pub struct NewGoal {
    pub domain: LifeDomain,
    pub title: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub commitment: Option<Commitment>,
}

impl NewGoal {
    /// An unscheduled goal.
    pub fn new(domain: LifeDomain, title: impl Into<String>) -> Self {
        Self {
            domain,
            title: title.into(),
            start_date: None,
            end_date: None,
            commitment: None,
        }
    }

    /// Set an inclusive date range.
    pub fn scheduled(mut self, start_date: &str, end_date: &str) -> Self {
        self.start_date = Some(start_date.to_string());
        self.end_date = Some(end_date.to_string());
        self
    }

    pub fn commitment(mut self, commitment: Commitment) -> Self {
        self.commitment = Some(commitment);
        self
    }
}

/// Partial update for a [`Goal`].
///
/// Outer `None` leaves a field untouched; `Some(None)` clears an optional
/// field. [`Planner::update_goal`](crate::Planner::update_goal) rejects a
/// domain change into a domain already holding [`MAX_GOALS_PER_DOMAIN`] goals.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GoalPatch {
    pub domain: Option<LifeDomain>,
    pub title: Option<String>,
    pub start_date: Option<Option<String>>,
    pub end_date: Option<Option<String>>,
    pub commitment: Option<Option<Commitment>>,
}
