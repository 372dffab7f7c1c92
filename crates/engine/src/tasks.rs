//! The module contains `Task`, a scheduled decomposition of a goal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Commitment, CostInput, Costed, GoalId, util::normalize_optional_date};

pub type TaskId = Uuid;

/// Lowest and highest value of an evaluation score.
pub const SCORE_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

const DEFAULT_SCORE: u8 = 5;

/// The two shapes a task can take.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Recurring routine, usually costed in daily minutes.
    #[default]
    Habit,
    /// Bounded piece of work, costed either way.
    Project,
}

/// The three scores a user gives a task, each in `1..=10`.
///
/// Out of range input is clamped on construction and on deserialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EvaluationScores", into = "EvaluationScores")]
pub struct Evaluation {
    pain: u8,
    passion: u8,
    timing: u8,
}

impl Evaluation {
    pub fn new(pain: i64, passion: i64, timing: i64) -> Self {
        Self {
            pain: clamp_score(pain),
            passion: clamp_score(passion),
            timing: clamp_score(timing),
        }
    }

    #[must_use]
    pub const fn pain(&self) -> u8 {
        self.pain
    }

    #[must_use]
    pub const fn passion(&self) -> u8 {
        self.passion
    }

    #[must_use]
    pub const fn timing(&self) -> u8 {
        self.timing
    }

    /// Sum of the three scores; lower means weaker candidate to keep.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.pain as u32 + self.passion as u32 + self.timing as u32
    }
}

impl Default for Evaluation {
    fn default() -> Self {
        Self {
            pain: DEFAULT_SCORE,
            passion: DEFAULT_SCORE,
            timing: DEFAULT_SCORE,
        }
    }
}

fn clamp_score(value: i64) -> u8 {
    let (min, max) = (*SCORE_RANGE.start(), *SCORE_RANGE.end());
    // Lossless after clamping to the score range.
    value.clamp(i64::from(min), i64::from(max)) as u8
}

/// Wire shape of [`Evaluation`].
#[derive(Clone, Copy, Serialize, Deserialize)]
struct EvaluationScores {
    pain_score: i64,
    passion_score: i64,
    timing_score: i64,
}

impl From<EvaluationScores> for Evaluation {
    fn from(value: EvaluationScores) -> Self {
        Self::new(value.pain_score, value.passion_score, value.timing_score)
    }
}

impl From<Evaluation> for EvaluationScores {
    fn from(value: Evaluation) -> Self {
        Self {
            pain_score: i64::from(value.pain),
            passion_score: i64::from(value.passion),
            timing_score: i64::from(value.timing),
        }
    }
}

/// A concrete habit or project attached to a goal.
///
/// `hidden` is a soft delete: a hidden task keeps its data but is left out
/// of every budget and report aggregate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub goal_id: GoalId,
    pub title: String,
    pub kind: TaskKind,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub commitment: Option<Commitment>,
    pub evaluation: Evaluation,
    #[serde(default)]
    pub hidden: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(new: NewTask, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            goal_id: new.goal_id,
            title: new.title,
            kind: new.kind,
            start_date: normalize_optional_date(new.start_date),
            end_date: normalize_optional_date(new.end_date),
            commitment: new.commitment,
            evaluation: new.evaluation,
            hidden: false,
            created_at,
        }
    }

    /// Returns whether this task counts towards budgets and reports.
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    pub(crate) fn apply(&mut self, patch: TaskPatch) {
        if let Some(goal_id) = patch.goal_id {
            self.goal_id = goal_id;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = normalize_optional_date(start_date);
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = normalize_optional_date(end_date);
        }
        if let Some(commitment) = patch.commitment {
            self.commitment = commitment;
        }
        if let Some(evaluation) = patch.evaluation {
            self.evaluation = evaluation;
        }
    }
}

impl Costed for Task {
    fn cost_input(&self) -> CostInput<'_> {
        CostInput::new(
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            self.commitment.as_ref(),
        )
    }
}

/// Fields required to create a [`Task`].
#[derive(Clone, Debug, PartialEq)]
pub struct NewTask {
    pub goal_id: GoalId,
    pub title: String,
    pub kind: TaskKind,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub commitment: Option<Commitment>,
    pub evaluation: Evaluation,
}

impl NewTask {
    pub fn new(goal_id: GoalId, title: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            goal_id,
            title: title.into(),
            kind,
            start_date: None,
            end_date: None,
            commitment: None,
            evaluation: Evaluation::default(),
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

    pub fn evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = evaluation;
        self
    }
}

/// Partial update for a [`Task`].
///
/// Outer `None` leaves a field untouched; `Some(None)` clears an optional
/// field. Visibility is changed through hide/unhide only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskPatch {
    pub goal_id: Option<GoalId>,
    pub title: Option<String>,
    pub kind: Option<TaskKind>,
    pub start_date: Option<Option<String>>,
    pub end_date: Option<Option<String>>,
    pub commitment: Option<Option<Commitment>>,
    pub evaluation: Option<Evaluation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_are_clamped() {
        let evaluation = Evaluation::new(0, 11, -4);
        assert_eq!(evaluation.pain(), 1);
        assert_eq!(evaluation.passion(), 10);
        assert_eq!(evaluation.timing(), 1);
        assert_eq!(evaluation.total(), 12);
    }

    #[test]
    fn evaluation_wire_shape() {
        let json = serde_json::to_value(Evaluation::new(2, 9, 4)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "pain_score": 2, "passion_score": 9, "timing_score": 4 })
        );

        let parsed: Evaluation = serde_json::from_value(
            serde_json::json!({ "pain_score": 42, "passion_score": 3, "timing_score": 0 }),
        )
        .unwrap();
        assert_eq!(parsed, Evaluation::new(10, 3, 1));
    }

    #[test]
    fn new_task_starts_visible() {
        let task = Task::new(
            NewTask::new(Uuid::new_v4(), "Morning run", TaskKind::Habit),
            Utc::now(),
        );
        assert!(task.is_visible());
        assert_eq!(task.evaluation.total(), 15);
    }

    #[test]
    fn patch_replaces_commitment() {
        let mut task = Task::new(
            NewTask::new(Uuid::new_v4(), "Write", TaskKind::Project)
                .commitment(Commitment::daily_on(30.0, 5.0)),
            Utc::now(),
        );
        task.apply(TaskPatch {
            commitment: Some(Some(Commitment::weekly(3.0))),
            kind: Some(TaskKind::Habit),
            ..TaskPatch::default()
        });
        assert_eq!(task.commitment, Some(Commitment::weekly(3.0)));
        assert_eq!(task.kind, TaskKind::Habit);
        assert_eq!(task.title, "Write");
    }
}
