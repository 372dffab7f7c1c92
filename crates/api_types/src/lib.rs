//! Request and response bodies of the HTTP API.
//!
//! Domain values (`LifeDomain`, `Commitment`, `TaskKind`, reports) are the
//! engine's own serde types; this crate only adds the envelopes.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub use engine::{
    BudgetStatus, Commitment, DomainAllocations, LifeDomain, PlanReport, TaskKind, TimeBudget,
    TrimCandidate,
};

/// Name of the header carrying the access code.
pub const ACCESS_CODE_HEADER: &str = "x-access-code";

/// Distinguish an absent field (`None`) from an explicit `null`
/// (`Some(None)`) in partial updates.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub mod goal {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalNew {
        pub domain: LifeDomain,
        pub title: String,
        /// Calendar date, `YYYY-MM-DD`.
        pub start_date: Option<String>,
        /// Calendar date, `YYYY-MM-DD`. Inclusive.
        pub end_date: Option<String>,
        pub commitment: Option<Commitment>,
    }

    /// Partial update. Send `null` to clear an optional field.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct GoalUpdate {
        pub domain: Option<LifeDomain>,
        pub title: Option<String>,
        #[serde(default, deserialize_with = "double_option")]
        pub start_date: Option<Option<String>>,
        #[serde(default, deserialize_with = "double_option")]
        pub end_date: Option<Option<String>>,
        #[serde(default, deserialize_with = "double_option")]
        pub commitment: Option<Option<Commitment>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalCreated {
        pub id: Uuid,
    }
}

pub mod task {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TaskNew {
        pub goal_id: Uuid,
        pub title: String,
        pub kind: TaskKind,
        pub start_date: Option<String>,
        pub end_date: Option<String>,
        pub commitment: Option<Commitment>,
        /// Scores are clamped to `1..=10`; absent scores default to 5.
        pub pain_score: Option<i64>,
        pub passion_score: Option<i64>,
        pub timing_score: Option<i64>,
    }

    /// Partial update. Send `null` to clear an optional field.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TaskUpdate {
        pub goal_id: Option<Uuid>,
        pub title: Option<String>,
        pub kind: Option<TaskKind>,
        #[serde(default, deserialize_with = "double_option")]
        pub start_date: Option<Option<String>>,
        #[serde(default, deserialize_with = "double_option")]
        pub end_date: Option<Option<String>>,
        #[serde(default, deserialize_with = "double_option")]
        pub commitment: Option<Option<Commitment>>,
        pub pain_score: Option<i64>,
        pub passion_score: Option<i64>,
        pub timing_score: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TaskCreated {
        pub id: Uuid,
    }

    /// Result of hiding the lowest-scored task.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TaskHidden {
        /// `None` when no visible task was left.
        pub id: Option<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RankedTasks {
        /// Visible tasks, lowest total score first.
        pub tasks: Vec<TrimCandidate>,
    }
}

pub mod budget {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct BudgetUpdate {
        pub work_hours: Option<u32>,
        pub sleep_hours: Option<u32>,
        pub necessary_hours: Option<u32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub time_budget: TimeBudget,
        pub status: BudgetStatus,
    }
}

pub mod report {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AllocationsView {
        pub hours: DomainAllocations,
        pub shares: DomainAllocations,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ReportResponse {
        pub report: PlanReport,
        /// Uses left on the access code after this report.
        pub remaining_uses: i64,
    }
}
