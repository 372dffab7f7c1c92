//! Tasks API endpoints.

use api_types::task::{RankedTasks, TaskCreated, TaskHidden, TaskNew, TaskUpdate};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{
    Evaluation, NewTask, Planner, TaskId, TaskPatch, normalize_title, ranked_trim_candidates,
};
use uuid::Uuid;

use crate::{ServerError, access, plans, server::ServerState};

/// Merge optional scores over `base`, clamping each into the score range.
fn merge_scores(
    base: Evaluation,
    pain: Option<i64>,
    passion: Option<i64>,
    timing: Option<i64>,
) -> Evaluation {
    Evaluation::new(
        pain.unwrap_or_else(|| i64::from(base.pain())),
        passion.unwrap_or_else(|| i64::from(base.passion())),
        timing.unwrap_or_else(|| i64::from(base.timing())),
    )
}

fn task_not_found(task_id: TaskId) -> ServerError {
    ServerError::NotFound(format!("task {task_id}"))
}

pub async fn create(
    Extension(code): Extension<access::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TaskNew>,
) -> Result<(StatusCode, Json<TaskCreated>), ServerError> {
    let new = NewTask {
        goal_id: payload.goal_id,
        title: normalize_title(&payload.title, "task")?,
        kind: payload.kind,
        start_date: payload.start_date,
        end_date: payload.end_date,
        commitment: payload.commitment,
        evaluation: merge_scores(
            Evaluation::default(),
            payload.pain_score,
            payload.passion_score,
            payload.timing_score,
        ),
    };

    let id = plans::update_plan(&state.db, &code.code, |planner| {
        if planner.goal(new.goal_id).is_none() {
            return Err(ServerError::NotFound(format!("goal {}", new.goal_id)));
        }
        Ok(planner.add_task(new))
    })
    .await?;
    tracing::info!(%id, "task created");

    Ok((StatusCode::CREATED, Json(TaskCreated { id })))
}

pub async fn update(
    Extension(code): Extension<access::Model>,
    State(state): State<ServerState>,
    Path(task_id): Path<Uuid>,
    Json(payload): Json<TaskUpdate>,
) -> Result<StatusCode, ServerError> {
    let title = payload
        .title
        .as_deref()
        .map(|title| normalize_title(title, "task"))
        .transpose()?;
    let scores_changed = payload.pain_score.is_some()
        || payload.passion_score.is_some()
        || payload.timing_score.is_some();

    plans::update_plan(&state.db, &code.code, |planner| {
        let current = planner.task(task_id).ok_or_else(|| task_not_found(task_id))?;
        if let Some(goal_id) = payload.goal_id
            && planner.goal(goal_id).is_none()
        {
            return Err(ServerError::NotFound(format!("goal {goal_id}")));
        }
        let evaluation = scores_changed.then(|| {
            merge_scores(
                current.evaluation,
                payload.pain_score,
                payload.passion_score,
                payload.timing_score,
            )
        });

        let patch = TaskPatch {
            goal_id: payload.goal_id,
            title,
            kind: payload.kind,
            start_date: payload.start_date,
            end_date: payload.end_date,
            commitment: payload.commitment,
            evaluation,
        };
        planner.update_task(task_id, patch);
        Ok(())
    })
    .await?;

    Ok(StatusCode::OK)
}

pub async fn remove(
    Extension(code): Extension<access::Model>,
    State(state): State<ServerState>,
    Path(task_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    plans::update_plan(&state.db, &code.code, |planner| {
        planner
            .remove_task(task_id)
            .then_some(())
            .ok_or_else(|| task_not_found(task_id))
    })
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn hide(
    Extension(code): Extension<access::Model>,
    State(state): State<ServerState>,
    Path(task_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    set_hidden(&state, &code, task_id, Planner::hide_task).await
}

pub async fn unhide(
    Extension(code): Extension<access::Model>,
    State(state): State<ServerState>,
    Path(task_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    set_hidden(&state, &code, task_id, Planner::unhide_task).await
}

async fn set_hidden(
    state: &ServerState,
    code: &access::Model,
    task_id: TaskId,
    toggle: fn(&mut Planner, TaskId) -> bool,
) -> Result<StatusCode, ServerError> {
    plans::update_plan(&state.db, &code.code, |planner| {
        toggle(planner, task_id)
            .then_some(())
            .ok_or_else(|| task_not_found(task_id))
    })
    .await?;

    Ok(StatusCode::OK)
}

/// Hides the visible task with the lowest evaluation total.
pub async fn hide_lowest(
    Extension(code): Extension<access::Model>,
    State(state): State<ServerState>,
) -> Result<Json<TaskHidden>, ServerError> {
    let id = plans::update_plan(&state.db, &code.code, |planner| {
        Ok(planner.hide_lowest_score_task())
    })
    .await?;
    if let Some(id) = id {
        tracing::info!(%id, "lowest scored task hidden");
    }

    Ok(Json(TaskHidden { id }))
}

/// Visible tasks, weakest first.
pub async fn ranked(
    Extension(code): Extension<access::Model>,
    State(state): State<ServerState>,
) -> Result<Json<RankedTasks>, ServerError> {
    let planner = plans::load(&state.db, &code.code).await?;
    let tasks = ranked_trim_candidates(planner.tasks());

    Ok(Json(RankedTasks { tasks }))
}
