//! Goals API endpoints.

use api_types::goal::{GoalCreated, GoalNew, GoalUpdate};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{GoalPatch, NewGoal, normalize_title};
use uuid::Uuid;

use crate::{ServerError, access, plans, server::ServerState};

pub async fn create(
    Extension(code): Extension<access::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<GoalNew>,
) -> Result<(StatusCode, Json<GoalCreated>), ServerError> {
    let new = NewGoal {
        domain: payload.domain,
        title: normalize_title(&payload.title, "goal")?,
        start_date: payload.start_date,
        end_date: payload.end_date,
        commitment: payload.commitment,
    };

    let id = plans::update_plan(&state.db, &code.code, |planner| Ok(planner.add_goal(new)?))
        .await?;
    tracing::info!(%id, "goal created");

    Ok((StatusCode::CREATED, Json(GoalCreated { id })))
}

pub async fn update(
    Extension(code): Extension<access::Model>,
    State(state): State<ServerState>,
    Path(goal_id): Path<Uuid>,
    Json(payload): Json<GoalUpdate>,
) -> Result<StatusCode, ServerError> {
    let patch = GoalPatch {
        domain: payload.domain,
        title: payload
            .title
            .as_deref()
            .map(|title| normalize_title(title, "goal"))
            .transpose()?,
        start_date: payload.start_date,
        end_date: payload.end_date,
        commitment: payload.commitment,
    };

    plans::update_plan(&state.db, &code.code, |planner| {
        if planner.update_goal(goal_id, patch)? {
            Ok(())
        } else {
            Err(ServerError::NotFound(format!("goal {goal_id}")))
        }
    })
    .await?;

    Ok(StatusCode::OK)
}

/// Deletes a goal and every task attached to it.
pub async fn remove(
    Extension(code): Extension<access::Model>,
    State(state): State<ServerState>,
    Path(goal_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    plans::update_plan(&state.db, &code.code, |planner| {
        if planner.remove_goal(goal_id) {
            Ok(())
        } else {
            Err(ServerError::NotFound(format!("goal {goal_id}")))
        }
    })
    .await?;
    tracing::info!(%goal_id, "goal removed");

    Ok(StatusCode::NO_CONTENT)
}
