//! Weekly time budget endpoints.

use api_types::budget::{BudgetUpdate, BudgetView};
use axum::{Extension, Json, extract::State};
use engine::{Planner, TimeBudgetPatch, get_budget_status};

use crate::{ServerError, access, plans, server::ServerState};

fn view(planner: &Planner) -> BudgetView {
    BudgetView {
        time_budget: *planner.time_budget(),
        status: get_budget_status(planner.time_budget(), planner.tasks(), planner.goals()),
    }
}

pub async fn get(
    Extension(code): Extension<access::Model>,
    State(state): State<ServerState>,
) -> Result<Json<BudgetView>, ServerError> {
    let planner = plans::load(&state.db, &code.code).await?;
    Ok(Json(view(&planner)))
}

/// Apply a partial budget update and return the recomputed status.
pub async fn update(
    Extension(code): Extension<access::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<BudgetUpdate>,
) -> Result<Json<BudgetView>, ServerError> {
    let patch = TimeBudgetPatch {
        work_hours: payload.work_hours,
        sleep_hours: payload.sleep_hours,
        necessary_hours: payload.necessary_hours,
    };

    let view = plans::update_plan(&state.db, &code.code, |planner| {
        planner.update_time_budget(patch);
        Ok(view(planner))
    })
    .await?;

    Ok(Json(view))
}
