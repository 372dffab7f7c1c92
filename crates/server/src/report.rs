//! Allocation and report endpoints.

use api_types::report::{AllocationsView, ReportResponse};
use axum::{Extension, Json, extract::State};
use engine::{build_report, calculate_domain_time_allocations};
use sea_orm::TransactionTrait;

use crate::{ServerError, access, plans, server::ServerState};

/// Hours per life domain, free of charge.
pub async fn allocations(
    Extension(code): Extension<access::Model>,
    State(state): State<ServerState>,
) -> Result<Json<AllocationsView>, ServerError> {
    let planner = plans::load(&state.db, &code.code).await?;
    let hours = calculate_domain_time_allocations(planner.goals(), planner.tasks());
    let shares = hours.shares();

    Ok(Json(AllocationsView { hours, shares }))
}

/// Build the full plan report. Costs one use of the access code.
pub async fn report(
    Extension(code): Extension<access::Model>,
    State(state): State<ServerState>,
) -> Result<Json<ReportResponse>, ServerError> {
    let db_tx = state.db.begin().await?;
    let remaining_uses = access::consume(&db_tx, &code.code).await?;
    let planner = plans::load(&db_tx, &code.code).await?;
    db_tx.commit().await?;

    let report = build_report(&planner);
    tracing::info!(
        over_budget = report.budget_status.is_over_budget,
        remaining_uses,
        "report generated"
    );

    Ok(Json(ReportResponse {
        report,
        remaining_uses,
    }))
}
