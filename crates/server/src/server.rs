use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, patch, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Error as AxumError, Header},
};
use sea_orm::DatabaseConnection;

use crate::{access, budget, goals, plans, report, tasks};

static ACCESS_CODE_HEADER: axum::http::HeaderName =
    axum::http::HeaderName::from_static(api_types::ACCESS_CODE_HEADER);

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
}

/// `TypedHeader` for the access code.
///
/// Every request must carry an "x-access-code" entry in the header.
#[derive(Debug)]
struct AccessCodeHeader(String);

impl Header for AccessCodeHeader {
    fn name() -> &'static axum::http::HeaderName {
        &ACCESS_CODE_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };
        let value = value.trim();
        if value.is_empty() {
            return Err(AxumError::invalid());
        }

        Ok(AccessCodeHeader(value.to_string()))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        match axum::http::HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-access-code header"),
        }
    }
}

async fn require_access_code(
    code_header: Option<TypedHeader<AccessCodeHeader>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let TypedHeader(AccessCodeHeader(code)) = code_header.ok_or(StatusCode::UNAUTHORIZED)?;
    let code = access::find(&state.db, &code)
        .await
        .map_err(|err| {
            tracing::error!("failed to look up access code: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if code.is_exhausted() {
        return Err(StatusCode::FORBIDDEN);
    }

    request.extensions_mut().insert(code);
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/plan", get(plan))
        .route("/goals", post(goals::create))
        .route("/goals/{id}", patch(goals::update).delete(goals::remove))
        .route("/tasks", post(tasks::create))
        .route("/tasks/ranked", get(tasks::ranked))
        .route("/tasks/hide-lowest", post(tasks::hide_lowest))
        .route("/tasks/{id}", patch(tasks::update).delete(tasks::remove))
        .route("/tasks/{id}/hide", post(tasks::hide))
        .route("/tasks/{id}/unhide", post(tasks::unhide))
        .route("/budget", get(budget::get).patch(budget::update))
        .route("/allocations", get(report::allocations))
        .route("/report", post(report::report))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_access_code))
        .with_state(state)
}

/// The whole plan document of the caller.
async fn plan(
    axum::Extension(code): axum::Extension<access::Model>,
    State(state): State<ServerState>,
) -> Result<axum::Json<engine::Planner>, crate::ServerError> {
    let planner = plans::load(&state.db, &code.code).await?;
    Ok(axum::Json(planner))
}

pub async fn run_with_listener(
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState { db })).await
}
