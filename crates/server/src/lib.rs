use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;
use sea_orm::DbErr;

use serde::Serialize;
pub use server::{ServerState, router, run_with_listener};

pub mod access;
mod budget;
mod goals;
mod plans;
mod report;
mod server;
mod tasks;

pub enum ServerError {
    Engine(EngineError),
    Database(DbErr),
    NotFound(String),
    Forbidden(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::DomainFull(_) => StatusCode::CONFLICT,
        EngineError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Document(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Document(doc_err) => {
            tracing::error!("plan document error: {doc_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Database(err) => {
                tracing::error!("database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ServerError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            ServerError::Forbidden(err) => (StatusCode::FORBIDDEN, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<DbErr> for ServerError {
    fn from(value: DbErr) -> Self {
        Self::Database(value)
    }
}

#[cfg(test)]
mod tests {
    use engine::LifeDomain;

    use super::*;

    #[test]
    fn domain_full_maps_to_409() {
        let res =
            ServerError::from(EngineError::DomainFull(LifeDomain::Health)).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn invalid_input_maps_to_422() {
        let res = ServerError::from(EngineError::InvalidInput("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn database_maps_to_500() {
        let res = ServerError::from(DbErr::Custom("boom".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_maps_to_404() {
        let res = ServerError::NotFound("goal".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let res = ServerError::Forbidden("exhausted".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }
}
