//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tracing::warn;

use crate::extract::{extract_schedule, extract_train_detail};
use crate::tutu::{ScheduleQuery, TutuError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/schedule", get(schedule_search))
        .route("/suggest", get(suggest_stations))
        .route("/train", get(train_detail))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search for departures between two stations.
async fn schedule_search(
    State(state): State<AppState>,
    Query(params): Query<ScheduleParams>,
) -> Result<Response, AppError> {
    let query = ScheduleQuery::new(
        params.st1,
        params.st2,
        params.st1_num,
        params.st2_num,
        params.date,
    )
    .map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let html = state
        .tutu
        .search_schedule(&query)
        .await
        .map_err(|e| fetch_failed(e, "Failed to fetch schedule data"))?;

    let result = extract_schedule(&html);
    json_pretty(&result)
}

/// Proxy station-name suggestions verbatim.
async fn suggest_stations(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Result<Response, AppError> {
    let name = params
        .name
        .filter(|name| !name.is_empty())
        .ok_or(AppError::BadRequest {
            message: "Missing name parameter".to_string(),
        })?;

    let body = state
        .tutu
        .suggest_stations(&name)
        .await
        .map_err(|e| fetch_failed(e, "Failed to fetch data from tutu.ru"))?;

    Ok((
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        body,
    )
        .into_response())
}

/// Fetch details for one train by its `np` token.
async fn train_detail(
    State(state): State<AppState>,
    Query(params): Query<TrainParams>,
) -> Result<Response, AppError> {
    let np = params
        .np
        .filter(|np| !np.is_empty())
        .ok_or(AppError::BadRequest {
            message: "Missing np parameter".to_string(),
        })?;

    let html = state
        .tutu
        .train_view(&np)
        .await
        .map_err(|e| fetch_failed(e, "Failed to fetch data from tutu.ru"))?;

    let detail = extract_train_detail(&html, &np);
    json_pretty(&detail)
}

/// Log the upstream error and map it to the handler's client message.
///
/// The detailed error stays in the logs; clients get a fixed message.
fn fetch_failed(error: TutuError, message: &str) -> AppError {
    warn!(error = %error, "upstream fetch failed");
    AppError::FetchFailed {
        message: message.to_string(),
    }
}

/// Serialize a value as pretty-printed JSON.
///
/// serde_json leaves non-ASCII text unescaped, so Cyrillic station
/// names pass through readably.
fn json_pretty<T: Serialize>(value: &T) -> Result<Response, AppError> {
    let body = serde_json::to_string_pretty(value).map_err(|e| AppError::Internal {
        message: format!("JSON serialization error: {e}"),
    })?;

    Ok((
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        body,
    )
        .into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    FetchFailed { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::FetchFailed { message } | AppError::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        warn!(status = %status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_maps_to_400() {
        let response = AppError::BadRequest {
            message: "Missing name parameter".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn fetch_failure_maps_to_500() {
        let response = AppError::FetchFailed {
            message: "Failed to fetch schedule data".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn pretty_json_is_indented_and_unescaped() {
        let result = crate::extract::extract_schedule(
            "<html><head><title>Расписание электричек Москва - Тверь \
             с изменениями</title></head><body></body></html>",
        );
        let body = serde_json::to_string_pretty(&result).unwrap();
        assert!(body.contains("\n  \"route\""));
        assert!(body.contains("Москва"));
    }
}
