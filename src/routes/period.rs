use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::error::ApiError;
use crate::models::{LockQuery, LockStatus, LogPeriodRequest, PeriodRecord, UserQuery};
use crate::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/period/start", post(log_period_start))
        .route("/period/end", post(log_period_end))
        .route("/period/locked", get(get_lock_status))
        .route("/periods", get(get_periods))
        .with_state(state)
}

async fn log_period_start(
    State(tracker): State<AppState>,
    Json(body): Json<LogPeriodRequest>,
) -> Result<(StatusCode, Json<PeriodRecord>), ApiError> {
    let record = tracker.log_period_start(body.user_id, body.date).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn log_period_end(
    State(tracker): State<AppState>,
    Json(body): Json<LogPeriodRequest>,
) -> Result<Json<PeriodRecord>, ApiError> {
    let record = tracker.log_period_end(body.user_id, body.date).await?;
    Ok(Json(record))
}

async fn get_lock_status(
    State(tracker): State<AppState>,
    Query(query): Query<LockQuery>,
) -> Json<LockStatus> {
    let locked = tracker.is_date_locked(query.user_id, query.date).await;
    Json(LockStatus {
        date: query.date,
        locked,
    })
}

async fn get_periods(
    State(tracker): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Json<Vec<PeriodRecord>> {
    let mut records = tracker.records(query.user_id).await;
    records.sort_by_key(|r| r.start_date);
    Json(records)
}
