use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::error::ApiError;
use crate::models::{AlertsRequest, AlertsStatus, UserQuery};
use crate::outlook::{CycleOutlook, NO_PREDICTION_MESSAGE};
use crate::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/cycle", get(get_cycle_outlook))
        .route("/cycle/alerts", get(get_cycle_alerts).post(set_cycle_alerts))
        .with_state(state)
}

async fn get_cycle_outlook(
    State(tracker): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Result<Json<CycleOutlook>, ApiError> {
    let Some(outlook) = tracker.outlook(params.user_id).await else {
        return Err(ApiError::NotFound(NO_PREDICTION_MESSAGE.to_string()));
    };

    Ok(Json(outlook))
}

async fn get_cycle_alerts(
    State(tracker): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Json<AlertsStatus> {
    Json(AlertsStatus {
        enabled: tracker.alerts_enabled(params.user_id).await,
    })
}

async fn set_cycle_alerts(
    State(tracker): State<AppState>,
    Json(body): Json<AlertsRequest>,
) -> StatusCode {
    tracker.set_alerts_enabled(body.user_id, body.enabled).await;
    StatusCode::NO_CONTENT
}
