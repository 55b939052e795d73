use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};

use crate::models::UserQuery;
use crate::tracker::CycleReport;
use crate::AppState;

pub async fn get_cycle_stats(
    State(tracker): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Json<CycleReport> {
    Json(tracker.report(query.user_id).await)
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/cycle-stats", get(get_cycle_stats))
        .with_state(state)
}
