use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::calendar::DayMarking;
use crate::models::CalendarQuery;
use crate::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/calendar", get(get_calendar))
        .with_state(state)
}

pub async fn get_calendar(
    State(tracker): State<AppState>,
    Query(params): Query<CalendarQuery>,
) -> Json<BTreeMap<NaiveDate, DayMarking>> {
    Json(tracker.calendar(params.user_id, params.selected).await)
}
