use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::error::ApiError;
use crate::models::{DayNote, DayNoteEntry, DayNoteRequest, DeleteDayNoteRequest, UserQuery};
use crate::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/day-note", post(save_day_note).delete(delete_day_note))
        .route("/day-notes", get(get_day_notes))
        .with_state(state)
}

async fn save_day_note(
    State(tracker): State<AppState>,
    Json(body): Json<DayNoteRequest>,
) -> StatusCode {
    let note = DayNote {
        notes: body.notes,
        mood: body.mood,
    };
    tracker.set_note(body.user_id, body.date, note).await;
    StatusCode::NO_CONTENT
}

async fn delete_day_note(
    State(tracker): State<AppState>,
    Json(body): Json<DeleteDayNoteRequest>,
) -> Result<StatusCode, ApiError> {
    if tracker.remove_note(body.user_id, body.date).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("No note for {}", body.date)))
    }
}

async fn get_day_notes(
    State(tracker): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Json<Vec<DayNoteEntry>> {
    let entries = tracker
        .notes(query.user_id)
        .await
        .into_iter()
        .map(|(date, note)| DayNoteEntry {
            date,
            notes: note.notes,
            mood: note.mood,
        })
        .collect();

    Json(entries)
}
