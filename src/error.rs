use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde_json::json;

/// Validation failures of the period store. A rejected call mutates nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CycleError {
    #[error("a period is already active")]
    ActivePeriodConflict,

    #[error("no period is currently active")]
    NoActivePeriod,

    #[error("end date {end} is before the period start {start}")]
    InvalidDateOrder { start: NaiveDate, end: NaiveDate },

    #[error("{0} is already part of a logged period")]
    DateAlreadyLocked(NaiveDate),

    #[error("{0} is in the future")]
    FutureDate(NaiveDate),
}

impl CycleError {
    pub fn kind(&self) -> &'static str {
        match self {
            CycleError::ActivePeriodConflict => "active_period_conflict",
            CycleError::NoActivePeriod => "no_active_period",
            CycleError::InvalidDateOrder { .. } => "invalid_date_order",
            CycleError::DateAlreadyLocked(_) => "date_already_locked",
            CycleError::FutureDate(_) => "future_date",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Cycle(#[from] CycleError),

    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Cycle(
                CycleError::ActivePeriodConflict
                | CycleError::NoActivePeriod
                | CycleError::DateAlreadyLocked(_),
            ) => StatusCode::CONFLICT,
            ApiError::Cycle(CycleError::InvalidDateOrder { .. } | CycleError::FutureDate(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Cycle(e) => e.kind(),
            ApiError::NotFound(_) => "not_found",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.kind(), "message": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
