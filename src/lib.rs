use axum::{routing::get, Router};
use std::sync::Arc;

pub mod calendar;
pub mod classify;
pub mod clock;
pub mod config;
pub mod dates;
pub mod error;
pub mod models;
pub mod outlook;
pub mod routes;
pub mod stats;
pub mod storage;
pub mod store;
pub mod tracker;

pub use tracker::CycleTracker;

pub type AppState = Arc<CycleTracker>;

pub fn app(tracker: AppState) -> Router {
    Router::new()
        .merge(routes::period::routes(tracker.clone()))
        .merge(routes::cycle_stats::routes(tracker.clone()))
        .merge(routes::calendar::routes(tracker.clone()))
        .merge(routes::cycle::routes(tracker.clone()))
        .merge(routes::notes::routes(tracker))
        .route("/health", get(|| async { "✅ Backend up" }))
}
