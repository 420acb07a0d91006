use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/report", post(handlers::submit_report))
        .route("/settings", post(handlers::submit_settings))
        .route("/theme/toggle", post(handlers::theme_toggle))
        .route("/api/status", get(handlers::get_status))
        .route("/api/day", get(handlers::get_day))
        .route("/api/reports", get(handlers::get_reports).post(handlers::create_report))
        .route("/api/settings", post(handlers::update_settings))
        .with_state(state)
}
