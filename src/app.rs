use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/days/:day/reveal", post(handlers::reveal_day))
        .route("/api/admin/:acting/gifts", get(handlers::get_gift_drafts))
        .route("/api/admin/gifts", post(handlers::save_gifts))
        .with_state(state)
}
