use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/weights", post(handlers::submit_form))
        .route(
            "/api/daily-weights",
            get(handlers::list_daily).post(handlers::create_daily),
        )
        .route("/api/daily-weights/range", get(handlers::daily_range))
        .route("/api/daily-weights/recent", get(handlers::daily_recent))
        .route(
            "/api/daily-weights/:id",
            get(handlers::get_daily)
                .put(handlers::update_daily)
                .delete(handlers::delete_daily),
        )
        .route("/api/weekly-weights", get(handlers::list_weekly))
        .route("/api/weekly-weights/year/:year", get(handlers::weekly_by_year))
        .route("/api/weekly-weights/range", get(handlers::weekly_range))
        .route("/api/weekly-weights/date", get(handlers::weekly_for_date))
        .route("/api/chart/daily", get(handlers::chart_daily))
        .route("/api/chart/weekly", get(handlers::chart_weekly))
        .with_state(state)
}
