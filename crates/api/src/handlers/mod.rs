use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use review::ReviewUsecase;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod questions;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub usecase: Arc<ReviewUsecase>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/question", post(questions::add_question))
        .route(
            "/v1/question/:id",
            get(questions::get_question)
                .put(questions::correct_question)
                .delete(questions::delete_question),
        )
        .route("/v1/questions", get(questions::list_questions))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
