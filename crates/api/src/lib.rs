//! `api` crate — HTTP REST layer over the review usecase.
//!
//! Exposes:
//!   POST   /v1/question
//!   GET    /v1/question/:id
//!   PUT    /v1/question/:id
//!   DELETE /v1/question/:id
//!   GET    /v1/questions?groupId=&userId=&order=&limit=&offset=

use std::sync::Arc;

use review::ReviewUsecase;
use tracing::info;

pub mod handlers;

pub use handlers::{router, AppState};

/// Bind `addr` and serve the API until the process is stopped.
pub async fn serve(addr: &str, usecase: Arc<ReviewUsecase>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(AppState { usecase })).await
}
