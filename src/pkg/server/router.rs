use axum::routing::{delete, post};
use axum::{routing::get, Router};

use super::handlers;
use super::handlers::probes::{healthz, home, livez};
use super::state::AppState;
use crate::{conf::settings, pkg::internal::minio::create_bucket, prelude::Result};

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new().await?;
    create_bucket(&state.s3_client, &settings.s3_bucket_name).await?;
    let app = Router::new()
        .route("/", get(home))
        .route("/api/upload", post(handlers::resumes::upload))
        .route("/api/resumes", get(handlers::resumes::list))
        .route("/api/resumes/:id", get(handlers::resumes::retrieve))
        .route("/api/resumes/:id", delete(handlers::resumes::remove))
        .route("/api/resumes/:id/file", get(handlers::resumes::download))
        .route("/api/tags", get(handlers::resumes::tags))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state);

    Ok(app)
}
