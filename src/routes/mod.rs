pub mod health;
pub mod jobs;

use axum::{middleware::from_fn_with_state, routing::get, Router};

use crate::middleware::auth::{require_bearer_auth, require_hr_or_admin};
use crate::AppState;

/// All job routes, with their auth layers, bound to `state`.
pub fn router(state: AppState) -> Router {
    let hr_api = Router::new()
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route_layer(from_fn_with_state(state.clone(), require_hr_or_admin));

    let reader_api = Router::new()
        .route("/api/jobs/public", get(jobs::list_public_jobs))
        .route("/api/jobs/:id", get(jobs::get_job))
        .route_layer(from_fn_with_state(state.clone(), require_bearer_auth));

    Router::new()
        .route("/health", get(health::health))
        .merge(hr_api)
        .merge(reader_api)
        .with_state(state)
}
