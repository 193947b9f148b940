pub mod client;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::services::job_service::JobService;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub jwt_secret: Arc<str>,
    pub job_service: JobService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();
        Self::with_secret(pool, &config.jwt_secret)
    }

    pub fn with_secret(pool: PgPool, jwt_secret: &str) -> Self {
        let job_service = JobService::new(pool.clone());

        Self {
            pool,
            jwt_secret: Arc::from(jwt_secret),
            job_service,
        }
    }
}
