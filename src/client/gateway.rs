use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::client::error::ClientError;
use crate::config::ClientConfig;
use crate::dto::api_dto::{ApiErrorBody, ApiResponse};
use crate::dto::job_dto::{CreateJobPayload, JobPosting};

pub const JOBS_PATH: &str = "/api/jobs";
pub const PUBLIC_JOBS_PATH: &str = "/api/jobs/public";

/// The two backend calls the client needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobsGateway: Send + Sync {
    async fn create_job(&self, payload: &CreateJobPayload) -> Result<JobPosting, ClientError>;
    async fn fetch_public_jobs(&self) -> Result<Vec<JobPosting>, ClientError>;
}

/// [`JobsGateway`] over HTTP with a bearer token.
#[derive(Clone)]
pub struct HttpJobsGateway {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpJobsGateway {
    pub fn new(config: &ClientConfig, token: impl Into<String>) -> Result<Self, ClientError> {
        let parsed = Url::parse(&config.api_base_url)
            .map_err(|e| ClientError::Config(format!("Invalid API base URL: {}", e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "API base URL cannot be a base: {}",
                config.api_base_url
            )));
        }

        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body: ApiErrorBody = serde_json::from_slice(&bytes).unwrap_or_default();
            let message = body.first_message().map(str::to_string);
            warn!(status = status.as_u16(), message = ?message, "Jobs API returned an error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiResponse<T> = serde_json::from_slice(&bytes)?;
        match envelope {
            ApiResponse {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            ApiResponse { error, .. } => Err(ClientError::Api {
                status: status.as_u16(),
                message: error,
            }),
        }
    }
}

#[async_trait]
impl JobsGateway for HttpJobsGateway {
    async fn create_job(&self, payload: &CreateJobPayload) -> Result<JobPosting, ClientError> {
        debug!(title = %payload.title, "Submitting job posting");
        let response = self
            .client
            .post(self.url(JOBS_PATH))
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await?;
        Self::read_envelope(response).await
    }

    async fn fetch_public_jobs(&self) -> Result<Vec<JobPosting>, ClientError> {
        let response = self
            .client
            .get(self.url(PUBLIC_JOBS_PATH))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let jobs: Vec<JobPosting> = Self::read_envelope(response).await?;
        debug!(count = jobs.len(), "Fetched public jobs");
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_validated_and_trimmed() {
        let gateway =
            HttpJobsGateway::new(&ClientConfig::new("http://localhost:5000/"), "token").unwrap();
        assert_eq!(gateway.url(JOBS_PATH), "http://localhost:5000/api/jobs");

        let err = HttpJobsGateway::new(&ClientConfig::new("not a url"), "token").err();
        assert!(matches!(err, Some(ClientError::Config(_))));

        let err = HttpJobsGateway::new(&ClientConfig::new("mailto:hr@example.com"), "token").err();
        assert!(matches!(err, Some(ClientError::Config(_))));
    }
}
