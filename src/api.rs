use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;
use crate::models::{
    ChatReply, ChatRequest, HealthStatus, PredictionRequest, PredictionResult, StudentRecord,
};

/// Client for the student-support service.
#[derive(Debug, Clone)]
pub struct SupportApi {
    base_url: String,
    http_client: reqwest::Client,
}

impl SupportApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder().build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, ApiError> {
        let url = format!("{}/api/predict", self.base_url);
        debug!(%url, name = %request.name, "requesting prediction");
        let response = self.http_client.post(&url).json(request).send().await?;
        decode(response).await
    }

    /// Sends one chat message and returns the counselor's reply text.
    pub async fn chat(&self, message: &str) -> Result<String, ApiError> {
        let url = format!("{}/api/chat", self.base_url);
        debug!(%url, chars = message.len(), "sending chat message");
        let response = self
            .http_client
            .post(&url)
            .json(&ChatRequest { message })
            .send()
            .await?;
        let reply: ChatReply = decode(response).await?;
        Ok(reply.response)
    }

    pub async fn students(&self) -> Result<Vec<StudentRecord>, ApiError> {
        let url = format!("{}/api/students", self.base_url);
        let response = self.http_client.get(&url).send().await?;
        decode(response).await
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = format!("{}/api/health", self.base_url);
        let response = self.http_client.get(&url).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();

    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode {
        message: e.to_string(),
    })
}
