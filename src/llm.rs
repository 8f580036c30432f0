use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, Result};

// Shared client so connections are pooled across requests
static CLIENT: Lazy<Client> = Lazy::new(Client::new);

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Part {
    pub text: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// Body of a `generateContent` call.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: String) -> Self {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        }
    }

    pub fn prompt(&self) -> Option<&str> {
        self.contents
            .first()
            .and_then(|content| content.parts.first())
            .map(|part| part.text.as_str())
    }
}

/// The model endpoint a summary request is sent to.
#[async_trait]
pub trait SummaryUpstream: Send + Sync {
    /// Returns the decoded JSON body of a successful call. A non-2xx status
    /// is `AppError::UpstreamError`.
    async fn generate_content(
        &self,
        api_key: &str,
        model_id: &str,
        request: &GenerateContentRequest,
    ) -> Result<Value>;
}

pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        GeminiClient {
            client: CLIENT.clone(),
            base_url: base_url.into(),
        }
    }

    pub fn endpoint(&self, model_id: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model_id)
    }
}

#[async_trait]
impl SummaryUpstream for GeminiClient {
    async fn generate_content(
        &self,
        api_key: &str,
        model_id: &str,
        request: &GenerateContentRequest,
    ) -> Result<Value> {
        tracing::debug!(model = model_id, "calling generateContent");

        let res = self
            .client
            .post(self.endpoint(model_id))
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::UpstreamError {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = res.json().await?;
        Ok(json)
    }
}
