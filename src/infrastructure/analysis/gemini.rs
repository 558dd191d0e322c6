//! Google Gemini analysis backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, error};

use super::backend::{AnalysisBackend, AnalysisError, AnalysisRequest};
use crate::config::AnalysisConfig;

pub struct GeminiBackend {
    client: Client,
    config: AnalysisConfig,
}

impl GeminiBackend {
    pub fn new(config: AnalysisConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    fn api_key(&self) -> Result<&str, AnalysisError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| AnalysisError::Configuration("Gemini API key not configured".into()))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn extract_text(body: &Value) -> Result<String, AnalysisError> {
        body.pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                AnalysisError::InvalidResponse("Response carries no candidate text".into())
            })
    }
}

#[async_trait]
impl AnalysisBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn analyze(&self, request: AnalysisRequest) -> Result<String, AnalysisError> {
        let api_key = self.api_key()?;
        let url = self.endpoint();

        let body = json!({
            "systemInstruction": {
                "parts": [{ "text": request.system_instruction }]
            },
            "contents": [{
                "parts": [{ "text": request.prompt }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema,
                "thinkingConfig": { "thinkingBudget": self.config.thinking_budget }
            }
        });

        debug!(model = %self.config.model, "Sending analysis request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalysisError::Timeout {
                        seconds: self.config.timeout_seconds,
                    }
                } else {
                    AnalysisError::from(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!("Analysis API error: {} - {}", status, text);
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let payload: Value = response.json().await?;
        Self::extract_text(&payload)
    }
}
