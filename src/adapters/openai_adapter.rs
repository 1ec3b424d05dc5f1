//! OpenAI-compatible chat completion adapter.
//!
//! One blocking request per decision run against the `/chat/completions`
//! endpoint. The base URL is configurable so any compatible gateway works.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::config::ModelConfig;
use crate::domain::error::AdvisorError;
use crate::ports::model_port::ModelPort;

/// Model replies are decision lists, not essays; this caps runaway output.
const MAX_TOKENS: u32 = 1500;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

pub struct OpenAiAdapter {
    client: reqwest::blocking::Client,
    config: ModelConfig,
}

impl OpenAiAdapter {
    pub fn new(config: ModelConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self { client, config }
    }

    fn extract_reply(response: ChatResponse) -> Result<String, AdvisorError> {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AdvisorError::Model {
                reason: "response contained no completion".to_string(),
            })
    }
}

impl ModelPort for OpenAiAdapter {
    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AdvisorError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: MAX_TOKENS,
        };

        let url = format!("{}/chat/completions", self.config.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .map_err(|e| AdvisorError::Model {
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(AdvisorError::Model {
                reason: format!("HTTP {status}: {body}"),
            });
        }

        let response: ChatResponse = resp.json().map_err(|e| AdvisorError::Model {
            reason: format!("unexpected response shape: {e}"),
        })?;

        Self::extract_reply(response)
    }
}
