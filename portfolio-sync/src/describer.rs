//! OpenAI chat-completions implementation of the core Describer seam.
//!
//! Treated as a black box by the pipeline: text in, one short description
//! out. Failures propagate as per-repository processing errors.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{error, info};

use portfolio_sync_core::contract::{DescribeError, Describer};

const DEFAULT_API_BASE: &str = "https://api.openai.com";
const MODEL: &str = "gpt-4o-mini";
const SYSTEM_PROMPT: &str = "You write portfolio descriptions. Summarise the \
    project README you are given into one short paragraph of at most two \
    sentences, in the third person, without markdown formatting.";

pub struct OpenAiDescriber {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl OpenAiDescriber {
    pub fn new_from_env() -> Result<Self, DescribeError> {
        dotenvy::dotenv().ok();
        match std::env::var("OPENAI_API_KEY") {
            Ok(api_key) => {
                info!(
                    api_key_set = !api_key.is_empty(),
                    "Initialized OpenAiDescriber from environment"
                );
                Ok(Self::new(api_key, DEFAULT_API_BASE))
            }
            Err(e) => {
                error!(error = ?e, "OPENAI_API_KEY missing in environment");
                Err(Box::new(e))
            }
        }
    }

    /// Construct against an explicit API base (used by tests).
    pub fn new(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            api_base: api_base.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[async_trait]
impl Describer for OpenAiDescriber {
    async fn generate(&self, text: &str) -> Result<String, DescribeError> {
        let body = serde_json::json!({
            "model": MODEL,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": text },
            ],
        });
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to decode response body>"));
            error!(status = %status, "Describer API returned error. Response body: {body}");
            return Err(format!("Describer API error {status}").into());
        }
        let parsed: ChatResponse = response.json().await?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or("Chat completion returned no choices")?;
        Ok(choice.message.content.trim().to_string())
    }
}
