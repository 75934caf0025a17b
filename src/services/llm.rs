use crate::errors::{AppError, AppResult};
use serde_json::{json, Value};
use std::env;
use std::time::Duration;

const API_URL: &str = "https://api.together.xyz/v1/chat/completions";
const DEFAULT_MODEL: &str = "meta-llama/Llama-3-8b-chat-hf";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const SYSTEM_INSTRUCTION: &str =
    "You are a helpful assistant that answers only about Varun Gandhi.";

/// Shown to the user whenever the completion call fails for any reason.
pub const FALLBACK_RESPONSE: &str =
    "⚠️ Failed to get a response from the AI. Try again later.";

pub struct LlmService {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl LlmService {
    pub fn new() -> AppResult<Self> {
        let api_key = env::var("TOGETHER_API_KEY")
            .map_err(|_| AppError::Other("TOGETHER_API_KEY environment variable not set".to_string()))?;

        let model = env::var("TOGETHER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    /// Single attempt, no retry. Failures are logged and swallowed into the
    /// fallback string so the chat flow never surfaces an LLM error.
    pub async fn complete(&self, prompt: &str) -> String {
        match self.try_complete(prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("❌ LLM request failed: {}", e);
                FALLBACK_RESPONSE.to_string()
            }
        }
    }

    async fn try_complete(&self, prompt: &str) -> AppResult<String> {
        let payload = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_INSTRUCTION},
                {"role": "user", "content": prompt}
            ],
            "temperature": 0.7,
            "max_tokens": 512,
            "top_p": 0.9
        });

        tracing::info!("Sending request to Together API");

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Other(format!(
                "Together API returned status {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        let text = extract_content(&body)
            .ok_or_else(|| AppError::Other("missing content in Together API response".to_string()))?;

        tracing::info!("✅ Generated response from Together API");
        Ok(text)
    }
}

fn extract_content(body: &Value) -> Option<String> {
    let content = body["choices"][0]["message"]["content"].as_str()?;
    Some(content.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_content() {
        let body = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "  Varun is a developer.  "}}
            ]
        });

        assert_eq!(
            extract_content(&body),
            Some("Varun is a developer.".to_string())
        );
    }

    #[test]
    fn test_extract_content_missing_field() {
        let body = json!({"choices": []});
        assert_eq!(extract_content(&body), None);

        let body = json!({"error": {"message": "invalid api key"}});
        assert_eq!(extract_content(&body), None);
    }

    #[test]
    fn test_fallback_is_non_empty() {
        assert!(!FALLBACK_RESPONSE.is_empty());
    }
}
