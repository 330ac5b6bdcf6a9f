/// Celebratory phrase generation
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::GreetingError;

const INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Produces a birthday greeting for someone
#[async_trait]
pub trait Greeter: Send + Sync {
    async fn greet(&self, name: &str) -> Result<String, GreetingError>;
}

/// Phrase used when no generator is configured or generation fails
pub fn fallback_greeting(name: &str) -> String {
    format!(
        "Happy birthday, {}! 🎉 Wishing you health, joy and a year full of good surprises! 🎂",
        name
    )
}

/// Always answers with [`fallback_greeting`]
pub struct StaticGreeter;

#[async_trait]
impl Greeter for StaticGreeter {
    async fn greet(&self, name: &str) -> Result<String, GreetingError> {
        Ok(fallback_greeting(name))
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Text generation through the HuggingFace inference API
pub struct HuggingFaceGreeter {
    client: reqwest::Client,
    api_token: String,
    endpoint: String,
}

impl HuggingFaceGreeter {
    pub fn new(api_token: String, model: &str) -> Self {
        Self::with_base_url(api_token, model, INFERENCE_BASE_URL)
    }

    pub fn with_base_url(api_token: String, model: &str, base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_token,
            endpoint: format!("{}/{}", base_url.trim_end_matches('/'), model),
        }
    }
}

#[async_trait]
impl Greeter for HuggingFaceGreeter {
    async fn greet(&self, name: &str) -> Result<String, GreetingError> {
        let prompt = build_prompt(name);
        debug!("Requesting greeting from {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&InferenceRequest { inputs: &prompt })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GreetingError::Status(response.status()));
        }

        let generated: Vec<GeneratedText> = response.json().await?;
        extract_greeting(&prompt, generated)
    }
}

fn build_prompt(name: &str) -> String {
    format!("Write a warm birthday greeting for {}.", name)
}

/// Take the first non-empty generation, without the echoed prompt
fn extract_greeting(prompt: &str, generated: Vec<GeneratedText>) -> Result<String, GreetingError> {
    generated
        .into_iter()
        .map(|g| {
            g.generated_text
                .strip_prefix(prompt)
                .unwrap_or(&g.generated_text)
                .trim()
                .to_string()
        })
        .find(|text| !text.is_empty())
        .ok_or(GreetingError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(text: &str) -> GeneratedText {
        GeneratedText {
            generated_text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_static_greeter_mentions_name() {
        let greeting = StaticGreeter.greet("Ann").await.unwrap();
        assert!(greeting.contains("Ann"));
    }

    #[test]
    fn test_extract_greeting_strips_prompt() {
        let prompt = build_prompt("Ann");
        let text = format!("{} Happy birthday Ann!", prompt);
        assert_eq!(
            extract_greeting(&prompt, vec![generated(&text)]).unwrap(),
            "Happy birthday Ann!"
        );
    }

    #[test]
    fn test_extract_greeting_skips_empty_generations() {
        let prompt = build_prompt("Ann");
        let result = extract_greeting(&prompt, vec![generated(&prompt), generated("Cheers!")]);
        assert_eq!(result.unwrap(), "Cheers!");
    }

    #[test]
    fn test_extract_greeting_empty() {
        let prompt = build_prompt("Ann");
        assert!(matches!(extract_greeting(&prompt, vec![]), Err(GreetingError::Empty)));
    }

    #[test]
    fn test_endpoint_joins_model() {
        let greeter =
            HuggingFaceGreeter::with_base_url("t".to_string(), "org/model", "http://localhost/");
        assert_eq!(greeter.endpoint, "http://localhost/org/model");
    }
}
