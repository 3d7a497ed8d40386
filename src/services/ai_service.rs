//! Generative-model adapter. The rest of the crate talks to the single
//! `TextGenerator` capability and never branches on provider call shapes;
//! absorbing SDK/version drift is this module's job.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value as JsonValue};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub temperature: f32,
    /// Response MIME type requested from the model, e.g. "application/json".
    pub response_format: Option<String>,
}

impl GenerationOptions {
    pub fn json(temperature: f32) -> Self {
        Self {
            temperature,
            response_format: Some("application/json".to_string()),
        }
    }

    pub fn text(temperature: f32) -> Self {
        Self {
            temperature,
            response_format: None,
        }
    }
}

/// One prompt in, one raw provider response out. The response shape is
/// opaque; callers run it through [`extract_text`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str, options: GenerationOptions) -> Result<JsonValue>;
}

/// Gemini REST client. Constructed from configuration and injected where
/// needed; the API key always comes from the environment.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str, options: GenerationOptions) -> Result<JsonValue> {
        let mut generation_config = json!({ "temperature": options.temperature });
        if let Some(mime) = &options.response_format {
            generation_config["responseMimeType"] = json!(mime);
        }

        let payload = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": generation_config,
        });

        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, self.model);
        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Gemini API error {}: {}",
                status, text
            )));
        }

        let body: JsonValue = res.json().await?;
        Ok(body)
    }
}

type Extractor = fn(&JsonValue) -> Option<String>;

/// Ordered probes over the raw response, first success wins. Each one either
/// yields a string or is skipped; none of them can fail the request.
const TEXT_EXTRACTORS: &[Extractor] = &[
    candidate_parts_text,
    output_content_text,
    flat_text,
    response_output_text,
];

/// Pull the generated text out of whatever shape the provider returned.
/// Falls back to serializing the entire raw response so downstream JSON
/// coercion still gets a chance.
pub fn extract_text(raw: &JsonValue) -> String {
    TEXT_EXTRACTORS
        .iter()
        .find_map(|probe| probe(raw))
        .map(|text| text.trim().to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn candidate_parts_text(raw: &JsonValue) -> Option<String> {
    let parts = raw
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let chunks: Vec<&str> = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();
    if chunks.is_empty() {
        None
    } else {
        Some(chunks.concat())
    }
}

fn output_content_text(raw: &JsonValue) -> Option<String> {
    raw.get("output")?
        .get(0)?
        .get("content")?
        .as_array()?
        .iter()
        .find_map(|section| section.get("text").and_then(|t| t.as_str()))
        .map(|t| t.to_string())
}

fn flat_text(raw: &JsonValue) -> Option<String> {
    raw.get("text")?.as_str().map(|t| t.to_string())
}

fn response_output_text(raw: &JsonValue) -> Option<String> {
    raw.get("response")?
        .get("outputText")?
        .as_str()
        .map(|t| t.to_string())
}
