//! Minimal Google Gemini `generateContent` client
//!
//! This module provides a lightweight client for the generative-language
//! API. Only includes what we actually use - no bloat from auto-generated
//! code.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strucbot_api::ColumnDef;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_MODEL: &str = "gemini-1.5-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

const SYSTEM_INSTRUCTION: &str = "You are an expert database architect. Your task is to generate a JSON object representing a database schema based on a user's request. The JSON object must have \"table_name\" (a lowercase, plural string) and \"columns\" (an array of objects). Each column object must have \"name\" (snake_case) and \"data_type\" (SQL type like VARCHAR(255), INTEGER, TEXT). Always include an 'id' column as 'SERIAL PRIMARY KEY'. Respond ONLY with the raw JSON object, no markdown or text.";

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Model returned no candidates")]
    EmptyReply,
    #[error("Model reply is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A schema as the model produced it, before it is tagged with an id,
/// timestamp and originating prompt. The shape is deliberately not validated
/// against the instruction's contract: missing fields default to empty and
/// unknown fields are carried through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSchema {
    #[serde(default)]
    pub table_name: String,
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Seam between the HTTP layer and the hosted model, so handlers and tests
/// do not depend on the live API.
#[async_trait]
pub trait SchemaGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GeneratedSchema, GeminiError>;
}

/// Gemini API client with reusable HTTP client and stored API key
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Arc<String>,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key
    pub fn new(api_key: String) -> Result<Self, GeminiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(GeminiError::Request)?;

        Ok(Self {
            client,
            api_key: Arc::new(api_key),
        })
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl SchemaGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<GeneratedSchema, GeminiError> {
        let url = format!("{GEMINI_API_BASE}/models/{GEMINI_MODEL}:generateContent");

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: format!("{SYSTEM_INSTRUCTION}\n\nUser request: \"{prompt}\""),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let reply = response.json::<GenerateContentResponse>().await?;

        let text = reply
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(GeminiError::EmptyReply)?;

        parse_schema_reply(&text)
    }
}

/// Drops the ```json / ``` fence markers models wrap replies in despite the
/// raw-JSON instruction.
fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

fn parse_schema_reply(raw: &str) -> Result<GeneratedSchema, GeminiError> {
    Ok(serde_json::from_str(&strip_code_fences(raw))?)
}

// --- Wire types ---

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}
