use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::GeminiConfig;

/// Decoding parameters for an evaluation request. Near-zero temperature
/// keeps repeated evaluations of the same submission close to deterministic.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            top_p: 0.8,
            top_k: 40,
            max_output_tokens: 2048,
        }
    }
}

/// Failures from the text-generation call. All variants are retryable by
/// re-invoking the whole pipeline; this component never retries itself.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("text generation request failed: {0}")]
    Transport(String),
    #[error("text generation endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("text generation response missing expected fields")]
    MalformedEnvelope,
    #[error("text generation response contained no text")]
    EmptyCompletion,
}

/// Seam for the external text-generation endpoint so the pipeline can be
/// exercised with scripted fakes.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationParams,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct GenerateResponse {
    pub(crate) candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
pub(crate) struct Candidate {
    pub(crate) content: Option<CandidateContent>,
}

#[derive(Deserialize)]
pub(crate) struct CandidateContent {
    pub(crate) parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
pub(crate) struct CandidatePart {
    pub(crate) text: Option<String>,
}

/// Pull the generated text out of a response envelope. The first part of
/// the first candidate carries the completion; anything missing along that
/// path is a malformed envelope, and a blank completion is rejected.
pub(crate) fn completion_text(envelope: GenerateResponse) -> Result<String, ProviderError> {
    let text = envelope
        .candidates
        .and_then(|mut candidates| {
            if candidates.is_empty() {
                None
            } else {
                candidates.swap_remove(0).content
            }
        })
        .and_then(|content| content.parts)
        .and_then(|mut parts| {
            if parts.is_empty() {
                None
            } else {
                parts.swap_remove(0).text
            }
        })
        .ok_or(ProviderError::MalformedEnvelope)?;

    if text.trim().is_empty() {
        return Err(ProviderError::EmptyCompletion);
    }

    Ok(text)
}

/// HTTP client for a Gemini-style `generateContent` endpoint.
///
/// Holds no session state; each call is one independent request bounded by
/// the configured timeout.
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    params: GenerationParams,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig, api_key: String) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key,
            params: GenerationParams::default(),
        })
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: self.params,
        };

        let response = self
            .http
            .post(format!("{}?key={}", self.endpoint, self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GenerateResponse = response
            .json()
            .await
            .map_err(|_| ProviderError::MalformedEnvelope)?;

        completion_text(envelope)
    }
}
