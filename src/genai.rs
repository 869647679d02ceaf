//! HTTP client for the generative-text service.
//!
//! ## Environment Variables
//!
//! - `API_KEY` / `GEMINI_API_KEY`: service key; without one the offline generator is used
//! - `GENAI_BASE`: service base URL
//! - `GENAI_MODEL`: model identifier

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::config::Config;
use crate::report::{ReportRequest, TextGenerator};

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_report(req: &'a ReportRequest) -> Self {
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: &req.system_instruction }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: &req.user_prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: req.temperature,
                top_p: req.top_p,
            },
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate; empty when there is none.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
            .unwrap_or_default()
    }
}

// ============================================================================
// Gemini client
// ============================================================================

/// Shared, immutable client reused across audit requests.
pub struct GeminiClient {
    client: Client,
    base: Url,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(base: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut base =
            Url::parse(base).with_context(|| format!("invalid service base url: {}", base))?;
        // join() replaces the last path segment unless the base ends in a slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building http client")?;
        Ok(Self {
            client,
            base,
            api_key: api_key.into(),
            timeout,
        })
    }

    fn endpoint(&self, model: &str) -> Result<Url> {
        self.base
            .join(&format!("v1beta/models/{}:generateContent", model))
            .with_context(|| format!("building endpoint for model {}", model))
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, req: &ReportRequest) -> Result<String> {
        let url = self.endpoint(&req.model)?;
        let body = GenerateContentRequest::from_report(req);

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .context("text generation request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("text generation service returned {}: {}", status, detail);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("decoding text generation response")?;
        Ok(parsed.text())
    }
}

// ============================================================================
// Offline generator
// ============================================================================

/// Installed when no API key is configured; every call fails.
pub struct OfflineGenerator;

#[async_trait]
impl TextGenerator for OfflineGenerator {
    async fn generate(&self, _req: &ReportRequest) -> Result<String> {
        Err(anyhow!("text generation service not configured (set API_KEY)"))
    }
}

/// Pick the live client when a key is present, otherwise the offline stand-in.
pub fn from_config(cfg: &Config) -> Result<Box<dyn TextGenerator>> {
    match &cfg.api_key {
        Some(key) => Ok(Box::new(GeminiClient::new(
            &cfg.genai_base,
            key.clone(),
            cfg.report_timeout(),
        )?)),
        None => Ok(Box::new(OfflineGenerator)),
    }
}
