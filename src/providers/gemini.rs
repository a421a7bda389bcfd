/*!
 * Gemini-backed text shortener.
 *
 * Strictly opportunistic: any transport, API, or parse failure surfaces as a
 * ProviderError which callers treat as "keep the original text".
 */

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::TextShortener;

/// Client for the Gemini generateContent API
pub struct GeminiShortener {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

impl GeminiShortener {
    /// Create a new shortener client
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: &str,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn build_prompt(text: &str, target_secs: f64) -> String {
        format!(
            "Rewrite the following sentence so it can be spoken aloud in about \
             {:.1} seconds, keeping the same language and meaning. Reply with \
             only the rewritten sentence, no explanations.\n\n{}",
            target_secs, text
        )
    }
}

#[async_trait]
impl TextShortener for GeminiShortener {
    async fn shorten(&self, text: &str, target_secs: f64) -> Result<String, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::build_prompt(text, target_secs),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Shortener request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse shortener response: {}", e)))?;

        let shortened = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ProviderError::ParseError("Shortener response contained no text".to_string())
            })?;

        debug!(
            "Shortened {} chars to {} chars",
            text.chars().count(),
            shortened.chars().count()
        );

        Ok(shortened)
    }
}
