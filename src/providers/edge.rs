/*!
 * HTTP client for an edge-tts compatible synthesis gateway.
 *
 * The gateway accepts a JSON request naming the text, engine voice id, and a
 * signed percentage rate string, and answers with encoded audio bytes
 * (typically mp3) which are decoded into PCM here.
 */

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Serialize;

use crate::audio::{self, AudioSegment};
use crate::errors::ProviderError;
use crate::providers::{SpeechMode, SpeechProvider, SynthesisRequest};

/// Client for the synthesis gateway
pub struct EdgeSpeechClient {
    client: Client,
    endpoint: String,
    api_key: String,
    sample_rate: u32,
}

/// Wire format of a gateway synthesis request
#[derive(Serialize)]
struct GatewayRequest<'a> {
    text: &'a str,
    voice: &'a str,
    /// Signed percentage, e.g. "+25%"
    rate: String,
    /// "text" or "ssml"
    input_kind: &'static str,
}

impl EdgeSpeechClient {
    /// Create a new gateway client
    pub fn new(
        endpoint: &str,
        api_key: &str,
        timeout_secs: u64,
        sample_rate: u32,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            sample_rate,
        })
    }
}

#[async_trait]
impl SpeechProvider for EdgeSpeechClient {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<AudioSegment, ProviderError> {
        let url = format!("{}/tts", self.endpoint);

        let payload = GatewayRequest {
            text: &request.text,
            voice: &request.voice_id,
            rate: format!("+{}%", request.rate_percent),
            input_kind: match request.mode {
                SpeechMode::PlainText => "text",
                SpeechMode::SsmlMarkup => "ssml",
            },
        };

        debug!(
            "Requesting synthesis: {} chars, voice {}, rate +{}%",
            request.text.chars().count(),
            request.voice_id,
            request.rate_percent
        );

        let mut builder = self.client.post(&url).json(&payload);
        if !self.api_key.is_empty() {
            builder = builder.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Gateway request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read audio body: {}", e)))?;

        if bytes.is_empty() {
            return Err(ProviderError::EmptyAudio(format!(
                "Gateway returned no audio for voice {}",
                request.voice_id
            )));
        }

        audio::decode_bytes(&bytes, self.sample_rate)
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    fn name(&self) -> &str {
        "edge-gateway"
    }
}
