use std::time::Duration;

use crate::audio::AudioPayload;
use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::error::VoiceoverError;
use crate::request::GenerationRequest;
use crate::SynthesisEngine;

use super::api::{self, GenerateContentResponse};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro-preview-tts";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

/// Parameters for connecting to the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiParams {
    /// API root, without the `/v1beta` path.
    pub base_url: String,
    /// TTS-capable model, e.g. `gemini-2.5-flash-preview-tts`.
    pub model: String,
    /// Whole-request timeout. The call cannot otherwise be cancelled.
    pub timeout: Duration,
}

impl Default for GeminiParams {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Gemini text-to-speech engine.
///
/// Sends one blocking `generateContent` request per synthesis and returns
/// the inline audio of the first candidate. The API key comes from each
/// [`GenerationRequest`] and is sent in the `x-goog-api-key` header.
///
/// ```rust,no_run
/// use voiceover_rs::engines::gemini::{GeminiEngine, GeminiParams};
/// use voiceover_rs::{GenerationRequestBuilder, SynthesisEngine};
///
/// let engine = GeminiEngine::with_params(GeminiParams {
///     model: "gemini-2.5-flash-preview-tts".to_string(),
///     ..Default::default()
/// })?;
/// let request = GenerationRequestBuilder::default()
///     .api_key("...")
///     .main_text("Hello world")
///     .build()?;
/// let audio = engine.synthesize(&request)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct GeminiEngine {
    client: reqwest::blocking::Client,
    params: GeminiParams,
}

impl GeminiEngine {
    /// Create an engine for the default model and endpoint.
    pub fn new() -> Result<Self, VoiceoverError> {
        Self::with_params(GeminiParams::default())
    }

    pub fn with_params(params: GeminiParams) -> Result<Self, VoiceoverError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(params.timeout)
            .build()
            .map_err(|e| VoiceoverError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, params })
    }

    pub fn params(&self) -> &GeminiParams {
        &self.params
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.params.base_url.trim_end_matches('/'),
            self.params.model
        )
    }
}

fn request_failure(e: reqwest::Error) -> VoiceoverError {
    if e.is_timeout() {
        return VoiceoverError::Network(format!("request timed out: {e}"));
    }
    VoiceoverError::from_api_failure(e.status().map(|s| s.as_u16()), e.to_string())
}

impl SynthesisEngine for GeminiEngine {
    fn synthesize(&self, request: &GenerationRequest) -> Result<AudioPayload, VoiceoverError> {
        let api_key = request.api_key.trim();
        if api_key.is_empty() {
            return Err(VoiceoverError::Authentication("no API key configured".to_string()));
        }

        let url = self.endpoint();
        log::debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&api::build_request(request))
            .send()
            .map_err(request_failure)?;

        let status = response.status();
        let body = response.text().map_err(request_failure)?;

        if !status.is_success() {
            log::warn!("Gemini returned {status}");
            return Err(api::parse_error(status.as_u16(), &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        api::extract_audio(&parsed)
    }
}
