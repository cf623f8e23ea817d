//! Wire types for the Gemini `generateContent` endpoint.
//!
//! Request: `contents[0].parts` carries the style instructions and the
//! script as separate text parts; `generationConfig` carries temperature,
//! the audio response modality and the prebuilt voice.
//!
//! Response: audio arrives as base64 `inlineData` parts of the first
//! candidate, tagged with a MIME type such as `audio/L16;codec=pcm;rate=24000`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::audio::AudioPayload;
use crate::error::VoiceoverError;
use crate::request::GenerationRequest;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(alias = "mime_type", default)]
    pub mime_type: String,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub response_modalities: Vec<String>,
    pub speech_config: SpeechConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    pub voice_config: VoiceConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    pub voice_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Build the request body for one generation.
pub fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
    let mut parts = Vec::with_capacity(2);
    if !request.style_instructions.trim().is_empty() {
        parts.push(Part {
            text: Some(request.style_instructions.clone()),
            ..Default::default()
        });
    }
    parts.push(Part {
        text: Some(request.main_text.clone()),
        ..Default::default()
    });

    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        generation_config: GenerationConfig {
            temperature: request.temperature,
            response_modalities: vec!["AUDIO".to_string()],
            speech_config: SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig {
                        voice_name: request.voice_name().to_string(),
                    },
                },
            },
        },
    }
}

/// Collect the audio parts of the first candidate into one payload.
pub fn extract_audio(response: &GenerateContentResponse) -> Result<AudioPayload, VoiceoverError> {
    let Some(candidate) = response.candidates.first() else {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            log::warn!("Prompt was blocked: {reason}");
        }
        return Ok(AudioPayload::NoAudio);
    };

    if let Some(reason) = candidate.finish_reason.as_deref() {
        log::debug!("Finish reason: {reason}");
    }

    let mut chunks = Vec::new();
    for part in candidate.content.iter().flat_map(|c| &c.parts) {
        let Some(inline) = &part.inline_data else {
            continue;
        };
        let data = STANDARD
            .decode(inline.data.trim())
            .map_err(|e| VoiceoverError::Audio(format!("invalid base64 audio data: {e}")))?;
        chunks.push((inline.mime_type.clone(), data));
    }

    Ok(AudioPayload::from_chunks(chunks))
}

/// Turn a non-success HTTP response into a classified error.
pub fn parse_error(status: u16, body: &str) -> VoiceoverError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(code) => format!("{code}: {}", envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) if body.trim().is_empty() => format!("HTTP {status}"),
        Err(_) => body.trim().to_string(),
    };
    VoiceoverError::from_api_failure(Some(status), message)
}

#[cfg(test)]
mod tests {
    use super::{build_request, extract_audio, parse_error, GenerateContentResponse};
    use crate::audio::AudioPayload;
    use crate::error::VoiceoverError;
    use crate::request::GenerationRequestBuilder;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde_json::json;

    #[test]
    fn request_body_has_text_parts_and_speech_config() {
        let request = GenerationRequestBuilder::default()
            .style_instructions("Excited and bright")
            .main_text("Hello world")
            .voice("Kore - Firm")
            .temperature(0.5)
            .build()
            .unwrap();

        let body = serde_json::to_value(build_request(&request)).unwrap();
        assert_eq!(
            body["contents"][0]["parts"],
            json!([{ "text": "Excited and bright" }, { "text": "Hello world" }])
        );
        let config = &body["generationConfig"];
        assert_eq!(config["responseModalities"], json!(["AUDIO"]));
        assert_eq!(config["temperature"].as_f64(), Some(0.5));
        assert_eq!(
            config["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"],
            "Kore"
        );
    }

    #[test]
    fn blank_style_is_omitted() {
        let request = GenerationRequestBuilder::default()
            .main_text("Only the script")
            .build()
            .unwrap();
        let body = serde_json::to_value(build_request(&request)).unwrap();
        assert_eq!(body["contents"][0]["parts"], json!([{ "text": "Only the script" }]));
    }

    #[test]
    fn extracts_and_concatenates_inline_audio() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [
                    { "inlineData": { "mimeType": "audio/L16;codec=pcm;rate=24000", "data": STANDARD.encode([1u8, 2]) } },
                    { "text": "ignored" },
                    { "inline_data": { "mime_type": "audio/L16;codec=pcm;rate=24000", "data": STANDARD.encode([3u8]) } }
                ]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(
            extract_audio(&response).unwrap(),
            AudioPayload::RawPcm {
                mime: "audio/L16;codec=pcm;rate=24000".to_string(),
                data: vec![1, 2, 3]
            }
        );
    }

    #[test]
    fn missing_or_empty_audio_is_no_audio() {
        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(extract_audio(&empty).unwrap(), AudioPayload::NoAudio);

        let text_only: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "sorry" }] } }]
        }))
        .unwrap();
        assert_eq!(extract_audio(&text_only).unwrap(), AudioPayload::NoAudio);

        let blank: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "inlineData": { "mimeType": "audio/L16", "data": "" } }] } }]
        }))
        .unwrap();
        assert_eq!(extract_audio(&blank).unwrap(), AudioPayload::NoAudio);
    }

    #[test]
    fn bad_base64_is_an_audio_error() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "inlineData": { "mimeType": "audio/L16", "data": "!!!" } }] } }]
        }))
        .unwrap();
        assert!(matches!(extract_audio(&response), Err(VoiceoverError::Audio(_))));
    }

    #[test]
    fn parses_google_error_envelope() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}"#;
        let err = parse_error(400, body);
        assert!(matches!(err, VoiceoverError::Authentication(ref m) if m.starts_with("INVALID_ARGUMENT")));

        assert!(matches!(parse_error(503, ""), VoiceoverError::Api { status: 503, .. }));
        assert!(matches!(parse_error(429, "<html>slow down</html>"), VoiceoverError::Quota(_)));
    }
}
