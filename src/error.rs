use std::path::PathBuf;

/// Every failure the voice-over pipeline can surface to the operator.
///
/// Provider, subprocess and filesystem failures are all folded into this one
/// type at the service boundary so the front end only has a single error to
/// display. The `Display` text is meant to be shown as-is.
#[derive(thiserror::Error, Debug)]
pub enum VoiceoverError {
    #[error("Authentication failed: {0}. Check that your API key is valid and has access to the TTS model.")]
    Authentication(String),
    #[error("Quota exceeded: {0}. Check your API usage limits and billing.")]
    Quota(String),
    #[error("Model unavailable: {0}. Check that the model name is correct and supports audio output.")]
    Model(String),
    #[error("API request failed ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("No audio data received from the API.")]
    NoAudio,
    #[error(
        "Encoder not found at '{}'. Install ffmpeg or point --ffmpeg at the executable.",
        .0.display()
    )]
    EncoderNotFound(PathBuf),
    #[error("Encoder failed with exit code {status:?}:\nSTDOUT: {stdout}\nSTDERR: {stderr}")]
    EncoderFailed {
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Audio error: {0}")]
    Audio(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not save profiles to '{}': {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl VoiceoverError {
    /// Classify a failed provider call into the error taxonomy.
    ///
    /// The HTTP status is checked first; when it is not decisive the message
    /// text is inspected, since providers report quota and credential
    /// problems under several different status codes.
    pub fn from_api_failure(status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();

        let is_auth = matches!(status, Some(401 | 403))
            || lower.contains("api key")
            || lower.contains("api_key")
            || lower.contains("permission")
            || lower.contains("unauthenticated");
        let is_quota = status == Some(429)
            || lower.contains("quota")
            || lower.contains("resource_exhausted")
            || lower.contains("rate limit");
        // Transport errors have no status and their text can mention "not found".
        let is_model = status == Some(404)
            || (status.is_some()
                && (lower.contains("not found")
                    || lower.contains("not supported")
                    || lower.contains("modalit")));

        if is_quota {
            Self::Quota(message)
        } else if is_auth {
            Self::Authentication(message)
        } else if is_model {
            Self::Model(message)
        } else {
            match status {
                Some(status) => Self::Api { status, message },
                None => Self::Network(message),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::VoiceoverError;

    #[test]
    fn classifies_by_status() {
        assert!(matches!(
            VoiceoverError::from_api_failure(Some(401), "nope"),
            VoiceoverError::Authentication(_)
        ));
        assert!(matches!(
            VoiceoverError::from_api_failure(Some(429), "slow down"),
            VoiceoverError::Quota(_)
        ));
        assert!(matches!(
            VoiceoverError::from_api_failure(Some(404), "models/foo"),
            VoiceoverError::Model(_)
        ));
        assert!(matches!(
            VoiceoverError::from_api_failure(Some(500), "boom"),
            VoiceoverError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn classifies_by_message_when_status_is_generic() {
        assert!(matches!(
            VoiceoverError::from_api_failure(Some(400), "API key not valid. Please pass a valid API key."),
            VoiceoverError::Authentication(_)
        ));
        assert!(matches!(
            VoiceoverError::from_api_failure(Some(400), "RESOURCE_EXHAUSTED: daily limit"),
            VoiceoverError::Quota(_)
        ));
        assert!(matches!(
            VoiceoverError::from_api_failure(
                Some(400),
                "The requested combination of response modalities is not supported"
            ),
            VoiceoverError::Model(_)
        ));
    }

    #[test]
    fn unclassified_failure_without_status_is_network() {
        let err = VoiceoverError::from_api_failure(None, "connection refused");
        assert!(matches!(err, VoiceoverError::Network(_)));
        assert_eq!(err.to_string(), "Network error: connection refused");

        let err = VoiceoverError::from_api_failure(None, "dns error: host not found");
        assert!(matches!(err, VoiceoverError::Network(_)));
    }

    #[test]
    fn hints_are_part_of_the_message() {
        let msg = VoiceoverError::from_api_failure(Some(403), "PERMISSION_DENIED").to_string();
        assert!(msg.contains("Check that your API key"));
    }
}
