use std::path::PathBuf;

use derive_builder::Builder;

use crate::error::VoiceoverError;
use crate::output::DEFAULT_FILENAME;
use crate::profiles::{check_temperature, DEFAULT_TEMPERATURE};
use crate::voices::{find_voice, DEFAULT_VOICE};

/// Folder that receives generated files when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "temp_output";

/// Everything one generation needs. Built fresh for every call.
///
/// ```
/// use voiceover_rs::GenerationRequestBuilder;
///
/// let request = GenerationRequestBuilder::default()
///     .api_key("secret")
///     .main_text("Hello world")
///     .voice("Kore")
///     .temperature(0.9)
///     .build()?;
/// assert_eq!(request.output_filename, "my_voiceover");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct GenerationRequest {
    /// Provider credential. Never stored in profiles.
    #[builder(setter(into), default)]
    pub api_key: String,
    #[builder(setter(into), default)]
    pub style_instructions: String,
    #[builder(setter(into))]
    pub main_text: String,
    /// Prebuilt voice name, e.g. `"Kore"`.
    #[builder(setter(into), default = "DEFAULT_VOICE.to_string()")]
    pub voice: String,
    /// Best-effort creativity control, 0.0–2.0.
    #[builder(default = "DEFAULT_TEMPERATURE")]
    pub temperature: f32,
    #[builder(setter(into), default = "PathBuf::from(DEFAULT_OUTPUT_DIR)")]
    pub output_folder: PathBuf,
    /// Base name without extension; sanitized when paths are chosen.
    #[builder(setter(into), default = "DEFAULT_FILENAME.to_string()")]
    pub output_filename: String,
    #[builder(setter(into), default = "PathBuf::from(\"ffmpeg\")")]
    pub encoder_path: PathBuf,
}

impl GenerationRequest {
    /// Reject requests that must not reach the provider.
    pub fn validate(&self) -> Result<(), VoiceoverError> {
        if self.main_text.trim().is_empty() {
            return Err(VoiceoverError::Validation(
                "main text is empty; enter a script to generate".to_string(),
            ));
        }
        if find_voice(&self.voice).is_none() {
            return Err(VoiceoverError::Validation(format!(
                "unknown voice '{}'",
                self.voice
            )));
        }
        check_temperature(self.temperature)?;
        Ok(())
    }

    /// Canonical voice name for the provider, accepting `"Name - Label"`.
    pub fn voice_name(&self) -> &str {
        find_voice(&self.voice).map_or(self.voice.as_str(), |v| v.name)
    }
}

impl From<GenerationRequestBuilderError> for VoiceoverError {
    fn from(e: GenerationRequestBuilderError) -> Self {
        VoiceoverError::Validation(e.to_string())
    }
}
