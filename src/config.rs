use std::path::PathBuf;
use std::time::Duration;

use crate::request::DEFAULT_OUTPUT_DIR;

/// Profile file used when none is configured.
pub const DEFAULT_PROFILES_FILE: &str = "profiles_data.json";

/// Whole-request timeout for the provider call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Process-wide settings that are not part of any profile.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Provider credential. `None` blocks generation but not profile editing.
    pub api_key: Option<String>,
    /// Encoder executable; a bare name is looked up on `PATH`.
    pub encoder_path: PathBuf,
    pub output_dir: PathBuf,
    pub profiles_path: PathBuf,
    /// Model override; `None` uses the engine default.
    pub model: Option<String>,
    /// API root override; `None` uses the engine default.
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            encoder_path: PathBuf::from("ffmpeg"),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            profiles_path: PathBuf::from(DEFAULT_PROFILES_FILE),
            model: None,
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(feature = "gemini")]
impl Settings {
    /// Connection parameters for [`GeminiEngine`](crate::engines::gemini::GeminiEngine).
    pub fn gemini_params(&self) -> crate::engines::gemini::GeminiParams {
        let defaults = crate::engines::gemini::GeminiParams::default();
        crate::engines::gemini::GeminiParams {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            model: self.model.clone().unwrap_or(defaults.model),
            timeout: self.timeout,
        }
    }
}
