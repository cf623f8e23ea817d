//! # voiceover-rs
//!
//! Generate MP3 voice-overs from a script with Gemini text-to-speech.
//!
//! ## Features
//!
//! - **Gemini TTS**: prebuilt voices, style instructions and temperature
//! - **WAV normalization**: raw PCM responses get a canonical RIFF/WAVE header
//! - **MP3 output**: encoded through an external `ffmpeg`, with collision-free names
//! - **Profiles**: named sets of form values saved to a JSON file
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! voiceover-rs = { version = "2026.10", features = ["gemini"] }
//! ```
//!
//! ```ignore
//! use voiceover_rs::{engines::gemini::GeminiEngine, GenerationRequestBuilder, VoiceoverService};
//!
//! let service = VoiceoverService::new(GeminiEngine::new()?);
//! let request = GenerationRequestBuilder::default()
//!     .api_key(std::env::var("GOOGLE_API_KEY")?)
//!     .style_instructions("Read this warmly, like a radio host.")
//!     .main_text("Hello world")
//!     .voice("Kore")
//!     .build()?;
//!
//! let mp3 = service.generate(&request)?;
//! println!("Saved {}", mp3.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod app;
pub mod audio;
pub mod config;
pub mod engines;
pub mod error;
pub mod output;
pub mod profiles;
pub mod request;
pub mod service;
pub mod voices;

#[cfg(all(test, unix))]
mod test_support;

pub use audio::AudioPayload;
pub use error::VoiceoverError;
pub use profiles::{Profile, ProfileField, ProfileStore};
pub use request::{GenerationRequest, GenerationRequestBuilder};
pub use service::VoiceoverService;

/// Common interface for text-to-speech providers.
///
/// An engine only talks to its provider and reports what came back; WAV
/// wrapping, file naming and MP3 encoding are handled by
/// [`VoiceoverService`].
pub trait SynthesisEngine {
    /// Synthesize speech for the request's style instructions and main text.
    ///
    /// Provider failures must already be classified into
    /// [`VoiceoverError`]'s categories. A successful call with no audio
    /// returns [`AudioPayload::NoAudio`] rather than an error.
    fn synthesize(&self, request: &GenerationRequest) -> Result<AudioPayload, VoiceoverError>;
}
