//! Google Gemini text-to-speech engine.
//!
//! Calls the `generateContent` REST endpoint of a TTS-capable Gemini model
//! with `responseModalities: ["AUDIO"]` and a prebuilt voice. The service
//! normally answers with raw 16-bit PCM at 24 kHz
//! (`audio/L16;codec=pcm;rate=24000`), which
//! [`VoiceoverService`](crate::VoiceoverService) wraps into WAV and encodes.
//!
//! # Authentication
//!
//! Create an API key in Google AI Studio and pass it as
//! [`GenerationRequest::api_key`](crate::GenerationRequest). The key is sent
//! in the `x-goog-api-key` header, never in the URL or body.
//!
//! # Models
//!
//! | Model | Notes |
//! |---|---|
//! | `gemini-2.5-pro-preview-tts` | Default, highest quality |
//! | `gemini-2.5-flash-preview-tts` | Faster and cheaper |
//!
//! # Example
//!
//! ```rust,no_run
//! use voiceover_rs::{engines::gemini::GeminiEngine, GenerationRequestBuilder, VoiceoverService};
//!
//! let service = VoiceoverService::new(GeminiEngine::new()?);
//! let request = GenerationRequestBuilder::default()
//!     .api_key(std::env::var("GOOGLE_API_KEY")?)
//!     .style_instructions("Say cheerfully:")
//!     .main_text("Have a wonderful day!")
//!     .voice("Puck")
//!     .build()?;
//! let mp3 = service.generate(&request)?;
//! println!("{}", mp3.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod api;
pub mod engine;

pub use engine::{GeminiEngine, GeminiParams, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};
