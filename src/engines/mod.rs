//! Speech synthesis engines.
//!
//! This module contains implementations of remote text-to-speech providers.
//!
//! # Available Engines
//!
//! Enable engines via Cargo features:
//! - `gemini` - Google Gemini TTS (`generateContent` REST API)

#[cfg(feature = "gemini")]
pub mod gemini;
