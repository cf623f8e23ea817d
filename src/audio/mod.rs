//! Audio handling between the provider response and the final MP3.
//!
//! - [`payload`] classifies what the provider returned.
//! - [`wav`] wraps raw PCM in a RIFF/WAVE header and reads WAV files back.
//! - [`encoder`] runs the external MP3 encoder.

pub mod encoder;
pub mod payload;
pub mod wav;

pub use encoder::{FfmpegEncoder, Transcoder};
pub use payload::{AudioPayload, ContainerFormat};
pub use wav::{pcm_to_wav, PcmFormat};
