//! The generation pipeline: provider call, WAV normalization, MP3 encoding.

use std::path::{Path, PathBuf};

use crate::audio::{pcm_to_wav, wav, AudioPayload, ContainerFormat, FfmpegEncoder, Transcoder};
use crate::error::VoiceoverError;
use crate::output::OutputPaths;
use crate::request::GenerationRequest;
use crate::SynthesisEngine;

/// Turns a [`GenerationRequest`] into an MP3 on disk using a synthesis engine.
pub struct VoiceoverService<E> {
    engine: E,
}

impl<E: SynthesisEngine> VoiceoverService<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Generate an MP3, encoding with ffmpeg at `request.encoder_path`.
    pub fn generate(&self, request: &GenerationRequest) -> Result<PathBuf, VoiceoverError> {
        let encoder = FfmpegEncoder::new(&request.encoder_path);
        self.generate_with_encoder(request, &encoder)
    }

    /// Generate an MP3 using the given encoder for non-MP3 audio.
    ///
    /// Nothing is written when the provider returns no audio. When encoding
    /// fails the intermediate file is left in place for inspection.
    pub fn generate_with_encoder<T: Transcoder>(
        &self,
        request: &GenerationRequest,
        encoder: &T,
    ) -> Result<PathBuf, VoiceoverError> {
        request.validate()?;

        log::info!(
            "Generating '{}' with voice {} (temperature {:.1})",
            request.output_filename,
            request.voice_name(),
            request.temperature
        );
        let payload = self.engine.synthesize(request)?;
        log::debug!("Received {} bytes of audio", payload.len());

        let (format, data) = match payload {
            AudioPayload::NoAudio => return Err(VoiceoverError::NoAudio),
            AudioPayload::RawPcm { mime, data } => (ContainerFormat::Wav, pcm_to_wav(&data, &mime)?),
            AudioPayload::Container { format, data } => (format, data),
        };

        let paths = OutputPaths::reserve(&request.output_folder, &request.output_filename, format.extension())?;

        if format == ContainerFormat::Mp3 {
            std::fs::write(&paths.mp3, &data)?;
            log::info!("Saved {}", paths.mp3.display());
            return Ok(paths.mp3);
        }

        std::fs::write(&paths.intermediate, &data)?;
        if format == ContainerFormat::Wav {
            log_wav_info(&paths.intermediate);
        }

        encoder.transcode(&paths.intermediate, &paths.mp3)?;
        remove_intermediate(&paths.intermediate);

        log::info!("Saved {}", paths.mp3.display());
        Ok(paths.mp3)
    }
}

fn log_wav_info(path: &Path) {
    match wav::describe(path) {
        Ok(info) => log::info!(
            "Wrote {} ({:.1}s, {} Hz, {}-bit)",
            path.display(),
            info.duration_secs,
            info.sample_rate,
            info.bits_per_sample
        ),
        Err(e) => log::warn!("Could not read back {}: {e}", path.display()),
    }
}

fn remove_intermediate(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        log::warn!("Could not remove {}: {e}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::VoiceoverService;
    use crate::audio::{AudioPayload, ContainerFormat, Transcoder};
    use crate::error::VoiceoverError;
    use crate::output::MP3_SUBDIR;
    use crate::request::{GenerationRequest, GenerationRequestBuilder};
    use crate::SynthesisEngine;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    /// Returns a fixed payload and records the requests it saw.
    struct FakeEngine {
        payload: AudioPayload,
        seen: RefCell<Vec<GenerationRequest>>,
    }

    impl FakeEngine {
        fn new(payload: AudioPayload) -> Self {
            Self {
                payload,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl SynthesisEngine for FakeEngine {
        fn synthesize(&self, request: &GenerationRequest) -> Result<AudioPayload, VoiceoverError> {
            self.seen.borrow_mut().push(request.clone());
            Ok(self.payload.clone())
        }
    }

    /// Copies input to output and remembers what it was asked to encode.
    #[derive(Default)]
    struct CopyEncoder {
        calls: RefCell<Vec<(PathBuf, Vec<u8>)>>,
    }

    impl Transcoder for CopyEncoder {
        fn transcode(&self, input: &Path, output: &Path) -> Result<(), VoiceoverError> {
            let bytes = std::fs::read(input)?;
            std::fs::write(output, &bytes)?;
            self.calls.borrow_mut().push((input.to_path_buf(), bytes));
            Ok(())
        }
    }

    fn request(dir: &Path) -> GenerationRequest {
        GenerationRequestBuilder::default()
            .api_key("test-key")
            .main_text("Hello world")
            .voice("Kore")
            .temperature(0.9)
            .output_folder(dir.join("out"))
            .output_filename("greeting")
            .build()
            .unwrap()
    }

    fn pcm_payload() -> AudioPayload {
        AudioPayload::RawPcm {
            mime: "audio/L16;rate=24000".to_string(),
            data: vec![0u8; 4800],
        }
    }

    #[test]
    fn raw_pcm_is_wrapped_encoded_and_cleaned_up() {
        let dir = tempfile::tempdir().unwrap();
        let service = VoiceoverService::new(FakeEngine::new(pcm_payload()));
        let encoder = CopyEncoder::default();

        let mp3 = service.generate_with_encoder(&request(dir.path()), &encoder).unwrap();

        assert_eq!(mp3, dir.path().join("out").join(MP3_SUBDIR).join("greeting.mp3"));
        assert!(mp3.is_file());

        let calls = encoder.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (wav_path, wav_bytes) = &calls[0];
        assert_eq!(wav_path.extension().unwrap(), "wav");
        assert!(!wav_path.exists(), "intermediate WAV should be removed");

        let header = crate::audio::wav::WavHeader::parse(wav_bytes).unwrap();
        assert_eq!(header.format.sample_rate, 24000);
        assert_eq!(header.format.bits_per_sample, 16);
        assert_eq!(header.data_len, 4800);

        let seen = service.engine().seen.borrow();
        assert_eq!(seen[0].main_text, "Hello world");
        assert_eq!(seen[0].voice, "Kore");
    }

    #[cfg(unix)]
    #[test]
    fn raw_pcm_through_external_encoder() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(dir.path());
        req.encoder_path = crate::test_support::fake_ffmpeg(dir.path());

        let mp3 = VoiceoverService::new(FakeEngine::new(pcm_payload()))
            .generate(&req)
            .unwrap();

        assert_eq!(mp3.extension().unwrap(), "mp3");
        assert!(mp3.is_file());
        assert!(!dir.path().join("out").join("greeting.wav").exists());
    }

    #[test]
    fn second_generation_gets_numbered_name() {
        let dir = tempfile::tempdir().unwrap();
        let service = VoiceoverService::new(FakeEngine::new(pcm_payload()));
        let encoder = CopyEncoder::default();

        service.generate_with_encoder(&request(dir.path()), &encoder).unwrap();
        let second = service.generate_with_encoder(&request(dir.path()), &encoder).unwrap();
        assert_eq!(second.file_name().unwrap(), "greeting (1).mp3");
    }

    #[test]
    fn no_audio_fails_without_creating_files() {
        let dir = tempfile::tempdir().unwrap();
        let service = VoiceoverService::new(FakeEngine::new(AudioPayload::NoAudio));

        let err = service
            .generate_with_encoder(&request(dir.path()), &CopyEncoder::default())
            .unwrap_err();

        assert!(matches!(err, VoiceoverError::NoAudio));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn missing_encoder_leaves_intermediate_wav() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(dir.path());
        req.encoder_path = dir.path().join("bin").join("ffmpeg");

        let err = VoiceoverService::new(FakeEngine::new(pcm_payload()))
            .generate(&req)
            .unwrap_err();

        assert!(matches!(err, VoiceoverError::EncoderNotFound(_)));
        assert!(dir.path().join("out").join("greeting.wav").is_file());
        assert!(!dir.path().join("out").join(MP3_SUBDIR).join("greeting.mp3").exists());
    }

    #[test]
    fn mp3_container_skips_encoder() {
        let dir = tempfile::tempdir().unwrap();
        let payload = AudioPayload::Container {
            format: ContainerFormat::Mp3,
            data: b"ID3fake".to_vec(),
        };
        let encoder = CopyEncoder::default();

        let mp3 = VoiceoverService::new(FakeEngine::new(payload))
            .generate_with_encoder(&request(dir.path()), &encoder)
            .unwrap();

        assert!(encoder.calls.borrow().is_empty());
        assert_eq!(std::fs::read(mp3).unwrap(), b"ID3fake");
    }

    #[test]
    fn other_containers_are_encoded_from_their_own_extension() {
        let dir = tempfile::tempdir().unwrap();
        let payload = AudioPayload::Container {
            format: ContainerFormat::Other("ogg".to_string()),
            data: b"OggS".to_vec(),
        };
        let encoder = CopyEncoder::default();

        VoiceoverService::new(FakeEngine::new(payload))
            .generate_with_encoder(&request(dir.path()), &encoder)
            .unwrap();

        let calls = encoder.calls.borrow();
        assert_eq!(calls[0].0.extension().unwrap(), "ogg");
        assert_eq!(calls[0].1, b"OggS");
    }

    #[test]
    fn blank_text_never_reaches_the_engine() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(dir.path());
        req.main_text = "   ".to_string();
        let service = VoiceoverService::new(FakeEngine::new(pcm_payload()));

        let err = service
            .generate_with_encoder(&req, &CopyEncoder::default())
            .unwrap_err();

        assert!(matches!(err, VoiceoverError::Validation(_)));
        assert!(service.engine().seen.borrow().is_empty());
    }
}
