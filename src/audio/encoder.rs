use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::VoiceoverError;

/// LAME VBR quality passed to `-q:a` (0 best, 9 worst).
pub const DEFAULT_MP3_QUALITY: u8 = 2;

/// Converts an intermediate audio file into the final MP3.
pub trait Transcoder {
    /// Encode `input` into an MP3 at `output`, replacing any existing file.
    fn transcode(&self, input: &Path, output: &Path) -> Result<(), VoiceoverError>;
}

/// MP3 encoding through an external `ffmpeg` executable.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    bin_path: PathBuf,
    quality: u8,
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegEncoder {
    /// Use the given executable; a bare name is looked up on `PATH`.
    pub fn new(bin_path: impl Into<PathBuf>) -> Self {
        Self {
            bin_path: bin_path.into(),
            quality: DEFAULT_MP3_QUALITY,
        }
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.min(9);
        self
    }

    pub fn bin_path(&self) -> &Path {
        &self.bin_path
    }

    fn args(&self, input: &Path, output: &Path) -> Vec<std::ffi::OsString> {
        vec![
            "-i".into(),
            input.into(),
            "-y".into(),
            "-acodec".into(),
            "libmp3lame".into(),
            "-q:a".into(),
            self.quality.to_string().into(),
            output.into(),
        ]
    }
}

impl Transcoder for FfmpegEncoder {
    fn transcode(&self, input: &Path, output: &Path) -> Result<(), VoiceoverError> {
        log::info!(
            "Encoding {} -> {} with {}",
            input.display(),
            output.display(),
            self.bin_path.display()
        );

        let result = Command::new(&self.bin_path)
            .args(self.args(input, output))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    VoiceoverError::EncoderNotFound(self.bin_path.clone())
                } else {
                    VoiceoverError::Io(e)
                }
            })?;

        let stdout = String::from_utf8_lossy(&result.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&result.stderr).into_owned();

        if !result.status.success() {
            return Err(VoiceoverError::EncoderFailed {
                status: result.status.code(),
                stdout,
                stderr,
            });
        }

        // ffmpeg can exit 0 without writing anything (e.g. an empty input).
        if !output.is_file() {
            return Err(VoiceoverError::EncoderFailed {
                status: result.status.code(),
                stdout,
                stderr: format!("{stderr}\nno output file at {}", output.display()),
            });
        }

        Ok(())
    }
}
