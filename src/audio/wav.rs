use std::path::Path;

use crate::error::VoiceoverError;

/// Sample rate assumed when a PCM MIME type does not carry a usable `rate=`.
pub const DEFAULT_SAMPLE_RATE: u32 = 24000;

/// Bit depth assumed when a PCM MIME type does not carry a usable `L<bits>`.
pub const DEFAULT_BITS_PER_SAMPLE: u16 = 16;

/// Size of the canonical PCM RIFF/WAVE header.
pub const WAV_HEADER_LEN: usize = 44;

const SUPPORTED_BITS: [u16; 4] = [8, 16, 24, 32];

/// Layout of a raw PCM stream as described by its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub channels: u16,
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            bits_per_sample: DEFAULT_BITS_PER_SAMPLE,
            channels: 1,
        }
    }
}

impl PcmFormat {
    /// Parse a MIME type such as `audio/L16;rate=24000`.
    ///
    /// Parsing never fails: a missing or malformed `rate=` keeps 24000 Hz,
    /// a missing, malformed or unsupported `L<bits>` keeps 16-bit, and any
    /// other parameter is ignored. The stream is always treated as mono.
    /// A rate whose byte rate does not fit the header's `u32` also keeps
    /// 24000 Hz.
    pub fn from_mime(mime: &str) -> Self {
        let mut format = Self::default();

        for param in mime.split(';') {
            let param = param.trim();
            let lower = param.to_ascii_lowercase();

            if let Some(rate) = lower.strip_prefix("rate=") {
                match rate.trim().parse::<u32>() {
                    Ok(rate) if rate > 0 => format.sample_rate = rate,
                    _ => log::debug!("Ignoring unparseable sample rate in {mime:?}"),
                }
            } else if let Some(bits) = lower.strip_prefix("audio/l") {
                match bits.trim().parse::<u16>() {
                    Ok(bits) if SUPPORTED_BITS.contains(&bits) => format.bits_per_sample = bits,
                    _ => log::warn!("Unsupported PCM bit depth in {mime:?}, assuming 16-bit"),
                }
            }
        }

        if format
            .sample_rate
            .checked_mul(u32::from(format.block_align()))
            .is_none()
        {
            log::warn!("Sample rate in {mime:?} is out of range, assuming {DEFAULT_SAMPLE_RATE} Hz");
            format.sample_rate = DEFAULT_SAMPLE_RATE;
        }

        format
    }

    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    pub fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.block_align())
    }
}

/// Build the canonical 44-byte PCM header for `data_len` bytes of samples.
pub fn wav_header(format: &PcmFormat, data_len: u32) -> [u8; WAV_HEADER_LEN] {
    let mut header = [0u8; WAV_HEADER_LEN];
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&(36 + data_len).to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    header[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM
    header[22..24].copy_from_slice(&format.channels.to_le_bytes());
    header[24..28].copy_from_slice(&format.sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&format.byte_rate().to_le_bytes());
    header[32..34].copy_from_slice(&format.block_align().to_le_bytes());
    header[34..36].copy_from_slice(&format.bits_per_sample.to_le_bytes());
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_len.to_le_bytes());
    header
}

/// Wrap raw PCM samples into a complete WAV file.
pub fn pcm_to_wav(pcm: &[u8], mime: &str) -> Result<Vec<u8>, VoiceoverError> {
    // RIFF sizes are u32 and the total size field adds 36.
    let data_len = u32::try_from(pcm.len())
        .ok()
        .filter(|len| *len <= u32::MAX - 36)
        .ok_or_else(|| {
            VoiceoverError::Audio(format!("PCM payload too large for WAV ({} bytes)", pcm.len()))
        })?;

    let format = PcmFormat::from_mime(mime);
    log::debug!(
        "Wrapping {} bytes of PCM as WAV: {} Hz, {}-bit",
        pcm.len(),
        format.sample_rate,
        format.bits_per_sample
    );

    let mut wav = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());
    wav.extend_from_slice(&wav_header(&format, data_len));
    wav.extend_from_slice(pcm);
    Ok(wav)
}

/// Fields of a canonical PCM header, read back from bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub riff_size: u32,
    pub format: PcmFormat,
    pub byte_rate: u32,
    pub block_align: u16,
    pub data_len: u32,
}

impl WavHeader {
    /// Parse the canonical 44-byte layout written by [`wav_header`].
    ///
    /// Files with extra chunks before `data` are rejected; use
    /// [`describe`] for arbitrary WAV files.
    pub fn parse(bytes: &[u8]) -> Result<Self, VoiceoverError> {
        if bytes.len() < WAV_HEADER_LEN {
            return Err(VoiceoverError::Audio(format!(
                "WAV header truncated ({} bytes)",
                bytes.len()
            )));
        }
        if &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
            return Err(VoiceoverError::Audio("missing RIFF/WAVE magic".to_string()));
        }
        if &bytes[12..16] != b"fmt " || &bytes[36..40] != b"data" {
            return Err(VoiceoverError::Audio(
                "not a canonical PCM header".to_string(),
            ));
        }

        let u16_at = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]);
        let u32_at =
            |i: usize| u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);

        if u32_at(16) != 16 || u16_at(20) != 1 {
            return Err(VoiceoverError::Audio("fmt chunk is not plain PCM".to_string()));
        }

        Ok(Self {
            riff_size: u32_at(4),
            format: PcmFormat {
                channels: u16_at(22),
                sample_rate: u32_at(24),
                bits_per_sample: u16_at(34),
            },
            byte_rate: u32_at(28),
            block_align: u16_at(32),
            data_len: u32_at(40),
        })
    }
}

/// Summary of a WAV file on disk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavInfo {
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub channels: u16,
    pub duration_secs: f64,
}

/// Read a WAV file's header and report its format and length.
pub fn describe(path: &Path) -> Result<WavInfo, VoiceoverError> {
    let reader = hound::WavReader::open(path)
        .map_err(|e| VoiceoverError::Audio(format!("{}: {e}", path.display())))?;
    let spec = reader.spec();
    Ok(WavInfo {
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        channels: spec.channels,
        duration_secs: reader.duration() as f64 / spec.sample_rate as f64,
    })
}
