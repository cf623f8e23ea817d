/// Container formats a provider may hand back ready-made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerFormat {
    Wav,
    Mp3,
    /// Any other audio container, identified by the file extension to use
    /// for the intermediate file (e.g. `ogg`, `flac`).
    Other(String),
}

impl ContainerFormat {
    pub fn extension(&self) -> &str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Other(ext) => ext,
        }
    }
}

/// Audio extracted from a provider response.
///
/// The variant is decided once, from the declared MIME type, so the rest of
/// the pipeline only has to match on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioPayload {
    /// Headerless PCM samples described by `mime` (e.g. `audio/L16;rate=24000`).
    RawPcm { mime: String, data: Vec<u8> },
    /// A complete audio file.
    Container { format: ContainerFormat, data: Vec<u8> },
    NoAudio,
}

impl AudioPayload {
    /// Classify one inline blob by its MIME type.
    pub fn from_inline(mime: &str, data: Vec<u8>) -> Self {
        if data.is_empty() {
            return Self::NoAudio;
        }

        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "audio/pcm" | "audio/l8" | "audio/l16" | "audio/l24" | "audio/l32" => Self::RawPcm {
                mime: mime.to_string(),
                data,
            },
            // Unknown bit depths are still raw PCM; the header falls back to 16-bit.
            e if e.starts_with("audio/l") => Self::RawPcm {
                mime: mime.to_string(),
                data,
            },
            "audio/wav" | "audio/x-wav" | "audio/wave" | "audio/vnd.wave" => Self::Container {
                format: ContainerFormat::Wav,
                data,
            },
            "audio/mpeg" | "audio/mp3" | "audio/mpeg3" => Self::Container {
                format: ContainerFormat::Mp3,
                data,
            },
            other => {
                let subtype = other
                    .strip_prefix("audio/")
                    .unwrap_or("bin")
                    .trim_start_matches("x-");
                let ext = if subtype.is_empty() { "bin" } else { subtype };
                log::warn!("Unrecognized audio MIME type {mime:?}, treating as .{ext} container");
                Self::Container {
                    format: ContainerFormat::Other(ext.to_string()),
                    data,
                }
            }
        }
    }

    /// Join audio chunks received in order into one payload.
    ///
    /// The first non-empty chunk decides the variant; later chunks are
    /// appended to its bytes. Streaming providers send raw PCM in pieces
    /// that only make sense concatenated.
    pub fn from_chunks<I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<u8>)>,
    {
        let mut payload = Self::NoAudio;
        for (mime, data) in chunks {
            if data.is_empty() {
                continue;
            }
            match &mut payload {
                Self::NoAudio => payload = Self::from_inline(&mime, data),
                Self::RawPcm { data: buf, .. } | Self::Container { data: buf, .. } => {
                    buf.extend_from_slice(&data)
                }
            }
        }
        payload
    }

    pub fn len(&self) -> usize {
        match self {
            Self::RawPcm { data, .. } | Self::Container { data, .. } => data.len(),
            Self::NoAudio => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
