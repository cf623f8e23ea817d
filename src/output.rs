//! Output file naming.

use std::path::{Path, PathBuf};

/// Filename used when the requested name sanitizes to nothing.
pub const DEFAULT_FILENAME: &str = "my_voiceover";

/// Subdirectory of the output folder that receives finished MP3 files.
pub const MP3_SUBDIR: &str = "MP3_Output";

/// Keep only alphanumerics, spaces, hyphens and underscores.
///
/// Path separators, dots and other punctuation are dropped, so the result
/// can never escape the output folder. Leading and trailing spaces are then
/// trimmed. Falls back to [`DEFAULT_FILENAME`] when nothing usable is left.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        cleaned.to_string()
    }
}

fn numbered(stem: &str, n: u32) -> String {
    if n == 0 {
        stem.to_string()
    } else {
        format!("{stem} ({n})")
    }
}

/// Where one generation writes its intermediate and final files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub intermediate: PathBuf,
    pub mp3: PathBuf,
}

impl OutputPaths {
    /// Pick a collision-free pair of paths and create the folders.
    ///
    /// The intermediate file lives directly in `folder`, the MP3 in
    /// `folder/MP3_Output`. Both share one numeric suffix, chosen so that
    /// neither path exists yet.
    pub fn reserve(
        folder: &Path,
        filename: &str,
        intermediate_ext: &str,
    ) -> std::io::Result<Self> {
        let mp3_dir = folder.join(MP3_SUBDIR);
        std::fs::create_dir_all(&mp3_dir)?;

        let stem = sanitize_filename(filename);
        let paths = (0..)
            .map(|n| {
                let name = numbered(&stem, n);
                Self {
                    intermediate: folder.join(format!("{name}.{intermediate_ext}")),
                    mp3: mp3_dir.join(format!("{name}.mp3")),
                }
            })
            .find(|p| !p.intermediate.exists() && !p.mp3.exists())
            .unwrap_or_else(|| Self {
                intermediate: folder.join(format!("{stem}.{intermediate_ext}")),
                mp3: mp3_dir.join(format!("{stem}.mp3")),
            });

        log::debug!("Reserved output {}", paths.mp3.display());
        Ok(paths)
    }
}
