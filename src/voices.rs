//! The fixed table of prebuilt Gemini voices.

/// Voice used when nothing else is selected.
pub const DEFAULT_VOICE: &str = "Achernar";

/// A prebuilt voice and its short character description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voice {
    pub name: &'static str,
    pub label: &'static str,
}

impl Voice {
    /// `"Name - Label"`, the form shown in selectors.
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.name, self.label)
    }
}

pub const VOICES: &[Voice] = &[
    Voice { name: "Zephyr", label: "Bright" },
    Voice { name: "Puck", label: "Upbeat" },
    Voice { name: "Charon", label: "Informative" },
    Voice { name: "Kore", label: "Firm" },
    Voice { name: "Fenrir", label: "Excitable" },
    Voice { name: "Leda", label: "Youthful" },
    Voice { name: "Orus", label: "Firm" },
    Voice { name: "Aoede", label: "Breezy" },
    Voice { name: "Callirrhoe", label: "Easy-going" },
    Voice { name: "Autonoe", label: "Bright" },
    Voice { name: "Enceladus", label: "Breathy" },
    Voice { name: "Iapetus", label: "Clear" },
    Voice { name: "Umbriel", label: "Easy-going" },
    Voice { name: "Algieba", label: "Smooth" },
    Voice { name: "Despina", label: "Smooth" },
    Voice { name: "Erinome", label: "Clear" },
    Voice { name: "Algenib", label: "Gravelly" },
    Voice { name: "Rasalgethi", label: "Informative" },
    Voice { name: "Laomedeia", label: "Upbeat" },
    Voice { name: "Achernar", label: "Soft" },
    Voice { name: "Alnilam", label: "Firm" },
    Voice { name: "Schedar", label: "Even" },
    Voice { name: "Gacrux", label: "Mature" },
    Voice { name: "Pulcherrima", label: "Forward" },
    Voice { name: "Achird", label: "Friendly" },
    Voice { name: "Zubenelgenubi", label: "Casual" },
    Voice { name: "Vindemiatrix", label: "Gentle" },
    Voice { name: "Sadachbia", label: "Lively" },
    Voice { name: "Sadaltager", label: "Knowledgeable" },
    Voice { name: "Sulafat", label: "Warm" },
];

/// Look up a voice by name or by its `"Name - Label"` display form.
///
/// Matching is case-insensitive so hand-edited profile files still resolve.
pub fn find_voice(key: &str) -> Option<&'static Voice> {
    let name = key.split(" - ").next().unwrap_or(key).trim();
    VOICES.iter().find(|v| v.name.eq_ignore_ascii_case(name))
}

/// All voices ordered by their display name.
pub fn sorted_voices() -> Vec<&'static Voice> {
    let mut voices: Vec<&Voice> = VOICES.iter().collect();
    voices.sort_unstable_by_key(|v| v.display_name());
    voices
}

#[cfg(test)]
mod tests {
    use super::{find_voice, sorted_voices, DEFAULT_VOICE, VOICES};

    #[test]
    fn resolves_names_and_display_forms() {
        assert_eq!(find_voice("Kore").map(|v| v.label), Some("Firm"));
        assert_eq!(find_voice("Achernar - Soft").map(|v| v.name), Some("Achernar"));
        assert_eq!(find_voice("sulafat").map(|v| v.name), Some("Sulafat"));
        assert!(find_voice("Alexa").is_none());
        assert!(find_voice("").is_none());
    }

    #[test]
    fn default_voice_is_in_the_table() {
        assert!(find_voice(DEFAULT_VOICE).is_some());
    }

    #[test]
    fn sorted_by_display_name() {
        let sorted = sorted_voices();
        assert_eq!(sorted.len(), VOICES.len());
        assert_eq!(sorted[0].display_name(), "Achernar - Soft");
        assert!(sorted
            .windows(2)
            .all(|w| w[0].display_name() <= w[1].display_name()));
    }
}
