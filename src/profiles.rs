//! Named bundles of form values, persisted to a JSON file.
//!
//! # File format
//!
//! ```json
//! {
//!   "profiles": {
//!     "Default": {
//!       "style_instructions": "",
//!       "main_text": "",
//!       "voice": "Achernar",
//!       "temperature": 0.9,
//!       "filename": "my_voiceover"
//!     }
//!   },
//!   "last_profile": "Default"
//! }
//! ```
//!
//! Every mutation rewrites the whole file before returning. There is no
//! locking, so two processes editing the same file will overwrite each
//! other's changes.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VoiceoverError;
use crate::output::DEFAULT_FILENAME;
use crate::voices::{find_voice, DEFAULT_VOICE};

/// Name of the profile that always exists and cannot be deleted.
pub const DEFAULT_PROFILE: &str = "Default";

pub const DEFAULT_TEMPERATURE: f32 = 0.9;
pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 2.0;

/// One saved set of generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub style_instructions: String,
    pub main_text: String,
    pub voice: String,
    pub temperature: f32,
    pub filename: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            style_instructions: String::new(),
            main_text: String::new(),
            voice: DEFAULT_VOICE.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            filename: DEFAULT_FILENAME.to_string(),
        }
    }
}

/// Editable fields of a [`Profile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    StyleInstructions,
    MainText,
    Voice,
    Temperature,
    Filename,
}

impl ProfileField {
    pub const ALL: [ProfileField; 5] = [
        Self::StyleInstructions,
        Self::MainText,
        Self::Voice,
        Self::Temperature,
        Self::Filename,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StyleInstructions => "style_instructions",
            Self::MainText => "main_text",
            Self::Voice => "voice",
            Self::Temperature => "temperature",
            Self::Filename => "filename",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileField {
    type Err = VoiceoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        match key.as_str() {
            "style" | "style_instructions" => Ok(Self::StyleInstructions),
            "text" | "main_text" => Ok(Self::MainText),
            "voice" => Ok(Self::Voice),
            "temperature" | "temp" => Ok(Self::Temperature),
            "filename" => Ok(Self::Filename),
            _ => Err(VoiceoverError::Validation(format!(
                "unknown profile field '{s}' (expected one of: {})",
                Self::ALL.map(|f| f.as_str()).join(", ")
            ))),
        }
    }
}

impl Profile {
    /// Set one field from its textual form, validating voice and temperature.
    pub fn set_field(&mut self, field: ProfileField, value: &str) -> Result<(), VoiceoverError> {
        match field {
            ProfileField::StyleInstructions => self.style_instructions = value.to_string(),
            ProfileField::MainText => self.main_text = value.to_string(),
            ProfileField::Voice => {
                let voice = find_voice(value).ok_or_else(|| {
                    VoiceoverError::Validation(format!("unknown voice '{value}'"))
                })?;
                self.voice = voice.name.to_string();
            }
            ProfileField::Temperature => self.temperature = parse_temperature(value)?,
            ProfileField::Filename => self.filename = value.to_string(),
        }
        Ok(())
    }

    pub fn field(&self, field: ProfileField) -> String {
        match field {
            ProfileField::StyleInstructions => self.style_instructions.clone(),
            ProfileField::MainText => self.main_text.clone(),
            ProfileField::Voice => self.voice.clone(),
            ProfileField::Temperature => format!("{:.1}", self.temperature),
            ProfileField::Filename => self.filename.clone(),
        }
    }
}

/// Parse a temperature and check it lies within 0.0–2.0.
pub fn parse_temperature(value: &str) -> Result<f32, VoiceoverError> {
    let t: f32 = value
        .trim()
        .parse()
        .map_err(|_| VoiceoverError::Validation(format!("temperature '{value}' is not a number")))?;
    check_temperature(t)
}

pub fn check_temperature(t: f32) -> Result<f32, VoiceoverError> {
    if (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&t) {
        Ok(t)
    } else {
        Err(VoiceoverError::Validation(format!(
            "temperature {t} is outside {MIN_TEMPERATURE:.1}–{MAX_TEMPERATURE:.1}"
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ProfileDocument {
    profiles: BTreeMap<String, Profile>,
    #[serde(default)]
    last_profile: Option<String>,
}

/// All profiles plus the active pointer, bound to a file on disk.
///
/// Mutating methods apply the change in memory, then save. A save failure
/// is returned as `Err` but the in-memory change is kept; the next
/// successful save writes it out.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
    profiles: BTreeMap<String, Profile>,
    active: Option<String>,
}

impl ProfileStore {
    /// A store holding only the `Default` profile.
    pub fn seeded(path: impl Into<PathBuf>) -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(DEFAULT_PROFILE.to_string(), Profile::default());
        Self {
            path: path.into(),
            profiles,
            active: Some(DEFAULT_PROFILE.to_string()),
        }
    }

    /// Read the store from `path`.
    ///
    /// A missing or unreadable file yields the seeded default set; this
    /// never fails.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if !path.exists() {
            log::info!("No profile file at {}, starting with defaults", path.display());
            return Self::seeded(path);
        }

        let doc = std::fs::read_to_string(&path)
            .map_err(VoiceoverError::from)
            .and_then(|s| serde_json::from_str::<ProfileDocument>(&s).map_err(VoiceoverError::from));

        match doc {
            Ok(doc) => {
                let mut store = Self {
                    path,
                    profiles: doc.profiles,
                    active: doc.last_profile,
                };
                store.repair_active();
                log::info!(
                    "Loaded {} profiles from {}",
                    store.profiles.len(),
                    store.path.display()
                );
                store
            }
            Err(e) => {
                log::warn!("Could not load profiles from {}: {e}", path.display());
                Self::seeded(path)
            }
        }
    }

    /// Write the full store to disk.
    pub fn save(&self) -> Result<(), VoiceoverError> {
        let doc = ProfileDocument {
            profiles: self.profiles.clone(),
            last_profile: self.active.clone(),
        };
        let json = serde_json::to_string_pretty(&doc)?;

        let persist = |source| VoiceoverError::Persist {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(persist)?;
        }
        // Write beside the target and rename so a crash never leaves half a file.
        let tmp = self.path.with_extension("json.tmp");
        let written = std::fs::write(&tmp, json).and_then(|()| std::fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            let _ = std::fs::remove_file(&tmp);
            return Err(persist(e));
        }

        log::debug!("Saved {} profiles to {}", self.profiles.len(), self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// The active profile, if any.
    pub fn active_profile(&self) -> Option<&Profile> {
        self.active.as_deref().and_then(|name| self.profiles.get(name))
    }

    /// Profile names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Add a profile copying the active profile's values, and make it active.
    ///
    /// Returns `Ok(false)` without touching anything when the trimmed name is
    /// empty or already taken.
    pub fn create(&mut self, name: &str) -> Result<bool, VoiceoverError> {
        let name = name.trim();
        if name.is_empty() || self.profiles.contains_key(name) {
            return Ok(false);
        }

        let source = self.active_profile().cloned().unwrap_or_default();
        self.profiles.insert(name.to_string(), source);
        self.active = Some(name.to_string());
        log::info!("Created profile '{name}'");
        self.save()?;
        Ok(true)
    }

    /// Remove a profile. The `Default` profile and unknown names are refused.
    ///
    /// Deleting the active profile moves the pointer to `Default` if it
    /// exists, otherwise to the first remaining profile, otherwise to none.
    pub fn delete(&mut self, name: &str) -> Result<bool, VoiceoverError> {
        if name == DEFAULT_PROFILE || self.profiles.remove(name).is_none() {
            return Ok(false);
        }

        if self.active.as_deref() == Some(name) {
            self.active = None;
            self.repair_active();
        }
        log::info!("Deleted profile '{name}'");
        self.save()?;
        Ok(true)
    }

    /// Make `name` the active profile. Unknown names are ignored.
    pub fn switch_active(&mut self, name: &str) -> Result<bool, VoiceoverError> {
        if !self.profiles.contains_key(name) {
            return Ok(false);
        }
        self.active = Some(name.to_string());
        self.save()?;
        Ok(true)
    }

    /// Change one field of a profile and save.
    ///
    /// Returns `Ok(false)` when the profile does not exist; an invalid value
    /// is an `Err(Validation)` and leaves the profile unchanged.
    pub fn update_field(
        &mut self,
        name: &str,
        field: ProfileField,
        value: &str,
    ) -> Result<bool, VoiceoverError> {
        let Some(profile) = self.profiles.get_mut(name) else {
            return Ok(false);
        };
        profile.set_field(field, value)?;
        log::debug!("Profile '{name}': {field} updated");
        self.save()?;
        Ok(true)
    }

    fn repair_active(&mut self) {
        if let Some(name) = &self.active {
            if self.profiles.contains_key(name) {
                return;
            }
            log::warn!("Active profile '{name}' no longer exists");
        }
        self.active = if self.profiles.contains_key(DEFAULT_PROFILE) {
            Some(DEFAULT_PROFILE.to_string())
        } else {
            self.profiles.keys().next().cloned()
        };
    }
}
