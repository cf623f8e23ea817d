//! Application state behind the front end.
//!
//! [`AppState`] owns the profile store and the process settings. Front ends
//! call into it for every interaction instead of keeping their own copy of
//! the form values.

use std::path::PathBuf;

use crate::config::Settings;
use crate::error::VoiceoverError;
use crate::profiles::{Profile, ProfileField, ProfileStore};
use crate::request::{GenerationRequest, GenerationRequestBuilder};
use crate::service::VoiceoverService;
use crate::SynthesisEngine;

pub struct AppState {
    settings: Settings,
    store: ProfileStore,
}

impl AppState {
    /// Load profiles from `settings.profiles_path`, seeding defaults if needed.
    pub fn load(settings: Settings) -> Self {
        let store = ProfileStore::load(&settings.profiles_path);
        Self::with_store(settings, store)
    }

    pub fn with_store(settings: Settings, store: ProfileStore) -> Self {
        Self { settings, store }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProfileStore {
        &mut self.store
    }

    /// Values of the active profile, or defaults when there is none.
    pub fn current_profile(&self) -> Profile {
        self.store.active_profile().cloned().unwrap_or_default()
    }

    /// Apply a form edit to the active profile and save it.
    ///
    /// Returns `Ok(false)` when no profile is active.
    pub fn edit(&mut self, field: ProfileField, value: &str) -> Result<bool, VoiceoverError> {
        let Some(name) = self.store.active_name().map(str::to_string) else {
            return Ok(false);
        };
        self.store.update_field(&name, field, value)
    }

    /// Build a request from the active profile and the process settings.
    pub fn generation_request(&self) -> Result<GenerationRequest, VoiceoverError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                VoiceoverError::Authentication(
                    "no API key configured; set GOOGLE_API_KEY or pass --api-key".to_string(),
                )
            })?;
        let profile = self.current_profile();

        let request = GenerationRequestBuilder::default()
            .api_key(api_key)
            .style_instructions(profile.style_instructions)
            .main_text(profile.main_text)
            .voice(profile.voice)
            .temperature(profile.temperature)
            .output_folder(self.settings.output_dir.clone())
            .output_filename(profile.filename)
            .encoder_path(self.settings.encoder_path.clone())
            .build()?;
        request.validate()?;
        Ok(request)
    }

    /// Generate audio for the active profile.
    pub fn generate<E: SynthesisEngine>(
        &self,
        service: &VoiceoverService<E>,
    ) -> Result<PathBuf, VoiceoverError> {
        let request = self.generation_request()?;
        service.generate(&request)
    }
}
