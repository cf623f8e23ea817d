//! `voiceover` - generate MP3 voice-overs with Gemini TTS from saved profiles.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `generate` | Apply any field edits to the active profile, then generate audio |
//! | `profile` | List, show, create, delete, switch and edit profiles |
//! | `voices` | List the available prebuilt voices |

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};

use voiceover_rs::app::AppState;
use voiceover_rs::config::{Settings, DEFAULT_PROFILES_FILE, DEFAULT_TIMEOUT_SECS};
use voiceover_rs::engines::gemini::GeminiEngine;
use voiceover_rs::profiles::DEFAULT_PROFILE;
use voiceover_rs::request::DEFAULT_OUTPUT_DIR;
use voiceover_rs::voices::sorted_voices;
use voiceover_rs::{ProfileField, VoiceoverError, VoiceoverService};

#[derive(Parser)]
#[command(name = "voiceover")]
#[command(about = "Generate MP3 voice-overs with Gemini text-to-speech", long_about = None)]
struct Cli {
    /// Profile file
    #[arg(long, global = true, env = "VOICEOVER_PROFILES", default_value = DEFAULT_PROFILES_FILE)]
    profiles: PathBuf,

    /// Folder for generated audio (MP3s go to its MP3_Output subfolder)
    #[arg(long, global = true, env = "VOICEOVER_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// ffmpeg executable
    #[arg(long, global = true, env = "FFMPEG_PATH", default_value = "ffmpeg")]
    ffmpeg: PathBuf,

    /// Google API key
    #[arg(long, global = true, env = "GOOGLE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini TTS model
    #[arg(long, global = true, env = "GEMINI_TTS_MODEL")]
    model: Option<String>,

    /// Gemini API root URL
    #[arg(long, global = true, env = "GEMINI_API_BASE")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "VOICEOVER_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate audio from the active profile
    Generate {
        /// Style instructions
        #[arg(long, conflicts_with = "style_file")]
        style: Option<String>,
        /// Read style instructions from a file
        #[arg(long, value_name = "FILE")]
        style_file: Option<PathBuf>,
        /// Main text (script)
        #[arg(long, conflicts_with = "text_file")]
        text: Option<String>,
        /// Read the script from a file
        #[arg(long, value_name = "FILE")]
        text_file: Option<PathBuf>,
        /// Voice name, e.g. "Kore" or "Kore - Firm"
        #[arg(long)]
        voice: Option<String>,
        /// Temperature, 0.0-2.0
        #[arg(long)]
        temperature: Option<String>,
        /// Output file name without extension
        #[arg(long)]
        filename: Option<String>,
    },
    /// Manage saved profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// List the available voices
    Voices,
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// List profiles, marking the active one
    List,
    /// Show a profile's fields (default: the active profile)
    Show { name: Option<String> },
    /// Create a profile from the active profile's values and switch to it
    Create { name: String },
    /// Delete a profile (default: the active profile)
    Delete { name: Option<String> },
    /// Make a profile active
    Switch { name: String },
    /// Set a field of the active profile
    Set {
        /// style_instructions, main_text, voice, temperature or filename
        field: ProfileField,
        value: String,
    },
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            api_key: self.api_key.clone(),
            encoder_path: self.ffmpeg.clone(),
            output_dir: self.output_dir.clone(),
            profiles_path: self.profiles.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Report a profile save failure without aborting the command.
///
/// A save error only happens after the change was applied in memory, so it
/// still counts as applied.
fn applied(result: Result<bool, VoiceoverError>) -> Result<bool, VoiceoverError> {
    match result {
        Err(e @ VoiceoverError::Persist { .. }) => {
            eprintln!("warning: {e}");
            Ok(true)
        }
        other => other,
    }
}

fn print_profile(app: &AppState, name: &str) -> Result<(), VoiceoverError> {
    let profile = app
        .store()
        .get(name)
        .ok_or_else(|| VoiceoverError::Validation(format!("no profile named '{name}'")))?;
    println!("[{name}]");
    for field in ProfileField::ALL {
        println!("{field}: {}", profile.field(field));
    }
    Ok(())
}

fn run_generate(
    app: &mut AppState,
    edits: Vec<(ProfileField, String)>,
) -> Result<(), VoiceoverError> {
    for (field, value) in edits {
        applied(app.edit(field, &value))?;
    }

    let service = VoiceoverService::new(GeminiEngine::with_params(app.settings().gemini_params())?);
    println!(
        "Generating with profile '{}'...",
        app.store().active_name().unwrap_or(DEFAULT_PROFILE)
    );

    let start = Instant::now();
    let mp3 = app.generate(&service)?;
    println!("Saved {} in {:.1?}", mp3.display(), start.elapsed());
    Ok(())
}

fn run_profile(app: &mut AppState, command: ProfileCommand) -> Result<(), VoiceoverError> {
    match command {
        ProfileCommand::List => {
            let active = app.store().active_name();
            for name in app.store().names() {
                let marker = if Some(name) == active { "*" } else { " " };
                println!("{marker} {name}");
            }
        }
        ProfileCommand::Show { name } => {
            let name = name
                .or_else(|| app.store().active_name().map(str::to_string))
                .ok_or_else(|| VoiceoverError::Validation("no active profile".to_string()))?;
            print_profile(app, &name)?;
        }
        ProfileCommand::Create { name } => {
            if applied(app.store_mut().create(&name))? {
                println!("Created profile '{}'", name.trim());
            } else {
                return Err(VoiceoverError::Validation(
                    "profile name is empty or already exists".to_string(),
                ));
            }
        }
        ProfileCommand::Delete { name } => {
            let name = name
                .or_else(|| app.store().active_name().map(str::to_string))
                .ok_or_else(|| VoiceoverError::Validation("no active profile".to_string()))?;
            if name == DEFAULT_PROFILE {
                return Err(VoiceoverError::Validation(
                    "the Default profile cannot be deleted".to_string(),
                ));
            }
            if !applied(app.store_mut().delete(&name))? {
                return Err(VoiceoverError::Validation(format!("no profile named '{name}'")));
            }
            println!(
                "Deleted profile '{name}'; active profile is now {}",
                app.store().active_name().unwrap_or("(none)")
            );
        }
        ProfileCommand::Switch { name } => {
            if !applied(app.store_mut().switch_active(&name))? {
                return Err(VoiceoverError::Validation(format!("no profile named '{name}'")));
            }
            println!("Switched to profile '{name}'");
        }
        ProfileCommand::Set { field, value } => {
            if !applied(app.edit(field, &value))? {
                return Err(VoiceoverError::Validation("no active profile".to_string()));
            }
        }
    }
    Ok(())
}

fn read_text(inline: Option<String>, file: Option<PathBuf>) -> Result<Option<String>, VoiceoverError> {
    match (inline, file) {
        (Some(text), _) => Ok(Some(text)),
        (None, Some(path)) => Ok(Some(std::fs::read_to_string(path)?)),
        (None, None) => Ok(None),
    }
}

fn run(cli: Cli) -> Result<(), VoiceoverError> {
    let mut app = AppState::load(cli.settings());

    match cli.command {
        Commands::Generate {
            style,
            style_file,
            text,
            text_file,
            voice,
            temperature,
            filename,
        } => {
            let edits = [
                (ProfileField::StyleInstructions, read_text(style, style_file)?),
                (ProfileField::MainText, read_text(text, text_file)?),
                (ProfileField::Voice, voice),
                (ProfileField::Temperature, temperature),
                (ProfileField::Filename, filename),
            ]
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .collect();
            run_generate(&mut app, edits)
        }
        Commands::Profile { command } => run_profile(&mut app, command),
        Commands::Voices => {
            for voice in sorted_voices() {
                println!("{}", voice.display_name());
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
