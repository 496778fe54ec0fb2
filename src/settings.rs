//! Persistence for accessibility preferences, the learning level, progress
//! counters and the user profile: one JSON document, read at startup,
//! rewritten atomically on every change.
//!
//! Reading is lenient field by field: a missing or malformed value falls
//! back to its default without dragging the rest of the document down.
//! Writing goes through a temp file in the same directory so a crash never
//! leaves a half-written settings file behind.

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::progress::Progress;

/// Text size bounds, percent of the base size.
pub const TEXT_SIZE_MIN: u16 = 100;
pub const TEXT_SIZE_MAX: u16 = 150;
pub const TEXT_SIZE_STEP: u16 = 10;

pub const LEVEL_MIN: u8 = 1;
pub const LEVEL_MAX: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contrast {
    Normal,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
    pub role: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self { name: None, role: "alumno".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub text_size: u16,
    pub contrast: Contrast,
    pub narrator_on: bool,
    pub sounds_on: bool,
    pub level: u8,
    pub progress: Progress,
    pub profile: Profile,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            text_size: TEXT_SIZE_MIN,
            contrast: Contrast::Normal,
            narrator_on: true,
            sounds_on: true,
            level: LEVEL_MIN,
            progress: Progress::default(),
            profile: Profile::default(),
        }
    }
}

impl Settings {
    /// Rebuilds settings from a parsed document, field by field. Anything
    /// missing, mistyped or out of range becomes its default.
    fn from_value(value: &Value) -> Self {
        let defaults = Settings::default();
        let text_size = value
            .get("text_size")
            .and_then(Value::as_u64)
            .map(|n| n as u16)
            .filter(|n| {
                (TEXT_SIZE_MIN..=TEXT_SIZE_MAX).contains(n) && n % TEXT_SIZE_STEP == 0
            })
            .unwrap_or(defaults.text_size);
        let contrast = value
            .get("contrast")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or(defaults.contrast);
        let narrator_on = value
            .get("narrator_on")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.narrator_on);
        let sounds_on = value
            .get("sounds_on")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.sounds_on);
        let level = value
            .get("level")
            .and_then(Value::as_u64)
            .map(|n| n as u8)
            .filter(|n| (LEVEL_MIN..=LEVEL_MAX).contains(n))
            .unwrap_or(defaults.level);
        let progress = value
            .get("progress")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or(defaults.progress);
        let profile = value
            .get("profile")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or(defaults.profile);
        Self { text_size, contrast, narrator_on, sounds_on, level, progress, profile }
    }
}

/// The settings service: constructed once per process with its file path,
/// handed by reference to whoever needs it. One writer at a time; every
/// mutator persists immediately.
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Loads the settings at `path`, falling back to defaults when the
    /// file is absent or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = match Self::load_from(&path) {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::default(),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "settings unreadable, using defaults");
                Settings::default()
            }
        };
        Self { path, settings }
    }

    fn load_from(path: &Path) -> Result<Option<Settings>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&text)?;
        Ok(Some(Settings::from_value(&value)))
    }

    /// Writes the whole document atomically: temp file in the same
    /// directory, then rename over the target.
    pub fn save(&self) -> Result<()> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;
        let temp = NamedTempFile::new_in(parent)?;
        let writer = BufWriter::new(&temp);
        serde_json::to_writer_pretty(writer, &self.settings)?;
        temp.persist(&self.path)?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies a mutation and persists it.
    pub fn update(&mut self, mutate: impl FnOnce(&mut Settings)) -> Result<()> {
        mutate(&mut self.settings);
        self.save()
    }

    /// Steps the text size by 10%, wrapping from 150 back down to 100.
    /// Returns the new size.
    pub fn cycle_text_size(&mut self) -> Result<u16> {
        let next = if self.settings.text_size >= TEXT_SIZE_MAX {
            TEXT_SIZE_MIN
        } else {
            self.settings.text_size + TEXT_SIZE_STEP
        };
        self.settings.text_size = next;
        self.save()?;
        Ok(next)
    }

    pub fn toggle_contrast(&mut self) -> Result<Contrast> {
        self.settings.contrast = match self.settings.contrast {
            Contrast::Normal => Contrast::High,
            Contrast::High => Contrast::Normal,
        };
        self.save()?;
        Ok(self.settings.contrast)
    }

    pub fn toggle_narrator(&mut self) -> Result<bool> {
        self.settings.narrator_on = !self.settings.narrator_on;
        self.save()?;
        Ok(self.settings.narrator_on)
    }

    pub fn toggle_sounds(&mut self) -> Result<bool> {
        self.settings.sounds_on = !self.settings.sounds_on;
        self.save()?;
        Ok(self.settings.sounds_on)
    }

    pub fn set_level(&mut self, level: u8) -> Result<u8> {
        self.settings.level = level.clamp(LEVEL_MIN, LEVEL_MAX);
        self.save()?;
        Ok(self.settings.level)
    }
}
