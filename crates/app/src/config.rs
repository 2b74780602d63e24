//! Settings file for the terminal quiz (`config.toml`).
//!
//! Lookup order: `--config`, then `AUDIO_QUIZ_CONFIG`, then the platform
//! config directory. Missing fields fall back to the defaults below.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

const CONFIG_FILE: &str = "config.toml";
const LEADERBOARD_FILE: &str = "leaderboard.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Seconds per question (default: 10)
    #[serde(default = "default_song_duration")]
    pub song_duration_secs: f32,
    /// Questions per game (default: 5)
    #[serde(default = "default_question_count")]
    pub question_count: u32,
    /// Options shown per question (default: 4)
    #[serde(default = "default_option_count")]
    pub option_count: usize,
    /// Where scores are kept; defaults to the platform data directory
    #[serde(default)]
    pub leaderboard_path: Option<PathBuf>,
    /// Directory scanned for audio files; each file stem becomes a clip
    #[serde(default)]
    pub clips_dir: Option<PathBuf>,
    #[serde(default)]
    pub clips: Vec<ClipEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipEntry {
    pub name: String,
}

fn default_song_duration() -> f32 {
    10.0
}
fn default_question_count() -> u32 {
    5
}
fn default_option_count() -> usize {
    4
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            song_duration_secs: default_song_duration(),
            question_count: default_question_count(),
            option_count: default_option_count(),
            leaderboard_path: None,
            clips_dir: None,
            clips: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load from `explicit` if given, otherwise from the platform config
    /// directory, otherwise defaults.
    ///
    /// # Errors
    ///
    /// Fails when the chosen file cannot be read or is not valid TOML. An
    /// explicit path that does not exist is an error; a missing default file
    /// is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match config_dir().map(|dir| dir.join(CONFIG_FILE)) {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::parse(&raw)
            .with_context(|| format!("invalid config {}", path.display()))?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    #[must_use]
    pub fn leaderboard_path(&self) -> PathBuf {
        self.leaderboard_path
            .clone()
            .or_else(|| data_dir().map(|dir| dir.join(LEADERBOARD_FILE)))
            .unwrap_or_else(|| PathBuf::from(LEADERBOARD_FILE))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "audio-quiz")
}

/// Platform config directory, e.g. `~/.config/audio-quiz` on Linux.
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Platform data directory, e.g. `~/.local/share/audio-quiz` on Linux.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(AppConfig::parse("").unwrap(), AppConfig::default());
    }

    #[test]
    fn parses_full_file() {
        let config = AppConfig::parse(
            r#"
song_duration_secs = 7.5
question_count = 3
option_count = 2
leaderboard_path = "/tmp/scores.json"

[[clips]]
name = "Blue Monday"

[[clips]]
name = "Heroes"
"#,
        )
        .unwrap();

        assert_eq!(config.song_duration_secs, 7.5);
        assert_eq!(config.question_count, 3);
        assert_eq!(config.option_count, 2);
        assert_eq!(config.leaderboard_path(), PathBuf::from("/tmp/scores.json"));
        assert_eq!(config.clips.len(), 2);
        assert_eq!(config.clips[1].name, "Heroes");
        assert!(config.clips_dir.is_none());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(AppConfig::parse("question_count = \"many\"").is_err());
    }
}
