use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::Path;
use std::{fs, io};

use anyhow::{Context, Result};
use quiz_core::ClipPool;
use quiz_core::model::{ClipId, ClipRef};
use tracing::{debug, warn};

use crate::config::AppConfig;

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "ogg", "wav", "flac"];

/// Build the clip catalog from configured entries plus any scanned directory.
pub fn load_pool(config: &AppConfig) -> Result<ClipPool> {
    let mut names: Vec<String> = config.clips.iter().map(|c| c.name.clone()).collect();
    if let Some(dir) = &config.clips_dir {
        let scanned = scan_dir(dir)
            .with_context(|| format!("failed to scan clips in {}", dir.display()))?;
        debug!(dir = %dir.display(), count = scanned.len(), "clips scanned");
        names.extend(scanned);
    }
    Ok(build_pool(names)?)
}

/// File stems of the audio files in `dir`, sorted.
pub fn scan_dir(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let is_audio = path
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| AUDIO_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(ext)));
        if !is_audio {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(OsStr::to_str) {
            names.push(stem.to_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Assign ids in order; repeated names are skipped.
pub fn build_pool(names: impl IntoIterator<Item = String>) -> Result<ClipPool, quiz_core::Error> {
    let mut seen = HashSet::new();
    let mut clips = Vec::new();
    for name in names {
        if !seen.insert(name.clone()) {
            warn!(name = %name, "duplicate clip name skipped");
            continue;
        }
        let id = ClipId::new(clips.len() as u64 + 1);
        clips.push(ClipRef::new(id, name)?);
    }
    Ok(ClipPool::new(clips)?)
}
