use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A list file that was recently loaded or saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub path: String,
    pub last_opened: DateTime<Utc>,
}

/// Recently used list files, most recent first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentFiles {
    #[serde(default)]
    pub files: Vec<RecentEntry>,
}

impl RecentFiles {
    /// The most recently used file, if any
    pub fn latest(&self) -> Option<PathBuf> {
        self.files.first().map(|e| PathBuf::from(&e.path))
    }

    /// Move `path` to the front, dropping entries beyond `limit`
    pub fn touch(&mut self, path: &Path, now: DateTime<Utc>, limit: usize) {
        let path_str = path.to_string_lossy().to_string();
        self.files.retain(|e| e.path != path_str);
        self.files.insert(
            0,
            RecentEntry {
                path: path_str,
                last_opened: now,
            },
        );
        self.files.truncate(limit);
    }
}

pub fn recent_path(dir: &Path) -> PathBuf {
    dir.join("recent.toml")
}

/// Read the recent-files list. A missing file yields an empty list; a
/// corrupted one is backed up as `.bak` and replaced by an empty list.
pub fn read_recent(dir: &Path) -> RecentFiles {
    let path = recent_path(dir);
    if !path.exists() {
        return RecentFiles::default();
    }

    match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str::<RecentFiles>(&content) {
            Ok(recent) => recent,
            Err(e) => {
                let bak = path.with_extension("toml.bak");
                let _ = fs::copy(&path, &bak);
                log::warn!(
                    "could not parse {} (backed up as {}): {}",
                    path.display(),
                    bak.display(),
                    e
                );
                RecentFiles::default()
            }
        },
        Err(_) => RecentFiles::default(),
    }
}

pub fn write_recent(dir: &Path, recent: &RecentFiles) -> Result<(), std::io::Error> {
    fs::create_dir_all(dir)?;
    let content =
        toml::to_string_pretty(recent).map_err(|e| std::io::Error::other(e.to_string()))?;
    fs::write(recent_path(dir), content)
}

/// Record that `path` was just used. The path is made absolute when possible.
/// Failures are logged and otherwise ignored.
pub fn record_recent(dir: &Path, path: &Path, limit: usize) {
    let abs = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let mut recent = read_recent(dir);
    recent.touch(&abs, Utc::now(), limit);
    if let Err(e) = write_recent(dir, &recent) {
        log::warn!("could not update recent files: {}", e);
    }
}
