use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- checklist recovery log: lists that could not be saved normally.
     If edits went missing, copy them back from here.
     View with: ckl recovery
     Clear with: ckl recovery --clear -->

---
";

const ENTRY_PREFIX: &str = "## ";
/// Separates the timestamp from the target path in an entry header
const WRITE_MARKER: &str = " — write: ";
const FENCE_OPEN: &str = "```text";
const FENCE_CLOSE: &str = "```";

/// A list save that failed, with the content that was not written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    /// Path the list was being saved to
    pub target: String,
    pub error: String,
    /// Serialized list content
    pub body: String,
}

pub fn recovery_log_path(dir: &Path) -> PathBuf {
    dir.join("recovery.log")
}

impl RecoveryEntry {
    fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{}{}{}{}\n",
            ENTRY_PREFIX,
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            WRITE_MARKER,
            self.target,
        ));
        out.push('\n');
        out.push_str(&format!("Error: {}\n", self.error));

        if !self.body.is_empty() {
            out.push('\n');
            out.push_str(FENCE_OPEN);
            out.push('\n');
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(FENCE_CLOSE);
            out.push('\n');
        }

        out.push('\n');
        out.push_str("---\n");
        out
    }
}

/// Append an entry to the recovery log in `dir`. Errors are logged, not returned.
pub fn log_recovery(dir: &Path, entry: RecoveryEntry) {
    if let Err(e) = log_recovery_inner(dir, &entry) {
        log::warn!("could not write to recovery log: {}", e);
    }
}

fn log_recovery_inner(dir: &Path, entry: &RecoveryEntry) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let path = recovery_log_path(dir);
    let needs_header = fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

/// Read all entries from the recovery log, oldest first.
/// A missing or unreadable log yields no entries.
pub fn read_recovery_entries(dir: &Path) -> Vec<RecoveryEntry> {
    match fs::read_to_string(recovery_log_path(dir)) {
        Ok(content) => parse_entries(&content),
        Err(_) => Vec::new(),
    }
}

/// Remove the recovery log. Returns true if there was one.
pub fn clear_recovery(dir: &Path) -> io::Result<bool> {
    let path = recovery_log_path(dir);
    match fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

fn parse_entries(content: &str) -> Vec<RecoveryEntry> {
    let mut entries = Vec::new();
    let mut current: Option<RecoveryEntry> = None;
    let mut in_body = false;

    for line in content.lines() {
        if in_body {
            if line == FENCE_CLOSE {
                in_body = false;
            } else if let Some(entry) = current.as_mut() {
                entry.body.push_str(line);
                entry.body.push('\n');
            }
            continue;
        }

        if let Some(header) = line.strip_prefix(ENTRY_PREFIX) {
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            let (stamp, target) = header.split_once(WRITE_MARKER).unwrap_or((header, ""));
            current = DateTime::parse_from_rfc3339(stamp.trim())
                .ok()
                .map(|ts| RecoveryEntry {
                    timestamp: ts.with_timezone(&Utc),
                    target: target.to_string(),
                    error: String::new(),
                    body: String::new(),
                });
        } else if let Some(entry) = current.as_mut() {
            if let Some(error) = line.strip_prefix("Error: ") {
                entry.error = error.to_string();
            } else if line == FENCE_OPEN {
                in_body = true;
            }
        }
    }

    if let Some(entry) = current {
        entries.push(entry);
    }
    entries
}
