use std::fs;
use std::path::{Path, PathBuf};

use crate::model::settings::Settings;
use crate::model::task::Task;
use crate::parse::{ParsedList, parse_list, serialize_list};

/// Error type for list file I/O
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot decode {path} as UTF-8: {source}")]
    Decode {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Read and parse a list file.
pub fn load_list(path: &Path) -> Result<ParsedList, ListError> {
    let bytes = fs::read(path).map_err(|e| ListError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let text = String::from_utf8(bytes).map_err(|e| ListError::Decode {
        path: path.to_path_buf(),
        source: e,
    })?;

    let parsed = parse_list(&text);
    for ignored in &parsed.ignored {
        log::debug!(
            "{}:{}: ignored line: {}",
            path.display(),
            ignored.line,
            ignored.text
        );
    }
    Ok(parsed)
}

/// Serialize and write a list file, replacing its contents in place.
///
/// If the write fails and `recovery_dir` is given, the serialized content is
/// appended to the recovery log there so the edits are not lost.
pub fn save_list(
    path: &Path,
    settings: &Settings,
    tasks: &[Task],
    recovery_dir: Option<&Path>,
) -> Result<(), ListError> {
    let content = serialize_list(settings, tasks);
    if let Err(e) = fs::write(path, content.as_bytes()) {
        if let Some(dir) = recovery_dir {
            crate::io::recovery::log_recovery(
                dir,
                crate::io::recovery::RecoveryEntry {
                    timestamp: chrono::Utc::now(),
                    target: path.display().to_string(),
                    error: e.to_string(),
                    body: content,
                },
            );
        }
        return Err(ListError::Write {
            path: path.to_path_buf(),
            source: e,
        });
    }
    log::debug!("wrote {} tasks to {}", tasks.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::settings::FontSize;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("list.txt");
        let settings = Settings {
            title: "Errands".into(),
            font_size: FontSize::Small,
            strikethrough: true,
        };
        let tasks = vec![Task::new("Post office".into())];

        save_list(&path, &settings, &tasks, None).unwrap();
        let parsed = load_list(&path).unwrap();
        assert_eq!(parsed.settings, settings);
        assert_eq!(parsed.tasks, tasks);
    }

    #[test]
    fn test_save_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("list.txt");
        fs::write(&path, "old content that is much longer than the new one\n".repeat(50)).unwrap();

        save_list(&path, &Settings::default(), &[], None).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("[SETTINGS]\n"));
        assert!(!written.contains("old content"));
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = load_list(&tmp.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, ListError::Read { .. }));
    }

    #[test]
    fn test_load_invalid_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.txt");
        fs::write(&path, [b'[', b'T', 0xff, 0xfe, b'\n']).unwrap();
        let err = load_list(&path).unwrap_err();
        assert!(matches!(err, ListError::Decode { .. }));
    }

    #[test]
    fn test_failed_save_goes_to_recovery_log() {
        let tmp = TempDir::new().unwrap();
        let recovery_dir = tmp.path().join("state");
        let path = tmp.path().join("missing/dir/list.txt");
        let tasks = vec![Task::new("Unsaved work".into())];

        let err = save_list(&path, &Settings::default(), &tasks, Some(&recovery_dir)).unwrap_err();
        assert!(matches!(err, ListError::Write { .. }));

        let log = fs::read_to_string(crate::io::recovery::recovery_log_path(&recovery_dir)).unwrap();
        assert!(log.contains("name=Unsaved work"));
        assert!(log.contains("missing/dir/list.txt"));
    }
}
