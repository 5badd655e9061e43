use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// What a task link points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// An existing local file or directory
    File(PathBuf),
    /// Anything else is handed to the browser
    Url(String),
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkTarget::File(path) => write!(f, "file {}", path.display()),
            LinkTarget::Url(url) => write!(f, "url {}", url),
        }
    }
}

/// Classify a link. Returns None for an empty link.
pub fn resolve_link(link: &str) -> Option<LinkTarget> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }
    let path = Path::new(link);
    if path.exists() {
        Some(LinkTarget::File(path.to_path_buf()))
    } else {
        Some(LinkTarget::Url(link.to_string()))
    }
}

/// Open a task link without waiting for it. `opener` overrides the platform
/// default (it may carry arguments, e.g. `firefox --new-window`).
///
/// Returns what was opened. Failures are logged and give `None`; they are
/// never fatal.
pub fn open_link(link: &str, opener: Option<&str>) -> Option<LinkTarget> {
    let target = resolve_link(link)?;

    let result = match (&target, opener) {
        (LinkTarget::File(path), Some(cmd)) => {
            spawn_opener(&split_command(cmd), path.as_os_str())
        }
        (LinkTarget::Url(url), Some(cmd)) => spawn_opener(&split_command(cmd), OsStr::new(url)),
        (LinkTarget::File(path), None) => spawn_opener(platform_opener(), path.as_os_str()),
        (LinkTarget::Url(url), None) => webbrowser::open(url),
    };

    match result {
        Ok(()) => {
            log::debug!("opened {:?}", target);
            Some(target)
        }
        Err(e) => {
            log::warn!("error opening {}: {}", link, e);
            None
        }
    }
}

/// Program and leading arguments used to open local files
fn platform_opener() -> &'static [&'static str] {
    if cfg!(target_os = "macos") {
        &["open"]
    } else if cfg!(target_os = "windows") {
        // `start` takes its first quoted argument as a window title
        &["cmd", "/C", "start", ""]
    } else {
        &["xdg-open"]
    }
}

fn split_command(command: &str) -> Vec<&str> {
    command.split_whitespace().collect()
}

fn spawn_opener(command: &[&str], arg: &OsStr) -> std::io::Result<()> {
    let (program, args) = command.split_first().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty opener command")
    })?;
    Command::new(program)
        .args(args)
        .arg(arg)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_existing_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("notes.txt");
        std::fs::write(&file, "x").unwrap();
        let link = file.to_string_lossy().to_string();
        assert_eq!(resolve_link(&link), Some(LinkTarget::File(file)));
    }

    #[test]
    fn test_resolve_url_and_missing_path() {
        assert_eq!(
            resolve_link("https://example.com"),
            Some(LinkTarget::Url("https://example.com".into()))
        );
        assert_eq!(
            resolve_link("/definitely/not/here.pdf"),
            Some(LinkTarget::Url("/definitely/not/here.pdf".into()))
        );
        assert_eq!(resolve_link("   "), None);
    }

    #[test]
    fn test_open_failures_are_not_fatal() {
        assert_eq!(open_link("", None), None);
        assert_eq!(
            open_link("https://example.com", Some("/nonexistent/opener-binary")),
            None
        );
        assert_eq!(open_link("https://example.com", Some("   ")), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_custom_opener_reports_target() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("budget.ods");
        std::fs::write(&file, "x").unwrap();
        let link = file.to_string_lossy().to_string();

        assert_eq!(open_link(&link, Some("true")), Some(LinkTarget::File(file)));
        assert_eq!(
            open_link("https://example.com", Some("true --ignored")),
            Some(LinkTarget::Url("https://example.com".into()))
        );
    }

    #[test]
    fn test_platform_opener() {
        let opener = platform_opener();
        assert!(!opener.is_empty());
        if cfg!(target_os = "windows") {
            assert_eq!(opener, &["cmd", "/C", "start", ""]);
        }
    }
}
