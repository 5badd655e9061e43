use std::path::Path;

use serde::Serialize;

use crate::model::color::{Color, is_hex_color};
use crate::parse::ParsedList;

/// Structured result from `ckl check`, suitable for --json output.
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    pub valid: bool,
    pub errors: Vec<CheckError>,
    pub warnings: Vec<CheckWarning>,
}

/// A validation error (something that should be fixed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum CheckError {
    /// An explicit color that is not `#RGB`/`#RRGGBB`
    #[serde(rename = "invalid_color")]
    InvalidColor {
        task: usize,
        field: &'static str,
        value: String,
    },
}

/// A validation warning (the list loads fine, but may not be what was meant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum CheckWarning {
    /// A line the parser skipped
    #[serde(rename = "ignored_line")]
    IgnoredLine { line: usize, text: String },
    /// No `[SETTINGS]` block; defaults are used
    #[serde(rename = "missing_settings")]
    MissingSettings,
    /// Task has no name (saved as `To-Do N`)
    #[serde(rename = "empty_name")]
    EmptyName { task: usize },
    /// Task has no sub-tasks (saved with `New task`)
    #[serde(rename = "no_sub_tasks")]
    NoSubTasks { task: usize },
    /// Link is neither an existing path nor a web URL
    #[serde(rename = "broken_link")]
    BrokenLink { task: usize, link: String },
}

/// Validate a parsed list. Task numbers in the result are 1-based.
///
/// This is a read-only operation. Checks performed:
/// 1. Lines the parser did not understand
/// 2. Presence of a `[SETTINGS]` block
/// 3. Tasks with an empty name or no sub-tasks
/// 4. Explicit colors that are not hex values
/// 5. Links to paths that do not exist
pub fn check_list(parsed: &ParsedList) -> CheckResult {
    let mut result = CheckResult::default();

    if !parsed.has_settings {
        result.warnings.push(CheckWarning::MissingSettings);
    }
    for ignored in &parsed.ignored {
        result.warnings.push(CheckWarning::IgnoredLine {
            line: ignored.line,
            text: ignored.text.clone(),
        });
    }

    for (i, task) in parsed.tasks.iter().enumerate() {
        let number = i + 1;
        if task.name.trim().is_empty() {
            result.warnings.push(CheckWarning::EmptyName { task: number });
        }
        if task.sub_tasks.iter().all(|s| s.trim().is_empty()) {
            result.warnings.push(CheckWarning::NoSubTasks { task: number });
        }

        for (field, color) in [
            ("base_color", &task.base_color),
            ("selected_color", &task.selected_color),
        ] {
            if let Color::Hex(value) = color
                && !is_hex_color(value)
            {
                result.errors.push(CheckError::InvalidColor {
                    task: number,
                    field,
                    value: value.clone(),
                });
            }
        }

        if let Some(link) = &task.link
            && !looks_like_url(link)
            && !Path::new(link).exists()
        {
            result.warnings.push(CheckWarning::BrokenLink {
                task: number,
                link: link.clone(),
            });
        }
    }

    result.valid = result.errors.is_empty();
    result
}

/// Links the system browser is expected to handle
fn looks_like_url(link: &str) -> bool {
    let lower = link.to_ascii_lowercase();
    ["http://", "https://", "mailto:", "file://", "www."]
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_list;

    #[test]
    fn test_clean_list() {
        let parsed = parse_list(
            "[SETTINGS]\ntitle=T\n\n[TASK]\nname=A\nbase_color=#fff\nlink=https://example.com\nsub_task=x\n",
        );
        let result = check_list(&parsed);
        assert!(result.valid);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_reports_problems() {
        let parsed = parse_list(
            "\
[TASK]
name=
selected_color=green
link=/no/such/file.pdf
whatever
[TASK]
name=B
sub_task=
",
        );
        let result = check_list(&parsed);
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![CheckError::InvalidColor {
                task: 1,
                field: "selected_color",
                value: "green".into()
            }]
        );
        assert_eq!(
            result.warnings,
            vec![
                CheckWarning::MissingSettings,
                CheckWarning::IgnoredLine {
                    line: 5,
                    text: "whatever".into()
                },
                CheckWarning::EmptyName { task: 1 },
                CheckWarning::NoSubTasks { task: 1 },
                CheckWarning::BrokenLink {
                    task: 1,
                    link: "/no/such/file.pdf".into()
                },
                CheckWarning::NoSubTasks { task: 2 },
            ]
        );
    }

    #[test]
    fn test_browser_links_are_not_broken() {
        let mut source = String::from("[SETTINGS]\ntitle=T\n\n");
        for link in [
            "https://example.com",
            "HTTP://example.com",
            "mailto:me@example.com",
            "file:///tmp/x",
            "www.example.com",
            "ftp.example.com",
        ] {
            source.push_str(&format!("[TASK]\nname=A\nlink={}\nsub_task=x\n", link));
        }
        let result = check_list(&parse_list(&source));
        assert_eq!(
            result.warnings,
            vec![CheckWarning::BrokenLink {
                task: 6,
                link: "ftp.example.com".into()
            }]
        );
    }

    #[test]
    fn test_json_shape() {
        let result = check_list(&parse_list("[TASK]\nname=A\nsub_task=x\n"));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["warnings"][0]["type"], "missing_settings");
    }
}
