use crate::model::color::Color;
use crate::model::settings::{FontSize, Settings};
use crate::model::task::Task;

pub const SETTINGS_MARKER: &str = "[SETTINGS]";
pub const TASK_MARKER: &str = "[TASK]";

/// A line the parser skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredLine {
    /// 1-based line number
    pub line: usize,
    pub text: String,
}

/// The result of parsing a list file
#[derive(Debug, Clone, Default)]
pub struct ParsedList {
    pub settings: Settings,
    pub tasks: Vec<Task>,
    /// Non-blank lines that were not understood. Never an error.
    pub ignored: Vec<IgnoredLine>,
    /// Whether a `[SETTINGS]` block was present
    pub has_settings: bool,
}

/// Parse a list file from its source text.
///
/// Format: an optional `[SETTINGS]` block of `key=value` lines ended by a
/// blank line or `[TASK]`, followed by `[TASK]` blocks holding `name=`,
/// `base_color=`, `selected_color=`, `link=` and repeated `sub_task=` lines.
/// Lines are trimmed before matching. Anything unrecognized is skipped.
pub fn parse_list(source: &str) -> ParsedList {
    let lines: Vec<&str> = source.lines().collect();

    let mut settings = Settings::default();
    let mut has_settings = false;
    let mut tasks = Vec::new();
    let mut ignored = Vec::new();
    let mut current: Option<Task> = None;
    let mut idx = 0;

    while idx < lines.len() {
        let line = lines[idx].trim();

        if line == SETTINGS_MARKER {
            has_settings = true;
            idx += 1;
            while idx < lines.len() {
                let setting = lines[idx].trim();
                if setting.is_empty() || setting.starts_with(TASK_MARKER) {
                    break;
                }
                if !apply_setting(&mut settings, setting) {
                    ignored.push(IgnoredLine {
                        line: idx + 1,
                        text: setting.to_string(),
                    });
                }
                idx += 1;
            }
            continue;
        }

        if line == TASK_MARKER {
            if let Some(task) = current.take() {
                tasks.push(task);
            }
            current = Some(Task::default());
        } else {
            let applied = match current.as_mut() {
                Some(task) => apply_task_field(task, line),
                None => false,
            };
            if !applied && !line.is_empty() {
                ignored.push(IgnoredLine {
                    line: idx + 1,
                    text: line.to_string(),
                });
            }
        }
        idx += 1;
    }

    if let Some(task) = current {
        tasks.push(task);
    }

    ParsedList {
        settings,
        tasks,
        ignored,
        has_settings,
    }
}

/// Apply one `key=value` line from the settings block.
/// Returns false if the key is not recognized.
fn apply_setting(settings: &mut Settings, line: &str) -> bool {
    if let Some(value) = line.strip_prefix("title=") {
        settings.title = value.to_string();
    } else if let Some(value) = line.strip_prefix("font_size=") {
        // Unknown sizes keep the current value
        if let Some(size) = FontSize::from_token(value) {
            settings.font_size = size;
        }
    } else if let Some(value) = line.strip_prefix("strikethrough=") {
        settings.strikethrough = value.eq_ignore_ascii_case("true");
    } else {
        return false;
    }
    true
}

/// Apply one field line to the open task.
/// Returns false if the line is not a task field.
fn apply_task_field(task: &mut Task, line: &str) -> bool {
    if let Some(value) = line.strip_prefix("name=") {
        task.name = value.to_string();
    } else if let Some(value) = line.strip_prefix("base_color=") {
        task.base_color = Color::from_token(value);
    } else if let Some(value) = line.strip_prefix("selected_color=") {
        task.selected_color = Color::from_token(value);
    } else if let Some(value) = line.strip_prefix("link=") {
        task.link = if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        };
    } else if let Some(value) = line.strip_prefix("sub_task=") {
        task.sub_tasks.push(value.to_string());
    } else {
        return false;
    }
    true
}
