use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::io::recent::RecentEntry;
use crate::io::recovery::RecoveryEntry;
use crate::model::document::Document;
use crate::model::settings::Settings;
use crate::model::task::Task;
use crate::ops::check::{CheckError, CheckResult, CheckWarning};
use crate::ops::search::SearchHit;
use crate::ops::session::Session;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    /// 1-based task number
    pub number: usize,
    pub name: String,
    pub sub_tasks: Vec<String>,
    pub base_color: String,
    pub selected_color: String,
    /// Effective colors after defaults
    pub title_color: String,
    pub checked_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// 1-based numbers of checked sub-tasks
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checked: Vec<usize>,
}

#[derive(Serialize)]
pub struct DocumentJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub settings: Settings,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct SearchHitJson {
    pub task: usize,
    pub name: String,
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_task: Option<usize>,
    pub text: String,
}

#[derive(Serialize)]
pub struct RecentJson {
    pub path: String,
    pub last_opened: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

fn checked_numbers(session: &Session, index: usize, task: &Task) -> Vec<usize> {
    (0..task.sub_tasks.len())
        .filter(|&j| session.is_checked(index, j))
        .map(|j| j + 1)
        .collect()
}

pub fn task_to_json(session: &Session, index: usize, task: &Task) -> TaskJson {
    TaskJson {
        number: index + 1,
        name: task.name.clone(),
        sub_tasks: task.sub_tasks.clone(),
        base_color: task.base_color.to_string(),
        selected_color: task.selected_color.to_string(),
        title_color: task.title_color().to_string(),
        checked_color: task.checked_color().to_string(),
        link: task.link.clone(),
        checked: checked_numbers(session, index, task),
    }
}

pub fn document_to_json(session: &Session) -> DocumentJson {
    let doc = session.document();
    DocumentJson {
        path: doc.path.as_ref().map(|p| p.display().to_string()),
        settings: doc.settings.clone(),
        tasks: doc
            .tasks
            .iter()
            .enumerate()
            .map(|(i, t)| task_to_json(session, i, t))
            .collect(),
    }
}

/// The text a hit matched in
pub fn hit_text<'a>(doc: &'a Document, hit: &SearchHit) -> &'a str {
    let task = &doc.tasks[hit.task];
    match hit.sub_task {
        Some(j) => &task.sub_tasks[j],
        None => match hit.field {
            crate::ops::search::MatchField::Link => task.link.as_deref().unwrap_or(""),
            _ => &task.name,
        },
    }
}

pub fn search_hit_to_json(doc: &Document, hit: &SearchHit) -> SearchHitJson {
    SearchHitJson {
        task: hit.task + 1,
        name: doc.tasks[hit.task].display_name(hit.task),
        field: hit.field.as_str().to_string(),
        sub_task: hit.sub_task.map(|j| j + 1),
        text: hit_text(doc, hit).to_string(),
    }
}

pub fn recent_to_json(entry: &RecentEntry) -> RecentJson {
    RecentJson {
        path: entry.path.clone(),
        last_opened: entry
            .last_opened
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Title line with an underline of matching display width
pub fn format_heading(title: &str) -> Vec<String> {
    let width = UnicodeWidthStr::width(title).max(1);
    vec![title.to_string(), "=".repeat(width)]
}

pub fn format_settings(settings: &Settings) -> Vec<String> {
    vec![
        format!("title: {}", settings.title),
        format!(
            "font size: {} ({}px)",
            settings.font_size.as_str(),
            settings.font_size.pixels()
        ),
        format!(
            "strikethrough: {}",
            if settings.strikethrough { "on" } else { "off" }
        ),
    ]
}

/// One-line summary: `3. Name (2 items) -> link`
pub fn format_task_line(index: usize, task: &Task) -> String {
    let count = task.sub_tasks.len();
    let items = if count == 1 { "item" } else { "items" };
    let link = task
        .link
        .as_ref()
        .map(|l| format!(" -> {}", l))
        .unwrap_or_default();
    format!(
        "{}. {} ({} {}){}",
        index + 1,
        task.display_name(index),
        count,
        items,
        link
    )
}

/// Task header followed by its sub-tasks as boxes. Checked sub-tasks show
/// `[x]`, struck through with `~~` when the list has strikethrough on.
pub fn format_task_block(session: &Session, index: usize, task: &Task) -> Vec<String> {
    let mut lines = Vec::new();
    let strike = session.document().settings.strikethrough;
    let checked = session.checked_count(index);
    let progress = if checked > 0 {
        format!(" ({}/{} checked)", checked, task.sub_tasks.len())
    } else {
        String::new()
    };
    let link = task
        .link
        .as_ref()
        .map(|l| format!("  -> {}", l))
        .unwrap_or_default();
    lines.push(format!(
        "{}. {}{}{}",
        index + 1,
        task.display_name(index),
        progress,
        link
    ));
    for (j, sub) in task.sub_tasks.iter().enumerate() {
        if !session.is_checked(index, j) {
            lines.push(format!("   [ ] {}. {}", j + 1, sub));
        } else if strike {
            lines.push(format!("   [x] {}. ~~{}~~", j + 1, sub));
        } else {
            lines.push(format!("   [x] {}. {}", j + 1, sub));
        }
    }
    lines
}

/// Full task detail, including colors
pub fn format_task_detail(session: &Session, index: usize, task: &Task) -> Vec<String> {
    let font_size = session.document().settings.font_size;
    let mut lines = format_task_block(session, index, task);
    lines.push(String::new());
    lines.push(format!(
        "title color: {} ({}, {}px)",
        task.base_color,
        task.title_color(),
        font_size.title_pixels()
    ));
    lines.push(format!(
        "checked color: {} ({})",
        task.selected_color,
        task.checked_color()
    ));
    if let Some(link) = &task.link {
        lines.push(format!("link: {}", link));
    }
    lines
}

pub fn format_document(session: &Session) -> Vec<String> {
    let doc = session.document();
    let mut lines = format_heading(&doc.settings.title);
    if doc.tasks.is_empty() {
        lines.push(String::new());
        lines.push("(no tasks yet; add one with `ckl add <name>`)".to_string());
        return lines;
    }
    for (i, task) in doc.tasks.iter().enumerate() {
        lines.push(String::new());
        lines.extend(format_task_block(session, i, task));
    }
    lines
}

pub fn format_search_hit(doc: &Document, hit: &SearchHit) -> String {
    let location = match hit.sub_task {
        Some(j) => format!("{}.{}", hit.task + 1, j + 1),
        None => format!("{}", hit.task + 1),
    };
    format!(
        "[{}] {}: {}",
        location,
        hit.field.as_str(),
        hit_text(doc, hit)
    )
}

pub fn format_check_result(result: &CheckResult) -> Vec<String> {
    let mut lines = Vec::new();
    for error in &result.errors {
        let text = match error {
            CheckError::InvalidColor { task, field, value } => {
                format!("task {}: {} is not a hex color: {}", task, field, value)
            }
        };
        lines.push(format!("error: {}", text));
    }
    for warning in &result.warnings {
        let text = match warning {
            CheckWarning::IgnoredLine { line, text } => {
                format!("line {}: ignored: {}", line, text)
            }
            CheckWarning::MissingSettings => "no [SETTINGS] block; defaults used".to_string(),
            CheckWarning::EmptyName { task } => {
                format!("task {}: empty name (saved as \"To-Do {}\")", task, task)
            }
            CheckWarning::NoSubTasks { task } => {
                format!("task {}: no sub-tasks (saved with \"New task\")", task)
            }
            CheckWarning::BrokenLink { task, link } => {
                format!("task {}: link not found: {}", task, link)
            }
        };
        lines.push(format!("warning: {}", text));
    }
    if result.errors.is_empty() && result.warnings.is_empty() {
        lines.push("ok".to_string());
    }
    lines
}

pub fn format_recovery_entry(entry: &RecoveryEntry) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{}  {}",
            entry
                .timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            entry.target
        ),
        format!("  error: {}", entry.error),
    ];
    for line in entry.body.lines() {
        lines.push(format!("  | {}", line));
    }
    lines
}
