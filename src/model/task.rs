use serde::Serialize;

use super::color::{self, Color};

/// Sub-task text written when a task has none at save time
pub const DEFAULT_SUB_TASK: &str = "New task";

/// A named checklist group. Checked state is not part of the task; it lives
/// in the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Display name
    pub name: String,
    /// Checklist lines, in display order
    pub sub_tasks: Vec<String>,
    /// Title color
    pub base_color: Color,
    /// Color of a checked sub-task
    pub selected_color: Color,
    /// File path or URL opened from the title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Task {
    /// A task with a single default sub-task
    pub fn new(name: String) -> Self {
        Task {
            name,
            sub_tasks: vec![DEFAULT_SUB_TASK.to_string()],
            ..Task::default()
        }
    }

    /// Set the link. An empty or whitespace-only value clears it.
    pub fn set_link(&mut self, link: &str) {
        let link = link.trim();
        self.link = if link.is_empty() {
            None
        } else {
            Some(link.to_string())
        };
    }

    pub fn has_link(&self) -> bool {
        self.link.is_some()
    }

    /// Effective title color
    pub fn title_color(&self) -> &str {
        let fallback = if self.has_link() {
            color::TITLE_LINKED
        } else {
            color::TITLE_PLAIN
        };
        self.base_color.resolve(fallback)
    }

    /// Effective checked sub-task color
    pub fn checked_color(&self) -> &str {
        self.selected_color.resolve(color::SELECTED)
    }

    /// Name with the positional fallback applied (`To-Do 1`, `To-Do 2`, ...)
    pub fn display_name(&self, index: usize) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            format!("To-Do {}", index + 1)
        } else {
            name.to_string()
        }
    }

    /// The task as it is written to disk at position `index`: name defaulted,
    /// blank sub-tasks dropped, and at least one sub-task.
    pub fn normalized(&self, index: usize) -> Task {
        let mut sub_tasks: Vec<String> = self
            .sub_tasks
            .iter()
            .filter(|s| !s.trim().is_empty())
            .cloned()
            .collect();
        if sub_tasks.is_empty() {
            sub_tasks.push(DEFAULT_SUB_TASK.to_string());
        }
        Task {
            name: self.display_name(index),
            sub_tasks,
            base_color: self.base_color.clone(),
            selected_color: self.selected_color.clone(),
            link: self.link.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_color_fallbacks() {
        let mut task = Task::new("Read".into());
        assert_eq!(task.title_color(), color::TITLE_PLAIN);
        task.set_link("https://example.com");
        assert_eq!(task.title_color(), color::TITLE_LINKED);
        task.base_color = Color::Hex("#ff0000".into());
        assert_eq!(task.title_color(), "#ff0000");
        assert_eq!(task.checked_color(), color::SELECTED);
    }

    #[test]
    fn test_set_link_blank_clears() {
        let mut task = Task::new("Read".into());
        task.set_link("notes.txt");
        assert_eq!(task.link.as_deref(), Some("notes.txt"));
        task.set_link("   ");
        assert!(task.link.is_none());
    }

    #[test]
    fn test_normalized_defaults() {
        let task = Task {
            name: "  ".into(),
            sub_tasks: vec!["".into(), "  ".into()],
            ..Task::default()
        };
        let saved = task.normalized(2);
        assert_eq!(saved.name, "To-Do 3");
        assert_eq!(saved.sub_tasks, vec![DEFAULT_SUB_TASK]);
    }

    #[test]
    fn test_normalized_keeps_content() {
        let task = Task {
            name: "Groceries".into(),
            sub_tasks: vec!["Milk".into(), "".into(), "Eggs".into()],
            selected_color: Color::Hex("#4CAF50".into()),
            ..Task::default()
        };
        let saved = task.normalized(0);
        assert_eq!(saved.name, "Groceries");
        assert_eq!(saved.sub_tasks, vec!["Milk", "Eggs"]);
        assert_eq!(saved.selected_color, task.selected_color);
    }
}
