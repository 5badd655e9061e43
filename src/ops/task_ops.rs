use crate::model::color::Color;
use crate::model::document::Document;
use crate::model::task::Task;

/// Error type for task operations. Fields hold 0-based indices; messages
/// show the 1-based numbers used on the command line.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("task not found: {}", .0 + 1)]
    TaskNotFound(usize),
    #[error("sub-task {} not found in task {}", .sub + 1, .task + 1)]
    SubTaskNotFound { task: usize, sub: usize },
    #[error("invalid color: {0} (use #RRGGBB, #RGB or default)")]
    InvalidColor(String),
    #[error("invalid position: {}", .0 + 1)]
    InvalidPosition(usize),
}

/// Which of a task's two colors to change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    /// Title color
    Base,
    /// Checked sub-task color
    Selected,
}

fn task_mut(doc: &mut Document, index: usize) -> Result<&mut Task, TaskError> {
    doc.tasks
        .get_mut(index)
        .ok_or(TaskError::TaskNotFound(index))
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Append a task with the given sub-tasks (a single `New task` if none).
/// Returns the new task's index.
pub fn add_task(doc: &mut Document, name: String, sub_tasks: Vec<String>) -> usize {
    let mut task = Task::new(name);
    if !sub_tasks.is_empty() {
        task.sub_tasks = sub_tasks;
    }
    doc.tasks.push(task);
    doc.tasks.len() - 1
}

pub fn remove_task(doc: &mut Document, index: usize) -> Result<Task, TaskError> {
    if index >= doc.tasks.len() {
        return Err(TaskError::TaskNotFound(index));
    }
    Ok(doc.tasks.remove(index))
}

pub fn rename_task(doc: &mut Document, index: usize, name: String) -> Result<(), TaskError> {
    task_mut(doc, index)?.name = name;
    Ok(())
}

/// Move a task to position `to` (0-based, counted after removal)
pub fn move_task(doc: &mut Document, from: usize, to: usize) -> Result<(), TaskError> {
    if from >= doc.tasks.len() {
        return Err(TaskError::TaskNotFound(from));
    }
    if to >= doc.tasks.len() {
        return Err(TaskError::InvalidPosition(to));
    }
    let task = doc.tasks.remove(from);
    doc.tasks.insert(to, task);
    Ok(())
}

pub fn set_color(
    doc: &mut Document,
    index: usize,
    slot: ColorSlot,
    value: &str,
) -> Result<(), TaskError> {
    let color = Color::parse_user(value).ok_or_else(|| TaskError::InvalidColor(value.to_string()))?;
    let task = task_mut(doc, index)?;
    match slot {
        ColorSlot::Base => task.base_color = color,
        ColorSlot::Selected => task.selected_color = color,
    }
    Ok(())
}

/// Set or clear (with an empty value) a task's link
pub fn set_link(doc: &mut Document, index: usize, link: &str) -> Result<(), TaskError> {
    task_mut(doc, index)?.set_link(link);
    Ok(())
}

// ---------------------------------------------------------------------------
// Sub-tasks
// ---------------------------------------------------------------------------

/// Append a sub-task. Returns its index within the task.
pub fn add_sub_task(doc: &mut Document, index: usize, text: String) -> Result<usize, TaskError> {
    let task = task_mut(doc, index)?;
    task.sub_tasks.push(text);
    Ok(task.sub_tasks.len() - 1)
}

pub fn edit_sub_task(
    doc: &mut Document,
    index: usize,
    sub: usize,
    text: String,
) -> Result<(), TaskError> {
    let task = task_mut(doc, index)?;
    let slot = task
        .sub_tasks
        .get_mut(sub)
        .ok_or(TaskError::SubTaskNotFound { task: index, sub })?;
    *slot = text;
    Ok(())
}

/// Remove a sub-task. The last one may be removed; saving puts back a
/// placeholder.
pub fn remove_sub_task(doc: &mut Document, index: usize, sub: usize) -> Result<String, TaskError> {
    let task = task_mut(doc, index)?;
    if sub >= task.sub_tasks.len() {
        return Err(TaskError::SubTaskNotFound { task: index, sub });
    }
    Ok(task.sub_tasks.remove(sub))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::settings::Settings;

    fn sample_doc() -> Document {
        let mut doc = Document::blank(Settings::default());
        add_task(&mut doc, "A".into(), vec!["a1".into(), "a2".into()]);
        add_task(&mut doc, "B".into(), Vec::new());
        add_task(&mut doc, "C".into(), vec!["c1".into()]);
        doc
    }

    fn names(doc: &Document) -> Vec<&str> {
        doc.tasks.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_add_task_placeholder() {
        let doc = sample_doc();
        assert_eq!(doc.tasks[1].sub_tasks, vec!["New task"]);
        assert_eq!(names(&doc), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_remove_and_rename() {
        let mut doc = sample_doc();
        let removed = remove_task(&mut doc, 1).unwrap();
        assert_eq!(removed.name, "B");
        rename_task(&mut doc, 1, "C2".into()).unwrap();
        assert_eq!(names(&doc), vec!["A", "C2"]);
        assert!(matches!(
            remove_task(&mut doc, 5),
            Err(TaskError::TaskNotFound(5))
        ));
    }

    #[test]
    fn test_move_task() {
        let mut doc = sample_doc();
        move_task(&mut doc, 2, 0).unwrap();
        assert_eq!(names(&doc), vec!["C", "A", "B"]);
        move_task(&mut doc, 0, 2).unwrap();
        assert_eq!(names(&doc), vec!["A", "B", "C"]);
        assert!(matches!(
            move_task(&mut doc, 0, 3),
            Err(TaskError::InvalidPosition(3))
        ));
    }

    #[test]
    fn test_set_colors() {
        let mut doc = sample_doc();
        set_color(&mut doc, 0, ColorSlot::Base, "#ff0000").unwrap();
        set_color(&mut doc, 0, ColorSlot::Selected, "#0f0").unwrap();
        assert_eq!(doc.tasks[0].base_color, Color::Hex("#ff0000".into()));
        assert_eq!(doc.tasks[0].selected_color, Color::Hex("#0f0".into()));

        set_color(&mut doc, 0, ColorSlot::Base, "default").unwrap();
        assert_eq!(doc.tasks[0].base_color, Color::Default);

        assert!(matches!(
            set_color(&mut doc, 0, ColorSlot::Base, "blue"),
            Err(TaskError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_links() {
        let mut doc = sample_doc();
        set_link(&mut doc, 2, "https://example.com").unwrap();
        assert!(doc.tasks[2].has_link());
        set_link(&mut doc, 2, "").unwrap();
        assert!(!doc.tasks[2].has_link());
    }

    #[test]
    fn test_sub_task_edits() {
        let mut doc = sample_doc();
        assert_eq!(add_sub_task(&mut doc, 0, "a3".into()).unwrap(), 2);
        edit_sub_task(&mut doc, 0, 0, "first".into()).unwrap();
        assert_eq!(remove_sub_task(&mut doc, 0, 1).unwrap(), "a2");
        assert_eq!(doc.tasks[0].sub_tasks, vec!["first", "a3"]);

        assert!(matches!(
            edit_sub_task(&mut doc, 0, 9, "x".into()),
            Err(TaskError::SubTaskNotFound { task: 0, sub: 9 })
        ));
        assert!(matches!(
            add_sub_task(&mut doc, 7, "x".into()),
            Err(TaskError::TaskNotFound(7))
        ));
    }

    #[test]
    fn test_removing_last_sub_task_defaults_on_save() {
        let mut doc = sample_doc();
        remove_sub_task(&mut doc, 2, 0).unwrap();
        assert!(doc.tasks[2].sub_tasks.is_empty());
        assert_eq!(doc.normalized_tasks()[2].sub_tasks, vec!["New task"]);
    }
}
