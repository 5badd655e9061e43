use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::io::list_io::{self, ListError};
use crate::model::document::Document;
use crate::model::settings::Settings;

/// Error type for session load/save transitions
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("the list has no file yet; save it with a path first")]
    NoPath,
    #[error(transparent)]
    List(#[from] ListError),
}

/// The open document plus transient check state.
///
/// Checked sub-tasks are held here only and are never written to disk.
#[derive(Debug, Clone)]
pub struct Session {
    document: Document,
    /// `(task index, sub-task index)` pairs that are checked
    checked: HashSet<(usize, usize)>,
    /// Where failed saves are recorded
    recovery_dir: Option<PathBuf>,
}

impl Session {
    /// A session holding a blank document with `defaults` as its settings
    pub fn new(defaults: Settings) -> Self {
        Session {
            document: Document::blank(defaults),
            checked: HashSet::new(),
            recovery_dir: None,
        }
    }

    /// Record failed saves in the recovery log under `dir`
    pub fn with_recovery_dir(mut self, dir: PathBuf) -> Self {
        self.recovery_dir = Some(dir);
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access for edits. Check state is cleared, since task and
    /// sub-task indices may shift.
    pub fn document_mut(&mut self) -> &mut Document {
        self.checked.clear();
        &mut self.document
    }

    pub fn path(&self) -> Option<&Path> {
        self.document.path.as_deref()
    }

    /// Replace the document with the contents of `path`. On failure the
    /// current document is left untouched.
    pub fn load(&mut self, path: &Path) -> Result<(), SessionError> {
        let parsed = list_io::load_list(path)?;
        self.document = Document {
            settings: parsed.settings,
            tasks: parsed.tasks,
            path: Some(path.to_path_buf()),
        };
        self.checked.clear();
        Ok(())
    }

    /// Write the document to its current file.
    pub fn save(&mut self) -> Result<(), SessionError> {
        let path = self.document.path.clone().ok_or(SessionError::NoPath)?;
        self.write(&path)
    }

    /// Write the document to `path` and make it the current file.
    pub fn save_as(&mut self, path: &Path) -> Result<(), SessionError> {
        self.write(path)?;
        self.document.path = Some(path.to_path_buf());
        Ok(())
    }

    fn write(&mut self, path: &Path) -> Result<(), SessionError> {
        list_io::save_list(
            path,
            &self.document.settings,
            &self.document.tasks,
            self.recovery_dir.as_deref(),
        )?;
        // Keep what was written, defaults applied
        let saved = self.document.normalized_tasks();
        if saved != self.document.tasks {
            self.document.tasks = saved;
            self.checked.clear();
        }
        Ok(())
    }

    /// Flip a sub-task's checkbox. Returns the new state, or None if the
    /// sub-task does not exist.
    pub fn toggle_check(&mut self, task: usize, sub: usize) -> Option<bool> {
        let exists = self
            .document
            .tasks
            .get(task)
            .is_some_and(|t| sub < t.sub_tasks.len());
        if !exists {
            return None;
        }
        if self.checked.remove(&(task, sub)) {
            Some(false)
        } else {
            self.checked.insert((task, sub));
            Some(true)
        }
    }

    pub fn is_checked(&self, task: usize, sub: usize) -> bool {
        self.checked.contains(&(task, sub))
    }

    /// Number of checked sub-tasks in a task
    pub fn checked_count(&self, task: usize) -> usize {
        self.checked.iter().filter(|(t, _)| *t == task).count()
    }

    /// Uncheck everything. Storage is not touched.
    pub fn reset_checks(&mut self) {
        self.checked.clear();
    }

    /// Remove all tasks from the open document (in memory only).
    pub fn reset_tasks(&mut self) {
        self.document.tasks.clear();
        self.checked.clear();
    }
}
