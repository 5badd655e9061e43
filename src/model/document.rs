use std::path::PathBuf;

use super::settings::Settings;
use super::task::Task;

/// The unit of load/save: settings, ordered tasks, and the file they came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub settings: Settings,
    pub tasks: Vec<Task>,
    /// File the document was loaded from or last saved to
    pub path: Option<PathBuf>,
}

impl Document {
    /// A blank document with the given settings and no file
    pub fn blank(settings: Settings) -> Self {
        Document {
            settings,
            tasks: Vec::new(),
            path: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in their saved form
    pub fn normalized_tasks(&self) -> Vec<Task> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(i, t)| t.normalized(i))
            .collect()
    }
}
