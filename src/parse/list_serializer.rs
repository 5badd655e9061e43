use crate::model::settings::Settings;
use crate::model::task::Task;

use super::list_parser::{SETTINGS_MARKER, TASK_MARKER};

/// Serialize settings and tasks to the list file format.
///
/// Each task is written in its saved form (see [`Task::normalized`]): an empty
/// name becomes `To-Do N` and an empty sub-task list becomes `New task`.
/// Values are written verbatim; there is no escaping.
pub fn serialize_list(settings: &Settings, tasks: &[Task]) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(SETTINGS_MARKER.to_string());
    lines.push(format!("title={}", settings.title));
    lines.push(format!("font_size={}", settings.font_size.as_str()));
    lines.push(format!(
        "strikethrough={}",
        bool_token(settings.strikethrough)
    ));
    lines.push(String::new());

    for (i, task) in tasks.iter().enumerate() {
        let task = task.normalized(i);
        lines.push(TASK_MARKER.to_string());
        lines.push(format!("name={}", task.name));
        lines.push(format!("base_color={}", task.base_color));
        lines.push(format!("selected_color={}", task.selected_color));
        lines.push(format!("link={}", task.link.as_deref().unwrap_or("")));
        for sub in &task.sub_tasks {
            lines.push(format!("sub_task={}", sub));
        }
        lines.push(String::new());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn bool_token(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::color::Color;
    use crate::model::settings::FontSize;
    use crate::parse::list_parser::parse_list;
    use pretty_assertions::assert_eq;

    fn groceries() -> Task {
        Task {
            name: "Groceries".into(),
            sub_tasks: vec!["Milk".into(), "Eggs".into()],
            base_color: Color::Default,
            selected_color: Color::Hex("#4CAF50".into()),
            link: None,
        }
    }

    #[test]
    fn test_serialize_basic() {
        let settings = Settings {
            title: "My List".into(),
            font_size: FontSize::Large,
            strikethrough: true,
        };
        let output = serialize_list(&settings, &[groceries()]);
        assert_eq!(
            output,
            "\
[SETTINGS]
title=My List
font_size=large
strikethrough=True

[TASK]
name=Groceries
base_color=default
selected_color=#4CAF50
link=
sub_task=Milk
sub_task=Eggs

"
        );
    }

    #[test]
    fn test_serialize_no_tasks() {
        let output = serialize_list(&Settings::default(), &[]);
        assert_eq!(
            output,
            "[SETTINGS]\ntitle=Simply TodoTask\nfont_size=medium\nstrikethrough=True\n\n"
        );
    }

    #[test]
    fn test_serialize_false() {
        let settings = Settings {
            strikethrough: false,
            ..Settings::default()
        };
        assert!(serialize_list(&settings, &[]).contains("strikethrough=False\n"));
    }

    #[test]
    fn test_empty_name_defaults_to_position() {
        let tasks = vec![groceries(), groceries(), Task::new(String::new())];
        let output = serialize_list(&Settings::default(), &tasks);
        assert!(output.contains("name=To-Do 3\n"));
    }

    #[test]
    fn test_empty_sub_tasks_get_placeholder() {
        let task = Task {
            name: "Empty".into(),
            ..Task::default()
        };
        let output = serialize_list(&Settings::default(), &[task]);
        assert!(output.ends_with("link=\nsub_task=New task\n\n"));
    }

    #[test]
    fn test_link_written() {
        let mut task = groceries();
        task.set_link("/home/me/list.pdf");
        let output = serialize_list(&Settings::default(), &[task]);
        assert!(output.contains("link=/home/me/list.pdf\n"));
    }

    #[test]
    fn test_round_trip() {
        let settings = Settings {
            title: "Weekend".into(),
            font_size: FontSize::Small,
            strikethrough: false,
        };
        let mut linked = Task::new("Docs".into());
        linked.set_link("https://docs.rs");
        linked.base_color = Color::Hex("#123456".into());
        let tasks = vec![groceries(), linked, Task::new("Chores".into())];

        let parsed = parse_list(&serialize_list(&settings, &tasks));
        assert_eq!(parsed.settings, settings);
        assert_eq!(parsed.tasks, tasks);
        assert!(parsed.ignored.is_empty());
    }
}
