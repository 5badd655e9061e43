use checklist::model::{Color, FontSize, Task};
use checklist::parse::{parse_list, serialize_list};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

fn read_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Could not read fixture {}: {}", name, e))
}

/// Helper: parse a fixture, serialize it, and assert byte-for-byte equality
fn assert_list_round_trip(fixture_name: &str) {
    let source = read_fixture(fixture_name);
    let parsed = parse_list(&source);
    assert!(
        parsed.ignored.is_empty(),
        "fixture {} has ignored lines: {:?}",
        fixture_name,
        parsed.ignored
    );
    let output = serialize_list(&parsed.settings, &parsed.tasks);
    assert_eq!(
        output, source,
        "Round-trip failed for fixture: {}",
        fixture_name
    );
}

// ============================================================================
// Byte-for-byte round trips
// ============================================================================

#[test]
fn round_trip_groceries() {
    assert_list_round_trip("groceries.txt");
}

#[test]
fn round_trip_weekly() {
    assert_list_round_trip("weekly.txt");
}

// ============================================================================
// Parsed content
// ============================================================================

#[test]
fn weekly_contents() {
    let parsed = parse_list(&read_fixture("weekly.txt"));
    assert_eq!(parsed.settings.title, "Weekly review");
    assert_eq!(parsed.settings.font_size, FontSize::Small);
    assert!(!parsed.settings.strikethrough);

    let names: Vec<&str> = parsed.tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Inbox zero", "Plan next week", "Budget"]);

    assert_eq!(parsed.tasks[0].base_color, Color::Hex("#E91E63".into()));
    assert_eq!(parsed.tasks[0].selected_color, Color::Default);
    assert_eq!(
        parsed.tasks[0].link.as_deref(),
        Some("https://mail.example.com")
    );
    assert_eq!(parsed.tasks[1].link, None);
    assert_eq!(parsed.tasks[2].sub_tasks.len(), 2);
}

#[test]
fn reorder_survives_round_trip() {
    let parsed = parse_list(&read_fixture("weekly.txt"));
    let mut tasks = parsed.tasks.clone();
    tasks.reverse();

    let reparsed = parse_list(&serialize_list(&parsed.settings, &tasks));
    let names: Vec<&str> = reparsed.tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Budget", "Plan next week", "Inbox zero"]);
}

// ============================================================================
// Legacy files
// ============================================================================

#[test]
fn legacy_file_is_read_and_rewritten_canonically() {
    let parsed = parse_list(&read_fixture("legacy.txt"));
    assert_eq!(parsed.settings.title, "Lista della spesa");
    assert_eq!(parsed.settings.font_size, FontSize::Large);
    assert!(parsed.settings.strikethrough);
    // `theme=dark` and `checked=Mele`
    assert_eq!(parsed.ignored.len(), 2);

    assert_eq!(parsed.tasks.len(), 2);
    assert_eq!(parsed.tasks[0].sub_tasks, vec!["Mele", "Pere"]);
    // Empty on load; defaults only apply on save
    assert_eq!(parsed.tasks[1], Task::default());

    let output = serialize_list(&parsed.settings, &parsed.tasks);
    assert_eq!(
        output,
        "\
[SETTINGS]
title=Lista della spesa
font_size=large
strikethrough=True

[TASK]
name=Frutta
base_color=default
selected_color=default
link=
sub_task=Mele
sub_task=Pere

[TASK]
name=To-Do 2
base_color=default
selected_color=default
link=
sub_task=New task

"
    );
}

#[test]
fn second_round_trip_is_stable() {
    let parsed = parse_list(&read_fixture("legacy.txt"));
    let once = serialize_list(&parsed.settings, &parsed.tasks);
    let reparsed = parse_list(&once);
    let twice = serialize_list(&reparsed.settings, &reparsed.tasks);
    assert_eq!(once, twice);
}
