use std::ops::Range;

use regex::Regex;
use serde::Serialize;

use crate::model::document::Document;

/// Which field of a task matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchField {
    Name,
    SubTask,
    Link,
}

impl MatchField {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchField::Name => "name",
            MatchField::SubTask => "sub_task",
            MatchField::Link => "link",
        }
    }
}

/// A search hit within a document (indices are 0-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub task: usize,
    pub field: MatchField,
    /// Set for sub-task hits
    pub sub_task: Option<usize>,
    pub spans: Vec<Range<usize>>,
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

/// Search task names, sub-tasks and links, in document order.
pub fn search_document(doc: &Document, re: &Regex) -> Vec<SearchHit> {
    let mut hits = Vec::new();

    for (i, task) in doc.tasks.iter().enumerate() {
        let spans = find_matches(re, &task.name);
        if !spans.is_empty() {
            hits.push(SearchHit {
                task: i,
                field: MatchField::Name,
                sub_task: None,
                spans,
            });
        }

        for (j, sub) in task.sub_tasks.iter().enumerate() {
            let spans = find_matches(re, sub);
            if !spans.is_empty() {
                hits.push(SearchHit {
                    task: i,
                    field: MatchField::SubTask,
                    sub_task: Some(j),
                    spans,
                });
            }
        }

        if let Some(link) = &task.link {
            let spans = find_matches(re, link);
            if !spans.is_empty() {
                hits.push(SearchHit {
                    task: i,
                    field: MatchField::Link,
                    sub_task: None,
                    spans,
                });
            }
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_list;

    fn doc() -> Document {
        let parsed = parse_list(
            "\
[TASK]
name=Groceries
link=https://shop.example.com/milk
sub_task=Milk
sub_task=Eggs
[TASK]
name=Milk run
sub_task=Buy oat milk
",
        );
        Document {
            settings: parsed.settings,
            tasks: parsed.tasks,
            path: None,
        }
    }

    #[test]
    fn test_search_all_fields() {
        let re = Regex::new("(?i)milk").unwrap();
        let hits = search_document(&doc(), &re);
        let summary: Vec<(usize, MatchField, Option<usize>)> =
            hits.iter().map(|h| (h.task, h.field, h.sub_task)).collect();
        assert_eq!(
            summary,
            vec![
                (0, MatchField::SubTask, Some(0)),
                (0, MatchField::Link, None),
                (1, MatchField::Name, None),
                (1, MatchField::SubTask, Some(0)),
            ]
        );
        assert_eq!(hits[0].spans, vec![0..4]);
    }

    #[test]
    fn test_search_no_hits() {
        let re = Regex::new("bread").unwrap();
        assert!(search_document(&doc(), &re).is_empty());
    }
}
