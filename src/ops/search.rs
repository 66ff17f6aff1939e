use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};

use crate::model::board::Board;
use crate::model::task::{Priority, Task};

/// Board filter. Every set constraint must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Case-insensitive substring of title or description
    pub query: String,
    pub priority: Option<Priority>,
    /// Exact assignee name
    pub assignee: Option<String>,
    /// Any of these tags
    pub tags: Vec<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.tags.is_empty()
    }

    /// Parse a priority filter value; `"all"` and empty mean unconstrained
    pub fn parse_priority(s: &str) -> Option<Priority> {
        if is_all(s) { None } else { Priority::parse(s) }
    }

    /// Parse an assignee filter value; `"all"` and empty mean unconstrained
    pub fn parse_assignee(s: &str) -> Option<String> {
        if is_all(s) { None } else { Some(s.to_string()) }
    }
}

fn is_all(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s.eq_ignore_ascii_case("all")
}

/// Compile the query into a case-insensitive literal matcher, for both
/// filtering and highlighting. `None` for an empty query.
pub fn query_regex(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Whether a task passes the filters. `re` is the compiled query.
pub fn matches_filters(task: &Task, filters: &SearchFilters, re: Option<&Regex>) -> bool {
    if let Some(re) = re {
        let title_hit = re.is_match(&task.title);
        let desc_hit = task.description.as_deref().is_some_and(|d| re.is_match(d));
        if !title_hit && !desc_hit {
            return false;
        }
    }
    if let Some(p) = filters.priority
        && task.priority != Some(p)
    {
        return false;
    }
    if let Some(a) = &filters.assignee
        && task.assignee.as_deref() != Some(a.as_str())
    {
        return false;
    }
    if !filters.tags.is_empty() && !filters.tags.iter().any(|t| task.has_tag(t)) {
        return false;
    }
    true
}

/// All tasks on the board passing the filters, in insertion order
pub fn filter_tasks<'a>(board: &'a Board, filters: &SearchFilters) -> Vec<&'a Task> {
    let re = query_regex(&filters.query);
    board
        .tasks
        .values()
        .filter(|t| matches_filters(t, filters, re.as_ref()))
        .collect()
}

/// Distinct assignees, sorted
pub fn unique_assignees(board: &Board) -> Vec<String> {
    board
        .tasks
        .values()
        .filter_map(|t| t.assignee.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct tags, sorted
pub fn unique_tags(board: &Board) -> Vec<String> {
    board
        .tasks
        .values()
        .flat_map(|t| t.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
