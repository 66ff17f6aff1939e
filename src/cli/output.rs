use chrono::NaiveDate;
use serde::Serialize;

use crate::model::board::Board;
use crate::model::column::{Column, WipStatus};
use crate::model::task::Task;
use crate::ops::search;
use crate::util::dates;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStatsJson {
    pub id: String,
    pub title: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tasks: Option<usize>,
    pub wip: WipStatus,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub columns: Vec<ColumnStatsJson>,
    pub assignees: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Serialize)]
pub struct CheckJson {
    pub ok: bool,
    pub problems: Vec<String>,
}

pub fn stats_json(board: &Board) -> StatsJson {
    StatsJson {
        columns: board
            .columns
            .iter()
            .map(|c| ColumnStatsJson {
                id: c.id.clone(),
                title: c.title.clone(),
                count: c.len(),
                max_tasks: c.max_tasks,
                wip: c.wip_status(),
            })
            .collect(),
        assignees: search::unique_assignees(board),
        tags: search::unique_tags(board),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `To Do (2/10)`, with a suffix once the WIP limit is near or passed
pub fn format_column_header(column: &Column) -> String {
    let count = match column.max_tasks {
        Some(max) => format!("{}/{}", column.len(), max),
        None => column.len().to_string(),
    };
    let suffix = match column.wip_status() {
        WipStatus::Safe => "",
        WipStatus::Warning => " - near limit",
        WipStatus::Exceeded => " - over limit",
    };
    format!("{} ({}){}", column.title, count, suffix)
}

/// One task per line: id, title, then whichever details are set
pub fn format_task_line(task: &Task, today: NaiveDate) -> String {
    let mut line = format!("{}  {}", task.id, task.title);
    if let Some(p) = task.priority {
        line.push_str(&format!("  [{}]", p));
    }
    if let Some(a) = &task.assignee {
        line.push_str(&format!(" @{}", a));
    }
    for tag in &task.tags {
        line.push_str(&format!(" #{}", tag));
    }
    if let Some(due) = task.due_date {
        line.push_str(&format!(" due {}", dates::format_date(due)));
        if dates::is_overdue(due, today) {
            line.push_str(" (overdue)");
        }
    }
    line
}

fn push_column(out: &mut Vec<String>, board: &Board, column: &Column, today: NaiveDate) {
    out.push(format_column_header(column));
    let tasks = board.column_tasks(&column.id);
    if tasks.is_empty() {
        out.push("  (empty)".to_string());
    }
    for task in tasks {
        out.push(format!("  {}", format_task_line(task, today)));
    }
}

/// The whole board, or a single column when `only` is set
pub fn format_board(board: &Board, only: Option<&str>, today: NaiveDate) -> String {
    let mut out = vec![board.name.clone(), String::new()];
    for column in &board.columns {
        if only.is_some_and(|id| id != column.id) {
            continue;
        }
        push_column(&mut out, board, column, today);
    }
    out.join("\n")
}

pub fn format_search_results(tasks: &[&Task], today: NaiveDate) -> String {
    if tasks.is_empty() {
        return "no matching tasks".to_string();
    }
    tasks
        .iter()
        .map(|t| format!("{}  ({})", format_task_line(t, today), t.status))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_stats(stats: &StatsJson) -> String {
    let mut out = Vec::new();
    for c in &stats.columns {
        let limit = c.max_tasks.map(|m| format!("/{}", m)).unwrap_or_default();
        out.push(format!("{:<16} {:>3}{:<4} {}", c.title, c.count, limit, c.wip));
    }
    out.push(String::new());
    out.push(format!("assignees: {}", stats.assignees.join(", ")));
    out.push(format!("tags: {}", stats.tags.join(", ")));
    out.join("\n")
}
