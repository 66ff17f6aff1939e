//! Bootstrap datasets for a fresh board session.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::board::Board;
use crate::model::column::Column;
use crate::model::config::{BoardConfig, SampleKind};
use crate::model::task::{Priority, Task};

const ASSIGNEES: [&str; 5] = [
    "John Doe",
    "Jane Smith",
    "Alice Johnson",
    "Bob Williams",
    "Carol Davis",
];

const TAG_OPTIONS: [&str; 7] = [
    "frontend",
    "backend",
    "design",
    "bug",
    "feature",
    "urgent",
    "documentation",
];

const VERBS: [&str; 5] = ["Implement", "Design", "Fix", "Review", "Test"];

/// To Do / In Progress / Review / Done with WIP limits 10 / 5 / 3 / none
pub fn sample_columns() -> Vec<Column> {
    vec![
        Column::new("todo", "To Do").with_color("#4488FF").with_limit(10),
        Column::new("in-progress", "In Progress")
            .with_color("#FFD700")
            .with_limit(5),
        Column::new("review", "Review").with_color("#FF4444").with_limit(3),
        Column::new("done", "Done").with_color("#44FF88"),
    ]
}

fn day(year: i32, month: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, d, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn sample_tasks() -> Vec<Task> {
    let mut t1 = Task::new("task-1", "Implement drag and drop functionality", "todo");
    t1.description = Some("Add D&D functionality to kanban cards with smooth animations".into());
    t1.priority = Some(Priority::High);
    t1.assignee = Some("John Doe".into());
    t1.tags = vec!["frontend".into(), "feature".into()];
    t1.created_at = day(2024, 1, 10);
    t1.due_date = NaiveDate::from_ymd_opt(2024, 1, 20);

    let mut t2 = Task::new("task-2", "Design task modal component", "todo");
    t2.description = Some("Create modal for editing task details with form validation".into());
    t2.priority = Some(Priority::Medium);
    t2.assignee = Some("Jane Smith".into());
    t2.tags = vec!["design".into(), "ui".into()];
    t2.created_at = day(2024, 1, 11);
    t2.due_date = NaiveDate::from_ymd_opt(2024, 1, 18);

    let mut t3 = Task::new("task-3", "Setup TypeScript configuration", "in-progress");
    t3.priority = Some(Priority::Urgent);
    t3.assignee = Some("John Doe".into());
    t3.tags = vec!["setup".into(), "typescript".into()];
    t3.created_at = day(2024, 1, 9);

    let mut t4 = Task::new("task-4", "Create project structure", "done");
    t4.description = Some("Setup folder structure and initial files".into());
    t4.priority = Some(Priority::Low);
    t4.assignee = Some("Jane Smith".into());
    t4.tags = vec!["setup".into()];
    t4.created_at = day(2024, 1, 8);
    t4.due_date = NaiveDate::from_ymd_opt(2024, 1, 9);

    vec![t1, t2, t3, t4]
}

/// Place each task into the column named by its status. Tasks whose column
/// does not exist are dropped.
fn place(name: &str, mut columns: Vec<Column>, tasks: Vec<Task>) -> Board {
    let mut kept = Vec::new();
    for task in tasks {
        if let Some(col) = columns.iter_mut().find(|c| c.id == task.status) {
            col.task_ids.push(task.id.clone());
            kept.push(task);
        }
    }
    Board::from_parts(name, columns, kept)
}

/// The four-task demo board
pub fn default_board() -> Board {
    place("Kanban", sample_columns(), sample_tasks())
}

/// `count` generated tasks dealt round-robin over `columns`. The same seed
/// always produces the same board.
pub fn large_board_with(name: &str, columns: Vec<Column>, count: usize, seed: Option<u64>) -> Board {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    if columns.is_empty() {
        return Board::new(name, columns);
    }

    let mut tasks = Vec::with_capacity(count);
    for i in 1..=count {
        let status = columns[i % columns.len()].id.clone();
        let verb = VERBS[rng.gen_range(0..VERBS.len())];
        let mut task = Task::new(format!("task-{}", i), format!("Task {}: {} feature", i, verb), status);
        task.description = rng
            .gen_bool(0.5)
            .then(|| format!("Description for task {}", i));
        task.priority = Some(Priority::ALL[rng.gen_range(0..Priority::ALL.len())]);
        task.assignee = Some(ASSIGNEES[rng.gen_range(0..ASSIGNEES.len())].to_string());
        let tag_count = rng.gen_range(1..=3);
        task.tags = (0..tag_count)
            .map(|_| TAG_OPTIONS[rng.gen_range(0..TAG_OPTIONS.len())].to_string())
            .collect();
        task.created_at = day(2024, 1, rng.gen_range(1..=28));
        task.due_date = if rng.gen_bool(0.7) {
            NaiveDate::from_ymd_opt(2024, 1, rng.gen_range(1..=28))
        } else {
            None
        };
        tasks.push(task);
    }
    place(name, columns, tasks)
}

/// Generated board over the sample columns
pub fn large_board(count: usize, seed: Option<u64>) -> Board {
    large_board_with("Kanban", sample_columns(), count, seed)
}

/// Build the session's starting board from configuration
pub fn bootstrap(config: &BoardConfig) -> Board {
    let name = config.board.name.as_str();
    let columns: Vec<Column> = if config.columns.is_empty() {
        sample_columns()
    } else {
        config
            .columns
            .iter()
            .map(|c| Column {
                id: c.id.clone(),
                title: c.title.clone(),
                color: c.color.clone(),
                task_ids: Vec::new(),
                max_tasks: c.max_tasks,
            })
            .collect()
    };

    match config.sample.kind {
        SampleKind::Empty => Board::new(name, columns),
        SampleKind::Default => place(name, columns, sample_tasks()),
        SampleKind::Large => large_board_with(name, columns, config.sample.count, config.sample.seed),
    }
}
