use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::column::Column;
use super::task::Task;

/// The in-memory store: every task record plus the ordered columns that
/// reference them by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub name: String,
    pub columns: Vec<Column>,
    pub tasks: IndexMap<String, Task>,
}

impl Board {
    /// A board with the given columns and no tasks
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Board {
            name: name.into(),
            columns,
            tasks: IndexMap::new(),
        }
    }

    /// Assemble a board from an external snapshot (sample data, config).
    /// Tasks are keyed by their own id.
    pub fn from_parts(name: impl Into<String>, columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        let tasks = tasks.into_iter().map(|t| (t.id.clone(), t)).collect();
        Board {
            name: name.into(),
            columns,
            tasks,
        }
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub(crate) fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    /// Tasks of a column in display order. Ids without a record are skipped.
    pub fn column_tasks(&self, column_id: &str) -> Vec<&Task> {
        self.column(column_id)
            .map(|col| {
                col.task_ids
                    .iter()
                    .filter_map(|id| self.tasks.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The column whose list holds `task_id`
    pub fn column_of(&self, task_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.contains(task_id))
    }

    /// (column index, row index) of a task id
    pub fn position_of(&self, task_id: &str) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(ci, c)| c.index_of(task_id).map(|ri| (ci, ri)))
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Ids of every column, in board order
    pub fn column_ids(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.id.as_str()).collect()
    }

    /// Check the membership invariants: each id in at most one column, each
    /// listed id has a record, and each record's status names its column.
    /// Returns human-readable violations; empty means consistent.
    pub fn consistency_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen: IndexMap<&str, &str> = IndexMap::new();
        for col in &self.columns {
            for id in &col.task_ids {
                if let Some(prev) = seen.insert(id.as_str(), col.id.as_str()) {
                    problems.push(format!("{} listed in both {} and {}", id, prev, col.id));
                }
                match self.tasks.get(id) {
                    None => problems.push(format!("{} in {} has no task record", id, col.id)),
                    Some(task) if task.status != col.id => problems.push(format!(
                        "{} has status {} but sits in {}",
                        id, task.status, col.id
                    )),
                    Some(_) => {}
                }
            }
        }
        problems
    }
}
