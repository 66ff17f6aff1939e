use serde::{Deserialize, Serialize};

/// A workflow stage holding an ordered list of task ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub title: String,
    /// Hex color like `#4488FF`
    #[serde(default)]
    pub color: String,
    /// Membership and display order
    #[serde(default)]
    pub task_ids: Vec<String>,
    /// Advisory WIP limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tasks: Option<usize>,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Column {
            id: id.into(),
            title: title.into(),
            color: String::new(),
            task_ids: Vec::new(),
            max_tasks: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_limit(mut self, max_tasks: usize) -> Self {
        self.max_tasks = Some(max_tasks);
        self
    }

    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.task_ids.iter().any(|id| id == task_id)
    }

    pub fn index_of(&self, task_id: &str) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }

    /// WIP indicator for the current task count
    pub fn wip_status(&self) -> WipStatus {
        wip_status(self.task_ids.len(), self.max_tasks)
    }
}

/// Column load relative to its WIP limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WipStatus {
    Safe,
    Warning,
    Exceeded,
}

impl std::fmt::Display for WipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WipStatus::Safe => write!(f, "safe"),
            WipStatus::Warning => write!(f, "warning"),
            WipStatus::Exceeded => write!(f, "exceeded"),
        }
    }
}

/// Warning from 80% of the limit, exceeded strictly above it. A missing or
/// zero limit is always safe.
pub fn wip_status(count: usize, max_tasks: Option<usize>) -> WipStatus {
    let max = match max_tasks {
        Some(m) if m > 0 => m,
        _ => return WipStatus::Safe,
    };
    if count > max {
        WipStatus::Exceeded
    } else if count * 100 >= max * 80 {
        WipStatus::Warning
    } else {
        WipStatus::Safe
    }
}
