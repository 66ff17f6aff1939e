use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::column::Column;
use crate::model::task::{Priority, Task, TaskUpdate};

/// Date format used by the due-date field
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// A field of the task form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Title,
    Description,
    Status,
    Priority,
    Assignee,
    DueDate,
    Tags,
}

impl FormField {
    /// Fields in display (and tab) order
    pub const ALL: [FormField; 7] = [
        FormField::Title,
        FormField::Description,
        FormField::Status,
        FormField::Priority,
        FormField::Assignee,
        FormField::DueDate,
        FormField::Tags,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title *",
            FormField::Description => "Description",
            FormField::Status => "Status *",
            FormField::Priority => "Priority",
            FormField::Assignee => "Assignee",
            FormField::DueDate => "Due Date",
            FormField::Tags => "Tags",
        }
    }

    /// Whether the field takes free text (others are selects)
    pub fn is_text(self) -> bool {
        !matches!(self, FormField::Status | FormField::Priority)
    }

    pub fn next(self) -> FormField {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> FormField {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Field-keyed validation messages
pub type FormErrors = BTreeMap<FormField, String>;

/// Draft values for the create/edit form. Nothing here touches the board
/// until the draft is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    /// Selected column id
    pub status: String,
    pub priority: Priority,
    pub assignee: String,
    /// Comma separated
    pub tags: String,
    /// `YYYY-MM-DD`
    pub due_date: String,
    pub errors: FormErrors,
}

impl TaskForm {
    /// Empty draft with the first column preselected
    pub fn blank(columns: &[Column]) -> Self {
        TaskForm {
            title: String::new(),
            description: String::new(),
            status: columns.first().map(|c| c.id.clone()).unwrap_or_default(),
            priority: Priority::Medium,
            assignee: String::new(),
            tags: String::new(),
            due_date: String::new(),
            errors: FormErrors::new(),
        }
    }

    /// Draft prefilled from an existing task
    pub fn for_task(task: &Task) -> Self {
        TaskForm {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            status: task.status.clone(),
            priority: task.priority.unwrap_or(Priority::Medium),
            assignee: task.assignee.clone().unwrap_or_default(),
            tags: task.tags.join(", "),
            due_date: task
                .due_date
                .map(|d| d.format(DATE_INPUT_FORMAT).to_string())
                .unwrap_or_default(),
            errors: FormErrors::new(),
        }
    }

    /// Current raw value of a field
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::Status => &self.status,
            FormField::Priority => self.priority.label(),
            FormField::Assignee => &self.assignee,
            FormField::DueDate => &self.due_date,
            FormField::Tags => &self.tags,
        }
    }

    /// Set a field and clear its error. Unknown priorities are ignored.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.title = value,
            FormField::Description => self.description = value,
            FormField::Status => self.status = value,
            FormField::Priority => {
                if let Some(p) = Priority::parse(&value) {
                    self.priority = p;
                }
            }
            FormField::Assignee => self.assignee = value,
            FormField::DueDate => self.due_date = value,
            FormField::Tags => self.tags = value,
        }
        self.errors.remove(&field);
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
        self.errors.remove(&FormField::Priority);
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(|s| s.as_str())
    }

    /// Run the validation rules, replacing the stored errors. Returns true
    /// when the draft can be saved.
    pub fn validate(&mut self) -> bool {
        let mut errors = FormErrors::new();
        if self.title.trim().is_empty() {
            errors.insert(FormField::Title, "Title is required".to_string());
        }
        if self.status.trim().is_empty() {
            errors.insert(FormField::Status, "Status is required".to_string());
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validate and normalize into a full update. On failure the errors are
    /// kept on the form and returned.
    pub fn submit(&mut self) -> Result<TaskUpdate, FormErrors> {
        if !self.validate() {
            return Err(self.errors.clone());
        }
        Ok(TaskUpdate {
            title: Some(self.title.trim().to_string()),
            description: Some(non_empty(&self.description)),
            status: Some(self.status.clone()),
            priority: Some(Some(self.priority)),
            assignee: Some(non_empty(&self.assignee)),
            tags: Some(split_tags(&self.tags)),
            due_date: Some(parse_due_date(&self.due_date)),
        })
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Split a comma separated tag string, dropping empty entries
pub fn split_tags(s: &str) -> Vec<String> {
    s.split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Parse a `YYYY-MM-DD` field. Blank or unparseable input means no date.
pub fn parse_due_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_INPUT_FORMAT).ok()
}
