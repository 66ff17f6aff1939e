use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from kanban.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub board: BoardInfo,
    /// Column layout. Empty means "use the sample columns".
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
    #[serde(default)]
    pub sample: SampleConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardInfo {
    #[serde(default = "default_board_name")]
    pub name: String,
}

impl Default for BoardInfo {
    fn default() -> Self {
        BoardInfo {
            name: default_board_name(),
        }
    }
}

fn default_board_name() -> String {
    "Kanban".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub max_tasks: Option<usize>,
}

/// Which bootstrap dataset fills the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SampleKind {
    /// Four hand-written tasks
    #[default]
    Default,
    /// Generated tasks spread across the columns
    Large,
    /// Columns only
    Empty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleConfig {
    #[serde(default)]
    pub kind: SampleKind,
    /// Task count for the large dataset
    #[serde(default = "default_sample_count")]
    pub count: usize,
    /// Seed for the large dataset; absent means random
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SampleConfig {
    fn default() -> Self {
        SampleConfig {
            kind: SampleKind::Default,
            count: default_sample_count(),
            seed: None,
        }
    }
}

fn default_sample_count() -> usize {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub show_key_hints: bool,
    #[serde(default)]
    pub colors: HashMap<String, String>,
    #[serde(default)]
    pub tag_colors: HashMap<String, String>,
}
