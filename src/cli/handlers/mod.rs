use chrono::Local;
use tracing::debug;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::model::board::Board;
use crate::model::config::BoardConfig;
use crate::ops::sample;
use crate::ops::search::{self, SearchFilters};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let config = load_session_config(&cli)?;
    let board = sample::bootstrap(&config);
    debug!(
        columns = board.columns.len(),
        tasks = board.task_count(),
        "board loaded"
    );

    match cli.command {
        None => crate::tui::run(board, &config.ui),
        Some(cmd) => match cmd {
            Commands::Board(args) => cmd_board(&board, args, json),
            Commands::Search(args) => cmd_search(&board, args, json),
            Commands::Stats => cmd_stats(&board, json),
            Commands::Check => cmd_check(&board, json),
        },
    }
}

/// Load the config file (explicit `--config`, else `./kanban.toml`) and
/// apply the dataset flags on top of it.
pub fn load_session_config(cli: &Cli) -> Result<BoardConfig, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::ReadError {
        path: ".".into(),
        source: e,
    })?;
    let mut config = config_io::load_config(cli.config.as_deref(), &cwd)?;
    if let Some(kind) = cli.sample {
        config.sample.kind = kind;
    }
    if let Some(count) = cli.count {
        config.sample.count = count;
    }
    if let Some(seed) = cli.seed {
        config.sample.seed = Some(seed);
    }
    Ok(config)
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_board(board: &Board, args: BoardArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(ref id) = args.column
        && board.column(id).is_none()
    {
        return Err(format!("no such column: {} (have: {})", id, board.column_ids().join(", ")).into());
    }

    if json {
        match args.column.as_deref() {
            Some(id) => {
                let tasks = board.column_tasks(id);
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            }
            None => println!("{}", serde_json::to_string_pretty(board)?),
        }
    } else {
        let today = Local::now().date_naive();
        println!("{}", format_board(board, args.column.as_deref(), today));
    }
    Ok(())
}

fn search_filters(args: SearchArgs) -> Result<SearchFilters, Box<dyn std::error::Error>> {
    let priority = match args.priority.as_deref() {
        Some(s) => {
            let parsed = SearchFilters::parse_priority(s);
            if parsed.is_none() && !s.trim().eq_ignore_ascii_case("all") && !s.trim().is_empty() {
                return Err(format!("unknown priority: {} (use low, medium, high, urgent or all)", s).into());
            }
            parsed
        }
        None => None,
    };
    Ok(SearchFilters {
        query: args.query,
        priority,
        assignee: args.assignee.as_deref().and_then(SearchFilters::parse_assignee),
        tags: args.tag,
    })
}

fn cmd_search(board: &Board, args: SearchArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filters = search_filters(args)?;
    let hits = search::filter_tasks(board, &filters);
    debug!(hits = hits.len(), "search");

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else {
        let today = Local::now().date_naive();
        println!("{}", format_search_results(&hits, today));
    }
    Ok(())
}

fn cmd_stats(board: &Board, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let stats = stats_json(board);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", format_stats(&stats));
    }
    Ok(())
}

fn cmd_check(board: &Board, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let problems = board.consistency_problems();
    if json {
        let result = CheckJson {
            ok: problems.is_empty(),
            problems,
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    for p in &problems {
        println!("  {}", p);
    }
    if problems.is_empty() {
        println!("✓ board is consistent");
    } else {
        println!("✗ board has {} problem(s)", problems.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;

    fn args(query: &str, priority: Option<&str>) -> SearchArgs {
        SearchArgs {
            query: query.into(),
            priority: priority.map(|s| s.to_string()),
            assignee: Some("all".into()),
            tag: vec![],
        }
    }

    #[test]
    fn test_search_filters_from_args() {
        let f = search_filters(args("drag", Some("HIGH"))).unwrap();
        assert_eq!(f.query, "drag");
        assert_eq!(f.priority, Some(Priority::High));
        assert_eq!(f.assignee, None);

        let f = search_filters(args("", Some("all"))).unwrap();
        assert!(f.is_empty());
    }

    #[test]
    fn test_unknown_priority_rejected() {
        let err = search_filters(args("", Some("critical"))).unwrap_err();
        assert!(err.to_string().contains("unknown priority"));
    }
}
