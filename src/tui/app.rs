use std::io;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use regex::Regex;
use tracing::{debug, info};

use crate::model::board::Board;
use crate::model::task::Task;
use crate::model::UiConfig;
use crate::ops::drag::DragState;
use crate::ops::form::FormField;
use crate::ops::modal::TaskModal;
use crate::ops::search::{self, SearchFilters};
use crate::util::virtual_list;

use super::input;
use super::render;
use super::theme::Theme;

/// Rows per card: a gap line (where the drop marker goes), title, details
pub const CARD_HEIGHT: usize = 3;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
    /// Create/edit form is open
    Modal,
}

/// How the active drag was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Mouse,
    Keyboard,
}

/// Open create/edit form plus its editing cursor
#[derive(Debug, Clone)]
pub struct ModalState {
    pub modal: TaskModal,
    pub field: FormField,
    /// Byte offset into the focused text field
    pub cursor: usize,
    /// Waiting for y/n after Ctrl+D
    pub confirm_delete: bool,
}

impl ModalState {
    pub fn new(modal: TaskModal) -> Self {
        let cursor = modal.form.title.len();
        ModalState {
            modal,
            field: FormField::Title,
            cursor,
            confirm_delete: false,
        }
    }

    /// Focus a field and put the cursor at the end of its value
    pub fn focus(&mut self, field: FormField) {
        self.field = field;
        self.cursor = self.modal.form.value(field).len();
    }
}

/// Screen geometry of one column from the last render, for hit testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnArea {
    pub column_id: String,
    /// Whole column including its border
    pub area: Rect,
    /// Card list inside the border
    pub list: Rect,
}

/// Result of hit testing a point against the card lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardHit {
    pub column: usize,
    /// Card slot under the point; may equal the card count (below the last card)
    pub slot: usize,
    /// Point is in the lower part of the card
    pub lower_half: bool,
}

/// Main application state
pub struct App {
    pub board: Board,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// Focused column index
    pub cursor_col: usize,
    /// Focused card index within the visible cards of the focused column
    pub cursor_row: usize,
    /// Per-column scroll offset in rows
    pub scroll: Vec<usize>,
    pub drag: DragState,
    pub drag_source: Option<DragSource>,
    pub modal: Option<ModalState>,
    pub show_help: bool,
    /// Query being typed in search mode
    pub search_input: String,
    pub filters: SearchFilters,
    /// One-shot message for the status row, cleared on the next key
    pub status_message: Option<String>,
    /// Column geometry from the last render
    pub layout: Vec<ColumnArea>,
    pub today: NaiveDate,
}

impl App {
    pub fn new(board: Board, ui: &UiConfig) -> Self {
        let scroll = vec![0; board.columns.len()];
        App {
            board,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(ui),
            show_key_hints: ui.show_key_hints,
            cursor_col: 0,
            cursor_row: 0,
            scroll,
            drag: DragState::default(),
            drag_source: None,
            modal: None,
            show_help: false,
            search_input: String::new(),
            filters: SearchFilters::default(),
            status_message: None,
            layout: Vec::new(),
            today: Local::now().date_naive(),
        }
    }

    /// Compiled search query, used for filtering and highlighting
    pub fn search_re(&self) -> Option<Regex> {
        search::query_regex(&self.filters.query)
    }

    /// Cards shown in a column: all of them, or those passing the filters
    pub fn visible_tasks(&self, column_idx: usize) -> Vec<&Task> {
        let Some(column) = self.board.columns.get(column_idx) else {
            return Vec::new();
        };
        let tasks = self.board.column_tasks(&column.id);
        if self.filters.is_empty() {
            return tasks;
        }
        let re = self.search_re();
        tasks
            .into_iter()
            .filter(|t| search::matches_filters(t, &self.filters, re.as_ref()))
            .collect()
    }

    pub fn focused_task(&self) -> Option<&Task> {
        self.visible_tasks(self.cursor_col)
            .get(self.cursor_row)
            .copied()
    }

    pub fn focused_column_id(&self) -> Option<&str> {
        self.board
            .columns
            .get(self.cursor_col)
            .map(|c| c.id.as_str())
    }

    /// Keep the cursor on an existing column and card
    pub fn clamp_cursor(&mut self) {
        let cols = self.board.columns.len();
        self.cursor_col = self.cursor_col.min(cols.saturating_sub(1));
        let rows = self.visible_tasks(self.cursor_col).len();
        self.cursor_row = self.cursor_row.min(rows.saturating_sub(1));
        self.scroll.resize(cols, 0);
    }

    /// Move the cursor onto a task wherever it now lives
    pub fn focus_task(&mut self, task_id: &str) {
        let Some(col) = self
            .board
            .column_of(task_id)
            .and_then(|c| self.board.column_index(&c.id))
        else {
            return;
        };
        self.cursor_col = col;
        if let Some(row) = self
            .visible_tasks(col)
            .iter()
            .position(|t| t.id == task_id)
        {
            self.cursor_row = row;
        }
        self.reveal_cursor();
    }

    /// Scroll the focused column so the cursor card is on screen
    pub fn reveal_cursor(&mut self) {
        let viewport = self
            .layout
            .get(self.cursor_col)
            .map_or(0, |c| c.list.height as usize);
        if viewport == 0 {
            return;
        }
        self.scroll.resize(self.board.columns.len(), 0);
        if let Some(s) = self.scroll.get_mut(self.cursor_col) {
            *s = virtual_list::scroll_to_reveal(self.cursor_row, CARD_HEIGHT, viewport, *s);
        }
    }

    /// Whether moves are allowed right now. A filtered view hides cards, so
    /// visible positions would not map onto column positions.
    pub fn can_move_cards(&self) -> bool {
        self.filters.is_empty()
    }

    /// Which card slot the point (x, y) is over, if it is inside a column's
    /// card list
    pub fn hit_test(&self, x: u16, y: u16) -> Option<CardHit> {
        let (column, col) = self
            .layout
            .iter()
            .enumerate()
            .find(|(_, c)| contains(c.area, x, y))?;
        let scroll = self.scroll.get(column).copied().unwrap_or(0);
        let count = self.visible_tasks(column).len();
        let row = if y < col.list.y {
            0
        } else {
            (y - col.list.y) as usize + scroll
        };
        let slot = row / CARD_HEIGHT;
        let offset = row % CARD_HEIGHT;
        Some(CardHit {
            column,
            slot: slot.min(count),
            lower_half: slot < count && offset * 2 >= CARD_HEIGHT,
        })
    }

    /// Post-removal insertion index for a drop on `hit`. A card dropped in
    /// its own column is counted out, so slots below it shift up by one.
    pub fn drop_index(&self, hit: &CardHit) -> usize {
        let slot = if hit.lower_half { hit.slot + 1 } else { hit.slot };
        let source_pos = self.drag.dragged_task().and_then(|id| {
            let column = self.board.columns.get(hit.column)?;
            column.index_of(id)
        });
        drop_slot_to_index(source_pos, slot)
    }
}

/// Convert an insert-before slot into an index in the list with the dragged
/// card removed. `source_pos` is the card's index when it is in this column.
pub fn drop_slot_to_index(source_pos: Option<usize>, slot: usize) -> usize {
    match source_pos {
        Some(src) if slot > src => slot - 1,
        _ => slot,
    }
}

/// Inverse of [`drop_slot_to_index`], for drawing the drop marker
pub fn drop_index_to_slot(source_pos: Option<usize>, index: usize) -> usize {
    match source_pos {
        Some(src) if index > src => index + 1,
        _ => index,
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

/// Run the TUI application
pub fn run(board: Board, ui: &UiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(board, ui);
    info!(
        columns = app.board.columns.len(),
        tasks = app.board.task_count(),
        "tui start"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        if app.should_quit {
            debug!("quit");
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::sample;

    fn app() -> App {
        App::new(sample::default_board(), &UiConfig::default())
    }

    #[test]
    fn test_drop_slot_conversion() {
        // Card at 1 dropped before slot 3 lands at index 2 once it is removed
        assert_eq!(drop_slot_to_index(Some(1), 3), 2);
        assert_eq!(drop_slot_to_index(Some(1), 1), 1);
        assert_eq!(drop_slot_to_index(Some(1), 0), 0);
        assert_eq!(drop_slot_to_index(None, 3), 3);

        assert_eq!(drop_index_to_slot(Some(1), 2), 3);
        assert_eq!(drop_index_to_slot(Some(1), 1), 1);
        assert_eq!(drop_index_to_slot(None, 2), 2);
    }

    #[test]
    fn test_visible_tasks_follow_filters() {
        let mut app = app();
        assert_eq!(app.visible_tasks(0).len(), 2);
        app.filters.query = "typescript".into();
        assert_eq!(app.visible_tasks(0).len(), 0);
        assert_eq!(app.visible_tasks(1).len(), 1);
        assert!(!app.can_move_cards());
        assert!(app.visible_tasks(99).is_empty());
    }

    #[test]
    fn test_clamp_cursor() {
        let mut app = app();
        app.cursor_col = 10;
        app.cursor_row = 10;
        app.clamp_cursor();
        assert_eq!(app.cursor_col, 3);
        assert_eq!(app.cursor_row, 0);
    }

    #[test]
    fn test_focus_task_follows_moves() {
        let mut app = app();
        app.focus_task("task-3");
        assert_eq!((app.cursor_col, app.cursor_row), (1, 0));
        app.focus_task("missing");
        assert_eq!((app.cursor_col, app.cursor_row), (1, 0));
    }

    #[test]
    fn test_hit_test() {
        let mut app = app();
        app.layout = vec![ColumnArea {
            column_id: "todo".into(),
            area: Rect::new(0, 0, 20, 12),
            list: Rect::new(1, 1, 18, 10),
        }];
        // Row 1 is the first card's gap line
        let hit = app.hit_test(5, 1).unwrap();
        assert_eq!(hit, CardHit { column: 0, slot: 0, lower_half: false });
        // Row 3 is the first card's details line
        let hit = app.hit_test(5, 3).unwrap();
        assert_eq!(hit, CardHit { column: 0, slot: 0, lower_half: true });
        // Below the two cards
        let hit = app.hit_test(5, 10).unwrap();
        assert_eq!(hit, CardHit { column: 0, slot: 2, lower_half: false });
        assert!(app.hit_test(30, 5).is_none());
    }
}
