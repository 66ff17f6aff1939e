use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::UiConfig;
use crate::ops::sample;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// The four-card demo board with the first card focused
pub fn sample_app() -> App {
    App::new(sample::default_board(), &UiConfig::default())
}

/// A generated board with `count` cards and a fixed seed
pub fn large_app(count: usize) -> App {
    App::new(sample::large_board(count, Some(7)), &UiConfig::default())
}

/// Full-screen render through the top-level renderer
pub fn render_app(app: &mut App, w: u16, h: u16) -> String {
    render_to_string(w, h, |frame, _| super::render(frame, app))
}

/// Board area only, so column geometry starts at the top-left corner
pub fn render_board_to_string(app: &mut App, w: u16, h: u16) -> String {
    render_to_string(w, h, |frame, area| {
        super::board_view::render_board(frame, app, area)
    })
}
