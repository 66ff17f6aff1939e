use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use regex::Regex;

use crate::model::column::{Column, WipStatus};
use crate::model::task::Task;
use crate::tui::app::{App, CARD_HEIGHT, ColumnArea, Mode, drop_index_to_slot};
use crate::util::{dates, unicode, virtual_list};

use super::push_highlighted_spans;

/// Render every column side by side and record their geometry for hit testing
pub fn render_board(frame: &mut Frame, app: &mut App, area: Rect) {
    app.layout.clear();
    let n = app.board.columns.len();
    if n == 0 {
        let line = Line::from(Span::styled(
            " No columns configured",
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, n as u32); n])
        .split(area);

    app.scroll.resize(n, 0);
    for (i, col_area) in areas.iter().enumerate() {
        let list = render_column(frame, app, i, *col_area);
        let total = virtual_list::total_height(app.visible_tasks(i).len(), CARD_HEIGHT);
        app.scroll[i] = app.scroll[i].min(total.saturating_sub(list.height as usize));
        let column_id = app.board.columns[i].id.clone();
        app.layout.push(ColumnArea {
            column_id,
            area: *col_area,
            list,
        });
    }
}

/// Column header text: title plus `count/limit`
pub(super) fn header_spans(app: &App, column: &Column) -> Vec<Span<'static>> {
    let bg = app.theme.background;
    let status = column.wip_status();
    let count = match column.max_tasks {
        Some(max) => format!("{}/{}", column.len(), max),
        None => column.len().to_string(),
    };
    let mut spans = vec![
        Span::styled(
            format!(" {} ", column.title),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} ", count),
            Style::default().fg(app.theme.wip_color(status)).bg(bg),
        ),
    ];
    if status == WipStatus::Exceeded {
        spans.push(Span::styled(
            "! ",
            Style::default()
                .fg(app.theme.red)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    }
    spans
}

fn render_column(frame: &mut Frame, app: &App, idx: usize, area: Rect) -> Rect {
    let column = &app.board.columns[idx];
    let bg = app.theme.background;
    let focused = idx == app.cursor_col;

    let border_color = if app.drag.is_over(&column.id) {
        app.theme.highlight
    } else if focused {
        app.theme.text_bright
    } else {
        app.theme.column_color(column)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .title(Line::from(header_spans(app, column)))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let tasks = app.visible_tasks(idx);
    let width = inner.width as usize;
    let viewport = inner.height as usize;
    let total = virtual_list::total_height(tasks.len(), CARD_HEIGHT);
    let scroll = app
        .scroll
        .get(idx)
        .copied()
        .unwrap_or(0)
        .min(total.saturating_sub(viewport));

    // Slot where the drop marker goes, in insert-before terms
    let marker_slot = app
        .drag
        .target()
        .filter(|t| t.column == column.id)
        .map(|t| {
            let source_pos = app.drag.dragged_task().and_then(|id| column.index_of(id));
            drop_index_to_slot(source_pos, t.index)
        });

    let search_re = app.search_re();
    let mut lines: Vec<Line> = Vec::new();
    let range = virtual_list::visible_range(tasks.len(), CARD_HEIGHT, viewport, scroll, 0);
    let first = range.start;
    for i in range.clone() {
        let task = tasks[i];
        let card = CardView {
            focused: focused && i == app.cursor_row && app.mode == Mode::Navigate,
            ghost: app.drag.dragged_task() == Some(task.id.as_str()),
            marker: marker_slot == Some(i),
        };
        card_lines(app, task, &card, width, search_re.as_ref(), &mut lines);
    }
    if range.end == tasks.len() && marker_slot.is_some_and(|s| s >= tasks.len()) {
        lines.push(marker_line(app, width));
    }
    if tasks.is_empty() && marker_slot.is_none() {
        lines.push(Line::from(""));
        let label = if app.filters.is_empty() {
            "(no tasks)"
        } else {
            "(no matches)"
        };
        lines.push(Line::from(Span::styled(
            format!(" {}", label),
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    let skip = scroll.saturating_sub(first * CARD_HEIGHT);
    let visible: Vec<Line> = lines.into_iter().skip(skip).take(viewport).collect();
    frame.render_widget(Paragraph::new(visible).style(Style::default().bg(bg)), inner);
    inner
}

struct CardView {
    focused: bool,
    /// The card being dragged, drawn in place
    ghost: bool,
    /// Drop marker sits on this card's gap line
    marker: bool,
}

fn marker_line(app: &App, width: usize) -> Line<'static> {
    Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default()
            .fg(app.theme.highlight)
            .bg(app.theme.background),
    ))
}

/// Push the gap, title and details lines of one card
fn card_lines(
    app: &App,
    task: &Task,
    card: &CardView,
    width: usize,
    search_re: Option<&Regex>,
    lines: &mut Vec<Line>,
) {
    let theme = &app.theme;
    let bg = if card.focused {
        theme.selection_bg
    } else {
        theme.background
    };

    // Gap line
    if card.marker {
        lines.push(marker_line(app, width));
    } else {
        lines.push(Line::from(""));
    }

    // Title line
    let mut title_style = Style::default().fg(theme.text_bright).bg(bg);
    if card.ghost {
        title_style = Style::default()
            .fg(theme.dim)
            .bg(bg)
            .add_modifier(Modifier::ITALIC);
    }
    let prefix = if card.ghost {
        Span::styled("\u{2506}", Style::default().fg(theme.dim).bg(bg))
    } else if card.focused {
        Span::styled("\u{258C}", Style::default().fg(theme.highlight).bg(bg))
    } else {
        Span::styled(" ", Style::default().bg(bg))
    };
    let dot = match task.priority {
        Some(p) => Span::styled(
            "\u{25CF} ",
            Style::default().fg(theme.priority_color(p)).bg(bg),
        ),
        None => Span::styled("  ", Style::default().bg(bg)),
    };
    let mut spans = vec![prefix, dot];
    let title = unicode::truncate_to_width(&task.title, width.saturating_sub(3));
    let highlight = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);
    push_highlighted_spans(&mut spans, &title, title_style, highlight, search_re);
    lines.push(Line::from(spans));

    // Details line: assignee initials, tags, due date
    let mut details: Vec<Span> = vec![Span::styled("   ", Style::default().bg(bg))];
    if let Some(a) = &task.assignee {
        details.push(Span::styled(
            format!("{} ", dates::initials(a)),
            Style::default().fg(theme.purple).bg(bg),
        ));
    }
    for tag in &task.tags {
        details.push(Span::styled(
            format!("#{} ", tag),
            Style::default().fg(theme.tag_color(tag)).bg(bg),
        ));
    }
    if let Some(due) = task.due_date {
        let color = if dates::is_overdue(due, app.today) {
            theme.red
        } else {
            theme.dim
        };
        details.push(Span::styled(
            due.format("%b %d").to_string(),
            Style::default().fg(color).bg(bg),
        ));
    }
    lines.push(Line::from(fit_spans(details, width)));
}

/// Cut a run of spans to `width` cells, truncating the span that overflows
fn fit_spans(spans: Vec<Span<'_>>, width: usize) -> Vec<Span<'_>> {
    let mut out = Vec::new();
    let mut used = 0;
    for span in spans {
        let w = unicode::display_width(&span.content);
        if used + w <= width {
            used += w;
            out.push(span);
        } else {
            let rest = unicode::truncate_to_width(&span.content, width - used);
            out.push(Span::styled(rest, span.style));
            break;
        }
    }
    out
}
