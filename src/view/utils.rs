//! Utility functions for rendering UI components

use std::ops::Range;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

/// Card title palette; each id maps to one entry stably
const TITLE_COLORS: [Color; 3] = [
    Color::Rgb(0x9d, 0x84, 0x57),
    Color::Rgb(0x43, 0x96, 0xc9),
    Color::Rgb(0xa1, 0x61, 0xc2),
];

pub fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    selected_index: Option<usize>,
    block: Block,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(selected_index);

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Bordered card; the selected card of a focused section is highlighted
pub fn render_card(frame: &mut Frame, area: Rect, lines: Vec<Line>, selected: bool, focused: bool) {
    let border_style = match (selected, focused) {
        (true, true) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::White),
        _ => Style::default().fg(Color::DarkGray),
    };
    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(card, area);
}

/// Title style of a card, bold when selected
pub fn title_style(id: &str, selected: bool) -> Style {
    let style = Style::default().fg(title_color(id));
    if selected {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Stable title colour for a card id
pub fn title_color(id: &str) -> Color {
    let key = if id.is_empty() { "default" } else { id };
    let hash = key
        .encode_utf16()
        .fold(0i32, |hash, unit| {
            (unit as i32).wrapping_add((hash << 5).wrapping_sub(hash))
        });
    TITLE_COLORS[(hash.unsigned_abs() % TITLE_COLORS.len() as u32) as usize]
}

/// Greedy word wrap, keeping at most `max_lines` lines; the last kept
/// line is ellipsized when text remains
pub fn wrap_text(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut words = text.split_whitespace().peekable();

    while let Some(word) = words.next() {
        let candidate_len = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if candidate_len <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if lines.len() == max_lines {
            break;
        }
        current = truncate_string(word, width);
    }

    if !current.is_empty() && lines.len() < max_lines {
        lines.push(current);
    }

    let consumed: usize = lines.iter().map(|l| l.split_whitespace().count()).sum();
    if consumed < text.split_whitespace().count() {
        if let Some(last) = lines.last_mut() {
            let shortened = truncate_string(last, width.saturating_sub(3));
            *last = format!("{}...", shortened.trim_end_matches("..."));
        }
    }
    lines
}

/// Page of items shown by a carousel so that `selected` stays visible
pub fn carousel_window(selected: usize, len: usize, visible: usize) -> Range<usize> {
    let visible = visible.max(1);
    if len == 0 {
        return 0..0;
    }
    let selected = selected.min(len - 1);
    let start = (selected / visible) * visible;
    start..(start + visible).min(len)
}

/// Rows of a grid shown so that the row holding `selected` stays visible
pub fn grid_window(selected: usize, len: usize, columns: usize, visible_rows: usize) -> Range<usize> {
    let columns = columns.max(1);
    let visible_rows = visible_rows.max(1);
    if len == 0 {
        return 0..0;
    }
    let total_rows = len.div_ceil(columns);
    let row = selected.min(len - 1) / columns;
    let first_row = (row / visible_rows) * visible_rows;
    first_row..(first_row + visible_rows).min(total_rows)
}

/// Carousel paging hints, lit when there is more in that direction
pub fn carousel_arrows(has_before: bool, has_after: bool) -> Line<'static> {
    let style = |on: bool| {
        if on {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    Line::from(vec![
        Span::styled(" [ ◀ ", style(has_before)),
        Span::styled("▶ ] ", style(has_after)),
    ])
}
