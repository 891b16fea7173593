//! Overlay rendering (open menu, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::model::{MenuEntry, MenuKind, OpenMenu};
use super::utils::truncate_string;

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4)).max(1);
    let height = height.min(area.height.saturating_sub(4)).max(1);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

fn menu_title(kind: &MenuKind) -> String {
    match kind {
        MenuKind::PodcastLayout => " Podcasts layout ".to_string(),
        MenuKind::EpisodeLayout => " Episodes layout ".to_string(),
        MenuKind::EpisodeActions { title, .. } => format!(" {} ", truncate_string(title, 30)),
    }
}

/// Entries of the open menu with separators after grouped actions
fn menu_items(menu: &OpenMenu) -> (Vec<ListItem<'static>>, usize) {
    let mut items = Vec::new();
    let mut selected_row = 0;

    for (i, entry) in menu.entries.iter().enumerate() {
        let style = if i == menu.selected {
            selected_row = items.len();
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        items.push(ListItem::new(format!(" {} ", entry.label())).style(style));

        let ends_group = matches!(entry, MenuEntry::Episode(action) if action.ends_group());
        if ends_group && i + 1 < menu.entries.len() {
            items.push(ListItem::new("─".repeat(28)).style(Style::default().fg(Color::DarkGray)));
        }
    }
    (items, selected_row)
}

pub fn render_menu(frame: &mut Frame, menu: &OpenMenu) {
    let (items, selected_row) = menu_items(menu);
    let widest = menu
        .entries
        .iter()
        .map(|entry| entry.label().chars().count())
        .max()
        .unwrap_or(20) as u16;

    let popup_area = centered(frame.area(), (widest + 6).max(34), items.len() as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(menu_title(&menu.kind))
            .title_bottom(Line::from(" ↑↓ Enter Esc ").right_aligned())
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );

    let mut list_state = ListState::default();
    list_state.select(Some(selected_row));
    frame.render_stateful_widget(list, popup_area, &mut list_state);
}

pub fn render_help_popup(frame: &mut Frame) {
    let keybindings = [
        ("", "── Navigation ──"),
        ("Tab / Shift+Tab", "Cycle sections"),
        ("← → ↑ ↓", "Move selection"),
        ("[ / ]", "Page carousel"),
        ("/ or G", "Focus search"),
        ("Alt+← / Alt+→", "Back / forward"),
        ("", ""),
        ("", "── Search ──"),
        ("Enter", "Search now"),
        ("Esc / Ctrl+U", "Clear input"),
        ("Paste link", "Search its ?q= value"),
        ("", ""),
        ("", "── Results ──"),
        ("Enter", "Open podcast / episode menu"),
        ("M", "Layout menu"),
        ("V", "Cycle layout"),
        ("", ""),
        ("", "── General ──"),
        ("H / ?", "Toggle this help"),
        ("Q / Ctrl+Q", "Quit"),
    ];

    let popup_area = centered(frame.area(), 62, keybindings.len() as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help (H or Esc to close) ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(help_text, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EpisodeAction;

    #[test]
    fn episode_menu_has_two_separators() {
        let menu = OpenMenu {
            kind: MenuKind::EpisodeActions {
                episode_id: "1".into(),
                title: "Pilot".into(),
            },
            entries: EpisodeAction::ALL.into_iter().map(MenuEntry::Episode).collect(),
            selected: 2,
        };
        let (items, selected_row) = menu_items(&menu);
        assert_eq!(items.len(), 6);
        // "Go to Podcast" sits after the first separator
        assert_eq!(selected_row, 3);
    }
}
