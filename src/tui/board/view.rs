// File: src/tui/board/view.rs
use crate::model::{ItemStatus, PlanItem};
use crate::tui::board::state::{BoardState, InputMode};
use unicode_width::UnicodeWidthStr;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

fn status_color(status: ItemStatus) -> Color {
    match status {
        ItemStatus::Idea => Color::DarkGray,
        ItemStatus::Scripting => Color::Yellow,
        ItemStatus::Filming => Color::Magenta,
        ItemStatus::Editing => Color::Blue,
        ItemStatus::Published => Color::Green,
        ItemStatus::Shelved => Color::Gray,
    }
}

pub fn draw(f: &mut Frame, state: &mut BoardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // tree
            Constraint::Length(6), // details
            Constraint::Length(3), // footer / input line
        ])
        .split(f.area());

    draw_tree(f, state, chunks[0]);
    draw_details(f, state, chunks[1]);
    draw_footer(f, state, chunks[2]);

    if state.show_help {
        draw_help(f);
    }
}

fn draw_tree(f: &mut Frame, state: &mut BoardState, area: Rect) {
    let max_title_width = area.width.saturating_sub(30) as usize;
    let rows = state.store.tree(&state.collapsed);

    let items: Vec<ListItem> = rows
        .iter()
        .map(|(depth, item)| tree_row(state, *depth, item, max_title_width))
        .collect();

    let count = state.store.items.len();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Board ({} items) ", count)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    f.render_stateful_widget(list, area, &mut state.list_state);
}

fn tree_row(
    state: &BoardState,
    depth: usize,
    item: &PlanItem,
    max_title_width: usize,
) -> ListItem<'static> {
    let marker = if state.store.children(&item.id).is_empty() {
        "  "
    } else if state.collapsed.contains(&item.id) {
        "+ "
    } else {
        "- "
    };

    let mut title = item.title.clone();
    if max_title_width > 1 && title.width() > max_title_width {
        let mut truncated = String::new();
        for c in title.chars() {
            if truncated.width() + 1 >= max_title_width {
                break;
            }
            truncated.push(c);
        }
        truncated.push('…');
        title = truncated;
    }

    let title_style = if item.status.is_done() {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };

    ListItem::new(Line::from(vec![
        Span::raw("  ".repeat(depth)),
        Span::raw(marker),
        Span::styled(
            format!("[{}] ", item.kind.label()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(title, title_style),
        Span::raw(" "),
        Span::styled(
            format!("({})", item.status.label()),
            Style::default().fg(status_color(item.status)),
        ),
    ]))
}

fn draw_details(f: &mut Frame, state: &BoardState, area: Rect) {
    let text = if let Some(item) = state.selected_item() {
        let children = state.store.children(&item.id).len();
        let mut lines = vec![Line::from(vec![
            Span::styled("Status: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                item.status.label(),
                Style::default().fg(status_color(item.status)),
            ),
            Span::raw(format!(
                "   Children: {}   Updated: {}",
                children,
                item.updated_at.format("%Y-%m-%d %H:%M")
            )),
        ])];
        if item.notes.is_empty() {
            lines.push(Line::from("No notes."));
        } else {
            lines.push(Line::from(item.notes.clone()));
        }
        lines
    } else {
        vec![Line::from("Nothing selected.")]
    };

    let block = Block::default().borders(Borders::ALL).title(" Details ");
    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }).block(block), area);
}

fn draw_footer(f: &mut Frame, state: &BoardState, area: Rect) {
    let (title, text, style) = match state.mode {
        InputMode::Creating | InputMode::CreatingChild => (
            format!(
                " New {} (Tab:kind  Enter:save  Esc:cancel) ",
                state.new_kind.label()
            ),
            format!("{}_", state.input_buffer),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::EditingTitle => (
            " Edit title (Enter:save  Esc:cancel) ".to_string(),
            format!("{}_", state.input_buffer),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::EditingNotes => (
            " Edit notes (Enter:save  Esc:cancel) ".to_string(),
            format!("{}_", state.input_buffer),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::ConfirmDelete => (
            " Confirm ".to_string(),
            "Delete selected item? Children move up one level. (y/N)".to_string(),
            Style::default().fg(Color::Red),
        ),
        InputMode::Normal => (
            " a:Add  A:Add child  e/E:Edit  s:Status  Space:Fold  d:Delete  ?:Help  q:Quit "
                .to_string(),
            state.message.clone(),
            Style::default(),
        ),
    };

    let block = Block::default().borders(Borders::ALL).title(title);
    f.render_widget(Paragraph::new(text).style(style).block(block), area);
}

fn draw_help(f: &mut Frame) {
    let text = vec![
        Line::from(vec![
            Span::styled(
                " ITEMS ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" a:Add  A:Add child  e:Edit title  E:Edit notes  d:Delete"),
        ]),
        Line::from(vec![
            Span::styled(
                " BOARD ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" s:Cycle status  Space:Collapse/expand  j/k:Navigate"),
        ]),
        Line::from(vec![
            Span::styled(
                " DATA ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Export/import via CLI: 'board export', 'board import <file>'"),
        ]),
        Line::from(vec![
            Span::styled(
                " KINDS ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" series/video/short (Tab while adding)"),
        ]),
    ];

    let area = centered_rect(60, 40, f.area());
    let block = Block::default().borders(Borders::ALL).title(" Help (?) ");
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(text).block(block), area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
