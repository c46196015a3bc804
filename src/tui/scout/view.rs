// File: src/tui/scout/view.rs
use crate::tui::scout::state::{InputMode, RequestShape, ScoutState};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

pub fn draw(f: &mut Frame, state: &mut ScoutState) {
    let form_height = if state.mode == InputMode::EditingField {
        state.field_count() as u16 + 2
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // controls
            Constraint::Length(form_height), // request form (while editing)
            Constraint::Min(0),              // listing table
            Constraint::Length(3),           // status / error bar
        ])
        .split(f.area());

    draw_controls(f, state, chunks[0]);
    if state.mode == InputMode::EditingField {
        draw_form(f, state, chunks[1]);
    }
    draw_table(f, state, chunks[2]);
    draw_status(f, state, chunks[3]);

    if state.show_help {
        draw_help(f);
    }
}

fn draw_controls(f: &mut Frame, state: &ScoutState, area: Rect) {
    let shape = match state.shape {
        RequestShape::Urls => "portal URLs",
        RequestShape::Search => "search",
    };
    let threshold_span = if state.mode == InputMode::EditingThreshold {
        Span::styled(
            format!("≥ {}_", state.input_buffer),
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::raw(format!("≥ {}%", state.opts.min_undervalue_pct))
    };

    let line = Line::from(vec![
        Span::styled("Mode: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(shape),
        Span::raw("   Undervalue "),
        threshold_span,
        Span::raw("   Area required: "),
        Span::raw(if state.opts.require_area { "yes" } else { "no" }),
        Span::raw("   Sort: "),
        Span::raw(state.sort.label()),
    ]);

    let block = Block::default().borders(Borders::ALL).title(" Scout ");
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_form(f: &mut Frame, state: &ScoutState, area: Rect) {
    let mut lines = Vec::new();
    for idx in 0..state.field_count() {
        let label = state.field_label(idx);
        let value = state.field_value(idx);
        let style = if idx == state.active_field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let cursor = if idx == state.active_field { "_" } else { "" };
        lines.push(Line::from(Span::styled(
            format!("{:<14} {}{}", label, value, cursor),
            style,
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Request (Tab:next field  Enter/Esc:done) ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_table(f: &mut Frame, state: &mut ScoutState, area: Rect) {
    let visible = state.visible();

    let header = Row::new(vec![
        Cell::from("Source"),
        Cell::from("Price"),
        Cell::from("Beds"),
        Cell::from("sqm"),
        Cell::from("£/sqm"),
        Cell::from("Under %"),
        Cell::from("Address"),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = visible
        .iter()
        .map(|l| {
            let undervalue_style = if l.undervalue_pct.at_least(30.0) {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(l.source().to_string()),
                Cell::from(l.price.display(0)),
                Cell::from(l.bedrooms_display()),
                Cell::from(l.area_sqm.display(0)),
                Cell::from(l.price_per_sqm.display(0)),
                Cell::from(l.undervalue_pct.display(1)).style(undervalue_style),
                Cell::from(l.address().to_string()),
            ])
        })
        .collect();

    let title = if state.loading {
        " Listings (loading...) ".to_string()
    } else {
        format!(" Listings ({}) ", visible.len())
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title))
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    f.render_stateful_widget(table, area, &mut state.table_state);
}

fn draw_status(f: &mut Frame, state: &ScoutState, area: Rect) {
    let (text, style) = if let Some(err) = &state.error {
        (
            format!("Error: {}", err),
            Style::default().fg(Color::Red),
        )
    } else if state.loading {
        (
            format!("{} (f to fetch is disabled while loading)", state.message),
            Style::default().fg(Color::Yellow),
        )
    } else if let Some(l) = state.selected_listing() {
        (
            l.url().unwrap_or(&state.message).to_string(),
            Style::default(),
        )
    } else {
        (state.message.clone(), Style::default())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" f:Fetch  e:Edit request  Tab:Shape  t:Threshold  a:Area  o:Sort  ?:Help  q:Quit ");
    f.render_widget(
        Paragraph::new(text).style(style).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

fn draw_help(f: &mut Frame) {
    let text = vec![
        Line::from(vec![
            Span::styled(
                " REQUEST ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Tab:URLs/search  e:Edit fields  f:Fetch"),
        ]),
        Line::from(vec![
            Span::styled(
                " FILTER ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" t:Undervalue threshold  a:Require floor area"),
        ]),
        Line::from(vec![
            Span::styled(
                " SORT ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" o:Cycle undervalue% / price / £ per sqm"),
        ]),
        Line::from(vec![
            Span::styled(
                " NAVIGATION ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" j/k:Up/Down  g/G:First/Last  q:Quit"),
        ]),
    ];

    let area = centered_rect(60, 40, f.area());
    let block = Block::default().borders(Borders::ALL).title(" Help (?) ");
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Left)
            .block(block),
        area,
    );
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
