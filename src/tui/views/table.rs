//! Results table - one row per visible record

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::tui::app::App;

/// Draw the results table
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Cheat sheets ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    if app.visible.is_empty() {
        let message = if app.catalog.is_empty() {
            "No cheat sheets yet. Press 'i' to add sample data or 'a' to add one."
        } else {
            "No cheat sheets match your filters (Ctrl+c clears them)"
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner_area);
        return;
    }

    let body_rows = inner_area.height.saturating_sub(1) as usize;

    let rows: Vec<Row> = app
        .visible_records()
        .skip(app.scroll_offset)
        .take(body_rows)
        .map(|(_, record)| {
            Row::new(vec![
                Cell::from(record.display_title().to_string()),
                Cell::from(record.display_description().to_string())
                    .style(Style::default().fg(Color::Gray)),
                Cell::from(record.display_command().to_string())
                    .style(Style::default().fg(Color::Green)),
                Cell::from(record.tags_joined()).style(Style::default().fg(Color::Cyan)),
            ])
        })
        .collect();

    let header = Row::new(vec!["Title", "Description", "Command", "Tags"])
        .style(Style::default().fg(Color::Yellow).bold());

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(20),
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(15),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::DarkGray).bold());

    // Create table state for highlighting
    let mut state = TableState::default();
    state.select(Some(app.selected_index.saturating_sub(app.scroll_offset)));

    frame.render_stateful_widget(table, inner_area, &mut state);

    // Draw scroll indicator if there are more rows
    if app.visible.len() > body_rows && body_rows > 0 {
        let scroll_pos = (app.scroll_offset * (body_rows - 1)) / app.visible.len();
        let top = inner_area.y + 1;

        // Simple scroll bar on the right edge
        for i in 0..body_rows as u16 {
            let is_thumb = i as usize == scroll_pos;
            let char = if is_thumb { '█' } else { '│' };
            let style = if is_thumb {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let x = area.x + area.width - 1;
            let y = top + i;
            if y < area.y + area.height - 1 {
                frame.buffer_mut()[(x, y)].set_char(char).set_style(style);
            }
        }
    }
}
