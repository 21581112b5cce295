//! Add-record form overlay

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::tui::app::App;
use crate::tui::form::FormField;

/// Draw the add form overlay
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref form) = app.form else {
        return;
    };

    // Two lines per field, error line, hint line, borders
    let popup_width = 70.min(area.width.saturating_sub(4));
    let popup_height = (FormField::ALL.len() as u16 * 2 + 6).min(area.height.saturating_sub(2));

    let popup_area = Rect {
        x: (area.width.saturating_sub(popup_width)) / 2,
        y: (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    };

    // Clear background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Add cheat sheet (Tab:next  Ctrl+s:save  Esc:cancel) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner_area = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines: Vec<Line> = Vec::new();
    for field in FormField::ALL {
        let is_focused = form.focused == field;

        let label_style = if is_focused {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::styled(format!(" {}", field.label()), label_style));

        let value = form.value(field);
        let mut spans = vec![Span::raw("  ")];
        if field == FormField::Category {
            let arrows = if is_focused { ("< ", " >") } else { ("  ", "  ") };
            spans.push(Span::styled(arrows.0, Style::default().fg(Color::Cyan)));
            spans.push(Span::styled(
                value.to_string(),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ));
            spans.push(Span::styled(arrows.1, Style::default().fg(Color::Cyan)));
        } else {
            spans.push(Span::styled(value.to_string(), Style::default().fg(Color::White)));
            if is_focused {
                spans.push(Span::styled(
                    "_",
                    Style::default().fg(Color::Cyan).rapid_blink(),
                ));
            }
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    match &form.error {
        Some(error) => lines.push(Line::styled(
            format!(" {}", error),
            Style::default().fg(Color::Red).bold(),
        )),
        None => lines.push(Line::styled(
            " Enter on Category saves. Left/Right change the category.",
            Style::default().fg(Color::DarkGray),
        )),
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(Color::Black));
    frame.render_widget(body, inner_area);
}
