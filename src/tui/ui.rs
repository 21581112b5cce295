//! UI rendering for the TUI

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::{App, Focus, Mode};
use super::views::{detail, table};
use super::widgets::add_form;

/// Main draw function - orchestrates all rendering
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: header, search, categories, table, footer
    let main_layout = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(1), // Search bar
        Constraint::Length(1), // Category buttons
        Constraint::Min(5),    // Table
        Constraint::Length(1), // Footer/status
    ])
    .split(area);

    draw_header(frame, app, main_layout[0]);
    draw_search_bar(frame, app, main_layout[1]);
    draw_category_bar(frame, app, main_layout[2]);
    table::draw(frame, app, main_layout[3]);
    draw_footer(frame, app, main_layout[4]);

    // Draw overlays
    if app.modal.is_some() {
        detail::draw(frame, app, area);
    }

    if app.form.is_some() {
        add_form::draw(frame, app, area);
    }

    if app.show_help {
        draw_help_overlay(frame, area);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let refresh_indicator = if app.refresh_shown_at.is_some() {
        " [Updated]"
    } else {
        ""
    };

    let header_text = format!(
        " Security Cheat Sheets │ [{}/{} records] │ {}{}",
        app.visible.len(),
        app.catalog.len(),
        app.data_dir().display(),
        refresh_indicator
    );

    let header =
        Paragraph::new(header_text).style(Style::default().bg(Color::Blue).fg(Color::White).bold());

    frame.render_widget(header, area);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.mode == Mode::Search;

    let mut spans = vec![Span::raw(" Search: ")];
    if app.query.keyword.is_empty() && !active {
        spans.push(Span::styled(
            "press / to search all fields",
            Style::default().fg(Color::Gray),
        ));
    } else {
        spans.push(Span::styled(
            app.query.keyword.as_str(),
            Style::default().fg(Color::Cyan),
        ));
    }
    if active {
        spans.push(Span::styled(
            "_",
            Style::default().fg(Color::Cyan).rapid_blink(),
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(bar, area);
}

fn draw_category_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" Category: ")];

    let active_label = app.query.category.label();
    for (i, label) in app.category_labels.iter().enumerate() {
        let style = if label == active_label {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        let text = if i < 9 {
            format!("[{} {}]", i + 1, label)
        } else {
            format!("[{}]", label)
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
    }

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(bar, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let keybinds = match app.focus {
        Focus::Search => "type to filter  Enter:done  Esc:clear",
        Focus::Modal => "j/k:scroll  Esc/Enter:close",
        Focus::Form => "Tab/Shift+Tab:field  Left/Right:category  Ctrl+s:save  Esc:cancel",
        Focus::List => {
            if app.catalog.is_empty() {
                "i:sample data  a:add  r:refresh  ?:help  q:quit"
            } else {
                "j/k:move  Enter:details  /:search  1-9:category  c:cycle  a:add  r:refresh  ?:help  q:quit"
            }
        }
    };

    // Show status message if present, otherwise show keybinds
    let footer_text = if let Some((ref msg, _)) = app.status_message {
        msg.clone()
    } else {
        keybinds.to_string()
    };

    let footer = Paragraph::new(format!(" {}", footer_text))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(footer, area);
}

fn draw_help_overlay(frame: &mut Frame, area: Rect) {
    // Center the help popup
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 30.min(area.height.saturating_sub(4));

    let popup_area = Rect {
        x: (area.width.saturating_sub(popup_width)) / 2,
        y: (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    };

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let help_text = r#"
  Browsing
  ─────────────────────────────────
  j/k, ↑/↓     Move up/down
  gg           Jump to top
  G            Jump to bottom
  Ctrl+d/u     Page down/up
  PgDn/PgUp    Page down/up
  Enter        Show details
  r            Refresh

  Filtering
  ─────────────────────────────────
  /            Search all fields
  1-9          Select category button
  c            Cycle category
  Ctrl+c       Clear search and category

  Editing
  ─────────────────────────────────
  a            Add a cheat sheet
  i            Seed sample data (empty only)

  q            Quit

  Press ? or Esc to close
"#;

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(help, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    fn render(app: &App) -> String {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_empty_state_hint() {
        let tmp = TempDir::new().unwrap();
        let app = App::new(Config::with_data_dir(tmp.path())).unwrap();
        let screen = render(&app);
        assert!(screen.contains("[0/0 records]"));
        assert!(screen.contains("Press 'i' to add sample data"));
    }

    #[test]
    fn test_rows_and_counts() {
        let tmp = TempDir::new().unwrap();
        let mut app = App::new(Config::with_data_dir(tmp.path())).unwrap();
        app.seed_samples();
        app.status_message = None;

        let screen = render(&app);
        assert!(screen.contains("[3/3 records]"));
        assert!(screen.contains("Nmap port scan"));
        assert!(screen.contains("[1 Web Security]"));

        app.set_category("Web Security");
        let screen = render(&app);
        assert!(screen.contains("[1/3 records]"));
        assert!(!screen.contains("Nmap port scan"));
    }

    #[test]
    fn test_overlays_render() {
        let tmp = TempDir::new().unwrap();
        let mut app = App::new(Config::with_data_dir(tmp.path())).unwrap();
        app.seed_samples();

        app.open_detail();
        assert!(render(&app).contains("Details - SQL injection detection"));
        app.close_modal();

        app.open_form();
        assert!(render(&app).contains("Add cheat sheet"));
        app.close_form();

        app.show_help = true;
        assert!(render(&app).contains("Seed sample data"));
    }
}
