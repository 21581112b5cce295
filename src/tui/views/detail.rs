//! Details popup for a single record

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use syntect::easy::HighlightLines;
use syntect::highlighting::{Style as SyntectStyle, ThemeSet};
use syntect::parsing::SyntaxSet;

use crate::record::Record;
use crate::tui::app::{App, Modal};

// Lazy static syntax highlighting resources
lazy_static::lazy_static! {
    static ref PS: SyntaxSet = SyntaxSet::load_defaults_newlines();
    static ref TS: ThemeSet = ThemeSet::load_defaults();
}

const USAGE_NOTES: [&str; 3] = [
    "1. Copy the command above into a terminal",
    "2. Adjust targets and parameters to your environment",
    "3. Only run it against systems you are authorized to test",
];

/// Draw the details popup over `area`
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let Some(Modal::Detail { index }) = app.modal else {
        return;
    };
    let Some(record) = app.catalog.records.get(index) else {
        return;
    };

    let popup_width = (area.width as f32 * 0.8) as u16;
    let popup_height = (area.height as f32 * 0.8) as u16;

    let popup_area = Rect {
        x: (area.width.saturating_sub(popup_width)) / 2,
        y: (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let title = format!(" Details - {} [j/k:scroll Esc:close] ", record.display_title());

    let modal_widget = Paragraph::new(build_lines(record))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.modal_scroll as u16, 0))
        .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(modal_widget, popup_area);
}

/// Unwrapped line count of the popup body
pub fn line_count(record: &Record) -> usize {
    build_lines(record).len()
}

fn build_lines(record: &Record) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("")];

    lines.push(heading("Title"));
    lines.push(Line::from(format!("  {}", record.display_title())).bold());
    lines.push(Line::from(""));

    lines.push(heading("Description"));
    lines.push(Line::from(format!("  {}", record.display_description())));
    lines.push(Line::from(""));

    lines.push(heading("Command"));
    match record.command_text() {
        Some(command) => lines.extend(highlight_command(command)),
        None => lines.push(Line::styled(
            format!("  {}", record.display_command()),
            Style::default().fg(Color::DarkGray),
        )),
    }
    lines.push(Line::from(""));

    lines.push(heading("Tags"));
    let tags = if record.tags.is_empty() {
        "-".to_string()
    } else {
        record.tags_joined()
    };
    lines.push(Line::from(format!("  {}", tags)));
    lines.push(Line::from(""));

    lines.push(heading("Category"));
    lines.push(Line::from(format!(
        "  {}",
        record.category.as_deref().unwrap_or("-")
    )));

    if !record.extra.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("Other fields"));
        for (key, value) in &record.extra {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {}: ", key), Style::default().fg(Color::DarkGray)),
                Span::raw(text),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(heading("Usage"));
    for note in USAGE_NOTES {
        lines.push(Line::styled(
            format!("  {}", note),
            Style::default().fg(Color::DarkGray),
        ));
    }

    lines
}

fn heading(text: &str) -> Line<'static> {
    Line::styled(
        format!(" {}", text),
        Style::default().fg(Color::Yellow).bold(),
    )
}

/// Highlight a command as shell script, one ratatui line per command line
fn highlight_command(command: &str) -> Vec<Line<'static>> {
    let syntax = PS
        .find_syntax_by_extension("sh")
        .unwrap_or_else(|| PS.find_syntax_plain_text());

    let theme = &TS.themes["base16-mocha.dark"];
    let mut highlighter = HighlightLines::new(syntax, theme);

    command
        .lines()
        .map(|line| {
            let code_with_newline = format!("{}\n", line);
            let mut spans = vec![Span::raw("  ")];

            if let Ok(highlighted) = highlighter.highlight_line(&code_with_newline, &PS) {
                for (style, text) in highlighted {
                    let text = text.trim_end_matches('\n');
                    if !text.is_empty() {
                        spans.push(Span::styled(text.to_string(), syntect_to_ratatui_style(style)));
                    }
                }
            } else {
                spans.push(Span::raw(line.to_string()));
            }

            Line::from(spans)
        })
        .collect()
}

/// Convert syntect Style to ratatui Style
fn syntect_to_ratatui_style(syntect_style: SyntectStyle) -> Style {
    let fg = syntect_style.foreground;
    Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::sample_records;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_highlight_keeps_command_text() {
        let lines = highlight_command("nmap -sV -sC target.com | tee out.txt");
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "  nmap -sV -sC target.com | tee out.txt");
    }

    #[test]
    fn test_multiline_command() {
        let lines = highlight_command("cd /tmp\nls -la");
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[1]), "  ls -la");
    }

    #[test]
    fn test_detail_lines_include_all_fields() {
        let record = sample_records().remove(0);
        let text: Vec<String> = build_lines(&record).iter().map(line_text).collect();
        assert!(text.iter().any(|l| l.contains("SQL injection detection")));
        assert!(text.iter().any(|l| l.contains("sqlmap -u")));
        assert!(text.iter().any(|l| l.contains("web, sql, injection")));
        assert!(text.iter().any(|l| l.contains("Web Security")));
        assert_eq!(line_count(&record), text.len());
    }

    #[test]
    fn test_defaults_for_sparse_record() {
        let record = Record::default();
        let text: Vec<String> = build_lines(&record).iter().map(line_text).collect();
        assert!(text.iter().any(|l| l.contains("Untitled")));
        assert!(text.iter().any(|l| l.contains("No description")));
        assert!(text.iter().any(|l| l.contains("No command")));
    }
}
