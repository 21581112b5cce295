//! Event handling for the TUI
//!
//! Implements vim-style keybindings and mode switching

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus, Mode};

/// Handle a key event, returns true if app should quit
pub fn handle_event(app: &mut App, key: KeyEvent) -> bool {
    // Handle help overlay first
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
            app.show_help = false;
        }
        return false;
    }

    match app.focus {
        Focus::Form => return handle_form(app, key),
        Focus::Modal => return handle_modal(app, key),
        Focus::List | Focus::Search => {}
    }

    // Handle based on mode
    match app.mode {
        Mode::Search => handle_search_mode(app, key),
        Mode::Normal => handle_normal_mode(app, key),
    }
}

fn handle_search_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Normal;
            app.focus = Focus::List;
            app.clear_search();
        }
        KeyCode::Enter => {
            app.mode = Mode::Normal;
            app.focus = Focus::List;
        }
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.mode = Mode::Normal;
            app.focus = Focus::List;
            app.clear_filters();
        }
        KeyCode::Char(c) => app.push_search_char(c),
        KeyCode::Down => app.move_down(),
        KeyCode::Up => app.move_up(),
        _ => {}
    }
    false
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> bool {
    // Check for 'g' prefix first
    if app.pending_g {
        app.pending_g = false;
        if key.code == KeyCode::Char('g') {
            // gg - jump to top
            app.jump_to_top();
        }
        return false;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => return true,

        // Help
        KeyCode::Char('?') => {
            app.show_help = true;
        }

        // Page navigation (before plain letters so Ctrl+d/u win)
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => app.page_down(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => app.page_up(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::PageUp => app.page_up(),

        // Clear filters
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filters();
        }

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') => {
            app.pending_g = true;
        }
        KeyCode::Char('G') => app.jump_to_bottom(),

        // Search
        KeyCode::Char('/') => {
            app.mode = Mode::Search;
            app.focus = Focus::Search;
        }

        // Category buttons
        KeyCode::Char(d @ '1'..='9') => app.select_category_digit(d),
        KeyCode::Char('c') => app.cycle_category(),

        // Details
        KeyCode::Enter => app.open_detail(),

        // Add a record
        KeyCode::Char('a') => app.open_form(),

        // Seed sample data
        KeyCode::Char('i') => app.seed_samples(),

        // Refresh
        KeyCode::Char('r') => app.refresh(),

        // Escape clears the keyword
        KeyCode::Esc => {
            if !app.query.keyword.is_empty() {
                app.clear_search();
            }
        }

        _ => {}
    }
    false
}

fn handle_modal(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_modal(),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_modal(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_modal(-1),
        KeyCode::PageDown => app.scroll_modal(10),
        KeyCode::PageUp => app.scroll_modal(-10),
        _ => {}
    }
    false
}

fn handle_form(app: &mut App, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.save_form();
        return false;
    }

    let Some(form) = app.form.as_mut() else {
        app.focus = Focus::List;
        return false;
    };

    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Left if form.is_last_field() => form.prev_category(),
        KeyCode::Right if form.is_last_field() => form.next_category(),
        KeyCode::Enter => {
            if form.is_last_field() {
                app.save_form();
            } else {
                form.next_field();
            }
        }
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) => form.insert_char(c),
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::tui::app::Modal;
    use crate::tui::form::FormField;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_event(app, key(KeyCode::Char(c)));
        }
    }

    fn seeded(tmp: &TempDir) -> App {
        let mut app = App::new(Config::with_data_dir(tmp.path())).unwrap();
        handle_event(&mut app, key(KeyCode::Char('i')));
        app
    }

    #[test]
    fn test_quit_and_help() {
        let tmp = TempDir::new().unwrap();
        let mut app = seeded(&tmp);
        assert!(!handle_event(&mut app, key(KeyCode::Char('?'))));
        assert!(app.show_help);
        // q closes help instead of quitting
        assert!(!handle_event(&mut app, key(KeyCode::Char('q'))));
        assert!(!app.show_help);
        assert!(handle_event(&mut app, key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_keystroke_search() {
        let tmp = TempDir::new().unwrap();
        let mut app = seeded(&tmp);
        assert_eq!(app.catalog.len(), 3);

        handle_event(&mut app, key(KeyCode::Char('/')));
        assert_eq!(app.mode, Mode::Search);
        type_text(&mut app, "nmap");
        assert_eq!(app.visible.len(), 1);
        // 'q' is text while searching
        type_text(&mut app, "q");
        assert!(app.visible.is_empty());
        handle_event(&mut app, key(KeyCode::Backspace));
        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.query.keyword, "nmap");

        handle_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.visible.len(), 3);
    }

    #[test]
    fn test_category_keys_and_clear() {
        let tmp = TempDir::new().unwrap();
        let mut app = seeded(&tmp);

        handle_event(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.query.category.label(), "Network Security");
        handle_event(&mut app, key(KeyCode::Char('c')));
        assert_eq!(app.query.category.label(), "System Security");

        handle_event(&mut app, key(KeyCode::Char('/')));
        type_text(&mut app, "linux");
        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.visible.len(), 1);

        handle_event(&mut app, ctrl('c'));
        assert_eq!(app.visible.len(), 3);
        assert!(app.query.keyword.is_empty());
    }

    #[test]
    fn test_gg_and_g() {
        let tmp = TempDir::new().unwrap();
        let mut app = seeded(&tmp);
        handle_event(&mut app, key(KeyCode::Char('G')));
        assert_eq!(app.selected_index, 2);
        handle_event(&mut app, key(KeyCode::Char('g')));
        handle_event(&mut app, key(KeyCode::Char('g')));
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_enter_opens_details() {
        let tmp = TempDir::new().unwrap();
        let mut app = seeded(&tmp);
        handle_event(&mut app, key(KeyCode::Char('j')));
        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.modal, Some(Modal::Detail { index: 1 }));
        handle_event(&mut app, key(KeyCode::Esc));
        assert!(app.modal.is_none());
    }

    #[test]
    fn test_add_form_flow() {
        let tmp = TempDir::new().unwrap();
        let mut app = seeded(&tmp);

        handle_event(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.focus, Focus::Form);

        type_text(&mut app, "Whoami");
        handle_event(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "Current user");
        handle_event(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "id; whoami");
        handle_event(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "linux,user");
        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.form.as_ref().unwrap().focused, FormField::Category);
        handle_event(&mut app, key(KeyCode::Right));
        handle_event(&mut app, key(KeyCode::Right));
        handle_event(&mut app, key(KeyCode::Enter));

        assert!(app.form.is_none());
        assert_eq!(app.catalog.len(), 4);
        let added = app.catalog.records.last().unwrap();
        assert_eq!(added.display_title(), "Whoami");
        assert_eq!(added.category.as_deref(), Some("System Security"));
        assert_eq!(added.tags, vec!["linux", "user"]);
    }

    #[test]
    fn test_add_form_error_and_cancel() {
        let tmp = TempDir::new().unwrap();
        let mut app = seeded(&tmp);

        handle_event(&mut app, key(KeyCode::Char('a')));
        handle_event(&mut app, ctrl('s'));
        assert_eq!(
            app.form.as_ref().unwrap().error.as_deref(),
            Some("Title is required")
        );

        handle_event(&mut app, key(KeyCode::Esc));
        assert!(app.form.is_none());
        assert_eq!(app.catalog.len(), 3);
    }
}
