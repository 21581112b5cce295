//! Application state for the TUI

use std::path::{Path, PathBuf};
use std::time::Instant;

use crossterm::event::{MouseEvent, MouseEventKind};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::Result;
use crate::record::Record;
use crate::search::{self, CategoryFilter, Query};
use crate::store::RecordStore;

use super::form::AddForm;
use super::state;

/// Rows taken by everything around the table body:
/// header, search bar, category bar, footer, table borders and column header
const CHROME_ROWS: usize = 7;

/// Current input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Search,
    Modal,
    Form,
}

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
}

/// Popup shown over the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Details of `catalog.records[index]`
    Detail { index: usize },
}

/// Main application state
pub struct App {
    config: Config,
    data_dir: PathBuf,
    store: RecordStore,

    // Data
    pub catalog: Catalog,
    /// Indices into `catalog.records` that pass the current query
    pub visible: Vec<usize>,

    // Filters
    pub query: Query,
    pub category_labels: Vec<String>,

    // View state
    pub selected_index: usize,
    pub scroll_offset: usize,

    // UI state
    pub focus: Focus,
    pub mode: Mode,
    pub modal: Option<Modal>,
    pub modal_scroll: usize,
    pub form: Option<AddForm>,
    pub show_help: bool,

    // Viewport
    pub viewport_height: u16,

    // Refresh indicator
    pub refresh_shown_at: Option<Instant>,

    // Vim-style 'g' prefix tracking
    pub pending_g: bool,

    // Status message
    pub status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let data_dir = config.data_dir();
        let store = RecordStore::new(&data_dir, &config.data.canonical_file);
        let catalog = Catalog::load(&data_dir)?;
        let category_labels = config.filter_labels();

        let mut app = Self {
            config,
            data_dir,
            store,
            catalog,
            visible: Vec::new(),
            query: Query::default(),
            category_labels,
            selected_index: 0,
            scroll_offset: 0,
            focus: Focus::List,
            mode: Mode::Normal,
            modal: None,
            modal_scroll: 0,
            form: None,
            show_help: false,
            viewport_height: 24,
            refresh_shown_at: None,
            pending_g: false,
            status_message: None,
        };
        app.apply_filters();
        app.report_skipped();
        Ok(app)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Reload the catalog from disk, keeping filters and (clamped) selection
    pub fn reload(&mut self) -> Result<()> {
        self.catalog = Catalog::load(&self.data_dir)?;
        self.apply_filters();
        self.report_skipped();
        Ok(())
    }

    /// Reload and flash the refresh indicator, reporting failures in the status line
    pub fn refresh(&mut self) {
        match self.reload() {
            Ok(()) => self.show_refresh_indicator(),
            Err(e) => self.set_status(format!("Refresh failed: {}", e)),
        }
    }

    fn report_skipped(&mut self) {
        match self.catalog.skipped.as_slice() {
            [] => {}
            [only] => {
                let name = only
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| only.path.display().to_string());
                self.set_status(format!("Skipped {}: {}", name, only.reason));
            }
            many => self.set_status(format!("Skipped {} unreadable data files", many.len())),
        }
    }

    /// Show the refresh indicator
    pub fn show_refresh_indicator(&mut self) {
        self.refresh_shown_at = Some(Instant::now());
    }

    /// Periodic tick for animations
    pub fn tick(&mut self) {
        // Clear refresh indicator after 2 seconds
        if let Some(shown_at) = self.refresh_shown_at {
            if shown_at.elapsed().as_secs() >= 2 {
                self.refresh_shown_at = None;
            }
        }

        // Clear status message after 3 seconds
        if let Some((_, shown_at)) = &self.status_message {
            if shown_at.elapsed().as_secs() >= 3 {
                self.status_message = None;
            }
        }
    }

    /// Recompute the visible rows from the current query
    pub fn apply_filters(&mut self) {
        self.visible = search::matching_indices(&self.catalog.records, &self.query);
        self.selected_index = state::clamp_selection(self.selected_index, self.visible.len());
        self.ensure_visible();
    }

    // Filters

    pub fn push_search_char(&mut self, c: char) {
        self.query.keyword.push(c);
        self.apply_filters();
    }

    pub fn pop_search_char(&mut self) {
        self.query.keyword.pop();
        self.apply_filters();
    }

    pub fn clear_search(&mut self) {
        self.query.keyword.clear();
        self.apply_filters();
    }

    pub fn set_category(&mut self, label: &str) {
        self.query.category = CategoryFilter::from_label(label);
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.apply_filters();
    }

    pub fn select_category_digit(&mut self, digit: char) {
        if let Some(label) = state::label_for_digit(&self.category_labels, digit) {
            self.set_category(&label);
        }
    }

    pub fn cycle_category(&mut self) {
        if let Some(label) = state::cycle_label(&self.category_labels, self.query.category.label()) {
            self.set_category(&label);
        }
    }

    /// Drop keyword and category
    pub fn clear_filters(&mut self) {
        self.query = Query::default();
        self.apply_filters();
    }

    // Selection

    /// Currently selected record
    pub fn selected_record(&self) -> Option<&Record> {
        self.visible
            .get(self.selected_index)
            .and_then(|&i| self.catalog.records.get(i))
    }

    /// Row records in display order, with their catalog index
    pub fn visible_records(&self) -> impl Iterator<Item = (usize, &Record)> {
        self.visible
            .iter()
            .filter_map(|&i| self.catalog.records.get(i).map(|r| (i, r)))
    }

    // Navigation methods
    pub fn move_up(&mut self) {
        self.selected_index = state::move_selection_up(self.selected_index);
        self.ensure_visible();
    }

    pub fn move_down(&mut self) {
        self.selected_index = state::move_selection_down(self.selected_index, self.visible.len());
        self.ensure_visible();
    }

    pub fn jump_to_top(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    pub fn jump_to_bottom(&mut self) {
        self.selected_index = self.visible.len().saturating_sub(1);
        self.ensure_visible();
    }

    pub fn page_down(&mut self) {
        self.selected_index =
            state::page_down(self.selected_index, self.visible_rows(), self.visible.len());
        self.ensure_visible();
    }

    pub fn page_up(&mut self) {
        self.selected_index = state::page_up(self.selected_index, self.visible_rows());
        self.ensure_visible();
    }

    /// Table body rows that fit the current terminal
    pub fn visible_rows(&self) -> usize {
        (self.viewport_height as usize).saturating_sub(CHROME_ROWS).max(1)
    }

    fn ensure_visible(&mut self) {
        self.scroll_offset =
            state::calculate_scroll_offset(self.selected_index, self.scroll_offset, self.visible_rows());
    }

    pub fn resize(&mut self, _width: u16, height: u16) {
        self.viewport_height = height;
        self.ensure_visible();
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        if self.focus == Focus::Form || self.show_help {
            return;
        }
        match (event.kind, self.focus) {
            (MouseEventKind::ScrollDown, Focus::Modal) => self.scroll_modal(1),
            (MouseEventKind::ScrollUp, Focus::Modal) => self.scroll_modal(-1),
            (MouseEventKind::ScrollDown, _) => self.move_down(),
            (MouseEventKind::ScrollUp, _) => self.move_up(),
            _ => {}
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    // Details popup

    pub fn open_detail(&mut self) {
        if let Some(&index) = self.visible.get(self.selected_index) {
            self.modal = Some(Modal::Detail { index });
            self.modal_scroll = 0;
            self.focus = Focus::Modal;
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.modal_scroll = 0;
        self.focus = Focus::List;
    }

    pub fn scroll_modal(&mut self, delta: isize) {
        // The popup wraps, so allow scrolling up to its line count
        let total = self.detail_line_count();
        let visible = self.visible_rows();
        self.modal_scroll = state::scroll_modal(self.modal_scroll, delta, total, visible);
    }

    fn detail_line_count(&self) -> usize {
        match &self.modal {
            Some(Modal::Detail { index }) => self
                .catalog
                .records
                .get(*index)
                .map(super::views::detail::line_count)
                .unwrap_or(0),
            None => 0,
        }
    }

    // Add form

    pub fn open_form(&mut self) {
        // Configured categories first, then any others already used in the data
        let mut categories = self.config.form_categories();
        for category in search::categories_in(&self.catalog.records) {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        let form = AddForm::new(categories).with_category(self.query.category.label());
        self.form = Some(form);
        self.focus = Focus::Form;
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.focus = Focus::List;
    }

    /// Validate and append the form's record. Errors stay inside the form.
    pub fn save_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };

        let result = form
            .to_new_record()
            .validate()
            .and_then(|record| self.store.append(&record).map(|count| (record, count)));

        match result {
            Ok((record, count)) => {
                tracing::info!(title = record.display_title(), count, "record added from browser");
                self.close_form();
                self.refresh();
                self.set_status(format!(
                    "Saved '{}' ({} records in {})",
                    record.display_title(),
                    count,
                    self.config.data.canonical_file
                ));
            }
            Err(e) => {
                tracing::warn!(error = %e, "add form rejected");
                form.error = Some(e.to_string());
            }
        }
    }

    // Seeding

    /// Write the sample records, only when there is nothing to show yet
    pub fn seed_samples(&mut self) {
        if !self.catalog.is_empty() {
            self.set_status("Data already present; seeding only works on an empty catalog".to_string());
            return;
        }
        // An unreadable file loads as empty but still holds someone's data
        if let Some(skipped) = self.catalog.skipped.first() {
            self.set_status(format!(
                "Refusing to seed: {} could not be read; fix or remove it first",
                skipped.path.display()
            ));
            return;
        }
        let canonical_in_use = self.store.path().exists()
            && !self.store.load().is_ok_and(|records| records.is_empty());
        if canonical_in_use {
            self.set_status(format!(
                "Refusing to seed: {} already exists",
                self.store.path().display()
            ));
            return;
        }
        match crate::init::init(&self.config) {
            Ok(summary) => {
                self.refresh();
                self.set_status(format!("Seeded {} sample cheat sheets", summary.count));
            }
            Err(e) => self.set_status(format!("Seeding failed: {}", e)),
        }
    }
}
