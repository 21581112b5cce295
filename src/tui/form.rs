//! Add-record form state
//!
//! Pure input handling. Saving goes through `App::save_form`.

use crate::record::NewRecord;

use super::state;

/// Form inputs in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Command,
    Tags,
    Category,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Description,
        FormField::Command,
        FormField::Tags,
        FormField::Category,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Command => "Command",
            FormField::Tags => "Tags (comma separated)",
            FormField::Category => "Category",
        }
    }

    fn index(self) -> usize {
        FormField::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct AddForm {
    pub title: String,
    pub description: String,
    pub command: String,
    pub tags: String,
    pub categories: Vec<String>,
    pub category_index: usize,
    pub focused: FormField,
    /// Last validation or write error, shown inside the form
    pub error: Option<String>,
}

impl AddForm {
    pub fn new(categories: Vec<String>) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            command: String::new(),
            tags: String::new(),
            categories,
            category_index: 0,
            focused: FormField::Title,
            error: None,
        }
    }

    /// Start with `category` preselected when it is one of the options
    pub fn with_category(mut self, category: &str) -> Self {
        if let Some(i) = self.categories.iter().position(|c| c == category) {
            self.category_index = i;
        }
        self
    }

    pub fn category(&self) -> &str {
        self.categories
            .get(self.category_index)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn is_last_field(&self) -> bool {
        self.focused == FormField::Category
    }

    pub fn next_field(&mut self) {
        let i = state::step_wrapping(self.focused.index(), FormField::ALL.len(), true);
        self.focused = FormField::ALL[i];
    }

    pub fn prev_field(&mut self) {
        let i = state::step_wrapping(self.focused.index(), FormField::ALL.len(), false);
        self.focused = FormField::ALL[i];
    }

    pub fn next_category(&mut self) {
        self.category_index = state::step_wrapping(self.category_index, self.categories.len(), true);
    }

    pub fn prev_category(&mut self) {
        self.category_index = state::step_wrapping(self.category_index, self.categories.len(), false);
    }

    /// Text buffer of the focused input (the category selector has none)
    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focused {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Command => Some(&mut self.command),
            FormField::Tags => Some(&mut self.tags),
            FormField::Category => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    /// Current value of an input, for drawing
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::Command => &self.command,
            FormField::Tags => &self.tags,
            FormField::Category => self.category(),
        }
    }

    pub fn to_new_record(&self) -> NewRecord {
        NewRecord {
            title: self.title.clone(),
            description: self.description.clone(),
            command: self.command.clone(),
            tags: self.tags.clone(),
            category: self.category().to_string(),
        }
    }
}
