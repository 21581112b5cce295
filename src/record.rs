//! Cheat sheet records
//!
//! Records are read leniently: every field is optional, unexpected JSON types
//! are stringified, and unknown keys are kept in `extra` so that a record
//! written back to disk loses nothing. Placeholder text for missing fields is
//! defined here and nowhere else.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Placeholder shown when a record has no title
pub const DEFAULT_TITLE: &str = "Untitled";
/// Placeholder shown when a record has no description
pub const DEFAULT_DESCRIPTION: &str = "No description";
/// Placeholder shown when a record has no command
pub const DEFAULT_COMMAND: &str = "No command";

/// One cheat sheet entry
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Keys this tool does not know about, preserved as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Build a record from a JSON value. Returns None for non-objects.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut obj) = value else {
            return None;
        };

        let title = obj.remove("title").and_then(value_to_text);
        let description = obj.remove("description").and_then(value_to_text);
        let command = obj.remove("command").and_then(value_to_text);
        let tags = obj.remove("tags").map(value_to_tags).unwrap_or_default();
        let category = obj.remove("category").and_then(value_to_text);

        Some(Self {
            title,
            description,
            command,
            tags,
            category,
            extra: obj,
        })
    }

    /// Convert to the JSON object written to disk
    pub fn to_value(&self) -> Value {
        // Serializing a struct of strings and a map cannot fail
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn display_title(&self) -> &str {
        non_empty(self.title.as_deref()).unwrap_or(DEFAULT_TITLE)
    }

    pub fn display_description(&self) -> &str {
        non_empty(self.description.as_deref()).unwrap_or(DEFAULT_DESCRIPTION)
    }

    pub fn display_command(&self) -> &str {
        non_empty(self.command.as_deref()).unwrap_or(DEFAULT_COMMAND)
    }

    /// Tags joined by ", " (empty string when there are none)
    pub fn tags_joined(&self) -> String {
        self.tags.join(", ")
    }

    /// The command, if the record has a non-empty one
    pub fn command_text(&self) -> Option<&str> {
        non_empty(self.command.as_deref())
    }

    /// Every field value as text, in field order. Used by keyword search.
    pub fn field_values(&self) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();
        values.extend(self.title.iter().cloned());
        values.extend(self.description.iter().cloned());
        values.extend(self.command.iter().cloned());
        values.extend(self.tags.iter().cloned());
        values.extend(self.category.iter().cloned());
        values.extend(self.extra.values().map(json_text));
        values
    }
}

/// Raw user input for a new record (add form / `seccheat add`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecord {
    pub title: String,
    pub description: String,
    pub command: String,
    /// Comma-separated tag list as typed
    pub tags: String,
    pub category: String,
}

impl NewRecord {
    /// Check the input and turn it into a fully populated record
    pub fn validate(&self) -> Result<Record> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::Validation("Title is required".to_string()));
        }
        let command = self.command.trim();
        if command.is_empty() {
            return Err(Error::Validation("Command is required".to_string()));
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(Error::Validation("Category is required".to_string()));
        }

        Ok(Record {
            title: Some(title.to_string()),
            description: Some(self.description.trim().to_string()),
            command: Some(command.to_string()),
            tags: split_tags(&self.tags),
            category: Some(category.to_string()),
            extra: Map::new(),
        })
    }
}

/// Split a comma-separated tag list, trimming each entry and dropping blanks
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(json_text(&other)),
    }
}

fn value_to_tags(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.into_iter().filter_map(value_to_text).collect(),
        Value::String(s) => split_tags(&s),
        Value::Null => Vec::new(),
        other => vec![json_text(&other)],
    }
}

/// Text form of a JSON value: strings without quotes, everything else as JSON
fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
