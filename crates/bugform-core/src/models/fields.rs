//! Form field values and per-field error annotations.

use std::collections::BTreeMap;
use std::fmt;

/// Value used for version and browser when the launch URL omits them.
pub const UNKNOWN_ENVIRONMENT: &str = "Unknown";

/// The text fields a user can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Description,
    Email,
    Version,
    Browser,
}

impl Field {
    /// Name used for the field in payloads and error annotations.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Email => "email",
            Self::Version => "version",
            Self::Browser => "browser",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw field contents as typed by the user.
///
/// Values are stored untrimmed; trimming happens at validation and
/// serialization time so the user's input is never rewritten under them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub description: String,
    pub email: String,
    pub version: String,
    pub browser: String,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            email: String::new(),
            version: UNKNOWN_ENVIRONMENT.to_string(),
            browser: UNKNOWN_ENVIRONMENT.to_string(),
        }
    }
}

impl FormFields {
    /// Pre-fill the environment fields, falling back to `Unknown`.
    pub fn with_environment(version: Option<String>, browser: Option<String>) -> Self {
        Self {
            version: version.unwrap_or_else(|| UNKNOWN_ENVIRONMENT.to_string()),
            browser: browser.unwrap_or_else(|| UNKNOWN_ENVIRONMENT.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Email => &self.email,
            Field::Version => &self.version,
            Field::Browser => &self.browser,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Title => self.title = value,
            Field::Description => self.description = value,
            Field::Email => self.email = value,
            Field::Version => self.version = value,
            Field::Browser => self.browser = value,
        }
    }

    /// Clear the user-authored fields. Version and browser describe the
    /// environment and are kept.
    pub fn clear_report(&mut self) {
        self.title.clear();
        self.description.clear();
        self.email.clear();
    }
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set or clear the message for a field. `None` clears it.
    pub fn set(&mut self, field: Field, message: Option<&str>) {
        match message {
            Some(message) => {
                self.0.insert(field, message.to_string());
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn clear_all(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate messages in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}
