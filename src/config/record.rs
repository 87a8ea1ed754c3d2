//! A single tracked dotfile: `name`, `source`, `target`.
use std::fmt;

use crate::error::RecordError;

/// Number of fields every record carries.
pub const FIELD_COUNT: usize = 3;

/// One of the three fields of a [`Record`], in on-disk order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Unique-ish label used to address the entry from the command line.
    Name,
    /// Canonical location of the file inside the dotfiles directory.
    Source,
    /// Location where the symlink to `source` lives.
    Target,
}

impl Field {
    /// All fields in on-disk order.
    pub const ALL: [Self; FIELD_COUNT] = [Self::Name, Self::Source, Self::Target];

    /// 1-based position of the field within a config line.
    #[must_use]
    pub const fn position(self) -> usize {
        match self {
            Self::Name => 1,
            Self::Source => 2,
            Self::Target => 3,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// A dotfile mapping: symlink `target` should point at `source`.
///
/// All three fields are guaranteed non-empty and free of the config file's
/// delimiters.
///
/// # Examples
///
/// ```
/// use dotlink_cli::config::record::Record;
///
/// let record = Record::new("vim", "~/dotfiles/vimrc", "~/.vimrc").unwrap();
/// assert_eq!(record.name(), "vim");
/// assert!(Record::new("vim", "", "~/.vimrc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: String,
    source: String,
    target: String,
}

impl Record {
    /// Build a record, validating every field.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if any field is empty or contains a delimiter.
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Result<Self, RecordError> {
        let name = validate(Field::Name, name.into())?;
        let source = validate(Field::Source, source.into())?;
        let target = validate(Field::Target, target.into())?;
        Ok(Self {
            name,
            source,
            target,
        })
    }

    /// The entry's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entry's source path, unexpanded.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The entry's target path, unexpanded.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Read a field by position.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Source => &self.source,
            Field::Target => &self.target,
        }
    }

    /// Replace a field in place.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if the new value is empty or contains a
    /// delimiter; the record is left unchanged in that case.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<(), RecordError> {
        let value = validate(field, value.into())?;
        match field {
            Field::Name => self.name = value,
            Field::Source => self.source = value,
            Field::Target => self.target = value,
        }
        Ok(())
    }
}

fn validate(field: Field, value: String) -> Result<String, RecordError> {
    if value.is_empty() {
        return Err(RecordError::EmptyField(field));
    }
    if value.contains([',', '\n', '\r']) {
        return Err(RecordError::Delimiter(field));
    }
    Ok(value)
}
