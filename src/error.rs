//! Domain-specific error types for the dotlink engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Internal modules return typed errors (e.g., [`ConfigError`], [`LinkError`])
//! while command handlers at the CLI boundary convert them to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! DotlinkError
//! ├── Config(ConfigError)  : config file I/O and parsing
//! ├── Store(StoreError)    : index/name lookups, sorting
//! ├── Record(RecordError)  : building or editing a single entry
//! ├── Path(PathError)      : `~` expansion
//! └── Link(LinkError)      : reconciliation refusals and filesystem failures
//! ```

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::record::Field;

/// Top-level error type for the dotlink engine.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum DotlinkError {
    /// Configuration file error (I/O or malformed content).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Entry store access error.
    #[error("Entry store error: {0}")]
    Store(#[from] StoreError),

    /// Invalid entry fields.
    #[error("Entry error: {0}")]
    Record(#[from] RecordError),

    /// Path expansion error.
    #[error("Path error: {0}")]
    Path(#[from] PathError),

    /// Link reconciliation error.
    #[error("Link error: {0}")]
    Link(#[from] LinkError),
}

/// The specific way a config line is malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A field is empty (e.g. `a,,c` or a stray leading/trailing comma).
    #[error("field {field} is empty")]
    EmptyField {
        /// 1-based position of the first empty field.
        field: usize,
    },

    /// A field contains a stray carriage return.
    #[error("field {field} contains a line break")]
    LineBreak {
        /// 1-based position of the offending field.
        field: usize,
    },

    /// The line does not have exactly three fields.
    #[error("expected 3 fields, found {found}")]
    WrongArity {
        /// Number of fields actually present.
        found: usize,
    },
}

impl From<RecordError> for ParseErrorKind {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::EmptyField(field) => Self::EmptyField {
                field: field.position(),
            },
            RecordError::Delimiter(field) => Self::LineBreak {
                field: field.position(),
            },
        }
    }
}

/// A malformed line in the config file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number within the config file.
    pub line: usize,
    /// What is wrong with the line.
    pub kind: ParseErrorKind,
}

/// Errors that arise from loading, saving, or creating the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An I/O error occurred while accessing the config file.
    #[error("IO error accessing config file {path}: {source}")]
    Io {
        /// Path to the file that could not be accessed.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The config file contains a malformed record.
    #[error("Invalid config file {path}: {source}")]
    Parse {
        /// Path to the offending file.
        path: String,
        /// The first malformed line.
        source: ParseError,
    },

    /// `init` was asked to create a config file that already exists.
    #[error("Config file already exists: {0}")]
    AlreadyExists(String),
}

/// Errors that arise from entry store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An index does not address any entry.
    #[error("Index {index} is out of bounds for {len} entries")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Number of entries in the store.
        len: usize,
    },

    /// No entry has the requested name.
    #[error("No entry named '{0}'")]
    NotFound(String),

    /// Sorting was requested on a store with no entries.
    #[error("Cannot sort an empty entry store")]
    Empty,
}

/// Errors that arise from building or editing a single entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A field value is empty.
    #[error("Entry {0} must not be empty")]
    EmptyField(Field),

    /// A field value contains the field or record delimiter.
    #[error("Entry {0} must not contain ',' or a line break")]
    Delimiter(Field),
}

/// Errors that arise from expanding a leading `~`.
#[derive(Error, Debug)]
pub enum PathError {
    /// `$HOME` is not set, so `~` cannot be expanded.
    #[error("Cannot expand '~': HOME is not set")]
    HomeUnset,

    /// Allocating the expanded path failed.
    #[error("Allocation failed while expanding path: {0}")]
    Alloc(#[from] TryReserveError),

    /// A relative path could not be anchored to the current directory.
    #[error("Cannot make '{path}' absolute: {source}")]
    CurrentDir {
        /// The expanded, still relative path.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Errors that arise while reconciling a source/target pair.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The target is already a symlink and is left alone.
    #[error("Target is already a symlink: {}", .target.display())]
    AlreadyLinked {
        /// The existing symlink.
        target: PathBuf,
    },

    /// Source and target both exist as real paths.
    #[error(
        "Both source and target exist, resolve manually: {} and {}",
        .source_path.display(),
        .target.display()
    )]
    Conflict {
        /// The expanded source path.
        source_path: PathBuf,
        /// The expanded target path.
        target: PathBuf,
    },

    /// Neither source nor target exists.
    #[error(
        "Neither source nor target exists: {} and {}",
        .source_path.display(),
        .target.display()
    )]
    NeitherExists {
        /// The expanded source path.
        source_path: PathBuf,
        /// The expanded target path.
        target: PathBuf,
    },

    /// The user declined to move the target into the source location.
    #[error("Operation cancelled by user")]
    UserCancelled,

    /// A filesystem operation failed.
    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        /// Short description of the failed operation (e.g. `"create symlink"`).
        action: &'static str,
        /// The path the operation was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The move succeeded but the link did not; the move was undone.
    #[error(
        "Failed to link {} after moving it, moved it back: {source}",
        .target.display()
    )]
    RolledBack {
        /// The target that was restored.
        target: PathBuf,
        /// Why the link could not be created.
        source: io::Error,
    },

    /// The move succeeded, the link did not, and the move could not be undone.
    #[error(
        "Inconsistent state: {} was moved to {} but no symlink was created ({cause}); \
         moving it back also failed: {source}",
        .target.display(),
        .source_path.display()
    )]
    Inconsistent {
        /// Where the file now lives.
        source_path: PathBuf,
        /// Where the file used to live; no link is present here.
        target: PathBuf,
        /// Why the link could not be created.
        cause: io::Error,
        /// Why the compensating move failed.
        source: io::Error,
    },
}

impl LinkError {
    /// Whether this error is one of the state-table refusals, as opposed to a
    /// filesystem failure.
    #[must_use]
    pub const fn is_refusal(&self) -> bool {
        matches!(
            self,
            Self::AlreadyLinked { .. }
                | Self::Conflict { .. }
                | Self::NeitherExists { .. }
                | Self::UserCancelled
        )
    }
}
