//! Link reconciliation: converge a target path to a symlink to its source.
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use super::fs;
use super::prompt::Prompt;
use crate::config::record::Record;
use crate::error::{LinkError, PathError};
use crate::logging::Log;
use crate::paths::absolute_path;

/// Observed filesystem state of a source/target pair.
///
/// Recomputed on every call; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// The target is a symlink (wherever it points, even nowhere).
    TargetIsSymlink,
    /// Source and target both exist as real paths.
    BothExist,
    /// Only the source exists.
    SourceOnly,
    /// Only the target exists, as a real path.
    TargetOnly,
    /// Neither path exists.
    Neither,
}

/// Action required to converge a [`LinkState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create a symlink at the target pointing to the source.
    CreateLink,
    /// After confirmation, move the target to the source path and link it.
    MoveAndLink,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateLink => write!(f, "create link"),
            Self::MoveAndLink => write!(f, "move target into place and link"),
        }
    }
}

/// What a successful reconciliation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkChange {
    /// A new symlink was created.
    Created,
    /// The target was moved into the source location and linked.
    Moved,
}

/// One entry's source/target pair, with `~` already expanded.
#[derive(Debug, Clone)]
pub struct LinkResource {
    /// Entry name, used in messages.
    pub name: String,
    /// What the symlink points to.
    pub source: PathBuf,
    /// Where the symlink lives.
    pub target: PathBuf,
}

impl LinkResource {
    /// Create a link resource from already expanded paths.
    #[must_use]
    pub fn new(name: impl Into<String>, source: PathBuf, target: PathBuf) -> Self {
        Self {
            name: name.into(),
            source,
            target,
        }
    }

    /// Build a link resource from a record, expanding `~` in both paths and
    /// anchoring relative paths to the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] if either path cannot be expanded.
    pub fn from_record(record: &Record) -> Result<Self, PathError> {
        Ok(Self::new(
            record.name(),
            absolute_path(record.source())?,
            absolute_path(record.target())?,
        ))
    }

    /// Human-readable description of this link.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    /// Inspect the filesystem.
    #[must_use]
    pub fn current_state(&self) -> LinkState {
        if fs::is_symlink(&self.target) {
            return LinkState::TargetIsSymlink;
        }
        match (self.source.exists(), fs::entry_exists(&self.target)) {
            (true, true) => LinkState::BothExist,
            (true, false) => LinkState::SourceOnly,
            (false, true) => LinkState::TargetOnly,
            (false, false) => LinkState::Neither,
        }
    }

    /// Decide what to do for the current state without touching anything.
    ///
    /// # Errors
    ///
    /// Returns the refusal for states that are never resolved automatically:
    /// [`LinkError::AlreadyLinked`], [`LinkError::Conflict`] or
    /// [`LinkError::NeitherExists`].
    pub fn plan(&self) -> Result<Action, LinkError> {
        match self.current_state() {
            LinkState::TargetIsSymlink => Err(LinkError::AlreadyLinked {
                target: self.target.clone(),
            }),
            LinkState::BothExist => Err(LinkError::Conflict {
                source_path: self.source.clone(),
                target: self.target.clone(),
            }),
            LinkState::SourceOnly => Ok(Action::CreateLink),
            LinkState::TargetOnly => Ok(Action::MoveAndLink),
            LinkState::Neither => Err(LinkError::NeitherExists {
                source_path: self.source.clone(),
                target: self.target.clone(),
            }),
        }
    }

    /// Converge the target to a symlink pointing at the source.
    ///
    /// The only interactive step is the confirmation before adopting an
    /// existing target as the new source.
    ///
    /// # Errors
    ///
    /// Returns a refusal from [`plan`](Self::plan), [`LinkError::UserCancelled`]
    /// when the move is declined, or a filesystem failure. A link failure after
    /// a successful move is reported as [`LinkError::RolledBack`] or, when the
    /// move cannot be undone, [`LinkError::Inconsistent`].
    pub fn reconcile(&self, prompt: &dyn Prompt, log: &dyn Log) -> Result<LinkChange, LinkError> {
        match self.plan()? {
            Action::CreateLink => {
                log.debug(&format!("{}: creating {}", self.name, self.description()));
                self.create_link()?;
                Ok(LinkChange::Created)
            }
            Action::MoveAndLink => {
                let question = format!(
                    "{} exists but {} does not. Move it there and link it?",
                    self.target.display(),
                    self.source.display()
                );
                let confirmed = prompt.confirm(&question).map_err(|source| LinkError::Io {
                    action: "read confirmation for",
                    path: self.target.clone(),
                    source,
                })?;
                if !confirmed {
                    return Err(LinkError::UserCancelled);
                }
                log.debug(&format!(
                    "{}: moving {} to {}",
                    self.name,
                    self.target.display(),
                    self.source.display()
                ));
                self.move_and_link_with(fs::create_symlink)
                    .inspect_err(|e| {
                        if matches!(e, LinkError::Inconsistent { .. }) {
                            log.error(&e.to_string());
                        }
                    })?;
                Ok(LinkChange::Moved)
            }
        }
    }

    /// Whether the target is a symlink resolving to the source.
    #[must_use]
    pub fn points_to_source(&self) -> bool {
        fs::points_to(&self.target, &self.source)
    }

    /// Remove the symlink at the target.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Io`] if the target is not a symlink or cannot be
    /// removed.
    pub fn unlink(&self) -> Result<(), LinkError> {
        fs::remove_symlink(&self.target).map_err(|source| LinkError::Io {
            action: "remove symlink",
            path: self.target.clone(),
            source,
        })
    }

    fn create_link(&self) -> Result<(), LinkError> {
        fs::ensure_parent_dir(&self.target).map_err(|source| LinkError::Io {
            action: "create parent directory of",
            path: self.target.clone(),
            source,
        })?;
        fs::create_symlink(&self.source, &self.target).map_err(|source| LinkError::Io {
            action: "create symlink",
            path: self.target.clone(),
            source,
        })
    }

    /// Move the target to the source path, then link it using `link`.
    ///
    /// If linking fails the move is undone.
    fn move_and_link_with(
        &self,
        link: impl FnOnce(&Path, &Path) -> io::Result<()>,
    ) -> Result<(), LinkError> {
        fs::ensure_parent_dir(&self.source).map_err(|source| LinkError::Io {
            action: "create parent directory of",
            path: self.source.clone(),
            source,
        })?;
        // Cross-volume renames fail here and are surfaced, not copied.
        std::fs::rename(&self.target, &self.source).map_err(|source| LinkError::Io {
            action: "move",
            path: self.target.clone(),
            source,
        })?;

        let Err(cause) = link(&self.source, &self.target) else {
            return Ok(());
        };
        match std::fs::rename(&self.source, &self.target) {
            Ok(()) => Err(LinkError::RolledBack {
                target: self.target.clone(),
                source: cause,
            }),
            Err(source) => Err(LinkError::Inconsistent {
                source_path: self.source.clone(),
                target: self.target.clone(),
                cause,
                source,
            }),
        }
    }
}
