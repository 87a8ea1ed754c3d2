//! File-system primitives used by link reconciliation.
use std::io;
use std::path::{Path, PathBuf};

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Whether anything (including a dangling symlink) exists at `path`.
#[must_use]
pub fn entry_exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Whether `path` itself is a symlink (dangling or not).
#[must_use]
pub fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata().is_ok_and(|m| m.is_symlink())
}

/// Create a symlink at `link` pointing to `target`.
///
/// # Errors
///
/// Returns an error if the link cannot be created.
pub fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    {
        if target.is_dir() {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        }
    }
}

/// Remove the symlink at `path` without touching what it points to.
///
/// On Windows, directory symlinks must be removed with `remove_dir`.
///
/// # Errors
///
/// Returns an error if `path` is not a symlink or cannot be removed.
pub fn remove_symlink(path: &Path) -> io::Result<()> {
    let meta = std::fs::symlink_metadata(path)?;
    if !meta.is_symlink() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("not a symlink: {}", path.display()),
        ));
    }
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt as _;
        const FILE_ATTRIBUTE_DIRECTORY: u32 = 0x10;
        if meta.file_attributes() & FILE_ATTRIBUTE_DIRECTORY != 0 {
            return std::fs::remove_dir(path);
        }
    }
    std::fs::remove_file(path)
}

/// Return the path the symlink at `link` points to, or `None` when `link` is
/// not a symlink.
#[must_use]
pub fn read_link(link: &Path) -> Option<PathBuf> {
    std::fs::read_link(link).ok()
}

/// Whether the symlink at `link` resolves to `expected`.
///
/// Both sides are canonicalized (with `dunce`, so Windows paths come back
/// without the `\\?\` prefix) before comparison. A dangling link, or a
/// missing `expected`, never matches.
#[must_use]
pub fn points_to(link: &Path, expected: &Path) -> bool {
    if read_link(link).is_none() {
        return false;
    }
    match (dunce::canonicalize(link), dunce::canonicalize(expected)) {
        (Ok(resolved), Ok(wanted)) => resolved == wanted,
        _ => false,
    }
}
