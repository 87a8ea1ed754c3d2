//! Home-directory expansion and config file location.
use std::borrow::Cow;
use std::path::PathBuf;

use crate::error::PathError;

/// Marker that stands for the user's home directory at the start of a path.
pub const HOME_MARKER: char = '~';

/// Config file name inside the `dotlink` config directory.
pub const CONFIG_FILE_NAME: &str = "dotfiles.cfg";

/// Expand a leading `~` using `$HOME`.
///
/// Paths that do not start with `~` are returned borrowed, unchanged. Only
/// the single marker character is replaced, so `~/x` becomes `$HOME/x` and
/// `~x` becomes `$HOMEx`.
///
/// # Errors
///
/// Returns [`PathError::HomeUnset`] if the path needs expanding and `$HOME` is
/// unset, empty, or not valid UTF-8, and [`PathError::Alloc`] if the expanded
/// string cannot be allocated.
pub fn expand_home(path: &str) -> Result<Cow<'_, str>, PathError> {
    if !path.starts_with(HOME_MARKER) {
        return Ok(Cow::Borrowed(path));
    }
    let home = std::env::var("HOME").ok();
    expand_home_with(path, home.as_deref())
}

/// Expand a leading `~` using an explicit home directory value.
///
/// # Errors
///
/// See [`expand_home`].
pub fn expand_home_with<'a>(path: &'a str, home: Option<&str>) -> Result<Cow<'a, str>, PathError> {
    let Some(rest) = path.strip_prefix(HOME_MARKER) else {
        return Ok(Cow::Borrowed(path));
    };
    let home = home.filter(|h| !h.is_empty()).ok_or(PathError::HomeUnset)?;

    let mut expanded = String::new();
    expanded.try_reserve_exact(home.len() + rest.len())?;
    expanded.push_str(home);
    expanded.push_str(rest);
    Ok(Cow::Owned(expanded))
}

/// Expand a leading `~` and return the result as a [`PathBuf`].
///
/// # Errors
///
/// See [`expand_home`].
pub fn expand_path(path: &str) -> Result<PathBuf, PathError> {
    Ok(PathBuf::from(expand_home(path)?.into_owned()))
}

/// Expand a leading `~`, then anchor a relative result to the current
/// directory.
///
/// Symlinks store their target text verbatim and resolve it against the
/// link's own directory, so link sources must be absolute.
///
/// # Errors
///
/// See [`expand_home`]; also returns [`PathError::CurrentDir`] if the current
/// directory cannot be determined.
pub fn absolute_path(path: &str) -> Result<PathBuf, PathError> {
    let expanded = expand_path(path)?;
    if expanded.is_absolute() {
        return Ok(expanded);
    }
    std::path::absolute(&expanded).map_err(|source| PathError::CurrentDir {
        path: expanded.display().to_string(),
        source,
    })
}

/// Resolve the config file location.
///
/// Resolution order:
/// 1. `explicit` (from `--config` or `DOTLINK_CONFIG`), with `~` expanded
/// 2. `$XDG_CONFIG_HOME/dotlink/dotfiles.cfg`
/// 3. `$HOME/.config/dotlink/dotfiles.cfg`
///
/// # Errors
///
/// Returns [`PathError`] if expansion fails or no base directory is known.
pub fn resolve_config_path(explicit: Option<&str>) -> Result<PathBuf, PathError> {
    let xdg = std::env::var("XDG_CONFIG_HOME").ok();
    let home = std::env::var("HOME").ok();
    resolve_config_path_with(explicit, xdg.as_deref(), home.as_deref())
}

/// [`resolve_config_path`] with explicit environment values.
///
/// # Errors
///
/// See [`resolve_config_path`].
pub fn resolve_config_path_with(
    explicit: Option<&str>,
    xdg_config_home: Option<&str>,
    home: Option<&str>,
) -> Result<PathBuf, PathError> {
    if let Some(path) = explicit {
        return Ok(PathBuf::from(expand_home_with(path, home)?.into_owned()));
    }

    let config_dir = match xdg_config_home.filter(|x| !x.is_empty()) {
        Some(xdg) => PathBuf::from(xdg),
        None => PathBuf::from(home.filter(|h| !h.is_empty()).ok_or(PathError::HomeUnset)?)
            .join(".config"),
    };
    Ok(config_dir.join("dotlink").join(CONFIG_FILE_NAME))
}
