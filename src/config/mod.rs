//! Config file handling: records, the in-memory store, and the text codec.
pub mod codec;
pub mod record;
pub mod store;

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use store::EntryStore;

/// The on-disk config file holding all tracked entries.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    /// Refer to the config file at `path`; nothing is read yet.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Location of the config file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the config file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and decode the whole file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read (including
    /// invalid UTF-8) and [`ConfigError::Parse`] for the first malformed line.
    pub fn load(&self) -> Result<EntryStore, ConfigError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        codec::decode(&text).map_err(|source| ConfigError::Parse {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Sort `store` by name and write it to disk.
    ///
    /// The text is written to a sibling temporary file which is then renamed
    /// over the config file, so a failed write leaves the previous contents
    /// intact. An empty store is written as an empty file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the temporary file cannot be written or
    /// renamed into place.
    pub fn save(&self, store: &mut EntryStore) -> Result<(), ConfigError> {
        if !store.is_empty() {
            // Non-empty is checked above, so this cannot report `Empty`.
            store.sort_by_name().ok();
        }
        self.write_atomic(&codec::encode(store))
    }

    /// Create an empty config file, including missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AlreadyExists`] if the file exists and `force`
    /// is not set, or [`ConfigError::Io`] if it cannot be created.
    pub fn create_empty(&self, force: bool) -> Result<(), ConfigError> {
        if self.exists() && !force {
            return Err(ConfigError::AlreadyExists(self.path.display().to_string()));
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        self.write_atomic("")
    }

    /// Copy the config file to `dest`, creating its parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be copied.
    pub fn backup_to(&self, dest: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        std::fs::copy(&self.path, dest).map_err(|source| self.io_error(source))?;
        Ok(())
    }

    /// Default backup location: `<config>.<UTC timestamp>.bak` beside the file.
    #[must_use]
    pub fn default_backup_path(&self) -> PathBuf {
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
        let file_name = self
            .path
            .file_name()
            .map_or_else(|| "dotfiles.cfg".into(), |n| n.to_string_lossy());
        self.path.with_file_name(format!("{file_name}.{stamp}.bak"))
    }

    /// Write `contents` to a sibling temp file, then rename it over the
    /// config file. Keeps the rename on the same filesystem.
    fn write_atomic(&self, contents: &str) -> Result<(), ConfigError> {
        let file_name = self
            .path
            .file_name()
            .map_or_else(|| "dotfiles.cfg".into(), |n| n.to_string_lossy());
        let tmp = self.path.with_file_name(format!(".{file_name}.tmp"));

        let cleanup = || {
            let _ = std::fs::remove_file(&tmp);
        };

        if let Err(source) = std::fs::write(&tmp, contents) {
            cleanup();
            return Err(ConfigError::Io {
                path: tmp.display().to_string(),
                source,
            });
        }
        if let Err(source) = std::fs::rename(&tmp, &self.path) {
            cleanup();
            return Err(self.io_error(source));
        }
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> ConfigError {
        ConfigError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::record::Record;
    use super::test_helpers::write_temp_config;
    use super::*;
    use crate::error::ParseErrorKind;

    #[test]
    fn load_reads_entries() {
        let (_dir, cfg) = write_temp_config("vim,~/d/vimrc,~/.vimrc\n");
        let store = cfg.load().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].name(), "vim");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ConfigFile::new(dir.path().join("absent.cfg"));
        assert!(matches!(cfg.load(), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn load_invalid_utf8_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.cfg");
        std::fs::write(&path, [0xff, 0xfe, b',', b'a']).unwrap();
        let cfg = ConfigFile::new(path);
        assert!(matches!(cfg.load(), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn load_malformed_file_is_parse_error() {
        let (_dir, cfg) = write_temp_config("ok,s,t\nbad,,t\n");
        let err = cfg.load().unwrap_err();
        assert!(
            matches!(
                &err,
                ConfigError::Parse { source, .. }
                    if source.line == 2 && source.kind == ParseErrorKind::EmptyField { field: 2 }
            ),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn save_sorts_store_and_file() {
        let (_dir, cfg) = write_temp_config("");
        let mut store = EntryStore::from(vec![
            Record::new("zeta", "s1", "t1").unwrap(),
            Record::new("alpha", "s2", "t2").unwrap(),
        ]);
        cfg.save(&mut store).unwrap();
        assert_eq!(store.records()[0].name(), "alpha");
        assert_eq!(
            std::fs::read_to_string(cfg.path()).unwrap(),
            "alpha,s2,t2\nzeta,s1,t1\n"
        );
    }

    #[test]
    fn save_is_byte_for_byte_idempotent() {
        let (_dir, cfg) = write_temp_config("b,2,x\na,1,y\nb,1,z\n");
        let mut store = cfg.load().unwrap();
        cfg.save(&mut store).unwrap();
        let first = std::fs::read(cfg.path()).unwrap();
        let mut again = cfg.load().unwrap();
        cfg.save(&mut again).unwrap();
        assert_eq!(std::fs::read(cfg.path()).unwrap(), first);
    }

    #[test]
    fn save_empty_store_writes_empty_file() {
        let (_dir, cfg) = write_temp_config("a,b,c\n");
        cfg.save(&mut EntryStore::new()).unwrap();
        assert_eq!(std::fs::read_to_string(cfg.path()).unwrap(), "");
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let (dir, cfg) = write_temp_config("");
        let mut store = EntryStore::from(vec![Record::new("a", "b", "c").unwrap()]);
        cfg.save(&mut store).unwrap();
        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["dotfiles.cfg"]);
    }

    #[test]
    fn save_into_missing_directory_keeps_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ConfigFile::new(dir.path().join("missing").join("dotfiles.cfg"));
        let mut store = EntryStore::from(vec![Record::new("a", "b", "c").unwrap()]);
        assert!(matches!(cfg.save(&mut store), Err(ConfigError::Io { .. })));
        assert!(!cfg.exists());
    }

    #[test]
    fn create_empty_makes_parents() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ConfigFile::new(dir.path().join("a").join("b").join("dotfiles.cfg"));
        cfg.create_empty(false).unwrap();
        assert!(cfg.exists());
        assert!(cfg.load().unwrap().is_empty());
    }

    #[test]
    fn create_empty_refuses_existing_without_force() {
        let (_dir, cfg) = write_temp_config("a,b,c\n");
        assert!(matches!(
            cfg.create_empty(false),
            Err(ConfigError::AlreadyExists(_))
        ));
        assert_eq!(cfg.load().unwrap().len(), 1);
        cfg.create_empty(true).unwrap();
        assert!(cfg.load().unwrap().is_empty());
    }

    #[test]
    fn backup_copies_contents() {
        let (dir, cfg) = write_temp_config("a,b,c\n");
        let dest = dir.path().join("backups").join("copy.cfg");
        cfg.backup_to(&dest).unwrap();
        assert_eq!(std::fs::read_to_string(dest).unwrap(), "a,b,c\n");
    }

    #[test]
    fn default_backup_path_is_a_sibling() {
        let cfg = ConfigFile::new(PathBuf::from("/x/dotfiles.cfg"));
        let backup = cfg.default_backup_path();
        assert_eq!(backup.parent(), Some(Path::new("/x")));
        let name = backup.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("dotfiles.cfg."), "got {name}");
        assert!(name.ends_with(".bak"), "got {name}");
    }
}
