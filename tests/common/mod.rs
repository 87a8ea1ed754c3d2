// Shared helpers for integration tests.
//
// Provides a temporary home directory with a config file and a fluent
// builder so each integration test can set up an isolated environment
// without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::io;
use std::path::{Path, PathBuf};

use dotlink_cli::config::ConfigFile;
use dotlink_cli::logging::{Log, Status};
use dotlink_cli::resources::Prompt;

/// An isolated home directory backed by a [`tempfile::TempDir`].
///
/// Holds `dotfiles/` (sources), `home/` (targets), and
/// `config/dotfiles.cfg`. Everything is deleted when dropped.
pub struct TestHome {
    /// Temporary directory containing everything.
    pub root: tempfile::TempDir,
}

impl TestHome {
    /// Create a new home with empty `dotfiles/` and `home/` directories.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("dotfiles")).expect("create dotfiles dir");
        std::fs::create_dir_all(root.path().join("home")).expect("create home dir");
        std::fs::create_dir_all(root.path().join("config")).expect("create config dir");
        Self { root }
    }

    /// Path of a source file inside `dotfiles/`.
    pub fn source(&self, name: &str) -> PathBuf {
        self.root.path().join("dotfiles").join(name)
    }

    /// Path of a target inside `home/`.
    pub fn target(&self, name: &str) -> PathBuf {
        self.root.path().join("home").join(name)
    }

    /// Path of the config file.
    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("config").join("dotfiles.cfg")
    }

    /// Handle to the config file.
    pub fn config(&self) -> ConfigFile {
        ConfigFile::new(self.config_path())
    }

    /// Current config file contents.
    pub fn config_text(&self) -> String {
        std::fs::read_to_string(self.config_path()).expect("read config")
    }

    /// Config line for `name` using [`source`](Self::source) and
    /// [`target`](Self::target).
    pub fn line(&self, name: &str, file: &str) -> String {
        format!(
            "{name},{},{}\n",
            self.source(file).display(),
            self.target(&format!(".{file}")).display()
        )
    }
}

/// Fluent builder for [`TestHome`].
pub struct TestHomeBuilder {
    home: TestHome,
    config: String,
}

impl TestHomeBuilder {
    /// Begin building a new home with an empty config.
    pub fn new() -> Self {
        Self {
            home: TestHome::new(),
            config: String::new(),
        }
    }

    /// Track `dotfiles/<file>` as `home/.<file>` under `name`.
    pub fn with_entry(mut self, name: &str, file: &str) -> Self {
        let line = self.home.line(name, file);
        self.config.push_str(&line);
        self
    }

    /// Append raw text to the config.
    pub fn with_raw_config(mut self, text: &str) -> Self {
        self.config.push_str(text);
        self
    }

    /// Create `dotfiles/<file>` with `content`.
    pub fn with_source(self, file: &str, content: &str) -> Self {
        write_file(&self.home.source(file), content);
        self
    }

    /// Create `home/.<file>` with `content`.
    pub fn with_target(self, file: &str, content: &str) -> Self {
        write_file(&self.home.target(&format!(".{file}")), content);
        self
    }

    /// Write the config file and return the home.
    pub fn build(self) -> TestHome {
        std::fs::write(self.home.config_path(), &self.config).expect("write config");
        self.home
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, content).expect("write file");
}

/// A [`Log`] that discards every message.
#[derive(Debug, Default)]
pub struct NullLog;

impl Log for NullLog {
    fn stage(&self, _msg: &str) {}
    fn info(&self, _msg: &str) {}
    fn debug(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
    fn dry_run(&self, _msg: &str) {}
    fn record(&self, _name: &str, _status: Status, _message: Option<&str>) {}
}

/// A [`Prompt`] that answers no and keeps every current value.
#[derive(Debug, Default)]
pub struct Decline;

impl Prompt for Decline {
    fn confirm(&self, _question: &str) -> io::Result<bool> {
        Ok(false)
    }

    fn input(&self, _label: &str, current: &str) -> io::Result<String> {
        Ok(current.to_string())
    }
}
