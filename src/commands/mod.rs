//! One module per action; each exposes a `run` entry point.
pub mod add;
pub mod backup;
pub mod del;
pub mod edit;
pub mod init;
pub mod list;
pub mod sync;
pub mod version;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::ConfigFile;
use crate::config::store::EntryStore;
use crate::logging::Logger;
use crate::paths;
use crate::resources::{AssumeYes, Prompt, TerminalPrompt};

/// Shared state produced by the common command setup sequence.
///
/// Resolves the config file location and picks the prompt implementation so
/// that each command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// The config file every command reads (and mutating commands write).
    pub config: ConfigFile,
    /// Report planned actions without touching the filesystem.
    pub dry_run: bool,
    /// Source of interactive answers.
    pub prompt: Box<dyn Prompt>,
}

impl CommandSetup {
    /// Resolve the config file and prompt from the global options.
    ///
    /// # Errors
    ///
    /// Returns an error if the config path cannot be resolved (e.g. `HOME`
    /// is unset).
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let path = paths::resolve_config_path(global.config.as_deref())
            .context("resolving config file location")?;
        log.debug(&format!("config file: {}", path.display()));

        let prompt: Box<dyn Prompt> = if global.yes {
            Box::new(AssumeYes)
        } else {
            Box::new(TerminalPrompt)
        };

        Ok(Self {
            config: ConfigFile::new(path),
            dry_run: global.dry_run,
            prompt,
        })
    }

    /// Load the entry store from the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is malformed.
    pub fn load(&self, log: &Logger) -> Result<EntryStore> {
        let store = self.config.load()?;
        log.debug(&format!(
            "loaded {} entries from {}",
            store.len(),
            self.config.path().display()
        ));
        Ok(store)
    }

    /// Sort and write `store` back to the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, store: &mut EntryStore, log: &Logger) -> Result<()> {
        self.config.save(store)?;
        log.debug(&format!(
            "wrote {} entries to {}",
            store.len(),
            self.config.path().display()
        ));
        Ok(())
    }
}

/// Report an unrecognized action.
///
/// # Errors
///
/// Always returns an error naming the action.
pub fn unknown(args: &[String], log: &Logger) -> Result<()> {
    let action = args.first().map_or("", String::as_str);
    log.error(&format!("unknown action '{action}', see 'dotlink help'"));
    anyhow::bail!("unknown action '{action}'")
}

/// Shared helpers for command unit tests.
#[cfg(test)]
pub mod test_helpers {
    use super::CommandSetup;
    use crate::config::ConfigFile;
    use crate::resources::Prompt;

    /// Build a setup around a config file at `path` with the given prompt.
    #[must_use]
    pub fn setup_with(config: ConfigFile, prompt: impl Prompt + 'static) -> CommandSetup {
        CommandSetup {
            config,
            dry_run: false,
            prompt: Box::new(prompt),
        }
    }
}
