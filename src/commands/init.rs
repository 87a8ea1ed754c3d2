//! Command: create an empty config file.
use anyhow::Result;

use super::CommandSetup;
use crate::cli::InitOpts;
use crate::logging::Logger;

/// Run the init command.
///
/// # Errors
///
/// Returns an error if the config file already exists (without `--force`) or
/// cannot be created.
pub fn run(setup: &CommandSetup, opts: &InitOpts, log: &Logger) -> Result<()> {
    let path = setup.config.path();
    if setup.dry_run {
        log.dry_run(&format!("would create {}", path.display()));
        return Ok(());
    }
    if opts.force && setup.config.exists() {
        log.warn(&format!("overwriting {}", path.display()));
    }
    setup.config.create_empty(opts.force)?;
    log.info(&format!("created {}", path.display()));
    Ok(())
}
