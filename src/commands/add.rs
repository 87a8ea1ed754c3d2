//! Command: track a new dotfile.
use anyhow::Result;

use super::CommandSetup;
use crate::cli::AddOpts;
use crate::config::record::Record;
use crate::error::LinkError;
use crate::logging::Logger;
use crate::resources::{LinkChange, LinkResource};

/// Run the add command.
///
/// With `--link` the entry is reconciled before the config file is written,
/// so a refused or failed link never records the entry. If the write then
/// fails the new link stays behind without an entry.
///
/// # Errors
///
/// Returns an error if a field is invalid, the config cannot be loaded or
/// written, or `--link` was given and the link cannot be established. On error
/// the config file is left untouched.
pub fn run(setup: &CommandSetup, opts: &AddOpts, log: &Logger) -> Result<()> {
    let mut store = setup.load(log)?;
    let record = Record::new(&opts.name, &opts.source, &opts.target)?;

    if store.find_by_name(record.name()).is_ok() {
        log.warn(&format!(
            "an entry named '{}' already exists; lookups will use the first one",
            record.name()
        ));
    }

    if opts.link {
        link_new_entry(setup, &record, log)?;
    }

    if setup.dry_run {
        log.dry_run(&format!(
            "would add {}: {} -> {}",
            record.name(),
            record.target(),
            record.source()
        ));
        return Ok(());
    }

    let name = record.name().to_string();
    store.push(record);
    setup.save(&mut store, log)?;
    log.info(&format!("added {name}"));
    Ok(())
}

fn link_new_entry(setup: &CommandSetup, record: &Record, log: &Logger) -> Result<()> {
    let link = LinkResource::from_record(record)?;

    if setup.dry_run {
        match link.plan() {
            Ok(action) => log.dry_run(&format!("would {action}: {}", link.description())),
            Err(e) => log.dry_run(&format!("would not link: {e}")),
        }
        return Ok(());
    }

    match link.reconcile(setup.prompt.as_ref(), log) {
        Ok(LinkChange::Created) => log.info(&format!("linked {}", link.description())),
        Ok(LinkChange::Moved) => log.info(&format!(
            "moved {} into place and linked it",
            link.target.display()
        )),
        Err(LinkError::AlreadyLinked { .. }) if link.points_to_source() => {
            log.info(&format!("{} is already linked", link.target.display()));
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
