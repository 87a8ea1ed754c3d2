//! Command: reconcile tracked dotfiles against the filesystem.
use anyhow::Result;

use super::CommandSetup;
use crate::cli::SyncOpts;
use crate::config::record::Record;
use crate::config::store::EntryStore;
use crate::error::{LinkError, StoreError};
use crate::logging::{Logger, Status};
use crate::resources::{LinkChange, LinkResource};

/// Run the sync command.
///
/// Entries are reconciled one at a time in config order; one failing entry
/// does not stop the others. The config file is never written.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, a requested name is not
/// tracked, or any entry failed.
pub fn run(setup: &CommandSetup, opts: &SyncOpts, log: &Logger) -> Result<()> {
    let store = setup.load(log)?;
    let selected = select(&store, &opts.names)?;

    log.stage(&format!("Syncing {} entries", selected.len()));
    for record in selected {
        sync_entry(setup, record, log);
    }

    log.print_summary();

    if log.has_failures() {
        anyhow::bail!("{} entries failed", log.failure_count());
    }
    Ok(())
}

/// Pick the records to sync: all of them, or the first match for each name.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] for the first name with no entry.
pub fn select<'a>(
    store: &'a EntryStore,
    names: &[String],
) -> Result<Vec<&'a Record>, StoreError> {
    if names.is_empty() {
        return Ok(store.iter().collect());
    }
    names
        .iter()
        .map(|name| {
            let index = store.find_by_name(name)?;
            store.get(index).ok_or(StoreError::IndexOutOfBounds {
                index,
                len: store.len(),
            })
        })
        .collect()
}

fn sync_entry(setup: &CommandSetup, record: &Record, log: &Logger) {
    let name = record.name();
    let link = match LinkResource::from_record(record) {
        Ok(link) => link,
        Err(e) => {
            log.error(&format!("{name}: {e}"));
            log.record(name, Status::Failed, Some(&e.to_string()));
            return;
        }
    };

    if setup.dry_run {
        match link.plan() {
            Ok(action) => {
                log.dry_run(&format!("{name}: would {action}: {}", link.description()));
                log.record(name, Status::DryRun, Some(&action.to_string()));
            }
            Err(e) => report(&link, &Err(e), log),
        }
        return;
    }

    let result = link.reconcile(setup.prompt.as_ref(), log);
    report(&link, &result, log);
}

/// Summary status and detail message for one reconciliation result.
#[must_use]
pub fn classify(result: &Result<LinkChange, LinkError>) -> (Status, String) {
    match result {
        Ok(LinkChange::Created) => (Status::Ok, "linked".to_string()),
        Ok(LinkChange::Moved) => (Status::Ok, "moved and linked".to_string()),
        Err(LinkError::AlreadyLinked { .. }) => (Status::Skipped, "already linked".to_string()),
        Err(LinkError::UserCancelled) => (Status::Skipped, "cancelled".to_string()),
        Err(e) => (Status::Failed, e.to_string()),
    }
}

fn report(link: &LinkResource, result: &Result<LinkChange, LinkError>, log: &Logger) {
    let (status, message) = classify(result);
    match status {
        Status::Failed if matches!(result, Err(e) if e.is_refusal()) => {
            log.warn(&format!("{}: {message}", link.name));
        }
        Status::Failed => log.error(&format!("{}: {message}", link.name)),
        Status::Skipped
            if matches!(result, Err(LinkError::AlreadyLinked { .. }))
                && !link.points_to_source() =>
        {
            log.warn(&format!(
                "{}: {} is a symlink to somewhere else, leaving it alone",
                link.name,
                link.target.display()
            ));
        }
        _ => log.info(&format!("{}: {message}", link.name)),
    }
    log.record(&link.name, status, Some(&message));
}
