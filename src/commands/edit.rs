//! Command: change the fields of a tracked dotfile.
use anyhow::{Context as _, Result};

use super::CommandSetup;
use crate::cli::EditOpts;
use crate::config::record::{Field, Record};
use crate::error::StoreError;
use crate::logging::Logger;
use crate::resources::Prompt;

/// Run the edit command.
///
/// Fields given on the command line are applied directly. Without any, each
/// field is asked for in turn (blank keeps the current value) and the result
/// is saved only after confirmation. Links on disk are not touched; run
/// `sync` afterwards to link the new target.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or written, no entry has
/// the name, a new value is invalid, or an answer cannot be read.
pub fn run(setup: &CommandSetup, opts: &EditOpts, log: &Logger) -> Result<()> {
    let mut store = setup.load(log)?;
    let index = store.find_by_name(&opts.name)?;
    let current = store
        .get(index)
        .ok_or(StoreError::IndexOutOfBounds {
            index,
            len: store.len(),
        })?
        .clone();

    let edited = if opts.has_changes() {
        apply_flags(&current, opts)?
    } else {
        let edited = ask_fields(&current, setup.prompt.as_ref())?;
        if edited != current
            && !setup
                .prompt
                .confirm(&format!("Save changes to '{}'?", current.name()))
                .context("reading confirmation")?
        {
            log.info("changes discarded");
            return Ok(());
        }
        edited
    };

    if edited == current {
        log.info(&format!("{} unchanged", current.name()));
        return Ok(());
    }
    if edited.name() != current.name() && store.find_by_name(edited.name()).is_ok() {
        log.warn(&format!(
            "an entry named '{}' already exists; lookups will use the first one",
            edited.name()
        ));
    }

    for field in Field::ALL {
        if edited.get(field) != current.get(field) {
            let message = format!(
                "{field}: {} -> {}",
                current.get(field),
                edited.get(field)
            );
            if setup.dry_run {
                log.dry_run(&format!("would change {message}"));
            } else {
                log.info(&message);
            }
        }
    }
    if setup.dry_run {
        return Ok(());
    }

    if let Some(slot) = store.get_mut(index) {
        *slot = edited;
    }
    setup.save(&mut store, log)?;
    log.info(&format!("updated {}", opts.name));
    Ok(())
}

fn apply_flags(current: &Record, opts: &EditOpts) -> Result<Record> {
    let mut edited = current.clone();
    let changes = [
        (Field::Name, &opts.new_name),
        (Field::Source, &opts.source),
        (Field::Target, &opts.target),
    ];
    for (field, value) in changes {
        if let Some(value) = value {
            edited.set(field, value)?;
        }
    }
    Ok(edited)
}

fn ask_fields(current: &Record, prompt: &dyn Prompt) -> Result<Record> {
    let mut edited = current.clone();
    for field in Field::ALL {
        let value = prompt
            .input(&field.to_string(), current.get(field))
            .with_context(|| format!("reading new {field}"))?;
        edited.set(field, value)?;
    }
    Ok(edited)
}
