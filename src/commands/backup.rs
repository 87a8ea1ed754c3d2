//! Command: copy the config file to a backup location.
use anyhow::Result;

use super::CommandSetup;
use crate::cli::BackupOpts;
use crate::logging::Logger;
use crate::paths;

/// Run the backup command.
///
/// # Errors
///
/// Returns an error if the output path cannot be expanded or the config file
/// cannot be copied.
pub fn run(setup: &CommandSetup, opts: &BackupOpts, log: &Logger) -> Result<()> {
    let dest = match &opts.output {
        Some(output) => paths::expand_path(output)?,
        None => setup.config.default_backup_path(),
    };
    if setup.dry_run {
        log.dry_run(&format!(
            "would copy {} to {}",
            setup.config.path().display(),
            dest.display()
        ));
        return Ok(());
    }
    setup.config.backup_to(&dest)?;
    log.info(&format!("backed up to {}", dest.display()));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::test_helpers::setup_with;
    use crate::config::test_helpers::write_temp_config;
    use crate::logging::isolated_logger;
    use crate::resources::AssumeYes;

    #[test]
    fn backup_to_explicit_output() {
        let (log, _t, _g) = isolated_logger();
        let (dir, config) = write_temp_config("vim,/d/vimrc,/h/.vimrc\n");
        let out = dir.path().join("backups").join("copy.cfg");
        let setup = setup_with(config, AssumeYes);

        run(
            &setup,
            &BackupOpts {
                output: Some(out.display().to_string()),
            },
            &log,
        )
        .unwrap();
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "vim,/d/vimrc,/h/.vimrc\n"
        );
    }

    #[test]
    fn backup_default_location_is_beside_config() {
        let (log, _t, _g) = isolated_logger();
        let (dir, config) = write_temp_config("vim,/d/vimrc,/h/.vimrc\n");
        let setup = setup_with(config, AssumeYes);

        run(&setup, &BackupOpts { output: None }, &log).unwrap();
        let backups: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".bak"))
            .collect();
        assert_eq!(backups.len(), 1);
    }

    #[test]
    fn backup_missing_config_fails() {
        let (log, _t, _g) = isolated_logger();
        let tmp = tempfile::tempdir().unwrap();
        let setup = setup_with(
            crate::config::ConfigFile::new(tmp.path().join("missing.cfg")),
            AssumeYes,
        );
        assert!(run(&setup, &BackupOpts { output: None }, &log).is_err());
    }
}
