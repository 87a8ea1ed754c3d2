//! Command: stop tracking a dotfile.
use anyhow::Result;

use super::CommandSetup;
use crate::cli::DelOpts;
use crate::logging::Logger;
use crate::resources::{LinkResource, fs};

/// Run the del command.
///
/// Removes the first entry with the given name. Unless `--keep-link` is set,
/// that entry's own target is unlinked when it is a symlink; anything else
/// at the target is left in place with a warning.
///
/// The config file is written first and the symlink removed afterwards, so a
/// failed write leaves both the entry and its link in place. A failed unlink
/// after a successful write leaves only a stray link behind.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or written, no entry has
/// the name, or the symlink cannot be removed.
pub fn run(setup: &CommandSetup, opts: &DelOpts, log: &Logger) -> Result<()> {
    let mut store = setup.load(log)?;
    let index = store.find_by_name(&opts.name)?;
    let removed = store.delete_at(index)?;
    let link = if opts.keep_link {
        None
    } else {
        Some(LinkResource::from_record(&removed)?)
    };

    if setup.dry_run {
        log.dry_run(&format!("would remove entry {}", removed.name()));
    } else {
        setup.save(&mut store, log)?;
        log.info(&format!("removed {}", removed.name()));
    }

    if let Some(link) = link {
        remove_link(setup, &link, log)?;
    }
    Ok(())
}

fn remove_link(setup: &CommandSetup, link: &LinkResource, log: &Logger) -> Result<()> {
    if fs::is_symlink(&link.target) {
        if setup.dry_run {
            log.dry_run(&format!("would remove symlink {}", link.target.display()));
        } else {
            link.unlink()?;
            log.info(&format!("removed symlink {}", link.target.display()));
        }
    } else if fs::entry_exists(&link.target) {
        log.warn(&format!(
            "{} is not a symlink, leaving it in place",
            link.target.display()
        ));
    } else {
        log.debug(&format!("{} does not exist", link.target.display()));
    }
    Ok(())
}

#[cfg(all(test, unix))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::test_helpers::setup_with;
    use crate::config::test_helpers::write_temp_config;
    use crate::logging::isolated_logger;
    use crate::resources::prompt::MockPrompt;

    fn opts(name: &str, keep_link: bool) -> DelOpts {
        DelOpts {
            name: name.to_string(),
            keep_link,
        }
    }

    #[test]
    fn del_removes_entry() {
        let (log, _t, _g) = isolated_logger();
        let (_dir, config) =
            write_temp_config("bash,/d/bashrc,/h/.bashrc\nvim,/d/vimrc,/h/.vimrc\n");
        let setup = setup_with(config, MockPrompt::new());

        run(&setup, &opts("bash", false), &log).unwrap();
        let text = std::fs::read_to_string(setup.config.path()).unwrap();
        assert_eq!(text, "vim,/d/vimrc,/h/.vimrc\n");
    }

    #[test]
    fn del_last_entry_leaves_empty_file() {
        let (log, _t, _g) = isolated_logger();
        let (_dir, config) = write_temp_config("vim,/d/vimrc,/h/.vimrc\n");
        let setup = setup_with(config, MockPrompt::new());

        run(&setup, &opts("vim", false), &log).unwrap();
        assert_eq!(std::fs::read_to_string(setup.config.path()).unwrap(), "");
    }

    #[test]
    fn del_missing_name_fails_and_leaves_file() {
        let (log, _t, _g) = isolated_logger();
        let (_dir, config) = write_temp_config("vim,/d/vimrc,/h/.vimrc\n");
        let setup = setup_with(config, MockPrompt::new());

        let err = run(&setup, &opts("emacs", false), &log).unwrap_err();
        assert!(err.to_string().contains("emacs"));
        assert_eq!(setup.config.load().unwrap().len(), 1);
    }

    #[test]
    fn del_unlinks_the_matching_entry_target() {
        let (log, _t, _g) = isolated_logger();
        let tmp = tempfile::tempdir().unwrap();
        let first_src = tmp.path().join("a-src");
        let first_tgt = tmp.path().join("a-tgt");
        let second_src = tmp.path().join("b-src");
        let second_tgt = tmp.path().join("b-tgt");
        for (src, tgt) in [(&first_src, &first_tgt), (&second_src, &second_tgt)] {
            std::fs::write(src, "").unwrap();
            std::os::unix::fs::symlink(src, tgt).unwrap();
        }
        let (_dir, config) = write_temp_config(&format!(
            "a,{},{}\nb,{},{}\n",
            first_src.display(),
            first_tgt.display(),
            second_src.display(),
            second_tgt.display()
        ));
        let setup = setup_with(config, MockPrompt::new());

        run(&setup, &opts("b", false), &log).unwrap();
        assert!(fs::is_symlink(&first_tgt), "other entries keep their links");
        assert!(!fs::entry_exists(&second_tgt));
        assert!(second_src.exists());
    }

    #[test]
    fn failed_write_keeps_entry_and_link() {
        let (log, _t, _g) = isolated_logger();
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        let tgt = tmp.path().join("tgt");
        std::fs::write(&src, "").unwrap();
        std::os::unix::fs::symlink(&src, &tgt).unwrap();
        let (dir, config) =
            write_temp_config(&format!("a,{},{}\n", src.display(), tgt.display()));
        // A directory where the temp file goes makes the atomic write fail.
        std::fs::create_dir(dir.path().join(".dotfiles.cfg.tmp")).unwrap();
        let setup = setup_with(config, MockPrompt::new());

        assert!(run(&setup, &opts("a", false), &log).is_err());
        assert!(fs::is_symlink(&tgt), "link must survive a failed write");
        assert_eq!(setup.config.load().unwrap().len(), 1);
    }

    #[test]
    fn del_keep_link_leaves_symlink() {
        let (log, _t, _g) = isolated_logger();
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        let tgt = tmp.path().join("tgt");
        std::fs::write(&src, "").unwrap();
        std::os::unix::fs::symlink(&src, &tgt).unwrap();
        let (_dir, config) =
            write_temp_config(&format!("a,{},{}\n", src.display(), tgt.display()));
        let setup = setup_with(config, MockPrompt::new());

        run(&setup, &opts("a", true), &log).unwrap();
        assert!(fs::is_symlink(&tgt));
        assert!(setup.config.load().unwrap().is_empty());
    }

    #[test]
    fn del_leaves_real_target_in_place() {
        let (log, _t, _g) = isolated_logger();
        let tmp = tempfile::tempdir().unwrap();
        let tgt = tmp.path().join("tgt");
        std::fs::write(&tgt, "real").unwrap();
        let (_dir, config) = write_temp_config(&format!("a,/d/a,{}\n", tgt.display()));
        let setup = setup_with(config, MockPrompt::new());

        run(&setup, &opts("a", false), &log).unwrap();
        assert_eq!(std::fs::read_to_string(&tgt).unwrap(), "real");
        let contents = std::fs::read_to_string(log.log_path()).unwrap();
        assert!(contents.contains("is not a symlink"), "got: {contents}");
    }
}
