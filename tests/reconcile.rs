#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Integration tests for link reconciliation over real temporary directories.
//!
//! Each test walks one row of the reconciliation state table through the
//! public API, starting from entries loaded out of a config file.

mod common;

use common::{Decline, NullLog, TestHomeBuilder};
use dotlink_cli::error::LinkError;
use dotlink_cli::resources::{AssumeYes, LinkChange, LinkResource, LinkState};

fn first_link(home: &common::TestHome) -> LinkResource {
    let store = home.config().load().expect("load config");
    let record = store.get(0).expect("one entry");
    LinkResource::from_record(record).expect("expand paths")
}

#[test]
fn neither_exists_changes_nothing() {
    let home = TestHomeBuilder::new().with_entry("vim", "vimrc").build();
    let link = first_link(&home);

    let err = link.reconcile(&AssumeYes, &NullLog).unwrap_err();
    assert!(matches!(err, LinkError::NeitherExists { .. }));
    assert!(link.source.symlink_metadata().is_err());
    assert!(link.target.symlink_metadata().is_err());
}

#[test]
fn source_only_is_linked_then_already_linked() {
    let home = TestHomeBuilder::new()
        .with_entry("vim", "vimrc")
        .with_source("vimrc", "set number\n")
        .build();
    let link = first_link(&home);
    assert_eq!(link.current_state(), LinkState::SourceOnly);

    assert_eq!(
        link.reconcile(&Decline, &NullLog).unwrap(),
        LinkChange::Created
    );
    assert!(link.points_to_source());

    let err = link.reconcile(&Decline, &NullLog).unwrap_err();
    assert!(matches!(err, LinkError::AlreadyLinked { .. }));
}

#[test]
fn target_only_is_adopted_on_consent() {
    let home = TestHomeBuilder::new()
        .with_entry("bash", "bashrc")
        .with_target("bashrc", "alias ll='ls -l'\n")
        .build();
    let link = first_link(&home);
    assert_eq!(link.current_state(), LinkState::TargetOnly);

    assert_eq!(
        link.reconcile(&AssumeYes, &NullLog).unwrap(),
        LinkChange::Moved
    );
    assert!(link.target.symlink_metadata().unwrap().is_symlink());
    assert!(!link.source.symlink_metadata().unwrap().is_symlink());
    assert_eq!(
        std::fs::read_to_string(&link.source).unwrap(),
        "alias ll='ls -l'\n"
    );
}

#[test]
fn target_only_declined_is_cancelled() {
    let home = TestHomeBuilder::new()
        .with_entry("bash", "bashrc")
        .with_target("bashrc", "original\n")
        .build();
    let link = first_link(&home);

    let err = link.reconcile(&Decline, &NullLog).unwrap_err();
    assert!(matches!(err, LinkError::UserCancelled));
    assert_eq!(std::fs::read_to_string(&link.target).unwrap(), "original\n");
    assert!(link.source.symlink_metadata().is_err());
}

#[test]
fn both_existing_is_a_conflict() {
    let home = TestHomeBuilder::new()
        .with_entry("git", "gitconfig")
        .with_source("gitconfig", "source\n")
        .with_target("gitconfig", "target\n")
        .build();
    let link = first_link(&home);

    let err = link.reconcile(&AssumeYes, &NullLog).unwrap_err();
    assert!(matches!(err, LinkError::Conflict { .. }));
    assert!(err.is_refusal());
    assert_eq!(std::fs::read_to_string(&link.source).unwrap(), "source\n");
    assert_eq!(std::fs::read_to_string(&link.target).unwrap(), "target\n");
}

#[test]
fn missing_target_parent_is_created() {
    let home = TestHomeBuilder::new().build();
    let source = home.source("init.vim");
    let target = home.target(".config/nvim/init.vim");
    std::fs::write(&source, "").unwrap();
    std::fs::write(
        home.config_path(),
        format!("nvim,{},{}\n", source.display(), target.display()),
    )
    .unwrap();
    let link = first_link(&home);

    link.reconcile(&Decline, &NullLog).unwrap();
    assert!(target.symlink_metadata().unwrap().is_symlink());
}
