//! Dotfile tracking engine.
//!
//! Keeps a flat config file of `name,source,target` entries and converges
//! each target to a symlink pointing at its source.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: records, the in-memory entry store, and the config file codec
//! - **[`paths`]**: `~` expansion and config file location
//! - **[`resources`]**: filesystem primitives, prompts, and link reconciliation
//! - **[`commands`]**: one module per CLI action (`add`, `del`, `sync`, …)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod resources;
