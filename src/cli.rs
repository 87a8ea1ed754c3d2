//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI entry point for the dotlink dotfile manager.
#[derive(Parser, Debug)]
#[command(
    name = "dotlink",
    about = "Track dotfiles in a config file and keep their symlinks in place",
    version
)]
pub struct Cli {
    #[allow(missing_docs)]
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[allow(missing_docs)]
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Config file to use instead of the default location
    #[arg(short, long, global = true, env = "DOTLINK_CONFIG")]
    pub config: Option<String>,

    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Answer yes when asked to move an existing file into the source location
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Track a new dotfile
    Add(AddOpts),
    /// Stop tracking a dotfile
    Del(DelOpts),
    /// List tracked dotfiles and their link status
    List,
    /// Change the name, source, or target of a tracked dotfile
    Edit(EditOpts),
    /// Create missing symlinks for tracked dotfiles
    Sync(SyncOpts),
    /// Create an empty config file
    Init(InitOpts),
    /// Copy the config file to a backup location
    Backup(BackupOpts),
    /// Print version information
    #[command(alias = "version")]
    Ver,
    /// Any unrecognized action
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

impl Command {
    /// Short action name, used for the log file name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Del(_) => "del",
            Self::List => "list",
            Self::Edit(_) => "edit",
            Self::Sync(_) => "sync",
            Self::Init(_) => "init",
            Self::Backup(_) => "backup",
            Self::Ver => "ver",
            Self::Unknown(_) => "unknown",
        }
    }
}

/// Options for the `add` subcommand.
#[derive(Args, Debug, Clone)]
pub struct AddOpts {
    /// Unique name of the entry
    pub name: String,
    /// Path of the tracked file (what the link points to)
    pub source: String,
    /// Path where the symlink lives
    pub target: String,
    /// Link the new entry right away
    #[arg(long)]
    pub link: bool,
}

/// Options for the `del` subcommand.
#[derive(Args, Debug, Clone)]
pub struct DelOpts {
    /// Name of the entry to remove
    pub name: String,
    /// Leave the symlink at the target in place
    #[arg(long)]
    pub keep_link: bool,
}

/// Options for the `edit` subcommand.
#[derive(Args, Debug, Clone)]
pub struct EditOpts {
    /// Name of the entry to edit
    pub name: String,
    /// New name
    #[arg(long = "name", value_name = "NAME")]
    pub new_name: Option<String>,
    /// New source path
    #[arg(long)]
    pub source: Option<String>,
    /// New target path
    #[arg(long)]
    pub target: Option<String>,
}

impl EditOpts {
    /// Whether any field was given on the command line.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.new_name.is_some() || self.source.is_some() || self.target.is_some()
    }
}

/// Options for the `sync` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SyncOpts {
    /// Only sync these entries (default: all)
    pub names: Vec<String>,
}

/// Options for the `init` subcommand.
#[derive(Args, Debug, Clone)]
pub struct InitOpts {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Options for the `backup` subcommand.
#[derive(Args, Debug, Clone)]
pub struct BackupOpts {
    /// Where to write the backup (default: `<config>.<timestamp>.bak`)
    #[arg(short, long)]
    pub output: Option<String>,
}
