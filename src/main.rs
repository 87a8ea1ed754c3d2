//! `dotlink` binary: parse arguments, set up logging, dispatch the action.
use anyhow::Result;
use clap::Parser;

use dotlink_cli::cli::{Cli, Command};
use dotlink_cli::commands::{self, CommandSetup};
use dotlink_cli::logging;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    if matches!(args.command, Command::Ver) {
        commands::version::run();
        return Ok(());
    }

    let name = args.command.name();
    logging::init_subscriber(args.verbose, name);
    let log = logging::Logger::new(name);

    if let Command::Unknown(action) = &args.command {
        return commands::unknown(action, &log);
    }

    let setup = CommandSetup::init(&args.global, &log)?;
    match &args.command {
        Command::Add(opts) => commands::add::run(&setup, opts, &log),
        Command::Del(opts) => commands::del::run(&setup, opts, &log),
        Command::List => commands::list::run(&setup, &log),
        Command::Edit(opts) => commands::edit::run(&setup, opts, &log),
        Command::Sync(opts) => commands::sync::run(&setup, opts, &log),
        Command::Init(opts) => commands::init::run(&setup, opts, &log),
        Command::Backup(opts) => commands::backup::run(&setup, opts, &log),
        Command::Ver | Command::Unknown(_) => Ok(()),
    }
}
