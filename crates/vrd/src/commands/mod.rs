//! Command dispatch: bridges CLI args -> config + core -> output formatting.

pub mod config_cmd;
pub mod ip;
pub mod namecheap;
pub mod networks;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a router-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Namecheap(args) => namecheap::handle(&args, global).await,
        Command::Ip => ip::handle(global).await,
        Command::Networks => networks::handle(global).await,
        Command::Config(args) => config_cmd::handle(&args, global),
        // Completions are handled before dispatch
        Command::Completions(_) => Ok(()),
    }
}
