use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, enforce::enforce, extract::extract, init::init, localize::localize,
        simulate::simulate,
    },
};

/// Dispatch to the handler of the parsed command.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Localize(cmd)) => localize(cmd),
        Some(Command::Enforce(cmd)) => enforce(cmd),
        Some(Command::Simulate(cmd)) => simulate(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
