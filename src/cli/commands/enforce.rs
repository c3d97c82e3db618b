use anyhow::Result;

use super::{CommandResult, CommandSummary, EnforceSummary};
use crate::{
    cli::{args::EnforceCommand, context::RunContext, exit_status::ExitStatus},
    core::enforce as enforce_missing,
    error::L10nError,
};

pub fn enforce(cmd: EnforceCommand) -> Result<CommandResult> {
    let mut ctx = RunContext::new(&cmd.common)?;
    if let Some(mode) = cmd.mode {
        ctx.config.enforce = mode;
    }
    run(&ctx)
}

pub(crate) fn run(ctx: &RunContext) -> Result<CommandResult> {
    let (store, locale_files) = ctx.load_store()?;
    let mode = ctx.config.enforce;

    match enforce_missing(&store, &ctx.config.cache_id) {
        Ok(reports) => Ok(CommandResult::success(CommandSummary::Enforce(
            EnforceSummary {
                mode,
                locale_files,
                reports,
                failed: None,
            },
        ))),
        Err(L10nError::Enforcement { locales, missing }) => Ok(CommandResult {
            summary: CommandSummary::Enforce(EnforceSummary {
                mode,
                locale_files,
                reports: Vec::new(),
                failed: Some((locales, missing)),
            }),
            exit_status: ExitStatus::Failure,
        }),
        Err(err) => Err(err.into()),
    }
}
