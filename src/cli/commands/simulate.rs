use std::fs;

use anyhow::{Context, Result, bail};
use tracing::warn;

use super::{CommandResult, CommandSummary, SimulateSummary};
use crate::{
    cli::{args::SimulateCommand, context::RunContext},
    core::{LocaleDictionary, files::write_file},
};

pub fn simulate(cmd: SimulateCommand) -> Result<CommandResult> {
    let mut ctx = RunContext::new(&cmd.common)?;
    if !cmd.locales.is_empty() {
        ctx.config.simulate.locales = cmd.locales;
    }
    run(&ctx)
}

pub(crate) fn run(ctx: &RunContext) -> Result<CommandResult> {
    let native_path = ctx.native_locale_path();
    if !native_path.is_file() {
        bail!(
            "Native locale file '{}' not found.\n\
             Hint: Run `l10n extract` first.",
            native_path.display()
        );
    }
    let bytes = fs::read(&native_path)
        .with_context(|| format!("Failed to read file: {}", native_path.display()))?;
    let native = LocaleDictionary::from_json(&ctx.config.native_locale, &bytes)
        .with_context(|| format!("Failed to load locale file: {}", native_path.display()))?;

    let simulated = ctx.config.simulator().simulate(&[native])?;

    let locales_dir = ctx.locales_dir();
    let mut written = Vec::new();
    let mut skipped = Vec::new();
    for (locale, dictionary) in simulated {
        if locale == ctx.config.native_locale {
            warn!(locale = %locale, "not overwriting the native dictionary");
            skipped.push(locale);
            continue;
        }
        let path = locales_dir.join(format!("{}.json", locale));
        let json = dictionary
            .to_pretty_json()
            .with_context(|| format!("Failed to serialize locale '{}'", locale))?;
        write_file(&path, &json)?;
        written.push(path);
    }

    Ok(CommandResult::success(CommandSummary::Simulate(
        SimulateSummary { written, skipped },
    )))
}
