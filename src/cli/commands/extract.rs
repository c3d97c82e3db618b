use std::fs;

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::debug;

use super::{CommandResult, CommandSummary, ExtractSummary};
use crate::{
    cli::{args::ExtractCommand, context::RunContext},
    core::{Extractor, files::write_file},
};

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common)?;
    run(&ctx)
}

pub(crate) fn run(ctx: &RunContext) -> Result<CommandResult> {
    let extractor = Extractor::new(ctx.config.selector(), ctx.config.keyer()?);
    let documents = ctx.documents()?;

    let candidates = documents
        .par_iter()
        .map(|path| {
            let bytes =
                fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
            extractor
                .candidates(&bytes)
                .with_context(|| format!("Failed to parse document: {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(documents = documents.len(), "collected candidate strings");

    let Some(extraction) = extractor.build(candidates.into_iter().flatten().collect()) else {
        return Ok(CommandResult::success(CommandSummary::Extract(
            ExtractSummary {
                documents: documents.len(),
                output: None,
                entries: 0,
                collisions: Vec::new(),
            },
        )));
    };

    let output = ctx.native_locale_path();
    let json = extraction
        .dictionary
        .to_pretty_json()
        .context("Failed to serialize native dictionary")?;
    write_file(&output, &json)?;

    Ok(CommandResult::success(CommandSummary::Extract(
        ExtractSummary {
            documents: documents.len(),
            output: Some(output),
            entries: extraction.dictionary.len(),
            collisions: extraction.collisions,
        },
    )))
}
