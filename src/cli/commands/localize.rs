use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use super::{CommandResult, CommandSummary, LocalizeSummary};
use crate::{
    cli::{args::LocalizeCommand, context::RunContext},
    core::{FileRecord, Substitutor, files::write_file, prefix_root_links},
};

pub fn localize(cmd: LocalizeCommand) -> Result<CommandResult> {
    let mut ctx = RunContext::new(&cmd.common)?;
    if let Some(out_dir) = cmd.out_dir {
        ctx.config.out_dir = Some(out_dir.to_string_lossy().to_string());
    }
    if let Some(search_by) = cmd.search_by {
        ctx.config.search_by = search_by;
    }
    if cmd.localize_links {
        ctx.config.localize_links = true;
    }
    run(&ctx)
}

pub(crate) fn run(ctx: &RunContext) -> Result<CommandResult> {
    let (store, _) = ctx.load_store()?;
    let cache_id = ctx.config.cache_id.as_str();
    let locales: Vec<String> = store
        .get_cache(cache_id)?
        .targets()
        .map(|(locale, _)| locale.to_string())
        .collect();

    let substitutor = build_substitutor(ctx)?;
    let source_root = ctx.source_root();
    let documents = ctx.documents()?;

    let written: usize = documents
        .par_iter()
        .map(|path| -> Result<usize> {
            let bytes =
                fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
            let record = FileRecord::new(path, &source_root, bytes);
            let outputs = substitutor
                .localize(&store, cache_id, &record)
                .with_context(|| format!("Failed to localize document: {}", path.display()))?;
            for output in &outputs {
                write_file(&output.path, &output.contents)?;
            }
            Ok(outputs.len())
        })
        .collect::<Result<Vec<usize>>>()?
        .into_iter()
        .sum();

    Ok(CommandResult::success(CommandSummary::Localize(
        LocalizeSummary {
            documents: documents.len(),
            written,
            locales,
        },
    )))
}

fn build_substitutor(ctx: &RunContext) -> Result<Substitutor> {
    let mut substitutor = Substitutor::new(ctx.config.strategy()?);

    let out_dir = ctx.out_dir();
    if out_dir != ctx.source_root() {
        substitutor = substitutor.out_path(move |record: &FileRecord, locale: &str| {
            let relative = record
                .path
                .strip_prefix(&record.base)
                .map(PathBuf::from)
                .unwrap_or_else(|_| record.path.file_name().map(PathBuf::from).unwrap_or_default());
            out_dir.join(locale).join(relative)
        });
    }
    if ctx.config.localize_links {
        substitutor = substitutor.href_rewrite(prefix_root_links);
    }
    Ok(substitutor)
}
