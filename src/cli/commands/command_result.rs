use std::path::PathBuf;

use crate::{
    cli::exit_status::ExitStatus,
    core::{EnforcementMode, EnforcementReport, KeyCollision},
};

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Localize(LocalizeSummary),
    Enforce(EnforceSummary),
    Simulate(SimulateSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub documents: usize,
    /// Written dictionary file; `None` when nothing translatable was found.
    pub output: Option<PathBuf>,
    pub entries: usize,
    pub collisions: Vec<KeyCollision>,
}

#[derive(Debug)]
pub struct LocalizeSummary {
    pub documents: usize,
    pub written: usize,
    pub locales: Vec<String>,
}

#[derive(Debug)]
pub struct EnforceSummary {
    pub mode: EnforcementMode,
    pub locale_files: usize,
    /// Per-locale reports. Empty in silent mode and after a strict failure.
    pub reports: Vec<EnforcementReport>,
    /// Set when strict mode failed: (locales, missing entries).
    pub failed: Option<(usize, usize)>,
}

#[derive(Debug)]
pub struct SimulateSummary {
    pub written: Vec<PathBuf>,
    /// Requested locales skipped because they are the native locale.
    pub skipped: Vec<String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running an l10n command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub exit_status: ExitStatus,
}

impl CommandResult {
    pub fn success(summary: CommandSummary) -> Self {
        Self {
            summary,
            exit_status: ExitStatus::Success,
        }
    }
}
