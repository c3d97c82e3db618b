//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Build the native locale dictionary from the site's documents
//! - `localize`: Write one localized copy of every document per target locale
//! - `enforce`: Report target locales missing native keys
//! - `simulate`: Write pseudo-translated dictionaries for development
//! - `init`: Initialize the configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::{EnforcementMode, SearchBy};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        self.common().is_some_and(|common| common.verbose)
    }

    fn common(&self) -> Option<&CommonArgs> {
        match &self.command {
            Some(Command::Extract(cmd)) => Some(&cmd.common),
            Some(Command::Localize(cmd)) => Some(&cmd.common),
            Some(Command::Enforce(cmd)) => Some(&cmd.common),
            Some(Command::Simulate(cmd)) => Some(&cmd.common),
            Some(Command::Init) | None => None,
        }
    }
}

/// Common arguments shared by all pipeline commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Native locale (overrides config file)
    #[arg(long)]
    pub native_locale: Option<String>,

    /// Directory holding the site's documents (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Locale dictionary directory (overrides config file)
    #[arg(long)]
    pub locales_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct LocalizeCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output directory for localized copies (overrides config file)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// How translations are located in documents (overrides config file)
    #[arg(long, value_enum)]
    pub search_by: Option<SearchBy>,

    /// Prefix root-relative links with the locale
    #[arg(long)]
    pub localize_links: bool,
}

#[derive(Debug, Args)]
pub struct EnforceCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Enforcement mode (overrides config file)
    #[arg(long, value_enum)]
    pub mode: Option<EnforcementMode>,
}

#[derive(Debug, Args)]
pub struct SimulateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Locales to simulate, comma separated (overrides config file)
    #[arg(long, value_delimiter = ',')]
    pub locales: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the native locale dictionary from documents
    Extract(ExtractCommand),
    /// Write localized copies of every document
    Localize(LocalizeCommand),
    /// Report missing translations
    Enforce(EnforceCommand),
    /// Write pseudo-translated locale dictionaries
    Simulate(SimulateCommand),
    /// Initialize a new .l10nrc.json configuration file
    Init,
}
