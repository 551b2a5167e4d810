//! CLI argument definitions.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// sigsync - Backup and restore Outlook signatures.
///
/// Robot Mode: Use --robot or --format=json for machine-parseable output.
#[derive(Parser, Debug)]
#[command(name = "sigsync", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (text for humans, json for agents/scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "SIGSYNC_FORMAT"
    )]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json
    #[arg(long, global = true)]
    pub robot: bool,

    /// Verbose logging (repeat for more detail)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Settings file (default: <config dir>/sigsync/config.toml)
    #[arg(long, global = true, env = "SIGSYNC_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// JSON output for scripts and agents
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy a profile's signatures and their database rows into a backup directory
    Backup(BackupArgs),

    /// Re-insert signatures from a backup directory into a profile
    Restore(RestoreArgs),

    /// Check a backup directory without touching any profile
    Verify(VerifyArgs),

    /// List the signatures recorded in a profile
    List(ListArgs),

    /// Show version and build information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// === Argument Structs ===

#[derive(Parser, Debug)]
pub struct BackupArgs {
    /// Outlook profile Data directory to back up (default: Main Profile)
    #[arg(long, env = "SIGSYNC_PROFILE", value_name = "PROFILE")]
    pub src: Option<PathBuf>,

    /// Directory to write the backup into
    #[arg(long, required = true, value_name = "BACKUP")]
    pub dst: PathBuf,
}

#[derive(Parser, Debug)]
pub struct RestoreArgs {
    /// Backup directory containing sql.txt
    #[arg(long, required = true, value_name = "BACKUP")]
    pub src: PathBuf,

    /// Outlook profile Data directory to restore into (default: Main Profile)
    #[arg(long, env = "SIGSYNC_PROFILE", value_name = "PROFILE")]
    pub dst: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Backup directory containing sql.txt
    #[arg(long, required = true, value_name = "BACKUP")]
    pub src: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Outlook profile Data directory (default: Main Profile)
    #[arg(long, env = "SIGSYNC_PROFILE", value_name = "PROFILE")]
    pub src: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
