//! sigsync CLI - Backup and restore Outlook signatures.
//!
//! Provides both human-friendly and agent-friendly (robot mode) interfaces.
#![forbid(unsafe_code)]

use std::io::{self, IsTerminal};

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use sigsync::catalog::{SignatureRecord, list_signatures};
use sigsync::cli::{self, Cli, Commands};
use sigsync::config::Settings;
use sigsync::error::{Result, SigError};
use sigsync::logging::init_logging;
use sigsync::sync::{
    ProgressSink, run_backup_with_progress, run_restore_with_progress, verify_backup,
};

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> &'static str {
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
    }

    pub fn git_dirty() -> &'static str {
        option_env!("VERGEN_GIT_DIRTY").unwrap_or("false")
    }

    pub fn build_timestamp() -> &'static str {
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
    }

    pub fn rustc_semver() -> &'static str {
        option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown")
    }

    pub fn target() -> &'static str {
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown")
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color || !io::stdout().is_terminal() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    init_logging(cli.use_json(), cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        output_error(&cli, &e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Backup(args) => cmd_backup(cli, args),
        Commands::Restore(args) => cmd_restore(cli, args),
        Commands::Verify(args) => cmd_verify(cli, args),
        Commands::List(args) => cmd_list(cli, args),
        Commands::Version => {
            cmd_version(cli);
            Ok(())
        }
        Commands::Completions(args) => {
            cmd_completions(args);
            Ok(())
        }
    }
}

// === Commands ===

fn cmd_backup(cli: &Cli, args: &cli::BackupArgs) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let profile_root = settings.resolve_profile_root(args.src.as_deref())?;
    let backup_root = sigsync::config::expand_home(&args.dst)?;

    let mut progress = CliProgress::new(cli, "Backing up");
    let report = run_backup_with_progress(&profile_root, &backup_root, &mut progress)?;

    if cli.use_json() {
        output_json(cli, &report);
    } else if !cli.quiet {
        println!(
            "{} {} signature(s) in {} folder(s) to {}",
            style("Backed up").green().bold(),
            report.signatures,
            report.folders,
            report.backup_root.display()
        );
        println!("  manifest: {}", report.manifest_path.display());
    }
    Ok(())
}

fn cmd_restore(cli: &Cli, args: &cli::RestoreArgs) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let backup_root = sigsync::config::expand_home(&args.src)?;
    let profile_root = settings.resolve_profile_root(args.dst.as_deref())?;

    let mut progress = CliProgress::new(cli, "Restoring");
    let report = run_restore_with_progress(&backup_root, &profile_root, &mut progress)?;

    if cli.use_json() {
        output_json(cli, &report);
    } else if !cli.quiet {
        println!(
            "{} {} signature(s) in {} folder(s) into {}",
            style("Restored").green().bold(),
            report.signatures,
            report.folders,
            report.profile_root.display()
        );
        if let Some(seq) = report.sequence {
            println!("  auto-increment counter set to {seq}");
        }
    }
    Ok(())
}

fn cmd_verify(cli: &Cli, args: &cli::VerifyArgs) -> Result<()> {
    let backup_root = sigsync::config::expand_home(&args.src)?;
    let report = verify_backup(&backup_root)?;

    if cli.use_json() {
        output_json(cli, &report);
    } else if !cli.quiet {
        if report.ok {
            println!(
                "{} {} manifest entries, all files present",
                style("OK").green().bold(),
                report.entries
            );
        } else {
            println!(
                "{} {} of {} files missing:",
                style("INCOMPLETE").red().bold(),
                report.missing.len(),
                report.entries
            );
            for path in &report.missing {
                println!("  {path}");
            }
        }
    }

    if report.ok {
        Ok(())
    } else {
        Err(SigError::NotFound {
            path: backup_root.join(&report.missing[0]).display().to_string(),
        })
    }
}

fn cmd_list(cli: &Cli, args: &cli::ListArgs) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let profile_root = settings.resolve_profile_root(args.src.as_deref())?;
    let records = list_signatures(&profile_root)?;

    if cli.use_json() {
        output_json(cli, &records);
    } else if records.is_empty() {
        if !cli.quiet {
            println!("No signatures in {}", profile_root.display());
        }
    } else {
        for record in &records {
            println!(
                "{:>6}  {}",
                style(record.record_id.as_str()).cyan(),
                record.stored_path()
            );
        }
    }
    Ok(())
}

fn cmd_version(cli: &Cli) {
    if cli.use_json() {
        output_json(
            cli,
            &serde_json::json!({
                "version": build_info::VERSION,
                "git_sha": build_info::git_sha(),
                "git_dirty": build_info::git_dirty() == "true",
                "build_timestamp": build_info::build_timestamp(),
                "rustc_version": build_info::rustc_semver(),
                "target": build_info::target(),
            }),
        );
    } else {
        println!("sigsync {}", build_info::VERSION);
        println!(
            "git: {}{}",
            build_info::git_sha(),
            if build_info::git_dirty() == "true" {
                " (dirty)"
            } else {
                ""
            }
        );
        println!("built: {}", build_info::build_timestamp());
        println!("rustc: {}", build_info::rustc_semver());
        println!("target: {}", build_info::target());
    }
}

fn cmd_completions(args: &cli::CompletionsArgs) {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "sigsync", &mut io::stdout());
}

// === Progress ===

/// Progress bar on stderr in interactive human mode, silent otherwise.
struct CliProgress {
    enabled: bool,
    bar: Option<ProgressBar>,
    label: &'static str,
}

impl CliProgress {
    fn new(cli: &Cli, label: &'static str) -> Self {
        Self {
            enabled: !cli.use_json() && !cli.quiet && io::stderr().is_terminal(),
            bar: None,
            label,
        }
    }
}

impl ProgressSink for CliProgress {
    fn on_start(&mut self, total: Option<usize>) {
        if !self.enabled {
            return;
        }
        let (bar, template) = match total {
            Some(total) => (
                ProgressBar::new(total as u64),
                "{prefix} [{bar:30}] {pos}/{len} {msg}",
            ),
            None => (ProgressBar::new_spinner(), "{spinner} {prefix} {pos} {msg}"),
        };
        if let Ok(style) = ProgressStyle::with_template(template) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_prefix(self.label);
        self.bar = Some(bar);
    }

    fn on_record(&mut self, record: &SignatureRecord) {
        if let Some(bar) = &self.bar {
            bar.set_message(record.relative_path().display().to_string());
            bar.inc(1);
        }
    }

    fn on_finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

// A failed run returns before `on_finish`; the bar must not outlive it.
impl Drop for CliProgress {
    fn drop(&mut self) {
        self.on_finish();
    }
}

// === Output ===

fn output_json<T: Serialize>(cli: &Cli, data: &T) {
    let json = if cli.use_compact_json() {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    match json {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to serialize output: {e}"),
    }
}

fn output_error(cli: &Cli, error: &SigError) {
    if cli.use_json() {
        let json = serde_json::json!({
            "error": true,
            "kind": error.kind(),
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        });
        eprintln!("{json:#}");
    } else {
        eprintln!("{}: {}", style("Error").red().bold(), error);
        if let Some(suggestion) = error.suggestion() {
            eprintln!("{}: {}", style("Hint").yellow(), suggestion);
        }
    }
}
