//! Structured logging initialization for sigsync.
//!
//! Logs always go to stderr so stdout stays clean for reports and JSON.

use std::io::{self, IsTerminal};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Default filter directive for the given verbosity flags.
///
/// Without `-v` only warnings are shown; the CLI prints its own summary.
pub const fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "sigsync=error";
    }
    match verbose {
        0 => "sigsync=warn",
        1 => "sigsync=info",
        2 => "sigsync=debug",
        _ => "sigsync=trace",
    }
}

/// Initialize the tracing subscriber based on CLI flags and environment.
///
/// | Mode | TTY | Output |
/// |------|-----|--------|
/// | Robot | any | JSON lines to stderr |
/// | Human | yes | Colored output to stderr |
/// | Human | no | Compact plain output to stderr |
///
/// `RUST_LOG` overrides the directive derived from `verbose`/`quiet`.
pub fn init_logging(robot_mode: bool, verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let registry = tracing_subscriber::registry().with(filter);

    if robot_mode {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(false)
                    .with_span_events(FmtSpan::NONE)
                    .with_writer(io::stderr),
            )
            .init();
    } else if io::stderr().is_terminal() {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_span_events(FmtSpan::NONE)
                    .with_writer(io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .compact()
                    .with_writer(io::stderr),
            )
            .init();
    }
}
