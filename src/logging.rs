//! Tracing setup. Diagnostics go to stderr; the run summary stays on stdout.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count.
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

pub fn init_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level_for(verbose)))
        .with_target(verbose >= 2)
        .with_writer(std::io::stderr)
        .init();
}
