//! Diagnostic logging setup.
//!
//! User-facing output goes through `ui::messages`; this is the `tracing`
//! side, written to stderr. `TIMETRACK_LOG` takes precedence over `-v`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TIMETRACK_LOG";

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "timetrack=warn",
        1 => "timetrack=info",
        2 => "timetrack=debug",
        _ => "timetrack=trace,reqwest=debug",
    }
}

/// Install the global subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_directive(0), "timetrack=warn");
        assert_eq!(default_directive(2), "timetrack=debug");
        assert!(default_directive(9).starts_with("timetrack=trace"));
    }
}
