//! Subscriber setup for the `srcscan` binary. The library itself only emits
//! `tracing` events.

use std::env;

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a filter directive for srcscan alone. It
/// wins over `RUST_LOG`.
pub const LOG_ENV: &str = "SRCSCAN_LOG";

const CRATE_TARGET: &str = "srcscan";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// `srcscan=<level>`: events from dependencies stay off.
    pub fn directive(self) -> String {
        format!("{CRATE_TARGET}={}", self.level().to_string().to_lowercase())
    }

    /// Timestamps and source locations only pay off when debugging a scan.
    fn detailed(self) -> bool {
        self >= Self::Debug
    }
}

/// The directive to filter with: `SRCSCAN_LOG`, then `RUST_LOG`, then the
/// one derived from the command-line flags. Empty variables count as unset.
pub fn filter_directive(
    verbosity: Verbosity,
    srcscan_log: Option<&str>,
    rust_log: Option<&str>,
) -> String {
    [srcscan_log, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|directive| !directive.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| verbosity.directive())
}

pub fn init(verbosity: Verbosity) {
    let directive = filter_directive(
        verbosity,
        env::var(LOG_ENV).ok().as_deref(),
        env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
    );
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|err| {
        eprintln!("srcscan: ignoring invalid log filter {directive:?}: {err}");
        EnvFilter::new(verbosity.directive())
    });

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(verbosity.detailed())
        .with_line_number(verbosity.detailed())
        .compact();

    // An already installed global subscriber is kept.
    let _ = if verbosity.detailed() {
        subscriber.try_init()
    } else {
        subscriber.without_time().try_init()
    };
}
