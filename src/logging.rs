//! Logging setup.
//!
//! The subscriber is built per run from a [`Verbosity`] and installed only
//! for the duration of that run, so library callers and tests can supply
//! their own.

use tracing::level_filters::LevelFilter;
use tracing::Subscriber;

/// How much the build reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Progress, warnings and errors.
    #[default]
    Normal,
    /// Also commands, their captured output and the generated script.
    Verbose,
}

impl Verbosity {
    pub fn from_flag(verbose: bool) -> Self {
        if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    fn level(self) -> LevelFilter {
        match self {
            Self::Normal => LevelFilter::INFO,
            Self::Verbose => LevelFilter::DEBUG,
        }
    }
}

/// Console subscriber writing to stderr at the given verbosity.
pub fn subscriber(verbosity: Verbosity) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_max_level(verbosity.level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish()
}

/// Run `f` with a console subscriber installed for its duration.
pub fn with_logging<T>(verbosity: Verbosity, f: impl FnOnce() -> T) -> T {
    tracing::subscriber::with_default(subscriber(verbosity), || {
        tracing::debug!("running in debug mode");
        f()
    })
}
