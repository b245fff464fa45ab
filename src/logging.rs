use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

/// Run-scoped verbosity derived from the `-q` / `-v` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose(u8),
}

impl Verbosity {
    /// `quiet` wins over any number of `-v`.
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose == 0 {
            Self::Normal
        } else {
            Self::Verbose(verbose)
        }
    }

    /// Level directive used when `RUST_LOG` is not set.
    #[must_use]
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose(1) => "info",
            Self::Verbose(2) => "debug",
            Self::Verbose(_) => "trace",
        }
    }

    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }
}

/// A stderr subscriber for one run. `RUST_LOG` overrides the verbosity level.
#[must_use]
pub fn dispatch(verbosity: Verbosity) -> Dispatch {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    Dispatch::new(subscriber)
}

/// Runs `f` with the run's subscriber as the thread's default.
pub fn with_logging<T>(verbosity: Verbosity, f: impl FnOnce() -> T) -> T {
    tracing::dispatcher::with_default(&dispatch(verbosity), f)
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
