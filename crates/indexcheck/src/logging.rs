//! Subscriber setup for applications embedding the validators
//!
//! The validators log through `tracing` under the `indexcheck_kernels`
//! target: rejected arguments at `debug`, failures waved through by a
//! log-only [`FailurePolicy`](crate::kernels::FailurePolicy) at `warn`,
//! accepted arguments at `trace`. [`init_logging`] installs a
//! `tracing-subscriber` formatter whose filter is derived from the
//! [`Verbosity`] wanted for those events. Everything else logs at `warn`
//! unless extra directives say otherwise.
//!
//! # Environment Variables
//!
//! - `INDEXCHECK_LOG`: `overrides`, `rejections` (default) or `all`
//! - `INDEXCHECK_LOG_FORMAT`: `compact` (default) or `json`
//! - `RUST_LOG`: extra filter directives appended after the above
//!
//! # Example
//!
//! ```no_run
//! use indexcheck::logging::{init_logging, LoggingConfig, Verbosity};
//!
//! let config = LoggingConfig::from_env().with_verbosity(Verbosity::All);
//! init_logging(&config).unwrap();
//! ```

use anyhow::Result;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Environment variable selecting the [`Verbosity`].
pub const LOG_ENV: &str = "INDEXCHECK_LOG";

/// Environment variable selecting the [`LogFormat`].
pub const LOG_FORMAT_ENV: &str = "INDEXCHECK_LOG_FORMAT";

const KERNELS_TARGET: &str = "indexcheck_kernels";

/// Which validator events reach the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Only failures a log-only policy let through
    Overrides,
    /// Every rejected argument set
    #[default]
    Rejections,
    /// Rejected and accepted argument sets
    All,
}

impl Verbosity {
    /// Parse from string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "overrides" | "warn" => Some(Verbosity::Overrides),
            "rejections" | "debug" => Some(Verbosity::Rejections),
            "all" | "trace" => Some(Verbosity::All),
            _ => None,
        }
    }

    fn level(self) -> &'static str {
        match self {
            Verbosity::Overrides => "warn",
            Verbosity::Rejections => "debug",
            Verbosity::All => "trace",
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One line per event
    #[default]
    Compact,
    /// One JSON object per event, fields kept structured
    Json,
}

impl LogFormat {
    /// Parse from string. Unknown values fall back to [`LogFormat::Compact`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Validator events to keep
    pub verbosity: Verbosity,
    /// Output format
    pub format: LogFormat,
    /// Extra comma-separated filter directives
    pub directives: Option<String>,
}

impl LoggingConfig {
    /// Read `INDEXCHECK_LOG`, `INDEXCHECK_LOG_FORMAT` and `RUST_LOG`.
    pub fn from_env() -> Self {
        let verbosity = std::env::var(LOG_ENV)
            .ok()
            .and_then(|s| Verbosity::parse(&s))
            .unwrap_or_default();
        let format = std::env::var(LOG_FORMAT_ENV)
            .map(|s| LogFormat::parse(&s))
            .unwrap_or_default();

        Self {
            verbosity,
            format,
            directives: std::env::var("RUST_LOG").ok(),
        }
    }

    /// Set verbosity
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set output format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Append filter directives
    pub fn with_directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    /// Build the event filter.
    ///
    /// # Errors
    ///
    /// Fails if one of the extra directives does not parse.
    pub fn filter(&self) -> Result<EnvFilter> {
        let base = format!("warn,{}={}", KERNELS_TARGET, self.verbosity.level());
        let mut filter = EnvFilter::try_new(base)?;

        let extra = self.directives.as_deref().unwrap_or_default();
        for directive in extra.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            filter = filter.add_directive(directive.parse::<Directive>()?);
        }
        Ok(filter)
    }
}

/// Install the global subscriber described by `config`.
///
/// Call once at application startup.
///
/// # Errors
///
/// Fails if the filter does not parse or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = config.filter()?;
    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Compact => fmt::layer().compact().boxed(),
        LogFormat::Json => fmt::layer().json().boxed(),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()?;
    Ok(())
}
