//! Tracing and logging setup
//!
//! Configures the `tracing` subscriber with environment-based filtering.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::AppSettings;

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Log level filter, `None` disables output entirely
    pub level: Option<Level>,
    /// Enable JSON output format
    pub json: bool,
    /// Include span events (new, close)
    pub span_events: bool,
    /// Include file and line numbers
    pub file_line: bool,
    /// Include thread IDs
    pub thread_ids: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Some(Level::INFO),
            json: false,
            span_events: false,
            file_line: true,
            thread_ids: false,
        }
    }
}

impl TracingConfig {
    /// Create a development configuration with debug logging
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: Some(Level::DEBUG),
            span_events: true,
            ..Self::default()
        }
    }

    /// Create a production configuration with JSON logging
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: Some(Level::INFO),
            json: true,
            span_events: false,
            file_line: false,
            thread_ids: true,
        }
    }

    /// No output at all, `RUST_LOG` included
    #[must_use]
    pub fn silent() -> Self {
        Self {
            level: None,
            ..Self::default()
        }
    }

    /// Pick a preset from the application settings
    #[must_use]
    pub fn for_app(settings: &AppSettings) -> Self {
        if settings.silent_logging {
            Self::silent()
        } else if settings.env.is_production() {
            Self::production()
        } else {
            Self::development()
        }
    }

    fn env_filter(&self) -> EnvFilter {
        match self.level {
            Some(level) => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.to_string())),
            None => EnvFilter::new("off"),
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

fn build_subscriber(config: &TracingConfig) -> impl tracing::Subscriber + Send + Sync + 'static {
    let base = fmt::layer()
        .with_file(config.file_line)
        .with_line_number(config.file_line)
        .with_thread_ids(config.thread_ids)
        .with_span_events(config.span_events());

    let fmt_layer = if config.json { base.json().boxed() } else { base.boxed() };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
}

/// Install the global subscriber
///
/// Fails instead of panicking when a subscriber is already set, so tests
/// and embedders can call it more than once.
pub fn try_init_tracing_with_config(config: &TracingConfig) -> Result<(), TracingError> {
    build_subscriber(config)
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}
