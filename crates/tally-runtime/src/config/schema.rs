//! Configuration schema definitions.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! format = "pretty"
//!
//! [logging.filters]
//! tally_provider_tiktok = "trace"
//!
//! [providers.tiktok]
//! app_id = "com.omega.planeats"
//! tt_app_id = "7301234567890"
//! access_token = "..."
//! debug = false
//! auto_init = true
//!
//! [providers.firebase]
//! enabled = true
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tally_provider_tiktok::TikTokConfig;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TallyConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Per-provider settings.
    #[serde(default)]
    pub providers: ProvidersConfig,
}

// =============================================================================
// Logging
// =============================================================================

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Returns the level as a filter directive string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Converts to a `tracing` level.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    /// Requires the `json-log` feature; falls back to `Full` without it.
    Json,
}

/// Log destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// Which span lifecycle events to log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpanEventConfig {
    pub new: bool,
    pub enter: bool,
    pub exit: bool,
    pub close: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level for everything without a filter.
    pub level: LogLevel,

    /// Line format.
    pub format: LogFormat,

    /// Destination.
    pub output: LogOutput,

    /// Log file, required when `output = "file"`.
    pub file_path: Option<PathBuf>,

    /// Per-module level overrides, e.g. `tally_provider_tiktok = "trace"`.
    pub filters: HashMap<String, LogLevel>,

    /// Span lifecycle events.
    pub span_events: SpanEventConfig,

    /// Include thread ids. Useful to see which thread a vendor callback ran on.
    pub thread_ids: bool,

    /// Include file and line.
    pub file_location: bool,
}

// =============================================================================
// Providers
// =============================================================================

/// Provider settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// TikTok credentials. Absent means TikTok is only initialized on demand.
    pub tiktok: Option<TikTokSettings>,

    /// Firebase switches.
    pub firebase: FirebaseSettings,
}

/// TikTok section: the provider configuration plus start-up switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TikTokSettings {
    /// Credentials and debug flag, in the provider's own shape.
    #[serde(flatten)]
    pub config: TikTokConfig,

    /// Initialize at start-up instead of waiting for the host to call
    /// `initTikTok`.
    #[serde(default)]
    pub auto_init: bool,
}

impl TikTokSettings {
    /// The provider configuration.
    pub fn to_provider_config(&self) -> TikTokConfig {
        self.config.clone()
    }
}

/// Firebase section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FirebaseSettings {
    /// Initialize Firebase at start-up.
    pub enabled: bool,
}

impl Default for FirebaseSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}
