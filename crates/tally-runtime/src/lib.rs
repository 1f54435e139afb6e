//! Tally Runtime - the host-facing side of the Tally analytics bridge.
//!
//! This crate provides:
//! - The `SocialAnalytics` plugin (`logEvent`, `initTikTok`,
//!   `logFirebaseEvent`, `initFirebase`)
//! - A name-keyed host plugin registry
//! - Layered configuration loading
//! - Logging configuration
//!
//! # Start-up
//!
//! ```ignore
//! use std::sync::Arc;
//! use tally_runtime::{PluginRegistry, SocialAnalytics, config, logging};
//!
//! let config = config::load_config()?;
//! logging::init_from_config(&config.logging);
//!
//! let analytics = SocialAnalytics::builder()
//!     .tiktok(tiktok_sdk)
//!     .firebase(firebase_sdk)
//!     .build();
//! analytics.initialize_from_config(&config.providers)?;
//!
//! let registry = PluginRegistry::new();
//! registry.register(Arc::new(analytics));
//! ```
//!
//! The host then calls `registry.call("SocialAnalytics", "logEvent", &args)`.

pub mod analytics;
pub mod config;
pub mod error;
pub mod logging;
pub mod plugin;

// Re-exports
pub use analytics::{PLUGIN_NAME, ProviderConfig, SocialAnalytics, SocialAnalyticsBuilder};
pub use config::{ConfigError, ConfigLoader, ConfigResult, TallyConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, SpanEvents};
pub use plugin::{Arguments, BoxedPlugin, CallError, CallResult, HostPlugin, PluginRegistry};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Logging macros.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
