//! Configuration for the Tally runtime.
//!
//! Layered figment loading, the schema, and validation.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, PROFILE_ENV, Profile, load_config, load_config_from_file};
pub use schema::{
    FirebaseSettings, LogFormat, LogLevel, LogOutput, LoggingConfig, ProvidersConfig,
    SpanEventConfig, TallyConfig, TikTokSettings,
};
pub use validation::validate_config;
