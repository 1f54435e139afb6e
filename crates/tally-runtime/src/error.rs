//! Runtime error types.

use tally_core::{ProviderError, ProviderKind};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur during runtime operations.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A provider rejected the request.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// No binding is installed for this provider.
    #[error("{0} provider is not available")]
    ProviderUnavailable(ProviderKind),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
