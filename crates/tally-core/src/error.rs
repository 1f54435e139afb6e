//! Unified error types for the Tally core.
//!
//! Provider crates define their own translation errors and convert them into
//! [`ProviderError`] at the provider boundary.

use thiserror::Error;

use crate::provider::ProviderKind;

// =============================================================================
// Event Errors
// =============================================================================

/// Errors raised while building an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// The event name was empty or whitespace.
    #[error("event name must not be empty")]
    EmptyName,
}

// =============================================================================
// Provider Errors
// =============================================================================

/// Errors that can occur in provider operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// The provider has not completed initialization.
    #[error("{provider} is not initialized")]
    NotInitialized {
        /// The provider that was called too early.
        provider: ProviderKind,
    },

    /// An initialization is already waiting for the vendor callback.
    #[error("{provider} initialization already in progress")]
    InitInProgress {
        /// The provider being initialized.
        provider: ProviderKind,
    },

    /// A required configuration value was missing or malformed.
    #[error("invalid {provider} configuration: {reason}")]
    InvalidConfig {
        /// The provider being configured.
        provider: ProviderKind,
        /// What was wrong.
        reason: String,
    },

    /// The event could not be translated into the provider payload.
    #[error("failed to translate event for {provider}: {reason}")]
    Translation {
        /// The provider whose payload failed.
        provider: ProviderKind,
        /// What was wrong.
        reason: String,
    },

    /// The vendor SDK reported an error.
    #[error(transparent)]
    Sdk(#[from] SdkError),

    /// The event itself was malformed.
    #[error(transparent)]
    Event(#[from] EventError),
}

impl ProviderError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(provider: ProviderKind, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            provider,
            reason: reason.into(),
        }
    }

    /// Creates a translation error.
    pub fn translation(provider: ProviderKind, reason: impl Into<String>) -> Self {
        Self::Translation {
            provider,
            reason: reason.into(),
        }
    }
}

// =============================================================================
// SDK Errors
// =============================================================================

/// Error surfaced by a vendor SDK call.
///
/// Vendor SDKs report failures as a numeric code with an optional message;
/// host shims map thrown exceptions onto this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("vendor SDK error ({code}): {}", .message.as_deref().unwrap_or("no message"))]
pub struct SdkError {
    /// Vendor-specific error code.
    pub code: i32,
    /// Vendor message, if one was given.
    pub message: Option<String>,
}

impl SdkError {
    /// Code recorded when a vendor drops its init callback without calling it.
    pub const CALLBACK_DROPPED: i32 = -1;

    /// Creates an SDK error with a message.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for event construction.
pub type EventResult<T> = Result<T, EventError>;

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Result type for vendor SDK calls.
pub type SdkResult<T> = Result<T, SdkError>;
