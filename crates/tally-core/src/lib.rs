//! # Tally Core
//!
//! Core value model and provider contract for the Tally analytics bridge.
//!
//! Tally sits between a game-engine host and third-party analytics SDKs. The
//! host hands over an event name with an untyped dictionary; Tally turns that
//! into a typed [`AnalyticsEvent`] and each provider binding translates it
//! into its vendor's payload.
//!
//! ```text
//! ┌──────────┐     ┌──────────────────┐     ┌──────────────┐     ┌────────────┐
//! │   Host   │────▶│ HostDictionary → │────▶│   Provider   │────▶│ Vendor SDK │
//! │ (engine) │     │    Attributes    │     │ (translate)  │     │  (opaque)  │
//! └──────────┘     └──────────────────┘     └──────────────┘     └────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tally_core::{AnalyticsEvent, Attributes, HostDictionary};
//!
//! let params = HostDictionary::new()
//!     .with("item", "apple")
//!     .with("qty", 3)
//!     .with("price", 1.5)
//!     .with("vip", true);
//!
//! let translation = Attributes::from_host(&params);
//! assert!(translation.is_complete());
//!
//! let event = AnalyticsEvent::new("purchase", translation.attributes).unwrap();
//! assert_eq!(event.attributes().len(), 4);
//! ```

pub mod error;
pub mod event;
pub mod provider;
pub mod value;

pub use error::{
    EventError, EventResult, ProviderError, ProviderResult, SdkError, SdkResult,
};
pub use event::{AnalyticsEvent, Attributes, DroppedAttribute, Translation};
pub use provider::{
    BoxedProvider, InitCallback, InitClaim, InitOutcome, Provider, ProviderHandle, ProviderKind,
    ProviderState,
};
pub use value::{AttributeValue, HostDictionary, HostValue};
