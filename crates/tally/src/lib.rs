//! # Tally
//!
//! Forwards analytics events from a host game engine to mobile analytics
//! SDKs (TikTok Business SDK, Firebase Analytics).
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐  logEvent    ┌─────────────────┐  Attributes  ┌──────────────────┐
//! │ Host engine│─────────────▶│ SocialAnalytics │─────────────▶│ TikTokProvider   │──▶ TikTokSdk
//! │ (scripts)  │  initTikTok  │   (HostPlugin)  │              │ FirebaseProvider │──▶ FirebaseSdk
//! └────────────┘              └─────────────────┘              └──────────────────┘
//! ```
//!
//! - **Core**: attribute values, events, provider lifecycle handles
//! - **Providers**: one crate per vendor, each defining the SDK contract it
//!   consumes and the payload it builds
//! - **Runtime**: the host plugin, configuration and logging
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tally::prelude::*;
//!
//! let analytics = SocialAnalytics::builder()
//!     .tiktok(Arc::new(MyTikTokShim::new()))
//!     .build();
//!
//! analytics.init_tiktok("com.omega.planeats", "7301234567890", "token", true);
//! analytics.log_event(
//!     "purchase",
//!     &HostDictionary::new().with("item", "apple").with("qty", 3),
//! );
//! ```
//!
//! ## Features
//!
//! - `toml-config`: TOML configuration files (default)
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log output

pub use tally_core as core;
pub use tally_provider_firebase as firebase;
pub use tally_provider_tiktok as tiktok;
pub use tally_runtime as runtime;

/// Commonly used types.
pub mod prelude {
    // Entry point
    pub use tally_runtime::{
        HostPlugin, PLUGIN_NAME, PluginRegistry, ProviderConfig, SocialAnalytics,
    };

    // Host values and events
    pub use tally_core::{
        AnalyticsEvent, AttributeValue, Attributes, HostDictionary, HostValue, ProviderKind,
        ProviderState,
    };

    // Vendor contracts, for implementing shims
    pub use tally_core::{InitCallback, InitOutcome, SdkError, SdkResult};
    pub use tally_provider_firebase::{Bundle, FirebaseAnalytics, FirebaseSdk};
    pub use tally_provider_tiktok::{TikTokConfig, TikTokSdk};
}
