//! # Tally Provider for TikTok
//!
//! Binds the Tally analytics bridge to the TikTok Business SDK.
//!
//! ## Overview
//!
//! - [`TikTokSdk`]: the vendor call contract a host shim implements
//! - [`TikTokConfig`]: app id, TikTok app id, access token, debug flag
//! - [`TikTokProvider`]: drives initialization and forwards events
//! - [`to_properties`]: attribute map to JSON properties translation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tally_provider_tiktok::{TikTokConfig, TikTokProvider};
//!
//! let provider = TikTokProvider::new(Arc::new(MyJniTikTokSdk::new(env)));
//! provider.initialize(TikTokConfig::new("com.app.id", "ttid123", "token"))?;
//! // ... once the vendor callback reports success:
//! provider.track(&event)?;
//! ```

mod config;
mod payload;
mod provider;
mod sdk;

pub use config::TikTokConfig;
pub use payload::{PayloadError, to_properties};
pub use provider::TikTokProvider;
pub use sdk::TikTokSdk;
