//! The TikTok Business SDK call contract.
//!
//! The SDK itself lives outside this crate. A host shim (JNI bridge, engine
//! extension, test double) implements [`TikTokSdk`] by forwarding each method
//! to the matching vendor call.
//!
//! | Trait method | Vendor call |
//! |---|---|
//! | [`enable_debug_mode`](TikTokSdk::enable_debug_mode) | `TikTokBusinessSdk.enableDebugMode()` |
//! | [`initialize_sdk`](TikTokSdk::initialize_sdk) | `TikTokBusinessSdk.initializeSdk(config, callback)` |
//! | [`start_track`](TikTokSdk::start_track) | `TikTokBusinessSdk.startTrack()` |
//! | [`track_event`](TikTokSdk::track_event) | `TikTokBusinessSdk.trackEvent(name, json)` |

use serde_json::{Map, Value};
use tally_core::{InitCallback, SdkResult};

use crate::config::TikTokConfig;

/// TikTok Business SDK operations used by the provider.
pub trait TikTokSdk: Send + Sync {
    /// Turns on vendor diagnostic output.
    fn enable_debug_mode(&self);

    /// Starts vendor initialization.
    ///
    /// Must return without waiting for the outcome. The callback is invoked
    /// exactly once, possibly on another thread, possibly before this method
    /// returns.
    fn initialize_sdk(&self, config: &TikTokConfig, callback: InitCallback);

    /// Begins event collection. Only valid after a successful initialization.
    fn start_track(&self);

    /// Tracks one event with its JSON properties.
    fn track_event(&self, name: &str, properties: &Map<String, Value>) -> SdkResult<()>;
}
