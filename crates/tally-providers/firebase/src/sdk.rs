//! The Firebase Analytics call contract.
//!
//! | Trait method | Vendor call |
//! |---|---|
//! | [`FirebaseSdk::get_instance`] | `FirebaseAnalytics.getInstance(context)` |
//! | [`FirebaseAnalytics::log_event`] | `firebaseAnalytics.logEvent(name, bundle)` |
//!
//! The host context needed by `getInstance` is owned by the shim implementing
//! [`FirebaseSdk`], so the trait takes no arguments.

use std::sync::Arc;

use tally_core::SdkResult;

use crate::bundle::Bundle;

/// Entry point of the Firebase SDK.
pub trait FirebaseSdk: Send + Sync {
    /// Obtains the process-wide analytics instance.
    fn get_instance(&self) -> SdkResult<Arc<dyn FirebaseAnalytics>>;
}

/// A Firebase Analytics instance.
pub trait FirebaseAnalytics: Send + Sync {
    /// Logs one event.
    fn log_event(&self, name: &str, params: &Bundle) -> SdkResult<()>;
}
