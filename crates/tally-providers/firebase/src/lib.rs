//! # Tally Provider for Firebase
//!
//! Binds the Tally analytics bridge to Firebase Analytics.
//!
//! - [`FirebaseSdk`] / [`FirebaseAnalytics`]: the vendor call contract
//! - [`Bundle`]: Firebase's typed parameter container
//! - [`FirebaseProvider`]: obtains the instance and forwards events
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tally_provider_firebase::FirebaseProvider;
//!
//! let provider = FirebaseProvider::new(Arc::new(MyJniFirebaseSdk::new(activity)));
//! provider.initialize()?;
//! provider.track(&event)?;
//! ```

mod bundle;
mod provider;
mod sdk;

pub use bundle::{Bundle, BundleValue};
pub use provider::FirebaseProvider;
pub use sdk::{FirebaseAnalytics, FirebaseSdk};
