//! The `SocialAnalytics` host plugin.
//!
//! Receives events from the host engine, translates the host dictionary into
//! typed attributes and forwards them to a provider. Every entry point the
//! host reaches absorbs failures into log lines; the `Result`-returning
//! methods are for Rust callers.
//!
//! ```rust,ignore
//! use tally_runtime::{PluginRegistry, SocialAnalytics};
//!
//! let analytics = SocialAnalytics::builder()
//!     .tiktok(tiktok_sdk)
//!     .firebase(firebase_sdk)
//!     .build();
//! analytics.init_tiktok("com.omega.planeats", "7301234567890", "token", true);
//!
//! let registry = PluginRegistry::new();
//! registry.register(Arc::new(analytics));
//! ```

use std::sync::Arc;

use tally_core::{
    AnalyticsEvent, Attributes, HostDictionary, HostValue, Provider, ProviderError,
    ProviderHandle, ProviderKind, ProviderState,
};
use tally_provider_firebase::{FirebaseProvider, FirebaseSdk};
use tally_provider_tiktok::{TikTokConfig, TikTokProvider, TikTokSdk};
use tracing::{debug, error, warn};

use crate::config::ProvidersConfig;
use crate::error::{RuntimeError, RuntimeResult};
use crate::plugin::{Arguments, CallError, CallResult, HostPlugin};

/// Name the plugin is registered under.
pub const PLUGIN_NAME: &str = "SocialAnalytics";

const METHODS: &[&str] = &["logEvent", "initTikTok", "logFirebaseEvent", "initFirebase"];

/// Initialization parameters for one provider.
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    TikTok(TikTokConfig),
    /// Firebase needs nothing beyond the platform instance.
    Firebase,
}

impl ProviderConfig {
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::TikTok(_) => ProviderKind::TikTok,
            Self::Firebase => ProviderKind::Firebase,
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`SocialAnalytics`]. Providers without an SDK are left out.
#[derive(Default)]
pub struct SocialAnalyticsBuilder {
    tiktok: Option<Arc<dyn TikTokSdk>>,
    firebase: Option<Arc<dyn FirebaseSdk>>,
}

impl SocialAnalyticsBuilder {
    pub fn tiktok(mut self, sdk: Arc<dyn TikTokSdk>) -> Self {
        self.tiktok = Some(sdk);
        self
    }

    pub fn firebase(mut self, sdk: Arc<dyn FirebaseSdk>) -> Self {
        self.firebase = Some(sdk);
        self
    }

    pub fn build(self) -> SocialAnalytics {
        SocialAnalytics {
            tiktok: self.tiktok.map(TikTokProvider::new),
            firebase: self.firebase.map(FirebaseProvider::new),
        }
    }
}

// =============================================================================
// SocialAnalytics
// =============================================================================

/// Event forwarding adapter between the host engine and the vendor SDKs.
pub struct SocialAnalytics {
    tiktok: Option<TikTokProvider>,
    firebase: Option<FirebaseProvider>,
}

impl SocialAnalytics {
    pub fn builder() -> SocialAnalyticsBuilder {
        SocialAnalyticsBuilder::default()
    }

    /// The TikTok binding, if installed.
    pub fn tiktok(&self) -> Option<&TikTokProvider> {
        self.tiktok.as_ref()
    }

    /// The Firebase binding, if installed.
    pub fn firebase(&self) -> Option<&FirebaseProvider> {
        self.firebase.as_ref()
    }

    /// The binding for `kind`. Meta has none.
    pub fn provider(&self, kind: ProviderKind) -> Option<&dyn Provider> {
        match kind {
            ProviderKind::TikTok => self.tiktok.as_ref().map(|p| p as &dyn Provider),
            ProviderKind::Firebase => self.firebase.as_ref().map(|p| p as &dyn Provider),
            ProviderKind::Meta => None,
        }
    }

    fn require(&self, kind: ProviderKind) -> RuntimeResult<&dyn Provider> {
        self.provider(kind)
            .ok_or(RuntimeError::ProviderUnavailable(kind))
    }

    /// Lifecycle state of `kind`; a provider without a binding is reported
    /// as uninitialized.
    pub fn state(&self, kind: ProviderKind) -> ProviderState {
        self.provider(kind)
            .map(|p| p.state())
            .unwrap_or_default()
    }

    /// Shared lifecycle handle of `kind`.
    pub fn handle(&self, kind: ProviderKind) -> Option<Arc<ProviderHandle>> {
        match kind {
            ProviderKind::TikTok => self.tiktok.as_ref().map(TikTokProvider::shared_handle),
            ProviderKind::Firebase => self.firebase.as_ref().map(FirebaseProvider::shared_handle),
            ProviderKind::Meta => None,
        }
    }

    /// Waits until `kind` is ready.
    ///
    /// Pending forever if initialization fails and is never retried.
    pub async fn wait_ready(&self, kind: ProviderKind) -> RuntimeResult<()> {
        let handle = self
            .handle(kind)
            .ok_or(RuntimeError::ProviderUnavailable(kind))?;
        handle.wait_ready().await;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Initialization
    // -------------------------------------------------------------------------

    /// Initializes one provider.
    ///
    /// For TikTok this returns once the SDK has been asked to initialize;
    /// the outcome arrives later through the vendor callback.
    pub fn initialize(&self, config: ProviderConfig) -> RuntimeResult<()> {
        match config {
            ProviderConfig::TikTok(config) => self
                .tiktok
                .as_ref()
                .ok_or(RuntimeError::ProviderUnavailable(ProviderKind::TikTok))?
                .initialize(config)?,
            ProviderConfig::Firebase => self
                .firebase
                .as_ref()
                .ok_or(RuntimeError::ProviderUnavailable(ProviderKind::Firebase))?
                .initialize()?,
        }
        Ok(())
    }

    /// Initializes every provider `config` enables.
    ///
    /// TikTok only when `auto_init` is set, Firebase when `enabled`. All
    /// enabled providers are attempted; the first failure is returned.
    pub fn initialize_from_config(&self, config: &ProvidersConfig) -> RuntimeResult<()> {
        let mut requested = Vec::new();
        if let Some(tiktok) = config.tiktok.as_ref().filter(|t| t.auto_init) {
            requested.push(ProviderConfig::TikTok(tiktok.to_provider_config()));
        }
        if config.firebase.enabled {
            requested.push(ProviderConfig::Firebase);
        }

        let mut first_error = None;
        for provider_config in requested {
            let kind = provider_config.kind();
            if let Err(err) = self.initialize(provider_config) {
                error!(provider = %kind, error = %err, "Provider initialization failed");
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Host entry point for TikTok initialization. Never fails.
    pub fn init_tiktok(&self, app_id: &str, tt_app_id: &str, access_token: &str, enable_debug: bool) {
        let config = TikTokConfig::new(app_id, tt_app_id, access_token).with_debug(enable_debug);
        if let Err(err) = self.initialize(ProviderConfig::TikTok(config)) {
            error!(provider = %ProviderKind::TikTok, error = %err, "Initialization rejected");
        }
    }

    /// Host entry point for Firebase initialization. Never fails.
    pub fn init_firebase(&self) {
        if let Err(err) = self.initialize(ProviderConfig::Firebase) {
            error!(provider = %ProviderKind::Firebase, error = %err, "Initialization rejected");
        }
    }

    // -------------------------------------------------------------------------
    // Event logging
    // -------------------------------------------------------------------------

    /// Forwards a typed event to one provider.
    pub fn log_event_to(&self, kind: ProviderKind, event: &AnalyticsEvent) -> RuntimeResult<()> {
        self.require(kind)?.track(event)?;
        Ok(())
    }

    /// Host entry point: logs an event to TikTok. Never fails.
    pub fn log_event(&self, event_name: &str, attributes: &HostDictionary) {
        self.forward(ProviderKind::TikTok, event_name, attributes);
    }

    /// Host entry point: logs an event to Firebase. Never fails.
    pub fn log_firebase_event(&self, event_name: &str, attributes: &HostDictionary) {
        self.forward(ProviderKind::Firebase, event_name, attributes);
    }

    fn forward(&self, kind: ProviderKind, event_name: &str, attributes: &HostDictionary) {
        let translation = Attributes::from_host(attributes);
        if !translation.is_complete() {
            debug!(
                provider = %kind,
                event = %event_name,
                dropped = translation.dropped.len(),
                "Unsupported attributes left out"
            );
        }

        let result = AnalyticsEvent::new(event_name, translation.attributes)
            .map_err(ProviderError::from)
            .map_err(RuntimeError::from)
            .and_then(|event| self.log_event_to(kind, &event));

        match result {
            Ok(()) => {}
            Err(RuntimeError::Provider(ProviderError::NotInitialized { .. })) => {
                warn!(provider = %kind, event = %event_name, "Provider not initialized, event dropped");
            }
            Err(err) => {
                error!(provider = %kind, event = %event_name, error = %err, "Failed to log event");
            }
        }
    }
}

// =============================================================================
// Host Plugin
// =============================================================================

impl HostPlugin for SocialAnalytics {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn methods(&self) -> &[&'static str] {
        METHODS
    }

    fn call(&self, method: &str, args: &[HostValue]) -> CallResult<HostValue> {
        match method {
            "logEvent" => {
                let args = Arguments::new(method, args, 2, 2)?;
                self.log_event(args.string(0)?, &args.dictionary(1)?);
            }
            "logFirebaseEvent" => {
                let args = Arguments::new(method, args, 2, 2)?;
                self.log_firebase_event(args.string(0)?, &args.dictionary(1)?);
            }
            "initTikTok" => {
                let args = Arguments::new(method, args, 3, 4)?;
                self.init_tiktok(
                    args.string(0)?,
                    args.string(1)?,
                    args.string(2)?,
                    args.bool_or(3, true)?,
                );
            }
            "initFirebase" => {
                Arguments::new(method, args, 0, 0)?;
                self.init_firebase();
            }
            _ => {
                return Err(CallError::MethodNotFound {
                    plugin: PLUGIN_NAME.to_string(),
                    method: method.to_string(),
                });
            }
        }
        debug!(plugin = PLUGIN_NAME, method = %method, "Host call handled");
        Ok(HostValue::Nil)
    }
}
