//! TikTok provider binding.

use std::sync::Arc;

use parking_lot::RwLock;
use tally_core::{
    AnalyticsEvent, InitOutcome, Provider, ProviderError, ProviderHandle, ProviderKind,
    ProviderResult,
};
use tracing::{debug, error, info};

use crate::config::TikTokConfig;
use crate::payload::to_properties;
use crate::sdk::TikTokSdk;

/// Forwards events to the TikTok Business SDK.
///
/// Initialization order is fixed: debug mode (if requested), then
/// `initialize_sdk`, then `start_track` from inside the success callback.
/// Events tracked before the callback reports success are rejected with
/// [`ProviderError::NotInitialized`] and never reach the SDK. A callback the
/// SDK drops without calling counts as a failed initialization.
pub struct TikTokProvider {
    sdk: Arc<dyn TikTokSdk>,
    handle: Arc<ProviderHandle>,
    config: RwLock<Option<TikTokConfig>>,
}

impl TikTokProvider {
    /// Creates an uninitialized provider around an SDK binding.
    pub fn new(sdk: Arc<dyn TikTokSdk>) -> Self {
        Self {
            sdk,
            handle: ProviderHandle::shared(ProviderKind::TikTok),
            config: RwLock::new(None),
        }
    }

    /// Shared lifecycle handle, for callers that want to await readiness.
    pub fn shared_handle(&self) -> Arc<ProviderHandle> {
        Arc::clone(&self.handle)
    }

    /// The configuration of the last accepted initialization.
    pub fn config(&self) -> Option<TikTokConfig> {
        self.config.read().clone()
    }

    /// Starts SDK initialization and returns without waiting for the outcome.
    ///
    /// Returns an error only for local rejections: invalid configuration or
    /// an initialization still awaiting its callback. Vendor-side failures
    /// arrive later through the callback and are logged there.
    /// Initializing a provider that is already ready does nothing.
    pub fn initialize(&self, config: TikTokConfig) -> ProviderResult<()> {
        config.validate()?;

        if self.handle.is_ready() {
            info!(app_id = %config.app_id, "TikTok SDK already initialized, ignoring");
            return Ok(());
        }

        let claim = self.handle.claim_init()?;

        if config.debug {
            self.sdk.enable_debug_mode();
            debug!("TikTok debug mode enabled");
        }

        *self.config.write() = Some(config.clone());

        let sdk = Arc::clone(&self.sdk);
        self.sdk.initialize_sdk(
            &config,
            Box::new(move |outcome| match &outcome {
                InitOutcome::Success => {
                    sdk.start_track();
                    claim.complete(&outcome);
                    info!("TikTok SDK initialization successful");
                }
                InitOutcome::Failure(err) => {
                    claim.complete(&outcome);
                    error!(
                        code = err.code,
                        message = err.message.as_deref().unwrap_or_default(),
                        "TikTok SDK initialization failed"
                    );
                }
            }),
        );

        info!(
            app_id = %config.app_id,
            tt_app_id = %config.tt_app_id,
            "TikTok SDK initialization requested"
        );
        Ok(())
    }
}

impl Provider for TikTokProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::TikTok
    }

    fn handle(&self) -> &ProviderHandle {
        &self.handle
    }

    fn track(&self, event: &AnalyticsEvent) -> ProviderResult<()> {
        self.handle.ensure_ready()?;

        let properties = to_properties(event.attributes())
            .map_err(|e| ProviderError::translation(ProviderKind::TikTok, e.to_string()))?;

        self.sdk.track_event(event.name(), &properties)?;

        let params = serde_json::Value::Object(properties);
        debug!(event = %event.name(), params = %params, "TikTok event logged");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use serde_json::{Map, Value, json};
    use tally_core::{Attributes, ProviderState, SdkError, SdkResult};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        EnableDebug,
        Initialize(String),
        StartTrack,
        Track(String, Value),
    }

    /// Records calls and parks the init callback until the test fires it.
    #[derive(Default)]
    struct RecordingSdk {
        calls: Mutex<Vec<Call>>,
        pending: Mutex<Option<tally_core::InitCallback>>,
        reject_tracks: bool,
    }

    impl RecordingSdk {
        fn fire(&self, outcome: InitOutcome) {
            let callback = self.pending.lock().take().expect("no pending init");
            callback(outcome);
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }

        fn tracks(&self) -> Vec<Call> {
            self.calls()
                .into_iter()
                .filter(|c| matches!(c, Call::Track(..)))
                .collect()
        }
    }

    impl TikTokSdk for RecordingSdk {
        fn enable_debug_mode(&self) {
            self.calls.lock().push(Call::EnableDebug);
        }

        fn initialize_sdk(&self, config: &TikTokConfig, callback: tally_core::InitCallback) {
            self.calls.lock().push(Call::Initialize(config.app_id.clone()));
            *self.pending.lock() = Some(callback);
        }

        fn start_track(&self) {
            self.calls.lock().push(Call::StartTrack);
        }

        fn track_event(&self, name: &str, properties: &Map<String, Value>) -> SdkResult<()> {
            if self.reject_tracks {
                return Err(SdkError::new(500, "track rejected"));
            }
            self.calls
                .lock()
                .push(Call::Track(name.to_string(), Value::Object(properties.clone())));
            Ok(())
        }
    }

    fn setup() -> (Arc<RecordingSdk>, TikTokProvider) {
        let sdk = Arc::new(RecordingSdk::default());
        let provider = TikTokProvider::new(sdk.clone());
        (sdk, provider)
    }

    fn purchase() -> AnalyticsEvent {
        let attrs = Attributes::new()
            .with("item", "apple")
            .with("qty", 3)
            .with("price", 1.5)
            .with("vip", true);
        AnalyticsEvent::new("purchase", attrs).unwrap()
    }

    #[test]
    fn test_init_order() {
        let (sdk, provider) = setup();
        provider
            .initialize(TikTokConfig::new("com.app.id", "ttid123", "token"))
            .unwrap();

        // Debug before init, and no start_track until the callback fires.
        assert_eq!(
            sdk.calls(),
            vec![Call::EnableDebug, Call::Initialize("com.app.id".into())]
        );
        assert_eq!(provider.state(), ProviderState::Uninitialized);

        sdk.fire(InitOutcome::Success);
        assert_eq!(sdk.calls().last(), Some(&Call::StartTrack));
        assert_eq!(provider.state(), ProviderState::Ready);
        assert_eq!(
            provider.config(),
            Some(TikTokConfig::new("com.app.id", "ttid123", "token"))
        );
    }

    #[test]
    fn test_debug_disabled() {
        let (sdk, provider) = setup();
        provider
            .initialize(TikTokConfig::new("com.app.id", "ttid123", "token").with_debug(false))
            .unwrap();
        assert_eq!(sdk.calls(), vec![Call::Initialize("com.app.id".into())]);
    }

    #[test]
    fn test_track_after_ready_delivers_once() {
        let (sdk, provider) = setup();
        provider
            .initialize(TikTokConfig::new("com.app.id", "ttid123", "token"))
            .unwrap();
        sdk.fire(InitOutcome::Success);

        provider.track(&purchase()).unwrap();

        assert_eq!(
            sdk.tracks(),
            vec![Call::Track(
                "purchase".into(),
                json!({ "item": "apple", "qty": 3, "price": 1.5, "vip": true })
            )]
        );
    }

    #[test]
    fn test_failed_init_blocks_tracking() {
        let (sdk, provider) = setup();
        provider
            .initialize(TikTokConfig::new("com.app.id", "ttid123", "token"))
            .unwrap();
        sdk.fire(InitOutcome::failure(4, "invalid app id"));

        assert_eq!(provider.state(), ProviderState::Uninitialized);
        assert!(!sdk.calls().contains(&Call::StartTrack));

        let err = provider.track(&purchase()).unwrap_err();
        assert_eq!(
            err,
            ProviderError::NotInitialized {
                provider: ProviderKind::TikTok
            }
        );
        assert!(sdk.tracks().is_empty());
    }

    #[test]
    fn test_track_before_callback_rejected() {
        let (sdk, provider) = setup();
        provider
            .initialize(TikTokConfig::new("com.app.id", "ttid123", "token"))
            .unwrap();

        assert!(provider.track(&purchase()).is_err());
        assert!(sdk.tracks().is_empty());
    }

    #[test]
    fn test_concurrent_init_rejected_then_retry() {
        let (sdk, provider) = setup();
        let config = TikTokConfig::new("com.app.id", "ttid123", "token");
        provider.initialize(config.clone()).unwrap();

        assert_eq!(
            provider.initialize(config.clone()),
            Err(ProviderError::InitInProgress {
                provider: ProviderKind::TikTok
            })
        );

        sdk.fire(InitOutcome::failure(4, "invalid app id"));
        provider.initialize(config).unwrap();
        sdk.fire(InitOutcome::Success);
        assert!(provider.handle().is_ready());
    }

    #[test]
    fn test_reinit_when_ready_is_noop() {
        let (sdk, provider) = setup();
        let config = TikTokConfig::new("com.app.id", "ttid123", "token");
        provider.initialize(config.clone()).unwrap();
        sdk.fire(InitOutcome::Success);
        let before = sdk.calls().len();

        provider.initialize(config).unwrap();
        assert_eq!(sdk.calls().len(), before);
    }

    #[test]
    fn test_invalid_config_never_reaches_sdk() {
        let (sdk, provider) = setup();
        let err = provider
            .initialize(TikTokConfig::new("", "ttid123", "token"))
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidConfig { .. }));
        assert!(sdk.calls().is_empty());
        assert!(!provider.handle().is_initializing());
        assert!(provider.config().is_none());
    }

    #[test]
    fn test_dropped_callback_allows_retry() {
        let (sdk, provider) = setup();
        let config = TikTokConfig::new("com.app.id", "ttid123", "token");
        provider.initialize(config.clone()).unwrap();

        // The shim failed before handing the callback to the vendor.
        drop(sdk.pending.lock().take());

        assert!(!provider.handle().is_initializing());
        assert_eq!(provider.state(), ProviderState::Uninitialized);
        assert!(!sdk.calls().contains(&Call::StartTrack));

        provider.initialize(config).unwrap();
        sdk.fire(InitOutcome::Success);
        assert!(provider.handle().is_ready());
    }

    #[test]
    fn test_callback_on_vendor_thread() {
        let (sdk, provider) = setup();
        provider
            .initialize(TikTokConfig::new("com.app.id", "ttid123", "token"))
            .unwrap();

        let vendor = Arc::clone(&sdk);
        std::thread::spawn(move || vendor.fire(InitOutcome::Success))
            .join()
            .unwrap();

        assert!(provider.handle().is_ready());
        provider.track(&purchase()).unwrap();
        assert_eq!(sdk.tracks().len(), 1);
    }

    #[test]
    fn test_vendor_and_translation_errors_surface() {
        let sdk = Arc::new(RecordingSdk {
            reject_tracks: true,
            ..Default::default()
        });
        let provider = TikTokProvider::new(sdk.clone());
        provider
            .initialize(TikTokConfig::new("com.app.id", "ttid123", "token"))
            .unwrap();
        sdk.fire(InitOutcome::Success);

        assert!(matches!(
            provider.track(&purchase()),
            Err(ProviderError::Sdk(SdkError { code: 500, .. }))
        ));

        let bad = AnalyticsEvent::new("level_end", Attributes::new().with("score", f64::NAN))
            .unwrap();
        assert!(matches!(
            provider.track(&bad),
            Err(ProviderError::Translation { .. })
        ));
    }
}
