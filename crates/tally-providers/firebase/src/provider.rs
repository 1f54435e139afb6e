//! Firebase provider binding.

use std::sync::Arc;

use parking_lot::RwLock;
use tally_core::{
    AnalyticsEvent, InitOutcome, Provider, ProviderError, ProviderHandle, ProviderKind,
    ProviderResult,
};
use tracing::{debug, error, info};

use crate::bundle::Bundle;
use crate::sdk::{FirebaseAnalytics, FirebaseSdk};

/// Forwards events to Firebase Analytics.
///
/// Initialization is synchronous: the provider is ready as soon as the SDK
/// hands back an analytics instance.
pub struct FirebaseProvider {
    sdk: Arc<dyn FirebaseSdk>,
    handle: Arc<ProviderHandle>,
    instance: RwLock<Option<Arc<dyn FirebaseAnalytics>>>,
}

impl FirebaseProvider {
    /// Creates an uninitialized provider around an SDK binding.
    pub fn new(sdk: Arc<dyn FirebaseSdk>) -> Self {
        Self {
            sdk,
            handle: ProviderHandle::shared(ProviderKind::Firebase),
            instance: RwLock::new(None),
        }
    }

    /// Shared lifecycle handle.
    pub fn shared_handle(&self) -> Arc<ProviderHandle> {
        Arc::clone(&self.handle)
    }

    /// Obtains the analytics instance.
    ///
    /// A vendor failure is logged and returned; the provider stays
    /// uninitialized and may be initialized again later.
    pub fn initialize(&self) -> ProviderResult<()> {
        if self.handle.is_ready() {
            debug!("Firebase Analytics already initialized, ignoring");
            return Ok(());
        }

        self.handle.begin_init()?;

        match self.sdk.get_instance() {
            Ok(instance) => {
                *self.instance.write() = Some(instance);
                self.handle.complete_init(&InitOutcome::Success);
                info!("Firebase Analytics initialized");
                Ok(())
            }
            Err(err) => {
                self.handle
                    .complete_init(&InitOutcome::Failure(err.clone()));
                error!(
                    code = err.code,
                    message = err.message.as_deref().unwrap_or_default(),
                    "Firebase Analytics initialization failed"
                );
                Err(err.into())
            }
        }
    }
}

impl Provider for FirebaseProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Firebase
    }

    fn handle(&self) -> &ProviderHandle {
        &self.handle
    }

    fn track(&self, event: &AnalyticsEvent) -> ProviderResult<()> {
        self.handle.ensure_ready()?;

        // Clone out of the lock so the vendor call runs unlocked.
        let instance = self
            .instance
            .read()
            .clone()
            .ok_or(ProviderError::NotInitialized {
                provider: ProviderKind::Firebase,
            })?;

        let bundle = Bundle::from(event.attributes());
        instance.log_event(event.name(), &bundle)?;

        debug!(
            event = %event.name(),
            params = %bundle,
            "Firebase event logged"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use tally_core::{Attributes, ProviderState, SdkError, SdkResult};

    use super::*;
    use crate::bundle::BundleValue;

    #[derive(Default)]
    struct RecordingAnalytics {
        logged: Mutex<Vec<(String, Bundle)>>,
    }

    impl FirebaseAnalytics for RecordingAnalytics {
        fn log_event(&self, name: &str, params: &Bundle) -> SdkResult<()> {
            self.logged.lock().push((name.to_string(), params.clone()));
            Ok(())
        }
    }

    struct RecordingSdk {
        analytics: Arc<RecordingAnalytics>,
        fail_with: Option<SdkError>,
    }

    impl FirebaseSdk for RecordingSdk {
        fn get_instance(&self) -> SdkResult<Arc<dyn FirebaseAnalytics>> {
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(self.analytics.clone() as Arc<dyn FirebaseAnalytics>),
            }
        }
    }

    fn setup(fail_with: Option<SdkError>) -> (Arc<RecordingAnalytics>, FirebaseProvider) {
        let analytics = Arc::new(RecordingAnalytics::default());
        let sdk = RecordingSdk {
            analytics: analytics.clone(),
            fail_with,
        };
        (analytics, FirebaseProvider::new(Arc::new(sdk)))
    }

    fn level_up() -> AnalyticsEvent {
        let attrs = Attributes::new().with("level", 7).with("character", "mage");
        AnalyticsEvent::new("level_up", attrs).unwrap()
    }

    #[test]
    fn test_init_then_track() {
        let (analytics, provider) = setup(None);
        provider.initialize().unwrap();
        assert_eq!(provider.state(), ProviderState::Ready);

        provider.track(&level_up()).unwrap();

        let logged = analytics.logged.lock();
        assert_eq!(logged.len(), 1);
        let (name, bundle) = &logged[0];
        assert_eq!(name, "level_up");
        assert_eq!(bundle.get("level"), Some(&BundleValue::Int(7)));
        assert_eq!(bundle.get("character"), Some(&BundleValue::String("mage".into())));
    }

    #[test]
    fn test_track_before_init_never_logs() {
        let (analytics, provider) = setup(None);
        assert!(matches!(
            provider.track(&level_up()),
            Err(ProviderError::NotInitialized { .. })
        ));
        assert!(analytics.logged.lock().is_empty());
    }

    #[test]
    fn test_failed_init_stays_uninitialized() {
        let (analytics, provider) = setup(Some(SdkError::new(1, "no google-services.json")));
        assert!(matches!(
            provider.initialize(),
            Err(ProviderError::Sdk(SdkError { code: 1, .. }))
        ));
        assert_eq!(provider.state(), ProviderState::Uninitialized);
        assert!(!provider.handle().is_initializing());

        assert!(provider.track(&level_up()).is_err());
        assert!(analytics.logged.lock().is_empty());
    }

    #[test]
    fn test_reinit_is_noop() {
        let (_, provider) = setup(None);
        provider.initialize().unwrap();
        provider.initialize().unwrap();
        assert!(provider.handle().is_ready());
    }
}
