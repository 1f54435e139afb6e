//! Provider trait and per-provider lifecycle handle.
//!
//! Every analytics vendor binding implements [`Provider`]. A provider owns a
//! single [`ProviderHandle`] for its whole lifetime; the handle tracks the
//! two-state lifecycle:
//!
//! ```text
//! Uninitialized ──(successful init)──▶ Ready
//! ```
//!
//! There is no way back. A failed initialization simply leaves the handle
//! `Uninitialized`, and events tracked in that state never reach the vendor.
//!
//! Vendor initialization completes through an [`InitCallback`] that may run on
//! any thread, so the handle is shared and its writes are locked.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::{ProviderError, ProviderResult, SdkError};
use crate::event::AnalyticsEvent;

// =============================================================================
// Provider Kind
// =============================================================================

/// The downstream analytics vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// TikTok Business SDK.
    TikTok,
    /// Firebase Analytics.
    Firebase,
    /// Meta App Events. Known to the model, no binding ships for it.
    Meta,
}

impl ProviderKind {
    /// Returns the display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TikTok => "TikTok",
            Self::Firebase => "Firebase",
            Self::Meta => "Meta",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tiktok" => Ok(Self::TikTok),
            "firebase" => Ok(Self::Firebase),
            "meta" | "facebook" => Ok(Self::Meta),
            other => Err(format!("unknown provider: {other}")),
        }
    }
}

// =============================================================================
// Provider State
// =============================================================================

/// Lifecycle state of a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderState {
    /// Not initialized, or initialization failed.
    #[default]
    Uninitialized,
    /// Initialized and tracking.
    Ready,
}

impl ProviderState {
    /// Whether events may be forwarded.
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl fmt::Display for ProviderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => f.write_str("uninitialized"),
            Self::Ready => f.write_str("ready"),
        }
    }
}

// =============================================================================
// Initialization Outcome
// =============================================================================

/// Result reported by a vendor initialization callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// The vendor accepted the configuration.
    Success,
    /// The vendor rejected the configuration.
    Failure(SdkError),
}

impl InitOutcome {
    /// Shorthand for a failure with code and message.
    pub fn failure(code: i32, message: impl Into<String>) -> Self {
        Self::Failure(SdkError::new(code, message))
    }
}

/// One-shot completion callback handed to a vendor initialization call.
///
/// Vendors invoke it exactly once, on a thread of their choosing.
pub type InitCallback = Box<dyn FnOnce(InitOutcome) + Send + 'static>;

// =============================================================================
// Provider Handle
// =============================================================================

/// Shared lifecycle cell for one provider.
///
/// Created once with the provider and never replaced. State is readable from
/// any thread; changes are also broadcast to receivers obtained through
/// [`subscribe`](Self::subscribe).
#[derive(Debug)]
pub struct ProviderHandle {
    kind: ProviderKind,
    state: RwLock<ProviderState>,
    initializing: AtomicBool,
    notify: watch::Sender<ProviderState>,
}

impl ProviderHandle {
    /// Creates an uninitialized handle.
    pub fn new(kind: ProviderKind) -> Self {
        let (notify, _) = watch::channel(ProviderState::Uninitialized);
        Self {
            kind,
            state: RwLock::new(ProviderState::Uninitialized),
            initializing: AtomicBool::new(false),
            notify,
        }
    }

    /// Creates a shared handle.
    pub fn shared(kind: ProviderKind) -> Arc<Self> {
        Arc::new(Self::new(kind))
    }

    /// The provider this handle belongs to.
    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Current state.
    pub fn state(&self) -> ProviderState {
        *self.state.read()
    }

    /// Whether the provider is ready.
    pub fn is_ready(&self) -> bool {
        self.state().is_ready()
    }

    /// Whether an initialization is waiting for its vendor callback.
    pub fn is_initializing(&self) -> bool {
        self.initializing.load(Ordering::Acquire)
    }

    /// Claims the initialization slot.
    ///
    /// Fails with [`ProviderError::InitInProgress`] if another initialization
    /// has not completed yet. The claim is released by
    /// [`complete_init`](Self::complete_init).
    pub fn begin_init(&self) -> ProviderResult<()> {
        self.initializing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| ProviderError::InitInProgress {
                provider: self.kind,
            })
    }

    /// Claims the initialization slot and returns a guard owning the claim.
    ///
    /// The guard is meant to travel with the vendor callback. If it is
    /// dropped without [`InitClaim::complete`], the slot is released as a
    /// failed initialization.
    pub fn claim_init(self: &Arc<Self>) -> ProviderResult<InitClaim> {
        self.begin_init()?;
        Ok(InitClaim {
            handle: Some(Arc::clone(self)),
        })
    }

    /// Releases the initialization slot and applies the outcome.
    ///
    /// Returns `true` if this call moved the handle to `Ready`.
    pub fn complete_init(&self, outcome: &InitOutcome) -> bool {
        let transitioned = match outcome {
            InitOutcome::Success => self.mark_ready(),
            InitOutcome::Failure(_) => false,
        };
        self.initializing.store(false, Ordering::Release);
        transitioned
    }

    /// Moves the handle to `Ready`.
    ///
    /// Returns `true` on the first transition and `false` if already ready.
    pub fn mark_ready(&self) -> bool {
        let mut state = self.state.write();
        if state.is_ready() {
            return false;
        }
        *state = ProviderState::Ready;
        drop(state);

        self.notify.send_replace(ProviderState::Ready);
        debug!(provider = %self.kind, "Provider ready");
        true
    }

    /// Fails with [`ProviderError::NotInitialized`] unless ready.
    pub fn ensure_ready(&self) -> ProviderResult<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(ProviderError::NotInitialized {
                provider: self.kind,
            })
        }
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ProviderState> {
        self.notify.subscribe()
    }

    /// Waits until the provider is ready.
    ///
    /// Never resolves if initialization fails and is not retried; callers that
    /// need a bound should wrap this in a timeout.
    pub async fn wait_ready(&self) {
        let mut rx = self.subscribe();
        // The sender lives as long as `self`, so this cannot observe a closed channel.
        let _ = rx.wait_for(|state| state.is_ready()).await;
    }
}

// =============================================================================
// Init Claim
// =============================================================================

/// An in-flight initialization, released exactly once.
#[derive(Debug)]
#[must_use = "dropping the claim fails the initialization"]
pub struct InitClaim {
    handle: Option<Arc<ProviderHandle>>,
}

impl InitClaim {
    /// Applies the vendor outcome and releases the slot.
    ///
    /// Returns `true` if the handle moved to `Ready`.
    pub fn complete(mut self, outcome: &InitOutcome) -> bool {
        match self.handle.take() {
            Some(handle) => handle.complete_init(outcome),
            None => false,
        }
    }
}

impl Drop for InitClaim {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            warn!(
                provider = %handle.kind(),
                "Initialization callback dropped without being called"
            );
            handle.complete_init(&InitOutcome::failure(
                SdkError::CALLBACK_DROPPED,
                "initialization callback dropped",
            ));
        }
    }
}

// =============================================================================
// Provider Trait
// =============================================================================

/// A downstream analytics vendor binding.
///
/// Implementations translate the typed event into their native payload and
/// hand it to the vendor SDK. `track` reports failures; deciding whether to
/// swallow them is the caller's business.
pub trait Provider: Send + Sync {
    /// Which vendor this is.
    fn kind(&self) -> ProviderKind;

    /// The lifecycle handle.
    fn handle(&self) -> &ProviderHandle;

    /// Current lifecycle state.
    fn state(&self) -> ProviderState {
        self.handle().state()
    }

    /// Forwards one event to the vendor.
    ///
    /// Must not reach the vendor unless the handle is ready.
    fn track(&self, event: &AnalyticsEvent) -> ProviderResult<()>;
}

/// A shared provider trait object.
pub type BoxedProvider = Arc<dyn Provider>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_starts_uninitialized() {
        let handle = ProviderHandle::new(ProviderKind::TikTok);
        assert_eq!(handle.state(), ProviderState::Uninitialized);
        assert_eq!(
            handle.ensure_ready(),
            Err(ProviderError::NotInitialized {
                provider: ProviderKind::TikTok
            })
        );
    }

    #[test]
    fn test_ready_is_terminal() {
        let handle = ProviderHandle::new(ProviderKind::Firebase);
        assert!(handle.mark_ready());
        assert!(!handle.mark_ready());
        assert!(handle.is_ready());
    }

    #[test]
    fn test_failed_init_stays_uninitialized() {
        let handle = ProviderHandle::new(ProviderKind::TikTok);
        handle.begin_init().unwrap();
        assert!(handle.is_initializing());

        let transitioned = handle.complete_init(&InitOutcome::failure(4, "invalid app id"));
        assert!(!transitioned);
        assert!(!handle.is_initializing());
        assert_eq!(handle.state(), ProviderState::Uninitialized);
    }

    #[test]
    fn test_claim_completed() {
        let handle = ProviderHandle::shared(ProviderKind::TikTok);
        let claim = handle.claim_init().unwrap();
        assert!(handle.is_initializing());
        assert!(matches!(
            handle.claim_init(),
            Err(ProviderError::InitInProgress { .. })
        ));

        assert!(claim.complete(&InitOutcome::Success));
        assert!(!handle.is_initializing());
        assert!(handle.is_ready());
    }

    #[test]
    fn test_dropped_claim_releases_slot() {
        let handle = ProviderHandle::shared(ProviderKind::TikTok);
        let claim = handle.claim_init().unwrap();
        drop(claim);

        assert!(!handle.is_initializing());
        assert_eq!(handle.state(), ProviderState::Uninitialized);
        let retry = handle.claim_init().unwrap();
        assert!(retry.complete(&InitOutcome::Success));
    }

    #[test]
    fn test_init_slot_is_exclusive() {
        let handle = ProviderHandle::new(ProviderKind::TikTok);
        handle.begin_init().unwrap();
        assert_eq!(
            handle.begin_init(),
            Err(ProviderError::InitInProgress {
                provider: ProviderKind::TikTok
            })
        );
        handle.complete_init(&InitOutcome::Success);
        assert!(handle.begin_init().is_ok());
    }

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("TikTok".parse(), Ok(ProviderKind::TikTok));
        assert_eq!("facebook".parse(), Ok(ProviderKind::Meta));
        assert!("segment".parse::<ProviderKind>().is_err());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_wait_ready_across_threads() {
        let handle = ProviderHandle::shared(ProviderKind::TikTok);
        let vendor_side = Arc::clone(&handle);

        std::thread::spawn(move || {
            vendor_side.begin_init().unwrap();
            vendor_side.complete_init(&InitOutcome::Success);
        });

        handle.wait_ready().await;
        assert!(handle.is_ready());
    }
}
