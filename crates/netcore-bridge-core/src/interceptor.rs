//! Interceptor installation contract.
//!
//! An interceptor sits in front of exactly one host entry point. Installing
//! it captures the host's original implementation in a write-once slot; a
//! repeated install leaves the first capture in place, so the original is
//! never wrapped twice. Every remote call an interceptor makes goes through
//! [`consult`], which bounds the wait and turns any failure into "no
//! decision" so the host call proceeds unchanged.

use std::future::Future;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tracing::{debug, error, info};

use crate::error::{DecisionError, DecisionResult, HostError, HostResult};

/// Result of an [`Interceptor::install`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The original entry point was captured by this call.
    Installed,
    /// An original was already captured; nothing changed.
    AlreadyInstalled,
}

/// Common contract of the three channel adapters.
pub trait Interceptor: Send + Sync {
    /// Host entry point this interceptor wraps.
    type Host: ?Sized + Send + Sync;

    /// Channel name used in logs and self-test reports.
    fn channel(&self) -> &'static str;

    /// Capture the host's original implementation. Idempotent.
    fn install(&self, original: Arc<Self::Host>) -> InstallOutcome;

    fn is_installed(&self) -> bool;
}

/// Write-once holder for a captured host entry point.
pub struct InstallSlot<T: ?Sized> {
    channel: &'static str,
    original: OnceLock<Arc<T>>,
}

impl<T: ?Sized> InstallSlot<T> {
    pub fn new(channel: &'static str) -> Self {
        Self {
            channel,
            original: OnceLock::new(),
        }
    }

    pub fn install(&self, original: Arc<T>) -> InstallOutcome {
        match self.original.set(original) {
            Ok(()) => {
                info!(channel = self.channel, "net_core_bridge: interceptor installed");
                InstallOutcome::Installed
            }
            Err(_) => {
                debug!(
                    channel = self.channel,
                    "net_core_bridge: interceptor already installed, skipping"
                );
                InstallOutcome::AlreadyInstalled
            }
        }
    }

    pub fn original(&self) -> HostResult<&Arc<T>> {
        self.original
            .get()
            .ok_or(HostError::NotInstalled(self.channel))
    }

    pub fn is_installed(&self) -> bool {
        self.original.get().is_some()
    }
}

/// Await `call` for at most `timeout`.
pub async fn decide_within<T, F>(timeout: Duration, call: F) -> DecisionResult<T>
where
    F: Future<Output = DecisionResult<T>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(DecisionError::Timeout(timeout)),
    }
}

/// Ask the decision service, failing open.
///
/// Returns `None` when the call fails or times out; the failure is logged at
/// error level and never reaches the host.
pub async fn consult<T, F>(channel: &'static str, timeout: Duration, call: F) -> Option<T>
where
    F: Future<Output = DecisionResult<T>>,
{
    match decide_within(timeout, call).await {
        Ok(decision) => Some(decision),
        Err(err) => {
            error!(channel, error = %err, "net_core_bridge: decision call failed, failing open");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> &'static str;
    }

    struct Hello;
    struct Bonjour;

    impl Greeter for Hello {
        fn greet(&self) -> &'static str {
            "hello"
        }
    }

    impl Greeter for Bonjour {
        fn greet(&self) -> &'static str {
            "bonjour"
        }
    }

    #[test]
    fn slot_keeps_first_original() {
        let slot: InstallSlot<dyn Greeter> = InstallSlot::new("greeter");
        assert!(!slot.is_installed());
        assert!(matches!(slot.original(), Err(HostError::NotInstalled("greeter"))));

        assert_eq!(slot.install(Arc::new(Hello)), InstallOutcome::Installed);
        assert_eq!(slot.install(Arc::new(Bonjour)), InstallOutcome::AlreadyInstalled);
        assert_eq!(slot.install(Arc::new(Bonjour)), InstallOutcome::AlreadyInstalled);

        assert_eq!(slot.original().unwrap().greet(), "hello");
    }

    #[tokio::test]
    async fn consult_returns_decision() {
        let decision = consult("test", Duration::from_secs(1), async {
            Ok::<_, DecisionError>(7)
        })
        .await;
        assert_eq!(decision, Some(7));
    }

    #[tokio::test]
    async fn consult_fails_open_on_error() {
        let decision: Option<u8> = consult("test", Duration::from_secs(1), async {
            Err(DecisionError::rpc("Unavailable", "connection refused"))
        })
        .await;
        assert_eq!(decision, None);
    }

    #[tokio::test(start_paused = true)]
    async fn decide_within_times_out() {
        let result: DecisionResult<u8> = decide_within(Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(1)
        })
        .await;
        assert!(matches!(result, Err(DecisionError::Timeout(_))));
    }
}
