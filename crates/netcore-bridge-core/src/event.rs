//! Event bus interceptor.
//!
//! Consults the decision service before every event fire. A `handled`
//! decision suppresses the event; anything else, including a failed call,
//! forwards the original arguments untouched.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::decision::EventDecider;
use crate::error::HostResult;
use crate::host::{Context, EventBus, EventOrigin, JsonObject};
use crate::interceptor::{consult, InstallOutcome, InstallSlot, Interceptor};
use crate::types::InterceptedEvent;

pub const EVENT_CHANNEL: &str = "event_interceptor";

pub struct EventInterceptor {
    decider: Arc<dyn EventDecider>,
    original: InstallSlot<dyn EventBus>,
    timeout: Duration,
}

impl EventInterceptor {
    pub fn new(decider: Arc<dyn EventDecider>, timeout: Duration) -> Self {
        Self {
            decider,
            original: InstallSlot::new(EVENT_CHANNEL),
            timeout,
        }
    }
}

impl Interceptor for EventInterceptor {
    type Host = dyn EventBus;

    fn channel(&self) -> &'static str {
        EVENT_CHANNEL
    }

    fn install(&self, original: Arc<dyn EventBus>) -> InstallOutcome {
        self.original.install(original)
    }

    fn is_installed(&self) -> bool {
        self.original.is_installed()
    }
}

#[async_trait]
impl EventBus for EventInterceptor {
    async fn fire(
        &self,
        event_type: &str,
        data: Option<JsonObject>,
        origin: EventOrigin,
        context: Option<Context>,
    ) -> HostResult<()> {
        let original = self.original.original()?;

        let event = match data.as_ref() {
            Some(payload) => InterceptedEvent::from_call(event_type, payload, context.as_ref()),
            None => InterceptedEvent::from_call(event_type, &JsonObject::new(), context.as_ref()),
        };

        let decision = consult(
            EVENT_CHANNEL,
            self.timeout,
            self.decider.intercept_event(event),
        )
        .await;
        if decision.is_some_and(|d| d.handled) {
            debug!(event_type, "net_core_bridge: event suppressed by decision service");
            return Ok(());
        }

        original.fire(event_type, data, origin, context).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecisionError, HostError};
    use crate::testing::{RecordingEventBus, ScriptedDecider};
    use crate::types::EventDecision;
    use serde_json::json;

    fn installed(decider: Arc<ScriptedDecider>) -> (EventInterceptor, Arc<RecordingEventBus>) {
        let bus = Arc::new(RecordingEventBus::default());
        let interceptor = EventInterceptor::new(decider, Duration::from_secs(1));
        assert_eq!(interceptor.install(bus.clone()), InstallOutcome::Installed);
        (interceptor, bus)
    }

    fn kitchen_on() -> JsonObject {
        json!({"entity_id": "light.kitchen"}).as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn handled_decision_suppresses_event() {
        let decider = ScriptedDecider::new();
        decider.reply_event(Ok(EventDecision { handled: true }));
        let (interceptor, bus) = installed(decider.clone());

        interceptor
            .fire("light.turn_on", Some(kitchen_on()), EventOrigin::Local, None)
            .await
            .unwrap();

        assert!(bus.fired().is_empty());
        assert_eq!(decider.events()[0].entity_id, "light.kitchen");
    }

    #[tokio::test]
    async fn unhandled_decision_fires_once_unmodified() {
        let decider = ScriptedDecider::new();
        let (interceptor, bus) = installed(decider);
        let context = Context::with_id("ctx-42");

        interceptor
            .fire(
                "light.turn_on",
                Some(kitchen_on()),
                EventOrigin::Remote,
                Some(context.clone()),
            )
            .await
            .unwrap();

        let fired = bus.fired();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].event_type, "light.turn_on");
        assert_eq!(fired[0].data, Some(kitchen_on()));
        assert_eq!(fired[0].origin, EventOrigin::Remote);
        assert_eq!(fired[0].context, Some(context));
    }

    #[tokio::test]
    async fn rpc_failure_fails_open() {
        let decider = ScriptedDecider::new();
        decider.reply_event(Err(DecisionError::rpc("Unavailable", "socket closed")));
        let (interceptor, bus) = installed(decider);

        interceptor
            .fire("light.turn_on", None, EventOrigin::Local, None)
            .await
            .unwrap();

        let fired = bus.fired();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].data, None);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_decision_times_out_and_fails_open() {
        let decider = ScriptedDecider::new();
        decider.reply_event(Ok(EventDecision { handled: true }));
        decider.delay_replies(Duration::from_secs(30));
        let (interceptor, bus) = installed(decider);

        interceptor
            .fire("light.turn_on", Some(kitchen_on()), EventOrigin::Local, None)
            .await
            .unwrap();

        assert_eq!(bus.fired().len(), 1);
    }

    #[tokio::test]
    async fn absent_payload_is_sent_as_empty_object() {
        let decider = ScriptedDecider::new();
        let (interceptor, _bus) = installed(decider.clone());

        interceptor
            .fire("homeassistant_start", None, EventOrigin::Local, None)
            .await
            .unwrap();

        let sent = decider.events();
        assert_eq!(sent[0].payload, "{}");
        assert_eq!(sent[0].context_id, "");
    }

    #[tokio::test]
    async fn repeated_install_keeps_first_bus() {
        let decider = ScriptedDecider::new();
        let (interceptor, first) = installed(decider);
        let second = Arc::new(RecordingEventBus::default());
        let third = Arc::new(RecordingEventBus::default());

        assert_eq!(interceptor.install(second.clone()), InstallOutcome::AlreadyInstalled);
        assert_eq!(interceptor.install(third.clone()), InstallOutcome::AlreadyInstalled);

        interceptor
            .fire("ping", None, EventOrigin::Local, None)
            .await
            .unwrap();

        assert_eq!(first.fired().len(), 1);
        assert!(second.fired().is_empty());
        assert!(third.fired().is_empty());
    }

    #[tokio::test]
    async fn fire_before_install_is_an_error() {
        let interceptor = EventInterceptor::new(ScriptedDecider::new(), Duration::from_secs(1));
        let err = interceptor
            .fire("ping", None, EventOrigin::Local, None)
            .await
            .unwrap_err();
        assert!(matches!(err, HostError::NotInstalled(EVENT_CHANNEL)));
    }
}
