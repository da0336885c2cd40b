//! Startup self-test.
//!
//! Checks channel connectivity and then issues one synthetic request per
//! channel, recording latency and the decision returned. Diagnostic only:
//! the harness never returns an error and never blocks interception.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::decision::{EventDecider, LifecycleDecider, StateDecider};
use crate::error::DecisionResult;
use crate::event::EVENT_CHANNEL;
use crate::interceptor::decide_within;
use crate::lifecycle::LIFECYCLE_CHANNEL;
use crate::state::STATE_CHANNEL;
use crate::types::{InterceptedEvent, LifecycleRequest, PlatformInfo, StateWriteRequest};

pub const SELF_TEST_EVENT_TYPE: &str = "net_core_bridge.self_test";
pub const SELF_TEST_ENTITY_ID: &str = "self_test.entity";
pub const SELF_TEST_STATE: &str = "online";
pub const SELF_TEST_DOMAIN: &str = "self_test";
pub const SELF_TEST_PLATFORM: &str = "self_test_platform";

/// Connectivity of the decision service channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectivityState {
    Idle,
    Connecting,
    Ready,
    TransientFailure,
    Shutdown,
}

impl fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectivityState::Idle => write!(f, "IDLE"),
            ConnectivityState::Connecting => write!(f, "CONNECTING"),
            ConnectivityState::Ready => write!(f, "READY"),
            ConnectivityState::TransientFailure => write!(f, "TRANSIENT_FAILURE"),
            ConnectivityState::Shutdown => write!(f, "SHUTDOWN"),
        }
    }
}

/// Source of the channel's connectivity state.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Current state; with `try_to_connect` an idle or failed channel makes
    /// one connection attempt first.
    async fn check_connectivity_state(&self, try_to_connect: bool) -> ConnectivityState;
}

/// Outcome of one channel probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeRecord {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,
    pub response: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfTestReport {
    pub ran_at: DateTime<Utc>,
    pub channel_state: ConnectivityState,
    /// Keyed by channel name; empty when the channel was shut down.
    pub probes: BTreeMap<String, ProbeRecord>,
}

impl SelfTestReport {
    /// Every probe ran and succeeded.
    pub fn passed(&self) -> bool {
        self.channel_state != ConnectivityState::Shutdown
            && !self.probes.is_empty()
            && self.probes.values().all(|probe| probe.ok)
    }

    /// One line per entry, channel state first.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = vec![format!("channel_state: {}", self.channel_state)];
        for (name, probe) in &self.probes {
            let line = match (&probe.error, probe.latency_ms) {
                (Some(err), _) => format!("{}: FAILED ({})", name, err),
                (None, Some(latency)) => {
                    format!("{}: ok in {:.2}ms, response={}", name, latency, probe.response)
                }
                (None, None) => format!("{}: ok, response={}", name, probe.response),
            };
            lines.push(line);
        }
        lines
    }
}

pub struct SelfTest {
    connectivity: Arc<dyn ConnectivityProbe>,
    events: Arc<dyn EventDecider>,
    states: Arc<dyn StateDecider>,
    lifecycle: Arc<dyn LifecycleDecider>,
    timeout: Duration,
}

impl SelfTest {
    pub fn new(
        connectivity: Arc<dyn ConnectivityProbe>,
        events: Arc<dyn EventDecider>,
        states: Arc<dyn StateDecider>,
        lifecycle: Arc<dyn LifecycleDecider>,
        timeout: Duration,
    ) -> Self {
        Self {
            connectivity,
            events,
            states,
            lifecycle,
            timeout,
        }
    }

    /// Run after a settling delay.
    pub async fn run_after(&self, delay: Duration) -> SelfTestReport {
        tokio::time::sleep(delay).await;
        self.run().await
    }

    #[instrument(skip(self), name = "net_core_bridge.self_test")]
    pub async fn run(&self) -> SelfTestReport {
        info!("net_core_bridge: running self-test");

        let channel_state = self.connectivity.check_connectivity_state(false).await;
        let mut report = SelfTestReport {
            ran_at: Utc::now(),
            channel_state,
            probes: BTreeMap::new(),
        };

        if channel_state == ConnectivityState::Shutdown {
            error!("net_core_bridge SELF-TEST FAILED: gRPC channel SHUTDOWN");
            return report;
        }

        let event = InterceptedEvent {
            event_type: SELF_TEST_EVENT_TYPE.to_string(),
            entity_id: String::new(),
            payload: "{}".to_string(),
            context_id: Uuid::new_v4().to_string(),
        };
        let record = self
            .probe(EVENT_CHANNEL, self.events.intercept_event(event), |decision| {
                json!(decision.handled)
            })
            .await;
        report.probes.insert(EVENT_CHANNEL.to_string(), record);

        let write = StateWriteRequest {
            entity_id: SELF_TEST_ENTITY_ID.to_string(),
            new_state: SELF_TEST_STATE.to_string(),
            attributes: "{}".to_string(),
            context_id: Uuid::new_v4().to_string(),
        };
        let record = self
            .probe(STATE_CHANNEL, self.states.intercept_state_write(write), |decision| {
                json!({
                    "handled": decision.handled,
                    "override_state": decision.override_state,
                })
            })
            .await;
        report.probes.insert(STATE_CHANNEL.to_string(), record);

        let setup = LifecycleRequest::PlatformSetup {
            platform: PlatformInfo {
                domain: SELF_TEST_DOMAIN.to_string(),
                platform_name: SELF_TEST_PLATFORM.to_string(),
                config_entry_id: None,
            },
            context_id: Uuid::new_v4().to_string(),
        };
        let record = self
            .probe(LIFECYCLE_CHANNEL, self.lifecycle.notify(setup), |decision| {
                json!(decision.ok)
            })
            .await;
        report.probes.insert(LIFECYCLE_CHANNEL.to_string(), record);

        info!("net_core_bridge SELF-TEST RESULTS:");
        for line in report.summary() {
            info!("  {}", line);
        }

        report
    }

    async fn probe<T, F, D>(&self, channel: &'static str, call: F, describe: D) -> ProbeRecord
    where
        F: Future<Output = DecisionResult<T>>,
        D: FnOnce(&T) -> Value,
    {
        let start = Instant::now();
        match decide_within(self.timeout, call).await {
            Ok(decision) => ProbeRecord {
                ok: true,
                latency_ms: Some(start.elapsed().as_secs_f64() * 1000.0),
                response: describe(&decision),
                error: None,
            },
            Err(err) => {
                error!(channel, error = %err, "net_core_bridge SELF-TEST: probe FAILED");
                ProbeRecord {
                    ok: false,
                    latency_ms: None,
                    response: Value::Null,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecisionError;
    use crate::testing::ScriptedDecider;
    use crate::types::{EventDecision, StateDecision};

    struct FixedState(ConnectivityState);

    #[async_trait]
    impl ConnectivityProbe for FixedState {
        async fn check_connectivity_state(&self, _try_to_connect: bool) -> ConnectivityState {
            self.0
        }
    }

    fn harness(state: ConnectivityState, decider: Arc<ScriptedDecider>) -> SelfTest {
        SelfTest::new(
            Arc::new(FixedState(state)),
            decider.clone(),
            decider.clone(),
            decider,
            Duration::from_secs(1),
        )
    }

    #[tokio::test]
    async fn shutdown_channel_skips_probes() {
        let decider = ScriptedDecider::new();
        let report = harness(ConnectivityState::Shutdown, decider.clone()).run().await;

        assert_eq!(report.channel_state, ConnectivityState::Shutdown);
        assert!(report.probes.is_empty());
        assert_eq!(report.summary(), vec!["channel_state: SHUTDOWN".to_string()]);
        assert!(!report.passed());
        assert!(decider.events().is_empty());
        assert!(decider.state_writes().is_empty());
        assert!(decider.lifecycle().is_empty());
    }

    #[tokio::test]
    async fn healthy_channel_probes_all_three() {
        let decider = ScriptedDecider::new();
        decider.reply_state(Ok(StateDecision {
            handled: false,
            override_state: Some("degraded".to_string()),
            override_attributes: None,
        }));
        let report = harness(ConnectivityState::Ready, decider.clone()).run().await;

        assert!(report.passed());
        assert_eq!(report.probes.len(), 3);
        assert_eq!(report.probes[EVENT_CHANNEL].response, json!(false));
        assert_eq!(
            report.probes[STATE_CHANNEL].response,
            json!({"handled": false, "override_state": "degraded"})
        );
        assert_eq!(report.probes[LIFECYCLE_CHANNEL].response, json!(true));
        assert!(report.probes.values().all(|p| p.latency_ms.is_some()));

        assert_eq!(decider.events()[0].event_type, SELF_TEST_EVENT_TYPE);
        assert_eq!(decider.state_writes()[0].entity_id, SELF_TEST_ENTITY_ID);
        assert_eq!(
            decider.lifecycle()[0].platform().platform_name,
            SELF_TEST_PLATFORM
        );
    }

    #[tokio::test]
    async fn failed_probe_is_recorded_without_stopping_others() {
        let decider = ScriptedDecider::new();
        decider.reply_event(Err(DecisionError::rpc("Unavailable", "connection refused")));
        decider.reply_lifecycle(Ok(Default::default()));
        let report = harness(ConnectivityState::TransientFailure, decider).run().await;

        let event = &report.probes[EVENT_CHANNEL];
        assert!(!event.ok);
        assert!(event.error.as_deref().unwrap().contains("connection refused"));
        assert!(report.probes[STATE_CHANNEL].ok);
        assert!(report.probes[LIFECYCLE_CHANNEL].ok);
        assert!(!report.passed());
    }

    #[tokio::test(start_paused = true)]
    async fn hung_service_times_out() {
        let decider = ScriptedDecider::new();
        decider.reply_event(Ok(EventDecision { handled: false }));
        decider.delay_replies(Duration::from_secs(60));
        let report = harness(ConnectivityState::Connecting, decider)
            .run_after(Duration::from_millis(10))
            .await;

        assert_eq!(report.probes.len(), 3);
        assert!(report.probes.values().all(|p| !p.ok));
    }

    #[test]
    fn report_serializes_without_empty_fields() {
        let mut probes = BTreeMap::new();
        probes.insert(
            EVENT_CHANNEL.to_string(),
            ProbeRecord {
                ok: false,
                latency_ms: None,
                response: Value::Null,
                error: Some("boom".to_string()),
            },
        );
        let report = SelfTestReport {
            ran_at: Utc::now(),
            channel_state: ConnectivityState::TransientFailure,
            probes,
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["channel_state"], json!("TRANSIENT_FAILURE"));
        assert!(value["probes"][EVENT_CHANNEL].get("latency_ms").is_none());
        assert_eq!(value["probes"][EVENT_CHANNEL]["error"], json!("boom"));
    }
}
