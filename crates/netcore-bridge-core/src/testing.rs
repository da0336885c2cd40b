//! In-memory hosts and a scripted decision service for tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::decision::{EventDecider, LifecycleDecider, StateDecider};
use crate::error::{DecisionError, DecisionResult, HostError, HostResult};
use crate::host::{
    Context, EntityPlatformHost, EntityView, EventBus, EventOrigin, HostSurface, JsonObject,
    PlatformView, StateMachine,
};
use crate::types::{
    EventDecision, InterceptedEvent, LifecycleDecision, LifecycleRequest, PlatformInfo,
    StateDecision, StateWriteRequest,
};

#[derive(Debug, Clone, PartialEq)]
pub struct FiredEvent {
    pub event_type: String,
    pub data: Option<JsonObject>,
    pub origin: EventOrigin,
    pub context: Option<Context>,
}

#[derive(Default)]
pub struct RecordingEventBus {
    fired: Mutex<Vec<FiredEvent>>,
}

impl RecordingEventBus {
    pub fn fired(&self) -> Vec<FiredEvent> {
        self.fired.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventBus for RecordingEventBus {
    async fn fire(
        &self,
        event_type: &str,
        data: Option<JsonObject>,
        origin: EventOrigin,
        context: Option<Context>,
    ) -> HostResult<()> {
        self.fired.lock().unwrap().push(FiredEvent {
            event_type: event_type.to_string(),
            data,
            origin,
            context,
        });
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommittedState {
    pub entity_id: String,
    pub state: String,
    pub attributes: Option<JsonObject>,
    pub force: bool,
    pub context: Option<Context>,
}

#[derive(Default)]
pub struct RecordingStateMachine {
    committed: Mutex<Vec<CommittedState>>,
}

impl RecordingStateMachine {
    pub fn committed(&self) -> Vec<CommittedState> {
        self.committed.lock().unwrap().clone()
    }
}

#[async_trait]
impl StateMachine for RecordingStateMachine {
    async fn set(
        &self,
        entity_id: &str,
        new_state: &str,
        attributes: Option<JsonObject>,
        force: bool,
        context: Option<Context>,
    ) -> HostResult<()> {
        self.committed.lock().unwrap().push(CommittedState {
            entity_id: entity_id.to_string(),
            state: new_state.to_string(),
            attributes,
            force,
            context,
        });
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Setup(PlatformInfo),
    Reset(PlatformInfo),
    AddEntities {
        platform: PlatformInfo,
        entity_ids: Vec<String>,
        update_before_add: bool,
    },
    RemoveEntity {
        platform: PlatformInfo,
        entity_id: String,
    },
}

#[derive(Default)]
pub struct RecordingPlatformHost {
    calls: Mutex<Vec<PlatformCall>>,
    fail_with: Mutex<Option<String>>,
}

impl RecordingPlatformHost {
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Make every subsequent host call record itself and then fail.
    pub fn fail_with(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    fn record(&self, operation: &str, call: PlatformCall) -> HostResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with.lock().unwrap().as_ref() {
            Some(message) => Err(HostError::operation(operation, message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EntityPlatformHost for RecordingPlatformHost {
    async fn setup(&self, platform: &dyn PlatformView) -> HostResult<()> {
        self.record("setup", PlatformCall::Setup(PlatformInfo::from_view(platform)))
    }

    async fn reset(&self, platform: &dyn PlatformView) -> HostResult<()> {
        self.record("reset", PlatformCall::Reset(PlatformInfo::from_view(platform)))
    }

    async fn add_entities(
        &self,
        platform: &dyn PlatformView,
        entities: Vec<Arc<dyn EntityView>>,
        update_before_add: bool,
    ) -> HostResult<()> {
        self.record(
            "add_entities",
            PlatformCall::AddEntities {
                platform: PlatformInfo::from_view(platform),
                entity_ids: entities
                    .iter()
                    .map(|entity| entity.entity_id().to_string())
                    .collect(),
                update_before_add,
            },
        )
    }

    async fn remove_entity(&self, platform: &dyn PlatformView, entity_id: &str) -> HostResult<()> {
        self.record(
            "remove_entity",
            PlatformCall::RemoveEntity {
                platform: PlatformInfo::from_view(platform),
                entity_id: entity_id.to_string(),
            },
        )
    }
}

/// Recording implementations of all three host entry points.
#[derive(Default, Clone)]
pub struct RecordingHost {
    pub events: Arc<RecordingEventBus>,
    pub states: Arc<RecordingStateMachine>,
    pub platforms: Arc<RecordingPlatformHost>,
}

impl RecordingHost {
    pub fn surface(&self) -> HostSurface {
        HostSurface {
            event_bus: self.events.clone(),
            state_machine: self.states.clone(),
            entity_platforms: self.platforms.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TestPlatform {
    pub domain: String,
    pub platform_name: String,
    pub config_entry_id: Option<String>,
}

impl TestPlatform {
    pub fn new(domain: &str, platform_name: &str) -> Self {
        Self {
            domain: domain.to_string(),
            platform_name: platform_name.to_string(),
            config_entry_id: None,
        }
    }
}

impl PlatformView for TestPlatform {
    fn domain(&self) -> &str {
        &self.domain
    }

    fn platform_name(&self) -> &str {
        &self.platform_name
    }

    fn config_entry_id(&self) -> Option<&str> {
        self.config_entry_id.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct TestEntity {
    pub entity_id: String,
    pub name: Option<String>,
    pub unique_id: Option<String>,
}

impl TestEntity {
    pub fn new(entity_id: &str) -> Arc<dyn EntityView> {
        Arc::new(Self {
            entity_id: entity_id.to_string(),
            name: None,
            unique_id: Some(format!("uid-{}", entity_id)),
        })
    }
}

impl EntityView for TestEntity {
    fn entity_id(&self) -> &str {
        &self.entity_id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn unique_id(&self) -> Option<&str> {
        self.unique_id.as_deref()
    }
}

/// Decision service double with scripted replies and a request log.
pub struct ScriptedDecider {
    event_reply: Mutex<DecisionResult<EventDecision>>,
    state_reply: Mutex<DecisionResult<StateDecision>>,
    lifecycle_reply: Mutex<DecisionResult<LifecycleDecision>>,
    failing_operations: Mutex<HashSet<&'static str>>,
    delay: Mutex<Option<Duration>>,
    events: Mutex<Vec<InterceptedEvent>>,
    state_writes: Mutex<Vec<StateWriteRequest>>,
    lifecycle: Mutex<Vec<LifecycleRequest>>,
}

impl Default for ScriptedDecider {
    fn default() -> Self {
        Self {
            event_reply: Mutex::new(Ok(EventDecision::default())),
            state_reply: Mutex::new(Ok(StateDecision::default())),
            lifecycle_reply: Mutex::new(Ok(LifecycleDecision { ok: true })),
            failing_operations: Mutex::new(HashSet::new()),
            delay: Mutex::new(None),
            events: Mutex::new(Vec::new()),
            state_writes: Mutex::new(Vec::new()),
            lifecycle: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedDecider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply_event(&self, reply: DecisionResult<EventDecision>) {
        *self.event_reply.lock().unwrap() = reply;
    }

    pub fn reply_state(&self, reply: DecisionResult<StateDecision>) {
        *self.state_reply.lock().unwrap() = reply;
    }

    pub fn reply_lifecycle(&self, reply: DecisionResult<LifecycleDecision>) {
        *self.lifecycle_reply.lock().unwrap() = reply;
    }

    /// Fail every channel with `error`.
    pub fn fail_all(&self, error: DecisionError) {
        self.reply_event(Err(error.clone()));
        self.reply_state(Err(error.clone()));
        self.reply_lifecycle(Err(error));
    }

    /// Fail only the named lifecycle operation, e.g. `"EntitiesAdded"`.
    pub fn fail_operation(&self, operation: &'static str) {
        self.failing_operations.lock().unwrap().insert(operation);
    }

    /// Delay every reply, to exercise decision timeouts.
    pub fn delay_replies(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn events(&self) -> Vec<InterceptedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn state_writes(&self) -> Vec<StateWriteRequest> {
        self.state_writes.lock().unwrap().clone()
    }

    pub fn lifecycle(&self) -> Vec<LifecycleRequest> {
        self.lifecycle.lock().unwrap().clone()
    }

    async fn pause(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl EventDecider for ScriptedDecider {
    async fn intercept_event(&self, event: InterceptedEvent) -> DecisionResult<EventDecision> {
        self.events.lock().unwrap().push(event);
        self.pause().await;
        self.event_reply.lock().unwrap().clone()
    }
}

#[async_trait]
impl StateDecider for ScriptedDecider {
    async fn intercept_state_write(
        &self,
        request: StateWriteRequest,
    ) -> DecisionResult<StateDecision> {
        self.state_writes.lock().unwrap().push(request);
        self.pause().await;
        self.state_reply.lock().unwrap().clone()
    }
}

#[async_trait]
impl LifecycleDecider for ScriptedDecider {
    async fn notify(&self, request: LifecycleRequest) -> DecisionResult<LifecycleDecision> {
        let operation = request.operation();
        self.lifecycle.lock().unwrap().push(request);
        self.pause().await;
        if self.failing_operations.lock().unwrap().contains(operation) {
            return Err(DecisionError::rpc("Unavailable", format!("{} failed", operation)));
        }
        self.lifecycle_reply.lock().unwrap().clone()
    }
}
