//! Host collaborator interfaces.
//!
//! The host application provides its event bus, state machine and entity
//! platform manager through these traits. Interceptors implement the same
//! traits and are installed in front of the host implementation, so the host
//! calls through the bridge instead of having its methods replaced.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::HostResult;

/// Structured payload carried by events and state attributes.
pub type JsonObject = Map<String, Value>;

/// Host-side execution context, used as the correlation id source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub id: String,
    pub user_id: Option<String>,
    pub parent_id: Option<String>,
}

impl Context {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_id: None,
            parent_id: None,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

/// Correlation id for an optional context; empty when absent.
pub fn correlation_id(context: Option<&Context>) -> String {
    context.map(|ctx| ctx.id.clone()).unwrap_or_default()
}

/// Where an event originated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOrigin {
    #[default]
    Local,
    Remote,
}

impl fmt::Display for EventOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventOrigin::Local => write!(f, "local"),
            EventOrigin::Remote => write!(f, "remote"),
        }
    }
}

/// Read-only view of a host entity platform.
pub trait PlatformView: Send + Sync {
    fn domain(&self) -> &str;

    fn platform_name(&self) -> &str;

    fn config_entry_id(&self) -> Option<&str> {
        None
    }
}

/// Read-only view of a host entity.
pub trait EntityView: Send + Sync {
    fn entity_id(&self) -> &str;

    fn name(&self) -> Option<&str> {
        None
    }

    fn unique_id(&self) -> Option<&str> {
        None
    }

    fn should_poll(&self) -> bool {
        true
    }
}

/// The host's event-fire entry point.
#[async_trait]
pub trait EventBus: Send + Sync {
    async fn fire(
        &self,
        event_type: &str,
        data: Option<JsonObject>,
        origin: EventOrigin,
        context: Option<Context>,
    ) -> HostResult<()>;
}

/// The host's state-commit entry point.
#[async_trait]
pub trait StateMachine: Send + Sync {
    async fn set(
        &self,
        entity_id: &str,
        new_state: &str,
        attributes: Option<JsonObject>,
        force: bool,
        context: Option<Context>,
    ) -> HostResult<()>;
}

/// The host's entity platform lifecycle entry points.
#[async_trait]
pub trait EntityPlatformHost: Send + Sync {
    async fn setup(&self, platform: &dyn PlatformView) -> HostResult<()>;

    async fn reset(&self, platform: &dyn PlatformView) -> HostResult<()>;

    async fn add_entities(
        &self,
        platform: &dyn PlatformView,
        entities: Vec<Arc<dyn EntityView>>,
        update_before_add: bool,
    ) -> HostResult<()>;

    async fn remove_entity(&self, platform: &dyn PlatformView, entity_id: &str) -> HostResult<()>;
}

/// The complete set of host entry points the bridge wraps.
#[derive(Clone)]
pub struct HostSurface {
    pub event_bus: Arc<dyn EventBus>,
    pub state_machine: Arc<dyn StateMachine>,
    pub entity_platforms: Arc<dyn EntityPlatformHost>,
}

impl fmt::Debug for HostSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostSurface").finish_non_exhaustive()
    }
}
