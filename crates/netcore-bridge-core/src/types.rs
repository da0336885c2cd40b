//! Request and decision messages exchanged with the decision service.
//!
//! All messages are built fresh inside a single interception call and dropped
//! when that call returns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::host::{correlation_id, Context, EntityView, JsonObject, PlatformView};

/// A host event about to be fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptedEvent {
    pub event_type: String,
    /// Taken from the payload's `entity_id` key; empty when absent.
    pub entity_id: String,
    /// Payload serialized as JSON text.
    pub payload: String,
    pub context_id: String,
}

impl InterceptedEvent {
    pub fn from_call(event_type: &str, data: &JsonObject, context: Option<&Context>) -> Self {
        Self {
            event_type: event_type.to_string(),
            entity_id: data
                .get("entity_id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            payload: to_json_text(data),
            context_id: correlation_id(context),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDecision {
    /// `true` suppresses the event.
    pub handled: bool,
}

/// A host state write about to be committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateWriteRequest {
    pub entity_id: String,
    pub new_state: String,
    /// Attributes serialized as JSON text.
    pub attributes: String,
    pub context_id: String,
}

impl StateWriteRequest {
    pub fn from_call(
        entity_id: &str,
        new_state: &str,
        attributes: &JsonObject,
        context: Option<&Context>,
    ) -> Self {
        Self {
            entity_id: entity_id.to_string(),
            new_state: new_state.to_string(),
            attributes: to_json_text(attributes),
            context_id: correlation_id(context),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDecision {
    /// `true` suppresses the write; overrides are then ignored.
    pub handled: bool,
    pub override_state: Option<String>,
    /// Replacement attributes as JSON text.
    pub override_attributes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub domain: String,
    pub platform_name: String,
    pub config_entry_id: Option<String>,
}

impl PlatformInfo {
    pub fn from_view(platform: &dyn PlatformView) -> Self {
        Self {
            domain: platform.domain().to_string(),
            platform_name: platform.platform_name().to_string(),
            config_entry_id: platform.config_entry_id().map(str::to_string),
        }
    }

    /// `domain.platform_name`, as used in log lines.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.domain, self.platform_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityInfo {
    pub entity_id: String,
    pub name: String,
    pub domain: String,
    pub platform: String,
    pub unique_id: String,
    pub should_poll: bool,
}

impl EntityInfo {
    pub fn from_view(entity: &dyn EntityView, platform: &dyn PlatformView) -> Self {
        Self {
            entity_id: entity.entity_id().to_string(),
            name: entity.name().unwrap_or_default().to_string(),
            domain: platform.domain().to_string(),
            platform: platform.platform_name().to_string(),
            unique_id: entity.unique_id().unwrap_or_default().to_string(),
            should_poll: entity.should_poll(),
        }
    }
}

/// Lifecycle notifications sent on the entity platform channel.
///
/// Every variant carries the correlation id of the interception call that
/// produced it; batch and per-entity notifications of one call share it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LifecycleRequest {
    PlatformSetup {
        platform: PlatformInfo,
        context_id: String,
    },
    PlatformReset {
        platform: PlatformInfo,
        context_id: String,
    },
    EntitiesAdded {
        platform: PlatformInfo,
        entities: Vec<EntityInfo>,
        context_id: String,
    },
    EntityAdded {
        platform: PlatformInfo,
        entity: EntityInfo,
        context_id: String,
    },
    EntityRemoved {
        platform: PlatformInfo,
        entity_id: String,
        context_id: String,
    },
}

impl LifecycleRequest {
    /// Remote operation name for this notification.
    pub fn operation(&self) -> &'static str {
        match self {
            LifecycleRequest::PlatformSetup { .. } => "PlatformSetup",
            LifecycleRequest::PlatformReset { .. } => "PlatformReset",
            LifecycleRequest::EntitiesAdded { .. } => "EntitiesAdded",
            LifecycleRequest::EntityAdded { .. } => "EntityAdded",
            LifecycleRequest::EntityRemoved { .. } => "EntityRemoved",
        }
    }

    pub fn platform(&self) -> &PlatformInfo {
        match self {
            LifecycleRequest::PlatformSetup { platform, .. }
            | LifecycleRequest::PlatformReset { platform, .. }
            | LifecycleRequest::EntitiesAdded { platform, .. }
            | LifecycleRequest::EntityAdded { platform, .. }
            | LifecycleRequest::EntityRemoved { platform, .. } => platform,
        }
    }

    pub fn context_id(&self) -> &str {
        match self {
            LifecycleRequest::PlatformSetup { context_id, .. }
            | LifecycleRequest::PlatformReset { context_id, .. }
            | LifecycleRequest::EntitiesAdded { context_id, .. }
            | LifecycleRequest::EntityAdded { context_id, .. }
            | LifecycleRequest::EntityRemoved { context_id, .. } => context_id,
        }
    }
}

/// Informational only: lifecycle decisions never veto or alter the host call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleDecision {
    pub ok: bool,
}

fn to_json_text(object: &JsonObject) -> String {
    Value::Object(object.clone()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Light;

    impl PlatformView for Light {
        fn domain(&self) -> &str {
            "light"
        }

        fn platform_name(&self) -> &str {
            "hue"
        }

        fn config_entry_id(&self) -> Option<&str> {
            Some("entry-1")
        }
    }

    struct Kitchen;

    impl EntityView for Kitchen {
        fn entity_id(&self) -> &str {
            "light.kitchen"
        }

        fn name(&self) -> Option<&str> {
            Some("Kitchen")
        }
    }

    #[test]
    fn event_extracts_entity_id_from_payload() {
        let data = json!({"entity_id": "light.kitchen", "brightness": 200});
        let event = InterceptedEvent::from_call(
            "light.turn_on",
            data.as_object().unwrap(),
            Some(&Context::with_id("ctx-1")),
        );

        assert_eq!(event.entity_id, "light.kitchen");
        assert_eq!(event.context_id, "ctx-1");
        let payload: Value = serde_json::from_str(&event.payload).unwrap();
        assert_eq!(payload, data);
    }

    #[test]
    fn event_without_context_or_entity_uses_empty_strings() {
        let event = InterceptedEvent::from_call("homeassistant_start", &JsonObject::new(), None);
        assert_eq!(event.entity_id, "");
        assert_eq!(event.context_id, "");
        assert_eq!(event.payload, "{}");
    }

    #[test]
    fn non_string_entity_id_is_ignored() {
        let data = json!({"entity_id": ["light.a", "light.b"]});
        let event = InterceptedEvent::from_call("call_service", data.as_object().unwrap(), None);
        assert_eq!(event.entity_id, "");
    }

    #[test]
    fn infos_are_derived_from_views() {
        let platform = PlatformInfo::from_view(&Light);
        assert_eq!(platform.qualified_name(), "light.hue");
        assert_eq!(platform.config_entry_id.as_deref(), Some("entry-1"));

        let entity = EntityInfo::from_view(&Kitchen, &Light);
        assert_eq!(entity.name, "Kitchen");
        assert_eq!(entity.domain, "light");
        assert_eq!(entity.platform, "hue");
        assert_eq!(entity.unique_id, "");
        assert!(entity.should_poll);
    }

    #[test]
    fn lifecycle_request_exposes_operation_and_context() {
        let request = LifecycleRequest::EntityRemoved {
            platform: PlatformInfo::from_view(&Light),
            entity_id: "light.kitchen".to_string(),
            context_id: "ctx-9".to_string(),
        };
        assert_eq!(request.operation(), "EntityRemoved");
        assert_eq!(request.context_id(), "ctx-9");
        assert_eq!(request.platform().platform_name, "hue");
    }
}
