//! tonic-backed decision client.
//!
//! Implements the three decision seams over one shared channel and feeds
//! every call outcome into the channel's connectivity tracker.

use std::sync::Arc;

use async_trait::async_trait;
use netcore_bridge_core::{
    DecisionError, DecisionResult, EntityInfo, EventDecider, EventDecision, InterceptedEvent,
    LifecycleDecider, LifecycleDecision, LifecycleRequest, PlatformInfo, StateDecider,
    StateDecision, StateWriteRequest,
};
use tonic::transport::Channel;
use tonic::{Response, Status};

use crate::channel::{ChannelManager, ConnectivityTracker};
use crate::pb::netcore_bridge::v1 as pb;
use pb::entity_platform_interceptor_client::EntityPlatformInterceptorClient;
use pb::event_interceptor_client::EventInterceptorClient;
use pb::state_interceptor_client::StateInterceptorClient;

#[derive(Clone)]
pub struct GrpcDecisionClient {
    events: EventInterceptorClient<Channel>,
    states: StateInterceptorClient<Channel>,
    platforms: EntityPlatformInterceptorClient<Channel>,
    tracker: Arc<ConnectivityTracker>,
}

impl GrpcDecisionClient {
    pub fn new(manager: &ChannelManager) -> Self {
        let channel = manager.channel();
        Self {
            events: EventInterceptorClient::new(channel.clone()),
            states: StateInterceptorClient::new(channel.clone()),
            platforms: EntityPlatformInterceptorClient::new(channel),
            tracker: manager.tracker(),
        }
    }

    fn begin(&self) -> DecisionResult<()> {
        if self.tracker.is_shutdown() {
            return Err(DecisionError::ChannelShutdown);
        }
        self.tracker.begin_call();
        Ok(())
    }

    fn finish<T>(&self, result: Result<Response<T>, Status>) -> DecisionResult<T> {
        self.tracker.observe(&result);
        result.map(Response::into_inner).map_err(status_to_decision_error)
    }
}

#[async_trait]
impl EventDecider for GrpcDecisionClient {
    async fn intercept_event(&self, event: InterceptedEvent) -> DecisionResult<EventDecision> {
        self.begin()?;
        let mut client = self.events.clone();
        let result = client.intercept_event(from_core_event(event)).await;
        let reply = self.finish(result)?;
        Ok(EventDecision {
            handled: reply.handled,
        })
    }
}

#[async_trait]
impl StateDecider for GrpcDecisionClient {
    async fn intercept_state_write(
        &self,
        request: StateWriteRequest,
    ) -> DecisionResult<StateDecision> {
        self.begin()?;
        let mut client = self.states.clone();
        let result = client
            .intercept_state_write(from_core_state_write(request))
            .await;
        let reply = self.finish(result)?;
        Ok(into_core_state_decision(reply))
    }
}

#[async_trait]
impl LifecycleDecider for GrpcDecisionClient {
    async fn notify(&self, request: LifecycleRequest) -> DecisionResult<LifecycleDecision> {
        self.begin()?;
        let mut client = self.platforms.clone();
        let result = match request {
            LifecycleRequest::PlatformSetup {
                platform,
                context_id,
            } => {
                client
                    .platform_setup(pb::PlatformSetupRequest {
                        platform: Some(from_core_platform(platform)),
                        context_id,
                    })
                    .await
            }
            LifecycleRequest::PlatformReset {
                platform,
                context_id,
            } => {
                client
                    .platform_reset(pb::PlatformResetRequest {
                        platform: Some(from_core_platform(platform)),
                        context_id,
                    })
                    .await
            }
            LifecycleRequest::EntitiesAdded {
                platform,
                entities,
                context_id,
            } => {
                client
                    .entities_added(pb::EntitiesAddedRequest {
                        platform: Some(from_core_platform(platform)),
                        entities: entities.into_iter().map(from_core_entity).collect(),
                        context_id,
                    })
                    .await
            }
            LifecycleRequest::EntityAdded {
                platform,
                entity,
                context_id,
            } => {
                client
                    .entity_added(pb::EntityAddedRequest {
                        platform: Some(from_core_platform(platform)),
                        entity: Some(from_core_entity(entity)),
                        context_id,
                    })
                    .await
            }
            LifecycleRequest::EntityRemoved {
                platform,
                entity_id,
                context_id,
            } => {
                client
                    .entity_removed(pb::EntityRemovedRequest {
                        platform: Some(from_core_platform(platform)),
                        entity_id,
                        context_id,
                    })
                    .await
            }
        };
        let reply = self.finish(result)?;
        Ok(LifecycleDecision { ok: reply.ok })
    }
}

fn status_to_decision_error(status: Status) -> DecisionError {
    DecisionError::rpc(format!("{:?}", status.code()), status.message())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn from_core_event(event: InterceptedEvent) -> pb::EventMessage {
    pb::EventMessage {
        event_type: event.event_type,
        entity_id: event.entity_id,
        json_data: event.payload,
        context_id: event.context_id,
    }
}

fn from_core_state_write(request: StateWriteRequest) -> pb::StateWriteRequest {
    pb::StateWriteRequest {
        entity_id: request.entity_id,
        state: request.new_state,
        attributes_json: request.attributes,
        context_id: request.context_id,
    }
}

/// Empty override fields mean "no override" on the wire.
fn into_core_state_decision(reply: pb::StateDecision) -> StateDecision {
    StateDecision {
        handled: reply.handled,
        override_state: non_empty(reply.override_state),
        override_attributes: non_empty(reply.override_attributes_json),
    }
}

fn from_core_platform(platform: PlatformInfo) -> pb::PlatformInfo {
    pb::PlatformInfo {
        domain: platform.domain,
        platform_name: platform.platform_name,
        config_entry_id: platform.config_entry_id.unwrap_or_default(),
    }
}

fn from_core_entity(entity: EntityInfo) -> pb::EntityInfo {
    pb::EntityInfo {
        entity_id: entity.entity_id,
        name: entity.name,
        domain: entity.domain,
        platform: entity.platform,
        unique_id: entity.unique_id,
        should_poll: entity.should_poll,
    }
}
