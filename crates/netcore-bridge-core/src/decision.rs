//! Decision service seams, one per remote service.

use async_trait::async_trait;

use crate::error::DecisionResult;
use crate::types::{
    EventDecision, InterceptedEvent, LifecycleDecision, LifecycleRequest, StateDecision,
    StateWriteRequest,
};

/// `EventInterceptor.InterceptEvent`.
#[async_trait]
pub trait EventDecider: Send + Sync {
    async fn intercept_event(&self, event: InterceptedEvent) -> DecisionResult<EventDecision>;
}

/// `StateInterceptor.InterceptStateWrite`.
#[async_trait]
pub trait StateDecider: Send + Sync {
    async fn intercept_state_write(
        &self,
        request: StateWriteRequest,
    ) -> DecisionResult<StateDecision>;
}

/// `EntityPlatformInterceptor.*`; dispatches on the request variant.
#[async_trait]
pub trait LifecycleDecider: Send + Sync {
    async fn notify(&self, request: LifecycleRequest) -> DecisionResult<LifecycleDecision>;
}
