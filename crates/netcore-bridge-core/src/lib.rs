//! NetCore bridge core.
//!
//! Lets an external decision service observe, veto and rewrite three kinds of
//! host mutations: event fires, state writes and entity platform lifecycle
//! calls. Each interceptor consults the service before forwarding to the
//! host, and fails open: if the service is unreachable, slow or returns
//! garbage, the host call proceeds exactly as it would without the bridge.
//!
//! This crate is transport-agnostic; the gRPC channel lives in
//! `netcore-bridge-grpc`.

#![deny(unsafe_code)]

pub mod bridge;
pub mod config;
pub mod decision;
pub mod error;
pub mod event;
pub mod host;
pub mod interceptor;
pub mod lifecycle;
pub mod self_test;
pub mod state;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use bridge::InterceptorSet;
pub use config::{BridgeConfig, TransportTarget, DEFAULT_SOCKET_PATH, DEFAULT_TCP_ADDR};
pub use decision::{EventDecider, LifecycleDecider, StateDecider};
pub use error::{BridgeError, DecisionError, DecisionResult, HostError, HostResult};
pub use event::{EventInterceptor, EVENT_CHANNEL};
pub use host::{
    Context, EntityPlatformHost, EntityView, EventBus, EventOrigin, HostSurface, JsonObject,
    PlatformView, StateMachine,
};
pub use interceptor::{consult, decide_within, InstallOutcome, InstallSlot, Interceptor};
pub use lifecycle::{EntityLifecycleInterceptor, LIFECYCLE_CHANNEL};
pub use self_test::{ConnectivityProbe, ConnectivityState, ProbeRecord, SelfTest, SelfTestReport};
pub use state::{StateVerdict, StateWriteInterceptor, STATE_CHANNEL};
pub use types::{
    EntityInfo, EventDecision, InterceptedEvent, LifecycleDecision, LifecycleRequest,
    PlatformInfo, StateDecision, StateWriteRequest,
};
