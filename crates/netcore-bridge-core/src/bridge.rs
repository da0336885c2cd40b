//! The three channel interceptors, bound to one decision service.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::decision::{EventDecider, LifecycleDecider, StateDecider};
use crate::event::EventInterceptor;
use crate::host::HostSurface;
use crate::interceptor::{InstallOutcome, Interceptor};
use crate::lifecycle::EntityLifecycleInterceptor;
use crate::state::StateWriteInterceptor;

pub struct InterceptorSet {
    pub events: Arc<EventInterceptor>,
    pub states: Arc<StateWriteInterceptor>,
    pub lifecycle: Arc<EntityLifecycleInterceptor>,
}

impl InterceptorSet {
    /// Bind all three interceptors to a single decision service handle.
    pub fn new<D>(decider: Arc<D>, timeout: Duration) -> Self
    where
        D: EventDecider + StateDecider + LifecycleDecider + 'static,
    {
        Self::from_parts(decider.clone(), decider.clone(), decider, timeout)
    }

    pub fn from_parts(
        events: Arc<dyn EventDecider>,
        states: Arc<dyn StateDecider>,
        lifecycle: Arc<dyn LifecycleDecider>,
        timeout: Duration,
    ) -> Self {
        Self {
            events: Arc::new(EventInterceptor::new(events, timeout)),
            states: Arc::new(StateWriteInterceptor::new(states, timeout)),
            lifecycle: Arc::new(EntityLifecycleInterceptor::new(lifecycle, timeout)),
        }
    }

    /// Install in front of the host's entry points and return the surface
    /// the host must call through from now on.
    ///
    /// Idempotent: a second call keeps the originals captured by the first
    /// and returns the same intercepted surface.
    pub fn install(&self, host: HostSurface) -> HostSurface {
        let outcomes = [
            self.events.install(host.event_bus),
            self.states.install(host.state_machine),
            self.lifecycle.install(host.entity_platforms),
        ];

        if outcomes.contains(&InstallOutcome::Installed) {
            info!("net_core_bridge: all interceptors initialized");
        }

        self.surface()
    }

    pub fn is_installed(&self) -> bool {
        self.events.is_installed() && self.states.is_installed() && self.lifecycle.is_installed()
    }

    /// The intercepted host surface.
    pub fn surface(&self) -> HostSurface {
        HostSurface {
            event_bus: self.events.clone(),
            state_machine: self.states.clone(),
            entity_platforms: self.lifecycle.clone(),
        }
    }
}
