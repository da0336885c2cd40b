//! Entity platform lifecycle interceptor.
//!
//! Notifies the decision service of platform setup/reset, entity
//! registration and entity removal. Lifecycle decisions are observational:
//! they are logged and never veto or alter the host call, which always runs
//! after every notification attempt for that call has finished.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::decision::LifecycleDecider;
use crate::error::HostResult;
use crate::host::{EntityPlatformHost, EntityView, PlatformView};
use crate::interceptor::{consult, InstallOutcome, InstallSlot, Interceptor};
use crate::types::{EntityInfo, LifecycleRequest, PlatformInfo};

pub const LIFECYCLE_CHANNEL: &str = "entity_platform_interceptor";

pub struct EntityLifecycleInterceptor {
    decider: Arc<dyn LifecycleDecider>,
    original: InstallSlot<dyn EntityPlatformHost>,
    timeout: Duration,
}

impl EntityLifecycleInterceptor {
    pub fn new(decider: Arc<dyn LifecycleDecider>, timeout: Duration) -> Self {
        Self {
            decider,
            original: InstallSlot::new(LIFECYCLE_CHANNEL),
            timeout,
        }
    }

    /// Send one notification. Failures are logged by `consult`; the outcome
    /// is informational either way.
    async fn notify(&self, request: LifecycleRequest) {
        let operation = request.operation();
        let platform = request.platform().qualified_name();

        match consult(LIFECYCLE_CHANNEL, self.timeout, self.decider.notify(request)).await {
            Some(decision) if decision.ok => {
                debug!(operation, platform = %platform, "net_core_bridge: lifecycle acknowledged");
            }
            Some(_) => {
                warn!(
                    operation,
                    platform = %platform,
                    "net_core_bridge: decision service reported lifecycle not ok (informational)"
                );
            }
            None => {}
        }
    }
}

impl Interceptor for EntityLifecycleInterceptor {
    type Host = dyn EntityPlatformHost;

    fn channel(&self) -> &'static str {
        LIFECYCLE_CHANNEL
    }

    fn install(&self, original: Arc<dyn EntityPlatformHost>) -> InstallOutcome {
        self.original.install(original)
    }

    fn is_installed(&self) -> bool {
        self.original.is_installed()
    }
}

#[async_trait]
impl EntityPlatformHost for EntityLifecycleInterceptor {
    async fn setup(&self, platform: &dyn PlatformView) -> HostResult<()> {
        let original = self.original.original()?;
        let info = PlatformInfo::from_view(platform);
        info!(platform = %info.qualified_name(), "net_core_bridge: platform setup");

        self.notify(LifecycleRequest::PlatformSetup {
            platform: info,
            context_id: Uuid::new_v4().to_string(),
        })
        .await;

        original.setup(platform).await
    }

    async fn reset(&self, platform: &dyn PlatformView) -> HostResult<()> {
        let original = self.original.original()?;
        let info = PlatformInfo::from_view(platform);
        info!(platform = %info.qualified_name(), "net_core_bridge: platform reset");

        self.notify(LifecycleRequest::PlatformReset {
            platform: info,
            context_id: Uuid::new_v4().to_string(),
        })
        .await;

        original.reset(platform).await
    }

    async fn add_entities(
        &self,
        platform: &dyn PlatformView,
        entities: Vec<Arc<dyn EntityView>>,
        update_before_add: bool,
    ) -> HostResult<()> {
        let original = self.original.original()?;
        let info = PlatformInfo::from_view(platform);
        let context_id = Uuid::new_v4().to_string();
        info!(
            count = entities.len(),
            platform = %info.qualified_name(),
            "net_core_bridge: adding entities"
        );

        let infos: Vec<EntityInfo> = entities
            .iter()
            .map(|entity| EntityInfo::from_view(entity.as_ref(), platform))
            .collect();

        // Batch first, then one notification per entity, strictly in order.
        self.notify(LifecycleRequest::EntitiesAdded {
            platform: info.clone(),
            entities: infos.clone(),
            context_id: context_id.clone(),
        })
        .await;

        for entity in infos {
            self.notify(LifecycleRequest::EntityAdded {
                platform: info.clone(),
                entity,
                context_id: context_id.clone(),
            })
            .await;
        }

        original
            .add_entities(platform, entities, update_before_add)
            .await
    }

    async fn remove_entity(&self, platform: &dyn PlatformView, entity_id: &str) -> HostResult<()> {
        let original = self.original.original()?;
        let info = PlatformInfo::from_view(platform);
        info!(entity_id, platform = %info.qualified_name(), "net_core_bridge: removing entity");

        self.notify(LifecycleRequest::EntityRemoved {
            platform: info,
            entity_id: entity_id.to_string(),
            context_id: Uuid::new_v4().to_string(),
        })
        .await;

        original.remove_entity(platform, entity_id).await
    }
}
