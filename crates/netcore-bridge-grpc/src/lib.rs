#![deny(unsafe_code)]

pub mod channel;
pub mod client;
pub mod pb;

use std::sync::Arc;

use netcore_bridge_core::{
    BridgeConfig, BridgeError, ConnectivityState, HostSurface, InterceptorSet, SelfTest,
    SelfTestReport,
};
use tokio::task::JoinHandle;
use tracing::{error, info};

pub use channel::{ChannelManager, ConnectivityTracker};
pub use client::GrpcDecisionClient;

/// The bridge as the host sees it: one channel, one decision client, three
/// interceptors and the startup self-test.
pub struct NetCoreBridge {
    config: BridgeConfig,
    channel: Arc<ChannelManager>,
    client: Arc<GrpcDecisionClient>,
    interceptors: InterceptorSet,
}

impl NetCoreBridge {
    /// Build the channel and interceptors. Does not touch the network, so a
    /// missing decision service is not an error here.
    pub fn connect(config: BridgeConfig) -> Result<Self, BridgeError> {
        let channel = Arc::new(ChannelManager::new(&config)?);
        let client = Arc::new(GrpcDecisionClient::new(&channel));
        let interceptors = InterceptorSet::new(client.clone(), config.decision_timeout);

        Ok(Self {
            config,
            channel,
            client,
            interceptors,
        })
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn channel(&self) -> &Arc<ChannelManager> {
        &self.channel
    }

    pub fn interceptors(&self) -> &InterceptorSet {
        &self.interceptors
    }

    /// Put the interceptors in front of `host` and return the surface the
    /// host must call through. Safe to call more than once.
    pub fn install(&self, host: HostSurface) -> Result<HostSurface, BridgeError> {
        if self.channel.state() == ConnectivityState::Shutdown {
            let err = BridgeError::Transport("channel was shut down before install".to_string());
            error!(
                transport = %self.channel.target(),
                error = %err,
                "net_core_bridge: failed to install interceptors"
            );
            return Err(err);
        }
        let surface = self.interceptors.install(host);
        info!(
            transport = %self.channel.target(),
            decision_timeout_ms = self.config.decision_timeout.as_millis() as u64,
            "net_core_bridge: bridge installed"
        );
        Ok(surface)
    }

    /// Install, then schedule the self-test when the config asks for it.
    pub fn start(
        &self,
        host: HostSurface,
    ) -> Result<(HostSurface, Option<JoinHandle<SelfTestReport>>), BridgeError> {
        let surface = self.install(host)?;
        let self_test = self.config.run_self_test.then(|| self.spawn_self_test());
        Ok((surface, self_test))
    }

    pub fn self_test(&self) -> SelfTest {
        SelfTest::new(
            self.channel.clone(),
            self.client.clone(),
            self.client.clone(),
            self.client.clone(),
            self.config.decision_timeout,
        )
    }

    /// Schedule the self-test after the configured settling delay. The
    /// report is also logged, so callers may drop the handle.
    pub fn spawn_self_test(&self) -> JoinHandle<SelfTestReport> {
        let harness = self.self_test();
        let delay = self.config.self_test_delay;
        tokio::spawn(async move { harness.run_after(delay).await })
    }

    /// Stop consulting the decision service. Intercepted calls keep flowing
    /// to the host unchanged.
    pub fn shutdown(&self) {
        self.channel.shutdown();
    }
}
