//! Channel manager.
//!
//! Owns the single gRPC channel to the decision service. The transport
//! target is fixed at construction: a domain socket on POSIX hosts, a
//! loopback address elsewhere. The channel connects lazily, and the manager
//! tracks a connectivity state from the outcome of the calls made through
//! it, since tonic channels do not expose one.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use netcore_bridge_core::{
    BridgeConfig, BridgeError, ConnectivityProbe, ConnectivityState, TransportTarget,
};
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Status};
use tracing::{debug, info, warn};

/// Placeholder authority for domain socket channels; the connector ignores it.
const UNIX_AUTHORITY: &str = "http://[::]:50051";

/// Lock-free connectivity state shared by every caller of the channel.
#[derive(Debug)]
pub struct ConnectivityTracker {
    state: AtomicU8,
}

impl ConnectivityTracker {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(encode(ConnectivityState::Idle)),
        }
    }

    pub fn current(&self) -> ConnectivityState {
        decode(self.state.load(Ordering::SeqCst))
    }

    /// A call is about to be issued; an idle channel starts connecting.
    pub fn begin_call(&self) {
        let _ = self.state.compare_exchange(
            encode(ConnectivityState::Idle),
            encode(ConnectivityState::Connecting),
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }

    /// Move to `next` unless the channel is shut down.
    pub fn transition(&self, next: ConnectivityState) -> ConnectivityState {
        let result = self
            .state
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |raw| {
                if decode(raw) == ConnectivityState::Shutdown {
                    None
                } else {
                    Some(encode(next))
                }
            });
        match result {
            Ok(previous) => {
                let previous = decode(previous);
                if previous != next {
                    debug!(from = %previous, to = %next, "net_core_bridge: channel state changed");
                }
                next
            }
            Err(_) => ConnectivityState::Shutdown,
        }
    }

    /// Record the outcome of a call.
    pub fn observe<T>(&self, result: &Result<T, Status>) {
        let next = match result {
            Ok(_) => ConnectivityState::Ready,
            Err(status) if is_transport_failure(status) => ConnectivityState::TransientFailure,
            Err(_) => ConnectivityState::Ready,
        };
        self.transition(next);
    }

    pub fn shutdown(&self) {
        self.state
            .store(encode(ConnectivityState::Shutdown), Ordering::SeqCst);
    }

    pub fn is_shutdown(&self) -> bool {
        self.current() == ConnectivityState::Shutdown
    }
}

impl Default for ConnectivityTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Statuses that mean the service was not reached.
pub fn is_transport_failure(status: &Status) -> bool {
    matches!(
        status.code(),
        Code::Unavailable | Code::DeadlineExceeded | Code::Cancelled | Code::Unknown
    )
}

fn encode(state: ConnectivityState) -> u8 {
    match state {
        ConnectivityState::Idle => 0,
        ConnectivityState::Connecting => 1,
        ConnectivityState::Ready => 2,
        ConnectivityState::TransientFailure => 3,
        ConnectivityState::Shutdown => 4,
    }
}

fn decode(raw: u8) -> ConnectivityState {
    match raw {
        0 => ConnectivityState::Idle,
        1 => ConnectivityState::Connecting,
        2 => ConnectivityState::Ready,
        3 => ConnectivityState::TransientFailure,
        _ => ConnectivityState::Shutdown,
    }
}

pub struct ChannelManager {
    target: TransportTarget,
    channel: Channel,
    tracker: Arc<ConnectivityTracker>,
    connect_timeout: Duration,
}

impl ChannelManager {
    /// Build the channel for `config.target`. No I/O happens here.
    pub fn new(config: &BridgeConfig) -> Result<Self, BridgeError> {
        config.validate()?;
        let channel = build_channel(config)?;
        info!(transport = %config.target, "net_core_bridge: gRPC target selected");

        Ok(Self {
            target: config.target.clone(),
            channel,
            tracker: Arc::new(ConnectivityTracker::new()),
            connect_timeout: config.connect_timeout,
        })
    }

    pub fn target(&self) -> &TransportTarget {
        &self.target
    }

    /// Cheap clone of the underlying channel, for building stubs.
    pub fn channel(&self) -> Channel {
        self.channel.clone()
    }

    pub fn tracker(&self) -> Arc<ConnectivityTracker> {
        self.tracker.clone()
    }

    pub fn state(&self) -> ConnectivityState {
        self.tracker.current()
    }

    /// Stop using the channel. Subsequent decision calls fail immediately.
    pub fn shutdown(&self) {
        info!(transport = %self.target, "net_core_bridge: channel shut down");
        self.tracker.shutdown();
    }

    /// One transport-level connection attempt, bounded by the connect timeout.
    async fn try_connect(&self) -> ConnectivityState {
        self.tracker.begin_call();
        let attempt = tokio::time::timeout(self.connect_timeout, connect_transport(&self.target));
        let next = match attempt.await {
            Ok(Ok(())) => ConnectivityState::Ready,
            Ok(Err(err)) => {
                warn!(
                    transport = %self.target,
                    error = %err,
                    "net_core_bridge: decision service unreachable"
                );
                ConnectivityState::TransientFailure
            }
            Err(_) => {
                warn!(
                    transport = %self.target,
                    timeout_ms = self.connect_timeout.as_millis() as u64,
                    "net_core_bridge: connection attempt timed out"
                );
                ConnectivityState::TransientFailure
            }
        };
        self.tracker.transition(next)
    }
}

#[async_trait]
impl ConnectivityProbe for ChannelManager {
    async fn check_connectivity_state(&self, try_to_connect: bool) -> ConnectivityState {
        let current = self.tracker.current();
        if try_to_connect
            && matches!(
                current,
                ConnectivityState::Idle | ConnectivityState::TransientFailure
            )
        {
            return self.try_connect().await;
        }
        current
    }
}

fn endpoint_for(config: &BridgeConfig) -> Result<Endpoint, BridgeError> {
    let uri = match &config.target {
        TransportTarget::Unix(_) => UNIX_AUTHORITY.to_string(),
        TransportTarget::Tcp(addr) => format!("http://{}", addr),
    };
    let endpoint = Endpoint::from_shared(uri.clone()).map_err(|err| BridgeError::InvalidEndpoint {
        endpoint: uri,
        message: err.to_string(),
    })?;
    Ok(endpoint
        .connect_timeout(config.connect_timeout)
        .timeout(config.decision_timeout))
}

fn build_channel(config: &BridgeConfig) -> Result<Channel, BridgeError> {
    let endpoint = endpoint_for(config)?;
    match &config.target {
        TransportTarget::Tcp(_) => Ok(endpoint.connect_lazy()),
        #[cfg(unix)]
        TransportTarget::Unix(path) => {
            use hyper_util::rt::TokioIo;
            use tonic::transport::Uri;
            use tower::service_fn;

            let path = path.clone();
            let connector = service_fn(move |_: Uri| {
                let path = path.clone();
                async move {
                    let stream = tokio::net::UnixStream::connect(path).await?;
                    Ok::<_, std::io::Error>(TokioIo::new(stream))
                }
            });
            Ok(endpoint.connect_with_connector_lazy(connector))
        }
        #[cfg(not(unix))]
        TransportTarget::Unix(path) => Err(BridgeError::InvalidTarget(format!(
            "domain socket '{}' is not supported on this platform",
            path.display()
        ))),
    }
}

async fn connect_transport(target: &TransportTarget) -> std::io::Result<()> {
    match target {
        TransportTarget::Tcp(addr) => tokio::net::TcpStream::connect(addr).await.map(|_| ()),
        #[cfg(unix)]
        TransportTarget::Unix(path) => tokio::net::UnixStream::connect(path).await.map(|_| ()),
        #[cfg(not(unix))]
        TransportTarget::Unix(_) => Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "domain sockets are not supported on this platform",
        )),
    }
}
