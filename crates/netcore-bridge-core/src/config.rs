//! Bridge configuration.
//!
//! Transport target selection and the timing knobs for decision calls and
//! the startup self-test.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// Well-known domain socket used on POSIX hosts.
pub const DEFAULT_SOCKET_PATH: &str = "/tmp/homeassistant_core.sock";

/// Well-known loopback address used everywhere else.
pub const DEFAULT_TCP_ADDR: &str = "127.0.0.1:50051";

/// Where the decision service listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "address", rename_all = "snake_case")]
pub enum TransportTarget {
    /// Local filesystem domain socket.
    Unix(PathBuf),

    /// Loopback network address.
    Tcp(SocketAddr),
}

impl TransportTarget {
    /// Target for the operating environment this process runs on.
    pub fn for_current_platform() -> Self {
        #[cfg(unix)]
        {
            Self::Unix(PathBuf::from(DEFAULT_SOCKET_PATH))
        }
        #[cfg(not(unix))]
        {
            Self::Tcp(default_tcp_addr())
        }
    }

    pub fn is_unix(&self) -> bool {
        matches!(self, Self::Unix(_))
    }
}

impl Default for TransportTarget {
    fn default() -> Self {
        Self::for_current_platform()
    }
}

impl fmt::Display for TransportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportTarget::Unix(path) => write!(f, "unix:{}", path.display()),
            TransportTarget::Tcp(addr) => write!(f, "{}", addr),
        }
    }
}

impl FromStr for TransportTarget {
    type Err = BridgeError;

    /// Accepts `unix:/path/to.sock`, `tcp:host:port` or a bare `host:port`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(path) = trimmed.strip_prefix("unix:") {
            if path.is_empty() {
                return Err(BridgeError::InvalidTarget(
                    "unix target requires a socket path".to_string(),
                ));
            }
            return Ok(Self::Unix(PathBuf::from(path)));
        }

        let addr = trimmed.strip_prefix("tcp:").unwrap_or(trimmed);
        addr.parse::<SocketAddr>()
            .map(Self::Tcp)
            .map_err(|err| BridgeError::InvalidTarget(format!("'{}': {}", s, err)))
    }
}

#[cfg_attr(unix, allow(dead_code))]
fn default_tcp_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 50051))
}

/// Configuration for the bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Decision service location. Chosen once at channel construction.
    pub target: TransportTarget,

    /// Upper bound for establishing the transport connection.
    pub connect_timeout: Duration,

    /// Upper bound for a single decision call; expiry fails open.
    pub decision_timeout: Duration,

    /// Settling delay before the startup self-test runs.
    pub self_test_delay: Duration,

    /// Run the self-test after installation.
    pub run_self_test: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            target: TransportTarget::for_current_platform(),
            connect_timeout: Duration::from_secs(2),
            decision_timeout: Duration::from_secs(5),
            self_test_delay: Duration::from_secs(2),
            run_self_test: true,
        }
    }
}

impl BridgeConfig {
    pub fn with_target(mut self, target: TransportTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_decision_timeout(mut self, timeout: Duration) -> Self {
        self.decision_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.decision_timeout.is_zero() {
            return Err(BridgeError::Config(
                "decision_timeout must be greater than zero".to_string(),
            ));
        }
        if self.connect_timeout.is_zero() {
            return Err(BridgeError::Config(
                "connect_timeout must be greater than zero".to_string(),
            ));
        }
        if let TransportTarget::Unix(path) = &self.target {
            if path.as_os_str().is_empty() {
                return Err(BridgeError::InvalidTarget(
                    "unix target requires a socket path".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_target_matches_platform() {
        let target = TransportTarget::default();
        #[cfg(unix)]
        assert_eq!(target, TransportTarget::Unix(PathBuf::from(DEFAULT_SOCKET_PATH)));
        #[cfg(not(unix))]
        assert_eq!(target.to_string(), DEFAULT_TCP_ADDR);
    }

    #[test]
    fn parses_unix_and_tcp_targets() {
        let unix: TransportTarget = "unix:/run/bridge.sock".parse().unwrap();
        assert_eq!(unix, TransportTarget::Unix(PathBuf::from("/run/bridge.sock")));
        assert_eq!(unix.to_string(), "unix:/run/bridge.sock");

        let tcp: TransportTarget = "tcp:127.0.0.1:6000".parse().unwrap();
        assert_eq!(tcp.to_string(), "127.0.0.1:6000");

        let bare: TransportTarget = DEFAULT_TCP_ADDR.parse().unwrap();
        assert!(!bare.is_unix());
    }

    #[test]
    fn rejects_bad_targets() {
        assert!("unix:".parse::<TransportTarget>().is_err());
        assert!("localhost".parse::<TransportTarget>().is_err());
    }

    #[test]
    fn zero_decision_timeout_is_rejected() {
        let config = BridgeConfig::default().with_decision_timeout(Duration::ZERO);
        assert!(matches!(config.validate(), Err(BridgeError::Config(_))));
        assert!(BridgeConfig::default().validate().is_ok());
    }
}
