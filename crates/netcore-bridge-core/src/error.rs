use std::time::Duration;

use thiserror::Error;

/// Bridge startup and configuration errors.
///
/// These are the only failures the bridge surfaces to its caller; they are
/// fatal to bridge initialization.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("invalid transport target: {0}")]
    InvalidTarget(String),

    #[error("invalid gRPC endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("transport setup failed: {0}")]
    Transport(String),
}

/// Failure to obtain a decision from the remote service.
///
/// Interceptors never propagate these; every variant is handled fail-open.
#[derive(Debug, Clone, Error)]
pub enum DecisionError {
    #[error("rpc failed with status {code}: {message}")]
    Rpc { code: String, message: String },

    #[error("decision not received within {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("channel is shut down")]
    ChannelShutdown,

    #[error("malformed decision payload: {0}")]
    Malformed(String),
}

impl DecisionError {
    pub fn rpc(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rpc {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Errors returned through the host collaborator traits.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host's own operation failed.
    #[error("host operation '{operation}' failed: {message}")]
    Operation { operation: String, message: String },

    /// The interceptor was called before an original entry point was installed.
    #[error("{0} interceptor called before install")]
    NotInstalled(&'static str),
}

impl HostError {
    pub fn operation(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Operation {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

pub type HostResult<T> = Result<T, HostError>;
pub type DecisionResult<T> = Result<T, DecisionError>;
