//! Errors raised by the stream driver and its configuration.

/// Failure to configure or start a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// `start()` was called outside a Tokio runtime.
    NoRuntime,
    /// Configuration rejected by `StreamConfig::validate`.
    InvalidConfig(String),
}

impl std::fmt::Display for StreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRuntime => write!(f, "stream driver requires a running Tokio runtime"),
            Self::InvalidConfig(msg) => write!(f, "invalid stream configuration: {msg}"),
        }
    }
}

impl std::error::Error for StreamError {}
