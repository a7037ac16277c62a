use thiserror::Error;

/// Error taxonomy for addon operations.
///
/// Adapters never retry or suppress: every failure propagates unchanged to
/// the caller, which owns retry/backoff and user-facing policy.
#[derive(Debug, Error)]
pub enum AddonError {
    /// An `item_id` that fails the adapter's private grammar. Caller error,
    /// not retryable; names the offending value.
    #[error("invalid item id: {0:?}")]
    InvalidId(String),

    /// Upstream answered "not found" for a well-formed id. Callers may treat
    /// this as "item no longer exists".
    #[error("item not found upstream (HTTP {status})")]
    NotFound { status: u16 },

    /// Any other non-success upstream response, with status and body kept
    /// for diagnostics.
    #[error("upstream failure (HTTP {status}): {body}")]
    Upstream { status: u16, body: String },

    /// The requestor gave up before any status was available (timeout,
    /// abort). Same upstream-failure class as [`AddonError::Upstream`].
    #[error("upstream transport failure: {0}")]
    Transport(String),

    /// A successful response whose body does not contain what the adapter
    /// expects: the transport worked but the upstream contract was violated.
    #[error("unexpected upstream response in {context}: {message}")]
    Parse { context: String, message: String },

    /// Malformed base URL or similarly invalid injected configuration,
    /// including connectivity failures that point back at it.
    #[error("addon configuration error: {0}")]
    Config(String),
}

pub type AddonResult<T> = std::result::Result<T, AddonError>;

impl AddonError {
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Whether the caller (not upstream) is at fault.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidId(_))
    }

    /// Whether this is an upstream-failure signal, with or without a status.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(self, Self::Upstream { .. } | Self::Transport(_))
    }
}

impl From<url::ParseError> for AddonError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<reqwest::Error> for AddonError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Config(format!("failed to build request: {err}"))
        } else if err.is_connect() {
            Self::Config(format!("connectivity failure: {err}"))
        } else if err.is_decode() {
            Self::Parse {
                context: "response body".to_string(),
                message: err.to_string(),
            }
        } else {
            // timeouts, aborted requests, broken bodies
            Self::Transport(err.to_string())
        }
    }
}
