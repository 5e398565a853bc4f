use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid upstream address: {0}")]
    InvalidUpstreamAddress(String),

    #[error("Invalid forwarder configuration: {0}")]
    InvalidForwarderConfig(String),

    #[error("Domain list unavailable: {0}")]
    DomainListUnavailable(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Upstream {0} timed out")]
    UpstreamTimeout(String),

    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("Malformed reply from upstream: {0}")]
    UpstreamMalformedReply(String),

    #[error("A reply has already been written for this query")]
    ReplyAlreadyWritten,
}

impl DomainError {
    /// True for the failures raised by an upstream exchange.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            Self::UpstreamTimeout(_) | Self::UpstreamUnreachable(_) | Self::UpstreamMalformedReply(_)
        )
    }
}
