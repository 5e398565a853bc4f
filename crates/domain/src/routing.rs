use crate::{DomainError, UpstreamAddress};
use std::fmt;

/// Response code reported back to the host dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Success,
    ServerFailure,
}

impl ResponseStatus {
    /// Wire RCODE value.
    pub fn rcode(&self) -> u16 {
        match self {
            Self::Success => 0,
            Self::ServerFailure => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "NOERROR",
            Self::ServerFailure => "SERVFAIL",
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which pool a query was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamPool {
    Primary,
    Secondary,
}

impl UpstreamPool {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingResult {
    ForwardTo {
        upstream: UpstreamAddress,
        pool: UpstreamPool,
    },
    Reject(ResponseStatus),
}

/// Terminal state of one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Request header guard failed; nothing was forwarded or written.
    Rejected,
    /// Upstream reply was written back verbatim.
    Forwarded { upstream: UpstreamAddress },
    /// Exchange with the upstream failed; nothing was written.
    Failed {
        upstream: UpstreamAddress,
        error: DomainError,
    },
}

impl QueryOutcome {
    pub fn status(&self) -> ResponseStatus {
        match self {
            Self::Forwarded { .. } => ResponseStatus::Success,
            Self::Rejected | Self::Failed { .. } => ResponseStatus::ServerFailure,
        }
    }

    /// Whether a reply was written through the response writer.
    pub fn reply_written(&self) -> bool {
        matches!(self, Self::Forwarded { .. })
    }

    pub fn error(&self) -> Option<&DomainError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}
