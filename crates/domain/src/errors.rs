use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Truncated message: need {needed} bytes at offset {offset}, datagram has {available}")]
    TruncatedMessage {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Malformed domain name: {0}")]
    MalformedName(String),

    #[error("Upstream {server} unreachable: {reason}")]
    UpstreamUnreachable { server: String, reason: String },

    #[error("Upstream {server} timeout waiting for reply")]
    UpstreamTimeout { server: String },

    #[error("Failed to read reply from upstream {server}: {reason}")]
    UpstreamReadFailure { server: String, reason: String },

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("{section} section has {count} records, a DNS header can count at most 65535")]
    SectionTooLarge { section: &'static str, count: usize },
}

impl DomainError {
    /// True for failures caused by the upstream resolver rather than the client datagram.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            DomainError::UpstreamUnreachable { .. }
                | DomainError::UpstreamTimeout { .. }
                | DomainError::UpstreamReadFailure { .. }
                | DomainError::InvalidDnsResponse(_)
        )
    }
}
