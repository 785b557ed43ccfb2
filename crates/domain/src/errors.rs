use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Truncated input: need {needed} bytes at offset {offset}, buffer has {available}")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Malformed compression pointer at offset {offset}: {reason}")]
    MalformedPointer { offset: usize, reason: &'static str },

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid record data: {0}")]
    InvalidRecordData(String),

    #[error("Response ID mismatch: request {expected:#06x}, response {received:#06x}")]
    ResponseMismatch { expected: u16, received: u16 },

    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("Query timeout")]
    QueryTimeout,
}

impl DomainError {
    /// True for failures that happened on the upstream link rather than in the codec.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnreachable(_) | Self::QueryTimeout | Self::ResponseMismatch { .. }
        )
    }
}
