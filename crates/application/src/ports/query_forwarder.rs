use async_trait::async_trait;
use dns_relay_domain::{DomainError, Message};

/// Sends a single-question query upstream and returns the correlated reply.
///
/// Implementations must reject a reply whose transaction ID differs from
/// the request's with [`DomainError::ResponseMismatch`].
#[async_trait]
pub trait QueryForwarder: Send + Sync {
    async fn forward(&self, request: &Message) -> Result<Message, DomainError>;
}
