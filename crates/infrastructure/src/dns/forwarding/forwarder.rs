use crate::dns::transport::udp::UdpTransport;
use crate::dns::transport::DnsTransport;
use async_trait::async_trait;
use dns_relay_application::ports::QueryForwarder;
use dns_relay_domain::{DomainError, Message};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Forwards single-question queries to one upstream resolver.
pub struct DnsForwarder {
    transport: Arc<dyn DnsTransport>,
    timeout: Duration,
}

impl DnsForwarder {
    pub fn new(transport: Arc<dyn DnsTransport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub fn udp(server_addr: SocketAddr, timeout: Duration, max_response_size: usize) -> Self {
        let transport = UdpTransport::new(server_addr).with_max_response_size(max_response_size);
        Self::new(Arc::new(transport), timeout)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl QueryForwarder for DnsForwarder {
    async fn forward(&self, request: &Message) -> Result<Message, DomainError> {
        let request_bytes = request.encode()?;

        let response = self.transport.send(&request_bytes, self.timeout).await?;

        let reply = Message::decode(&response.bytes)?;
        validate_response_id(request, &reply)?;

        debug!(
            id = reply.header.id,
            answers = reply.answers.len(),
            protocol = response.protocol_used,
            "Upstream reply accepted"
        );

        Ok(reply)
    }
}

/// Rejects a reply whose transaction ID differs from the request it
/// supposedly answers.
pub fn validate_response_id(request: &Message, reply: &Message) -> Result<(), DomainError> {
    if reply.header.id != request.header.id {
        return Err(DomainError::ResponseMismatch {
            expected: request.header.id,
            received: reply.header.id,
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "forwarder_test.rs"]
mod forwarder_test;
