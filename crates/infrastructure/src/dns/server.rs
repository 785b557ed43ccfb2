use dns_relay_application::use_cases::HandleDnsQueryUseCase;
use dns_relay_domain::Message;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Turns one client datagram into the bytes to send back.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Returns `None` when nothing should be sent: the datagram did not
    /// decode, or the synthesized response could not be encoded.
    pub async fn handle_raw_udp(&self, query_buf: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let request = match Message::decode(query_buf) {
            Ok(message) => message,
            Err(e) => {
                warn!(
                    client = %client,
                    bytes = query_buf.len(),
                    error = %e,
                    "Dropping undecodable datagram"
                );
                return None;
            }
        };

        info!(client = %client, "request\n{}", request);

        let response = self.use_case.execute(&request).await;

        info!(client = %client, "response\n{}", response);

        match response.encode() {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(client = %client, error = %e, "Failed to encode response");
                None
            }
        }
    }
}
