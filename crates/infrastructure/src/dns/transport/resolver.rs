use dns_relay_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

/// Resolves an upstream `host:port` once, preferring the first address the
/// system resolver returns.
pub async fn resolve_upstream(target: &str, timeout: Duration) -> Result<SocketAddr, DomainError> {
    if let Ok(addr) = target.parse::<SocketAddr>() {
        return Ok(addr);
    }

    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host(target))
        .await
        .map_err(|_| DomainError::QueryTimeout)?
        .map_err(|e| {
            DomainError::UpstreamUnreachable(format!("Failed to resolve {}: {}", target, e))
        })?;

    addrs.next().ok_or_else(|| {
        DomainError::UpstreamUnreachable(format!("No addresses found for {}", target))
    })
}
