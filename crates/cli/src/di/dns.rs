use dns_relay_application::use_cases::HandleDnsQueryUseCase;
use dns_relay_domain::Config;
use dns_relay_infrastructure::dns::transport::resolver::resolve_upstream;
use dns_relay_infrastructure::dns::DnsForwarder;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const UPSTREAM_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DnsServices {
    pub upstream: SocketAddr,
    pub handler_use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let resolver = config
            .upstream
            .resolver
            .as_deref()
            .map(str::trim)
            .ok_or_else(|| anyhow::anyhow!("No upstream resolver configured"))?;

        let upstream = resolve_upstream(resolver, UPSTREAM_LOOKUP_TIMEOUT)
            .await
            .map_err(|e| anyhow::anyhow!("Cannot use upstream resolver '{}': {}", resolver, e))?;

        let timeout = Duration::from_millis(config.upstream.timeout_ms);

        info!(
            upstream = %upstream,
            timeout_ms = config.upstream.timeout_ms,
            max_response_size = config.upstream.max_response_size,
            randomize_query_id = config.upstream.randomize_query_id,
            "Upstream resolver configured"
        );

        let forwarder = Arc::new(DnsForwarder::udp(
            upstream,
            timeout,
            config.upstream.max_response_size,
        ));

        let handler_use_case = Arc::new(
            HandleDnsQueryUseCase::new(forwarder)
                .with_random_query_ids(config.upstream.randomize_query_id),
        );

        Ok(Self {
            upstream,
            handler_use_case,
        })
    }
}
