use ferrous_relay_application::ports::UpstreamExchange;
use ferrous_relay_application::use_cases::ResolveMessageUseCase;
use ferrous_relay_domain::Config;
use ferrous_relay_infrastructure::dns::transport::resolve_upstream;
use ferrous_relay_infrastructure::dns::{DnsServerHandler, UdpForwarder};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct DnsServices {
    pub handler: DnsServerHandler,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.dns.query_timeout);
        let upstream = Self::build_upstream(config, timeout).await?;

        let use_case = ResolveMessageUseCase::new(upstream)
            .with_concurrent_subqueries(config.dns.concurrent_subqueries);

        Ok(Self {
            handler: DnsServerHandler::new(Arc::new(use_case)),
        })
    }

    async fn build_upstream(
        config: &Config,
        timeout: Duration,
    ) -> anyhow::Result<Option<Arc<dyn UpstreamExchange>>> {
        let Some(resolver) = config.resolver_addr()? else {
            info!("No upstream resolver configured, answering every question with a stub record");
            return Ok(None);
        };

        let server_addr = resolve_upstream(&resolver, timeout).await?;
        info!(
            upstream = %resolver,
            resolved = %server_addr,
            timeout_secs = config.dns.query_timeout,
            concurrent = config.dns.concurrent_subqueries,
            "Forwarding questions to upstream resolver"
        );

        let forwarder: Arc<dyn UpstreamExchange> =
            Arc::new(UdpForwarder::new(server_addr, timeout));
        Ok(Some(forwarder))
    }
}
