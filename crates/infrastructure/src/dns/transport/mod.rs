pub mod resolver;
pub mod udp;

use async_trait::async_trait;
use ferrous_relay_domain::DomainError;
use std::time::Duration;

pub use resolver::resolve_upstream;
pub use udp::UdpTransport;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

/// Connectionless request/reply exchange with one upstream server.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn server(&self) -> String;
}
