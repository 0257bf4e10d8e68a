use crate::dns::transport::{DnsTransport, UdpTransport};
use crate::dns::wire::{MessageDecoder, MessageEncoder};
use async_trait::async_trait;
use ferrous_relay_application::ports::UpstreamExchange;
use ferrous_relay_domain::{DomainError, Message};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Forwards sub-queries to one upstream resolver and decodes its replies.
pub struct UdpForwarder {
    transport: Arc<dyn DnsTransport>,
    timeout: Duration,
}

impl UdpForwarder {
    pub fn new(server_addr: SocketAddr, timeout: Duration) -> Self {
        Self::with_transport(Arc::new(UdpTransport::new(server_addr)), timeout)
    }

    pub fn with_transport(transport: Arc<dyn DnsTransport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }
}

#[async_trait]
impl UpstreamExchange for UdpForwarder {
    async fn exchange(&self, query: &Message) -> Result<Message, DomainError> {
        let request_bytes = MessageEncoder::encode(query)?;

        let response = self.transport.send(&request_bytes, self.timeout).await?;

        let reply = MessageDecoder::decode(&response.bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!(
                "undecodable reply from {}: {}",
                self.transport.server(),
                e
            ))
        })?;

        debug!(
            server = %self.transport.server(),
            protocol = response.protocol_used,
            id = reply.header.id,
            rcode = reply.header.response_code,
            answers = reply.answers.len(),
            "Upstream reply decoded"
        );

        Ok(reply)
    }

    fn server(&self) -> String {
        self.transport.server()
    }
}
