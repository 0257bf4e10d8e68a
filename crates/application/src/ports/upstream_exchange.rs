use async_trait::async_trait;
use ferrous_relay_domain::{DomainError, Message};

/// One request, one reply round trip with an upstream resolver.
#[async_trait]
pub trait UpstreamExchange: Send + Sync {
    /// Sends `query` upstream and returns the decoded reply.
    async fn exchange(&self, query: &Message) -> Result<Message, DomainError>;

    /// Upstream address, for logging.
    fn server(&self) -> String;
}
