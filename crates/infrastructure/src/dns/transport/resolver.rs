use ferrous_relay_domain::{DomainError, UpstreamAddr};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

/// Resolves the upstream address to a socket address, looking up the
/// hostname when it is not already an IP. The first address returned wins.
pub async fn resolve_upstream(
    upstream: &UpstreamAddr,
    timeout: Duration,
) -> Result<SocketAddr, DomainError> {
    let (hostname, port) = match upstream {
        UpstreamAddr::Resolved(addr) => return Ok(*addr),
        UpstreamAddr::Unresolved { hostname, port } => (hostname.as_ref(), *port),
    };
    let target = format!("{}:{}", hostname, port);

    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host(&target))
        .await
        .map_err(|_| DomainError::UpstreamTimeout {
            server: target.clone(),
        })?
        .map_err(|e| DomainError::UpstreamUnreachable {
            server: target.clone(),
            reason: format!("hostname resolution failed: {}", e),
        })?;

    let addr = addrs.next().ok_or_else(|| DomainError::UpstreamUnreachable {
        server: target.clone(),
        reason: "no addresses found".to_string(),
    })?;

    debug!(upstream = %target, resolved = %addr, "Upstream hostname resolved");
    Ok(addr)
}
