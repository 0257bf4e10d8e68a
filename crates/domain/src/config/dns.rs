use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DnsConfig {
    /// Upstream resolver (`host:port`). When absent every question is
    /// answered with a stub A record instead of being forwarded.
    #[serde(default)]
    pub resolver: Option<String>,

    /// Upstream query timeout in seconds
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Forward the questions of one datagram concurrently instead of one at a time
    #[serde(default)]
    pub concurrent_subqueries: bool,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            resolver: None,
            query_timeout: default_query_timeout(),
            concurrent_subqueries: false,
        }
    }
}

fn default_query_timeout() -> u64 {
    5
}
