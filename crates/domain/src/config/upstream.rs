use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// `host:port` of the resolver queries are relayed to.
    #[serde(default)]
    pub resolver: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Receive buffer for upstream replies; longer replies are cut off.
    #[serde(default = "default_max_response_size")]
    pub max_response_size: usize,

    /// Send upstream queries with a fresh random ID instead of the client's.
    #[serde(default)]
    pub randomize_query_id: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            resolver: None,
            timeout_ms: default_timeout_ms(),
            max_response_size: default_max_response_size(),
            randomize_query_id: false,
        }
    }
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_max_response_size() -> usize {
    4096
}
