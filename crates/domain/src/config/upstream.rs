use serde::{Deserialize, Serialize};

/// Upstream resolvers.
///
/// Queries for names in the domain list go to `primary_server`; everything
/// else goes to the first entry of `secondary_servers`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_primary_server")]
    pub primary_server: String,

    #[serde(default = "default_secondary_servers")]
    pub secondary_servers: Vec<String>,

    /// Exchange timeout in milliseconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            primary_server: default_primary_server(),
            secondary_servers: default_secondary_servers(),
            query_timeout: default_query_timeout(),
        }
    }
}

fn default_primary_server() -> String {
    "202.58.203.196".to_string()
}

fn default_secondary_servers() -> Vec<String> {
    vec!["1.1.1.1".to_string(), "8.8.8.8".to_string()]
}

fn default_query_timeout() -> u64 {
    2000
}
