use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReloadConfig {
    /// Newline-delimited list of domains routed to the primary server.
    #[serde(default = "default_domain_list")]
    pub domain_list: String,

    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            domain_list: default_domain_list(),
            interval_secs: default_interval_secs(),
        }
    }
}

fn default_domain_list() -> String {
    "domain.txt".to_string()
}

fn default_interval_secs() -> u64 {
    60
}
