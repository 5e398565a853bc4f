use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Number of SO_REUSEPORT UDP receive loops.
    #[serde(default = "default_udp_workers")]
    pub udp_workers: usize,

    #[serde(default = "default_true")]
    pub tcp_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            udp_workers: default_udp_workers(),
            tcp_enabled: true,
        }
    }
}

fn default_dns_port() -> u16 {
    53
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_udp_workers() -> usize {
    2
}

fn default_true() -> bool {
    true
}
