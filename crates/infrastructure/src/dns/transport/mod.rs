pub mod tcp;
pub mod udp;

pub use tcp::TcpTransport;
pub use udp::UdpTransport;

use std::time::Duration;

/// Per-exchange budget applied when none is configured.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_millis(2000);
