pub mod domain_set_store;
pub mod router;
pub mod server;
pub mod transport;
pub mod wire;

pub use domain_set_store::SnapshotDomainSetStore;
pub use router::{ConditionalRouter, ConditionalRouterBuilder};
pub use server::{BufferedResponseWriter, DnsServerHandler, ListenerProtocol};
pub use transport::{TcpTransport, UdpTransport};
