//! UDP transport for forwarded queries (RFC 1035 §4.2.1).
//!
//! One ephemeral socket per exchange, no retry. Bytes go out verbatim and the
//! first datagram coming back from the upstream is the reply.

use super::DEFAULT_QUERY_TIMEOUT;
use crate::dns::wire;
use async_trait::async_trait;
use ferrous_split_application::ports::UpstreamTransport;
use ferrous_split_domain::{DomainError, UpstreamAddress};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Largest DNS message a UDP datagram can carry. Replies are relayed verbatim,
/// so whatever size the upstream sends must fit.
pub const MAX_UDP_MESSAGE_SIZE: usize = 65535;

pub struct UdpTransport {
    timeout: Duration,
}

impl UdpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn round_trip(&self, message: &[u8], server: SocketAddr) -> Result<Vec<u8>, DomainError> {
        let bind_addr: SocketAddr = if server.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr).await.map_err(|e| {
            DomainError::UpstreamUnreachable(format!("failed to bind UDP socket: {}", e))
        })?;

        // connect() filters out datagrams from other sources
        socket.connect(server).await.map_err(|e| {
            DomainError::UpstreamUnreachable(format!("failed to reach {}: {}", server, e))
        })?;

        let bytes_sent = socket.send(message).await.map_err(|e| {
            DomainError::UpstreamUnreachable(format!(
                "failed to send UDP query to {}: {}",
                server, e
            ))
        })?;

        debug!(server = %server, bytes_sent = bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_MESSAGE_SIZE];
        let bytes_received = socket.recv(&mut recv_buf).await.map_err(|e| {
            DomainError::UpstreamUnreachable(format!(
                "failed to receive UDP response from {}: {}",
                server, e
            ))
        })?;
        recv_buf.truncate(bytes_received);

        debug!(server = %server, bytes_received = bytes_received, "UDP response received");

        Ok(recv_buf)
    }
}

impl Default for UdpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_TIMEOUT)
    }
}

#[async_trait]
impl UpstreamTransport for UdpTransport {
    async fn exchange(
        &self,
        message: &[u8],
        upstream: UpstreamAddress,
    ) -> Result<Vec<u8>, DomainError> {
        let server = upstream.socket_addr();

        let reply = tokio::time::timeout(self.timeout, self.round_trip(message, server))
            .await
            .map_err(|_| {
                DomainError::UpstreamTimeout(format!(
                    "no UDP response from {} within {}ms",
                    server,
                    self.timeout.as_millis()
                ))
            })??;

        wire::validate_reply(wire::message_id(message), &reply)?;
        Ok(reply)
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
