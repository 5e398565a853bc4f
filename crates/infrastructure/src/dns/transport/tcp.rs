//! TCP transport for forwarded queries (RFC 1035 §4.2.2).
//!
//! Each exchange opens its own connection; messages carry a two-byte
//! big-endian length prefix.

use super::DEFAULT_QUERY_TIMEOUT;
use crate::dns::wire;
use async_trait::async_trait;
use ferrous_split_application::ports::UpstreamTransport;
use ferrous_split_domain::{DomainError, UpstreamAddress};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

pub const MAX_TCP_MESSAGE_SIZE: usize = 65535;

pub struct TcpTransport {
    timeout: Duration,
}

impl TcpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn round_trip(&self, message: &[u8], server: SocketAddr) -> Result<Vec<u8>, DomainError> {
        let mut stream = TcpStream::connect(server).await.map_err(|e| {
            DomainError::UpstreamUnreachable(format!(
                "connection refused by TCP server {}: {}",
                server, e
            ))
        })?;

        stream.set_nodelay(true).map_err(|e| {
            DomainError::UpstreamUnreachable(format!(
                "failed to set TCP_NODELAY on {}: {}",
                server, e
            ))
        })?;

        send_with_length_prefix(&mut stream, message).await?;
        debug!(server = %server, message_len = message.len(), "TCP query sent");

        let reply = read_with_length_prefix(&mut stream).await?;
        debug!(server = %server, response_len = reply.len(), "TCP response received");

        Ok(reply)
    }
}

impl Default for TcpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_TIMEOUT)
    }
}

#[async_trait]
impl UpstreamTransport for TcpTransport {
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
                    "no TCP response from {} within {}ms",
                    server,
                    self.timeout.as_millis()
                ))
            })??;

        wire::validate_reply(wire::message_id(message), &reply)?;
        Ok(reply)
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}

pub async fn send_with_length_prefix<S>(stream: &mut S, message: &[u8]) -> Result<(), DomainError>
where
    S: AsyncWriteExt + Unpin,
{
    if message.len() > MAX_TCP_MESSAGE_SIZE {
        return Err(DomainError::UpstreamUnreachable(format!(
            "message too large for TCP framing: {} bytes",
            message.len()
        )));
    }

    let length_bytes = (message.len() as u16).to_be_bytes();
    let mut framed = Vec::with_capacity(2 + message.len());
    framed.extend_from_slice(&length_bytes);
    framed.extend_from_slice(message);

    stream
        .write_all(&framed)
        .await
        .map_err(|e| DomainError::UpstreamUnreachable(format!("failed to write message: {}", e)))?;
    stream
        .flush()
        .await
        .map_err(|e| DomainError::UpstreamUnreachable(format!("failed to flush stream: {}", e)))?;

    Ok(())
}

pub async fn read_with_length_prefix<S>(stream: &mut S) -> Result<Vec<u8>, DomainError>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await.map_err(|e| {
        DomainError::UpstreamUnreachable(format!("failed to read message length: {}", e))
    })?;

    let message_len = u16::from_be_bytes(len_buf) as usize;

    let mut message = vec![0u8; message_len];
    stream.read_exact(&mut message).await.map_err(|e| {
        DomainError::UpstreamUnreachable(format!("failed to read message body: {}", e))
    })?;

    Ok(message)
}
