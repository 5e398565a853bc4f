use crate::ports::{ResponseWriter, UpstreamTransport};
use ferrous_split_domain::{DomainError, UpstreamAddress};
use std::sync::Arc;
use tracing::debug;

/// Sends a request to one upstream and relays the reply verbatim.
///
/// At most one attempt; a transport error is returned as-is.
pub struct ForwardQueryUseCase {
    transport: Arc<dyn UpstreamTransport>,
}

impl ForwardQueryUseCase {
    pub fn new(transport: Arc<dyn UpstreamTransport>) -> Self {
        Self { transport }
    }

    pub async fn execute<W>(
        &self,
        message: &[u8],
        upstream: UpstreamAddress,
        writer: &mut W,
    ) -> Result<(), DomainError>
    where
        W: ResponseWriter + ?Sized,
    {
        let reply = self.transport.exchange(message, upstream).await?;

        debug!(
            upstream = %upstream,
            protocol = self.transport.protocol_name(),
            reply_len = reply.len(),
            "Upstream reply received"
        );

        writer.write_reply(&reply).await
    }

    pub fn protocol_name(&self) -> &'static str {
        self.transport.protocol_name()
    }
}
