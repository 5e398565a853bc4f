use async_trait::async_trait;
use ferrous_split_domain::{DomainError, UpstreamAddress};

/// Single request/reply exchange with an upstream resolver.
///
/// Implementations own their timeout and never retry.
#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    async fn exchange(
        &self,
        message: &[u8],
        upstream: UpstreamAddress,
    ) -> Result<Vec<u8>, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
