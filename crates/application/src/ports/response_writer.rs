use async_trait::async_trait;
use ferrous_split_domain::DomainError;

/// Write-back capability handed in by the host dispatcher for one query.
#[async_trait]
pub trait ResponseWriter: Send {
    /// Writes a reply. A second write for the same query fails with
    /// `ReplyAlreadyWritten`.
    async fn write_reply(&mut self, reply: &[u8]) -> Result<(), DomainError>;

    fn has_written(&self) -> bool;
}
