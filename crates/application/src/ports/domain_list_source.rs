use async_trait::async_trait;
use ferrous_split_domain::DomainError;

/// External newline-delimited list of routed domains.
#[async_trait]
pub trait DomainListSource: Send + Sync {
    /// Reads the whole list. Fails with `DomainListUnavailable` when the
    /// source is missing or unreadable.
    async fn read_all(&self) -> Result<String, DomainError>;

    /// Human readable location, used in logs.
    fn describe(&self) -> &str;
}
