use crate::ports::{DomainListSource, DomainSetStore};
use ferrous_split_domain::{DomainError, DomainSet};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Reads the external domain list and installs it as the new snapshot.
///
/// A failed read leaves the installed snapshot untouched.
pub struct ReloadDomainsUseCase {
    source: Arc<dyn DomainListSource>,
    store: Arc<dyn DomainSetStore>,
    install_lock: Mutex<()>,
}

impl ReloadDomainsUseCase {
    pub fn new(source: Arc<dyn DomainListSource>, store: Arc<dyn DomainSetStore>) -> Self {
        Self {
            source,
            store,
            install_lock: Mutex::new(()),
        }
    }

    /// Builds a fresh [`DomainSet`] from the source without publishing it.
    pub async fn load_domains(&self) -> Result<DomainSet, DomainError> {
        let contents = self.source.read_all().await?;
        Ok(DomainSet::parse(&contents))
    }

    /// Load and install. Returns the number of domains now active.
    pub async fn execute(&self) -> Result<usize, DomainError> {
        let _guard = self.install_lock.lock().await;

        let domains = self.load_domains().await.map_err(|e| {
            warn!(
                source = self.source.describe(),
                error = %e,
                "Domain list reload failed, keeping previous snapshot"
            );
            e
        })?;

        let count = domains.len();
        self.store.install(domains);

        info!(
            source = self.source.describe(),
            domains = count,
            "Domain list installed"
        );

        Ok(count)
    }

    pub fn source(&self) -> &str {
        self.source.describe()
    }
}
