use ferrous_split_application::use_cases::ReloadDomainsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Periodically re-reads the domain list and swaps in the new snapshot.
///
/// The first tick is consumed immediately: the initial load already happened
/// synchronously at startup. A failed reload is logged and the loop carries
/// on with the previous snapshot.
pub struct DomainReloadJob {
    reload: Arc<ReloadDomainsUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl DomainReloadJob {
    pub fn new(reload: Arc<ReloadDomainsUseCase>) -> Self {
        Self {
            reload,
            interval_secs: 60,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }

    /// Runs until the cancellation token fires.
    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            source = self.reload.source(),
            "Starting domain reload job"
        );

        let mut interval = tokio::time::interval(self.interval());
        interval.tick().await;

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("DomainReloadJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    debug!("DomainReloadJob: reloading domain list");
                    match self.reload.execute().await {
                        Ok(domains) => debug!(domains, "DomainReloadJob: reload completed"),
                        Err(e) => error!(error = %e, "DomainReloadJob: reload failed"),
                    }
                }
            }
        }
    }
}
