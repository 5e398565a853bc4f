use ferrous_split_domain::Config;
use ferrous_split_infrastructure::dns::{ConditionalRouter, DnsServerHandler};
use ferrous_split_jobs::DomainReloadJob;
use tracing::info;

pub struct DnsServices {
    pub router: ConditionalRouter,
    pub handler: DnsServerHandler,
}

impl DnsServices {
    /// Loads the domain list once before anything listens. A missing or
    /// unreadable list aborts startup.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Initializing conditional router");

        let router = ConditionalRouter::from_config(config)?.build().await?;
        let handler = router.handler();

        Ok(Self { router, handler })
    }

    pub fn reload_job(&self, config: &Config) -> DomainReloadJob {
        DomainReloadJob::new(self.router.reload_use_case()).with_interval(config.reload.interval_secs)
    }
}
