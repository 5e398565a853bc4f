use super::domain_set_store::SnapshotDomainSetStore;
use super::server::DnsServerHandler;
use super::transport::{TcpTransport, UdpTransport, DEFAULT_QUERY_TIMEOUT};
use crate::sources::FileDomainListSource;
use ferrous_split_application::ports::{DomainListSource, DomainSetStore, UpstreamTransport};
use ferrous_split_application::use_cases::{
    ForwardQueryUseCase, HandleQueryUseCase, ReloadDomainsUseCase, RouteQueryUseCase,
};
use ferrous_split_domain::{Config, ConfigError, DomainError, ForwarderConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Wires the store, the reload use case and the per-protocol query pipelines.
pub struct ConditionalRouterBuilder {
    forwarder: ForwarderConfig,
    source: Arc<dyn DomainListSource>,
    query_timeout: Duration,
    udp: Option<Arc<dyn UpstreamTransport>>,
    tcp: Option<Arc<dyn UpstreamTransport>>,
}

impl ConditionalRouterBuilder {
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Replaces the default UDP/TCP transports.
    pub fn with_transports(
        mut self,
        udp: Arc<dyn UpstreamTransport>,
        tcp: Arc<dyn UpstreamTransport>,
    ) -> Self {
        self.udp = Some(udp);
        self.tcp = Some(tcp);
        self
    }

    /// Performs the first load synchronously. Failing to read the list at
    /// startup is fatal, unlike later reloads.
    pub async fn build(self) -> Result<ConditionalRouter, DomainError> {
        let store: Arc<dyn DomainSetStore> = Arc::new(SnapshotDomainSetStore::new());
        let reload = Arc::new(ReloadDomainsUseCase::new(self.source, store.clone()));

        let initial = reload.load_domains().await.map_err(|e| {
            error!(source = reload.source(), error = %e, "Initial domain list load failed");
            e
        })?;
        let loaded = initial.len();
        store.install(initial);

        info!(
            source = reload.source(),
            domains = loaded,
            primary = %self.forwarder.primary(),
            secondary = %self.forwarder.active_secondary(),
            "Conditional router ready"
        );

        let udp = self
            .udp
            .unwrap_or_else(|| Arc::new(UdpTransport::new(self.query_timeout)));
        let tcp = self
            .tcp
            .unwrap_or_else(|| Arc::new(TcpTransport::new(self.query_timeout)));

        let route = Arc::new(RouteQueryUseCase::new(store.clone(), self.forwarder));
        let handler = DnsServerHandler::new(
            Arc::new(HandleQueryUseCase::new(
                route.clone(),
                Arc::new(ForwardQueryUseCase::new(udp)),
            )),
            Arc::new(HandleQueryUseCase::new(
                route,
                Arc::new(ForwardQueryUseCase::new(tcp)),
            )),
        );

        Ok(ConditionalRouter {
            store,
            reload,
            handler,
        })
    }
}

/// A ready-to-serve router with its domain set loaded.
pub struct ConditionalRouter {
    store: Arc<dyn DomainSetStore>,
    reload: Arc<ReloadDomainsUseCase>,
    handler: DnsServerHandler,
}

impl ConditionalRouter {
    pub fn builder(
        forwarder: ForwarderConfig,
        source: Arc<dyn DomainListSource>,
    ) -> ConditionalRouterBuilder {
        ConditionalRouterBuilder {
            forwarder,
            source,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            udp: None,
            tcp: None,
        }
    }

    /// Builder for a validated [`Config`], reading the list from disk.
    pub fn from_config(config: &Config) -> Result<ConditionalRouterBuilder, ConfigError> {
        let forwarder = config.forwarder()?;
        let source = Arc::new(FileDomainListSource::new(&config.reload.domain_list));

        Ok(Self::builder(forwarder, source)
            .with_query_timeout(Duration::from_millis(config.upstream.query_timeout)))
    }

    pub fn handler(&self) -> DnsServerHandler {
        self.handler.clone()
    }

    pub fn reload_use_case(&self) -> Arc<ReloadDomainsUseCase> {
        self.reload.clone()
    }

    pub fn store(&self) -> Arc<dyn DomainSetStore> {
        self.store.clone()
    }
}
