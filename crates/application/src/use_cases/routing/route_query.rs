use crate::ports::DomainSetStore;
use ferrous_split_domain::{
    ForwardQuery, ForwarderConfig, ResponseStatus, RoutingResult, UpstreamPool,
};
use std::sync::Arc;
use tracing::debug;

/// Decides which upstream pool serves a query.
pub struct RouteQueryUseCase {
    store: Arc<dyn DomainSetStore>,
    forwarder: ForwarderConfig,
}

impl RouteQueryUseCase {
    pub fn new(store: Arc<dyn DomainSetStore>, forwarder: ForwarderConfig) -> Self {
        Self { store, forwarder }
    }

    pub fn execute(&self, query: &ForwardQuery) -> RoutingResult {
        // The guard looks at the request's own RCODE, before any lookup.
        if !query.request_is_clean() {
            debug!(
                domain = %query.name,
                rcode = query.request_rcode,
                "Request header carries a non-zero RCODE, rejecting"
            );
            return RoutingResult::Reject(ResponseStatus::ServerFailure);
        }

        // lookup() normalizes the name to FQDN form when needed.
        let (upstream, pool) = if self.store.lookup(&query.name) {
            (self.forwarder.primary(), UpstreamPool::Primary)
        } else {
            (self.forwarder.active_secondary(), UpstreamPool::Secondary)
        };

        debug!(
            domain = %query.name,
            pool = pool.as_str(),
            upstream = %upstream,
            "Query routed"
        );

        RoutingResult::ForwardTo { upstream, pool }
    }

    pub fn forwarder(&self) -> &ForwarderConfig {
        &self.forwarder
    }
}
