use crate::use_cases::{ForwardQueryUseCase, RouteQueryUseCase};
use crate::ports::ResponseWriter;
use ferrous_split_domain::{ForwardQuery, QueryOutcome, RoutingResult};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Per-query pipeline: guard, route, forward.
///
/// Every call ends in exactly one terminal [`QueryOutcome`]. Only
/// `Forwarded` writes through the response writer.
pub struct HandleQueryUseCase {
    router: Arc<RouteQueryUseCase>,
    forwarder: Arc<ForwardQueryUseCase>,
}

impl HandleQueryUseCase {
    pub fn new(router: Arc<RouteQueryUseCase>, forwarder: Arc<ForwardQueryUseCase>) -> Self {
        Self { router, forwarder }
    }

    pub async fn execute<W>(&self, query: &ForwardQuery, writer: &mut W) -> QueryOutcome
    where
        W: ResponseWriter + ?Sized,
    {
        let upstream = match self.router.execute(query) {
            RoutingResult::Reject(status) => {
                debug!(domain = %query.name, status = %status, "Query rejected");
                return QueryOutcome::Rejected;
            }
            RoutingResult::ForwardTo { upstream, .. } => upstream,
        };

        match self
            .forwarder
            .execute(&query.raw_message, upstream, writer)
            .await
        {
            Ok(()) => QueryOutcome::Forwarded { upstream },
            Err(e) if e.is_upstream_failure() => {
                warn!(
                    domain = %query.name,
                    upstream = %upstream,
                    protocol = self.forwarder.protocol_name(),
                    error = %e,
                    "Forwarding failed"
                );
                QueryOutcome::Failed { upstream, error: e }
            }
            Err(e) => {
                error!(
                    domain = %query.name,
                    upstream = %upstream,
                    error = %e,
                    "Writing upstream reply failed"
                );
                QueryOutcome::Failed { upstream, error: e }
            }
        }
    }
}
