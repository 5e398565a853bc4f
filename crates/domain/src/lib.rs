//! Ferrous Split Domain Layer
pub mod config;
pub mod domain_set;
pub mod errors;
pub mod forward_query;
pub mod fqdn;
pub mod routing;
pub mod upstream;

pub use config::{CliOverrides, Config, ConfigError};
pub use domain_set::DomainSet;
pub use errors::DomainError;
pub use forward_query::{ForwardQuery, RCODE_NO_ERROR};
pub use fqdn::normalize_fqdn;
pub use routing::{QueryOutcome, ResponseStatus, RoutingResult, UpstreamPool};
pub use upstream::{ForwarderConfig, UpstreamAddress, DNS_PORT};
