pub mod dns;
pub mod domains;
pub mod forwarding;
pub mod routing;

pub use dns::HandleQueryUseCase;
pub use domains::ReloadDomainsUseCase;
pub use forwarding::ForwardQueryUseCase;
pub use routing::RouteQueryUseCase;
