mod reload_domains;

pub use reload_domains::ReloadDomainsUseCase;
